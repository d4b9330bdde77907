//! Internal crate for `vxl-rs`.
//!
//! Separated into its own crate to enable simple dynamic linking via
//! `vxl_dylib`, and should not be used directly.
//!
//! # Examples
//!
//! ```rust
//! use vxl_internal::prelude::*;
//!
//! let map = Map::new_empty(64, 64, 64);
//! assert!(map.is_solid(0, 0, 32));
//! ```

/// `use vxl_internal::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export vxl_types for convenience.
pub use vxl_types;
