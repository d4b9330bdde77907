//! Prelude module for `vxl_internal`.
//!
//! # Examples
//!
//! ```rust
//! use vxl_internal::prelude::*;
//!
//! let map = Map::new_empty(64, 64, 64);
//! let bytes = map.write();
//! let reloaded = Map::from_bytes(&bytes, 64, 64, 64).unwrap();
//! assert_eq!(reloaded.is_solid(0, 0, 32), map.is_solid(0, 0, 32));
//! ```

#[doc(inline)]
pub use vxl_types::prelude::*;

// Re-export the entire vxl_types module for advanced usage.
#[doc(inline)]
pub use vxl_types;
