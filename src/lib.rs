#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `vxl-rs` reads, mutates, writes, and streams voxel maps in the
//! compressed VXL format used by the Ace of Spades / Voxlap family of
//! games.
//!
//! ```rust
//! use vxl_rs::prelude::*;
//!
//! let map = Map::new_empty(64, 64, 64);
//! assert!(map.is_solid(0, 0, 32));
//! assert_eq!(map.get(0, 0, 32), DEFAULT_COLOR);
//! ```

pub use vxl_internal::*;

#[cfg(all(feature = "dynamic_linking", not(target_family = "wasm")))]
#[allow(unused_imports)]
use vxl_dylib;
