//! Prelude module for `vxl_types`.
//!
//! # Examples
//!
//! ```rust
//! use vxl_types::prelude::*;
//!
//! let map = Map::new_empty(64, 64, 64);
//! assert!(map.is_solid(0, 0, 32));
//! ```

#[doc(inline)]
pub use crate::codec;
#[doc(inline)]
pub use crate::color::{Rgb, DEFAULT_COLOR};
#[doc(inline)]
pub use crate::error::VxlError;
#[doc(inline)]
pub use crate::geometry::GeometryBitmap;
#[doc(inline)]
pub use crate::key::PackedKey;
#[doc(inline)]
pub use crate::map::Map;
#[doc(inline)]
pub use crate::size::detect_size;
#[doc(inline)]
pub use crate::store::ChunkStore;
#[doc(inline)]
pub use crate::stream::StreamEncoder;
