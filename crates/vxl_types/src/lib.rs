//! Codec and in-memory representation for the compressed "VXL" voxel map
//! format used by the Ace of Spades / Voxlap family of games.
//!
//! A VXL map is a 3D grid of voxels, each either solid (carrying an RGB
//! color) or air. The on-disk encoding stores only the boundary between
//! solid and air for each vertical column: unseen interior solid voxels
//! exist but carry no stored color. This crate implements the decoder, the
//! mutable sparse store that supports random-access mutation while
//! preserving the ability to re-emit the compressed format, and both a
//! one-shot and a chunked streaming encoder.
//!
//! File I/O, a CLI, and any coordinate remapping belong to callers; this
//! crate works entirely in terms of byte buffers and `(x, y, z)` triples.

pub mod codec;
pub mod color;
pub mod error;
pub mod geometry;
pub mod key;
pub mod map;
pub mod prelude;
pub mod size;
pub mod store;
pub mod stream;

pub use color::{Rgb, DEFAULT_COLOR};
pub use error::VxlError;
pub use geometry::GeometryBitmap;
pub use key::PackedKey;
pub use map::Map;
pub use size::detect_size;
pub use store::ChunkStore;
pub use stream::StreamEncoder;
