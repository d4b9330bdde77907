//! The chunked sparse color store.

use crate::color::Rgb;
use crate::key::PackedKey;

/// Edge length of a chunk's (x, y) tile, in voxels.
pub const CHUNK_DIM: usize = 16;

/// Number of entries a chunk's backing array grows by when it fills up.
pub const CHUNK_GROWTH: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColorEntry {
	key: PackedKey,
	color: Rgb,
}

/// A 16x16 spatial tile owning the sorted array of color entries for every
/// column inside it.
///
/// Entries are kept sorted strictly ascending by [`PackedKey`], and since a
/// packed key orders `(y, x, z)`, every column's entries form one
/// contiguous run inside a chunk's array — `column_range` finds it with two
/// binary searches instead of a linear scan.
#[derive(Debug, Clone, Default)]
struct Chunk {
	entries: Vec<ColorEntry>,
}

impl Chunk {
	fn ensure_spare_capacity(&mut self) {
		if self.entries.len() == self.entries.capacity() {
			self.entries.reserve(CHUNK_GROWTH);
		}
	}

	fn find(&self, key: PackedKey) -> Option<Rgb> {
		self.entries.binary_search_by_key(&key, |e| e.key).ok().map(|i| self.entries[i].color)
	}

	fn replace_or_insert(&mut self, key: PackedKey, color: Rgb) {
		match self.entries.binary_search_by_key(&key, |e| e.key) {
			Ok(i) => self.entries[i].color = color,
			Err(i) => {
				self.ensure_spare_capacity();
				self.entries.insert(i, ColorEntry { key, color });
			}
		}
	}

	fn erase(&mut self, key: PackedKey) -> bool {
		match self.entries.binary_search_by_key(&key, |e| e.key) {
			Ok(i) => {
				self.entries.remove(i);
				true
			}
			Err(_) => false,
		}
	}

	/// Appends an entry, trusting the caller that `key` is greater than
	/// every key already present. Used only by the decoder's bulk-append
	/// fast path, which visits columns (and therefore keys) in strictly
	/// ascending order and so never needs the binary-search insert.
	fn push_sorted_unchecked(&mut self, key: PackedKey, color: Rgb) {
		debug_assert!(self.entries.last().is_none_or(|e| e.key < key));
		self.ensure_spare_capacity();
		self.entries.push(ColorEntry { key, color });
	}

	fn column_range(&self, x: usize, y: usize) -> &[ColorEntry] {
		let lo = PackedKey::pack(x, y, 0);
		let hi = PackedKey::pack(x, y, 0xFF);
		let start = self.entries.partition_point(|e| e.key < lo);
		let end = self.entries.partition_point(|e| e.key <= hi);
		&self.entries[start..end]
	}
}

/// Sparse mapping from voxel coordinate to stored color, partitioned into
/// 16x16 spatial chunks that allocate lazily.
#[derive(Debug, Clone)]
pub struct ChunkStore {
	chunks: Vec<Option<Chunk>>,
	chunk_w: usize,
}

impl ChunkStore {
	/// Allocates the (empty) chunk directory for a `w * h` column grid.
	pub fn new(w: usize, h: usize) -> Self {
		let chunk_w = w.div_ceil(CHUNK_DIM);
		let chunk_h = h.div_ceil(CHUNK_DIM);
		Self {
			chunks: vec![None; chunk_w * chunk_h],
			chunk_w,
		}
	}

	#[inline]
	fn slot(&self, x: usize, y: usize) -> usize {
		let cx = x / CHUNK_DIM;
		let cy = y / CHUNK_DIM;
		cy * self.chunk_w + cx
	}

	/// Looks up the stored color at `(x, y, z)`, if any.
	pub fn find(&self, x: usize, y: usize, z: usize) -> Option<Rgb> {
		self.chunks[self.slot(x, y)].as_ref()?.find(PackedKey::pack(x, y, z))
	}

	/// Inserts or overwrites the stored color at `(x, y, z)`.
	pub fn replace_or_insert(&mut self, x: usize, y: usize, z: usize, color: Rgb) {
		let slot = self.slot(x, y);
		self.chunks[slot].get_or_insert_with(Chunk::default).replace_or_insert(
			PackedKey::pack(x, y, z),
			color,
		);
	}

	/// Removes the stored color at `(x, y, z)`, if present. Returns whether
	/// an entry was actually removed.
	pub fn erase(&mut self, x: usize, y: usize, z: usize) -> bool {
		let slot = self.slot(x, y);
		match &mut self.chunks[slot] {
			Some(chunk) => chunk.erase(PackedKey::pack(x, y, z)),
			None => false,
		}
	}

	/// Decoder-only bulk append: pushes `(x, y, z) -> color` onto its owning
	/// chunk without a binary search, trusting that the caller visits
	/// voxels in ascending packed-key order (the decoder does, since it
	/// walks columns `y` outer, `x` inner, `z` ascending — exactly packed
	/// key order).
	pub fn push_sorted_unchecked(&mut self, x: usize, y: usize, z: usize, color: Rgb) {
		let slot = self.slot(x, y);
		self.chunks[slot]
			.get_or_insert_with(Chunk::default)
			.push_sorted_unchecked(PackedKey::pack(x, y, z), color);
	}

	/// Iterates the stored colors of one column in ascending `z`.
	pub fn iterate_column(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, Rgb)> + '_ {
		let range = match &self.chunks[self.slot(x, y)] {
			Some(chunk) => chunk.column_range(x, y),
			None => &[][..],
		};
		range.iter().map(|e| (e.key.z(), e.color))
	}

	/// Total number of stored color entries across every chunk. Useful for
	/// diagnostics (the demo CLI reports it); not used by the codec itself.
	pub fn entry_count(&self) -> usize {
		self.chunks.iter().flatten().map(|c| c.entries.len()).sum()
	}
}
