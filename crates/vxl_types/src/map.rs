//! The map facade: wraps the geometry bitmap, chunked color store, and span
//! codec behind point queries and point mutations.

use crate::codec::{decode_all, encode_all};
use crate::color::{Rgb, DEFAULT_COLOR};
use crate::error::VxlError;
use crate::geometry::GeometryBitmap;
use crate::store::ChunkStore;

/// A mutable, in-memory VXL voxel map.
///
/// Owns its geometry bitmap and chunked color store, and maintains the
/// stored-color discipline — a color entry exists iff its voxel is solid
/// and surface-exposed — across every mutation.
#[derive(Debug, Clone)]
pub struct Map {
	geometry: GeometryBitmap,
	store: ChunkStore,
	w: usize,
	h: usize,
	d: usize,
}

impl Map {
	/// Builds an empty map: the lower half (`z >= d/2`) solid and filled with
	/// [`DEFAULT_COLOR`], the upper half air. Only the exposed boundary voxel
	/// of each column (`z == d/2`) gets a stored color entry — the rest of
	/// the solid half is interior by construction.
	pub fn new_empty(w: usize, h: usize, d: usize) -> Self {
		let mut geometry = GeometryBitmap::new(w, h, d);
		let mut store = ChunkStore::new(w, h);
		let surface_z = d / 2;
		for y in 0..h {
			for x in 0..w {
				for z in surface_z..d {
					geometry.set_solid(x, y, z, true);
				}
				store.push_sorted_unchecked(x, y, surface_z, DEFAULT_COLOR);
			}
		}
		Self { geometry, store, w, h, d }
	}

	/// Decodes a VXL byte buffer into a map of the given dimensions.
	pub fn from_bytes(bytes: &[u8], w: usize, h: usize, d: usize) -> Result<Self, VxlError> {
		let (geometry, store) = decode_all(bytes, w, h, d)?;
		Ok(Self { geometry, store, w, h, d })
	}

	/// Map width.
	pub fn width(&self) -> usize {
		self.w
	}

	/// Map height.
	pub fn height(&self) -> usize {
		self.h
	}

	/// Map depth.
	pub fn depth(&self) -> usize {
		self.d
	}

	/// Read-only access to the geometry bitmap, for callers that need to
	/// inspect it directly (e.g. the streaming encoder's size precomputation).
	pub(crate) fn geometry(&self) -> &GeometryBitmap {
		&self.geometry
	}

	/// Read-only access to the chunked color store.
	pub(crate) fn store(&self) -> &ChunkStore {
		&self.store
	}

	#[inline]
	fn in_bounds(&self, x: usize, y: usize, z: usize) -> bool {
		x < self.w && y < self.h && z < self.d
	}

	/// Whether `(x, y, z)` is solid. Out-of-bounds coordinates return `false`.
	pub fn is_solid(&self, x: usize, y: usize, z: usize) -> bool {
		self.in_bounds(x, y, z) && self.geometry.is_solid(x, y, z)
	}

	/// Whether `(x, y, z)` is solid and has at least one air neighbor.
	/// Out-of-bounds coordinates return `false`.
	pub fn on_surface(&self, x: usize, y: usize, z: usize) -> bool {
		self.in_bounds(x, y, z) && self.geometry.is_exposed(x, y, z)
	}

	/// The color at `(x, y, z)`: the stored color if one exists, else
	/// [`DEFAULT_COLOR`] if solid, else black (air). Out of bounds returns
	/// black.
	pub fn get(&self, x: usize, y: usize, z: usize) -> Rgb {
		if !self.in_bounds(x, y, z) {
			return Rgb::masked(0);
		}
		if let Some(color) = self.store.find(x, y, z) {
			return color;
		}
		if self.geometry.is_solid(x, y, z) {
			DEFAULT_COLOR
		} else {
			Rgb::masked(0)
		}
	}

	/// Scans `z = 0` upward for the first solid voxel in column `(x, y)`,
	/// returning its color and depth. `None` if the column is all air or the
	/// coordinate is out of bounds.
	pub fn gettop(&self, x: usize, y: usize) -> Option<(Rgb, usize)> {
		if x >= self.w || y >= self.h {
			return None;
		}
		for z in 0..self.d {
			if self.geometry.is_solid(x, y, z) {
				return Some((self.get(x, y, z), z));
			}
		}
		None
	}

	/// Recomputes whether `(x, y, z)` should carry a stored color, and
	/// synchronizes the store accordingly. A no-op for out-of-bounds
	/// coordinates. Called on a changed voxel and each of its six neighbors
	/// after every mutation to restore the stored-color discipline.
	fn sync_exposure(&mut self, x: isize, y: isize, z: isize) {
		if x < 0 || y < 0 || z < 0 {
			return;
		}
		let (x, y, z) = (x as usize, y as usize, z as usize);
		if !self.in_bounds(x, y, z) {
			return;
		}
		if !self.geometry.is_solid(x, y, z) {
			self.store.erase(x, y, z);
			return;
		}
		if self.geometry.is_exposed(x, y, z) {
			if self.store.find(x, y, z).is_none() {
				self.store.replace_or_insert(x, y, z, DEFAULT_COLOR);
			}
		} else {
			self.store.erase(x, y, z);
		}
	}

	fn sync_voxel_and_neighbors(&mut self, x: usize, y: usize, z: usize) {
		let (xi, yi, zi) = (x as isize, y as isize, z as isize);
		self.sync_exposure(xi, yi, zi);
		self.sync_exposure(xi - 1, yi, zi);
		self.sync_exposure(xi + 1, yi, zi);
		self.sync_exposure(xi, yi - 1, zi);
		self.sync_exposure(xi, yi + 1, zi);
		self.sync_exposure(xi, yi, zi - 1);
		self.sync_exposure(xi, yi, zi + 1);
	}

	/// Sets `(x, y, z)` solid with the given color (masked to 24-bit RGB).
	/// Silently a no-op out of bounds. Restores the stored-color discipline
	/// for the voxel and its six neighbors afterward — if the voxel ends up fully
	/// enclosed, its just-set color is dropped again, since the format
	/// can't express interior colors.
	pub fn set(&mut self, x: usize, y: usize, z: usize, color: u32) {
		if !self.in_bounds(x, y, z) {
			return;
		}
		self.geometry.set_solid(x, y, z, true);
		self.store.replace_or_insert(x, y, z, Rgb::masked(color));
		self.sync_voxel_and_neighbors(x, y, z);
	}

	/// Sets `(x, y, z)` to air, removing any stored color. Silently a no-op
	/// out of bounds. Neighbors that become newly exposed gain
	/// [`DEFAULT_COLOR`].
	pub fn setair(&mut self, x: usize, y: usize, z: usize) {
		if !self.in_bounds(x, y, z) {
			return;
		}
		self.geometry.set_solid(x, y, z, false);
		self.store.erase(x, y, z);
		self.sync_voxel_and_neighbors(x, y, z);
	}

	/// One-shot encode: the full column-span byte stream for this map.
	pub fn write(&self) -> Vec<u8> {
		encode_all(&self.geometry, &self.store, self.w, self.h, self.d)
	}
}
