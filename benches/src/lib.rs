//! Benchmark helper utilities for vxl-rs
//!
//! This module provides utilities for generating synthetic voxel maps for
//! benchmarking the encode/decode/stream paths, since no real VXL map
//! assets were retrieved with the corpus.

use vxl_types::map::Map;

/// Builds a square map of side `size` and depth `depth` with an undulating
/// heightmap surface (a sine-wave terrain), each column colored by height.
///
/// This exercises the encoder's realistic case: a thin colored crust over a
/// thick uncolored solid interior, the common shape for real terrain.
pub fn generate_terrain_map(size: usize, depth: usize) -> Map {
	let mut map = Map::new_empty(size, size, depth);

	for y in 0..size {
		for x in 0..size {
			let wave = ((x as f64 * 0.1).sin() + (y as f64 * 0.1).cos()) * (depth as f64 / 8.0);
			let surface_z = ((depth as f64 / 2.0) + wave).clamp(1.0, (depth - 1) as f64) as usize;

			for z in 0..depth {
				if z >= surface_z {
					map.set(x, y, z, color_for_height(z, depth));
				} else {
					map.setair(x, y, z);
				}
			}
		}
	}

	map
}

/// Builds a square map where every column is an isolated single-voxel
/// pillar, exercising the encoder's fully-exposed-run path (every voxel in
/// the run independently colored, no uncolored interior).
pub fn generate_sparse_pillars_map(size: usize, depth: usize) -> Map {
	let mut map = Map::new_empty(size, size, depth);

	for y in 0..size {
		for x in 0..size {
			for z in 0..depth {
				map.setair(x, y, z);
			}
			if (x + y) % 4 == 0 {
				map.set(x, y, depth / 2, color_for_height(depth / 2, depth));
			}
		}
	}

	map
}

fn color_for_height(z: usize, depth: usize) -> u32 {
	let shade = ((z * 255) / depth.max(1)) as u32;
	(shade << 16) | (shade << 8) | shade
}

/// Common benchmark map sizes (width == height, both square).
pub mod sizes {
	/// Tiny map: 16x16 columns
	pub const TINY: usize = 16;
	/// Small map: 64x64 columns
	pub const SMALL: usize = 64;
	/// Medium map: 256x256 columns, matching the common Ace of Spades map size
	pub const MEDIUM: usize = 256;
	/// Large map: 512x512 columns
	pub const LARGE: usize = 512;

	/// Standard map depth used across the Ace of Spades / Voxlap family
	pub const DEPTH: usize = 64;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn terrain_map_round_trips_through_bytes() {
		let map = generate_terrain_map(sizes::TINY, sizes::DEPTH);
		let bytes = map.write();
		let reloaded = Map::from_bytes(&bytes, sizes::TINY, sizes::TINY, sizes::DEPTH).unwrap();
		assert_eq!(reloaded.width(), map.width());
		assert_eq!(reloaded.height(), map.height());
	}

	#[test]
	fn sparse_pillars_map_round_trips_through_bytes() {
		let map = generate_sparse_pillars_map(sizes::TINY, sizes::DEPTH);
		let bytes = map.write();
		Map::from_bytes(&bytes, sizes::TINY, sizes::TINY, sizes::DEPTH).unwrap();
	}
}
