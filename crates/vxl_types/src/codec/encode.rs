//! Column-span encoding: the inverse of [`super::decode`].

use crate::color::{Rgb, DEFAULT_COLOR};
use crate::geometry::GeometryBitmap;
use crate::store::ChunkStore;

use super::{solid_runs, SpanHeader};

/// Encodes every column of a `w * h * d` map, in (y, x) order, the same
/// traversal order [`super::decode::decode_all`] expects.
pub fn encode_all(geometry: &GeometryBitmap, store: &ChunkStore, w: usize, h: usize, d: usize) -> Vec<u8> {
	let mut out = Vec::new();
	for y in 0..h {
		for x in 0..w {
			encode_column(geometry, store, x, y, d, &mut out);
		}
	}
	out
}

/// The byte length a single column would occupy if encoded now, without
/// actually building it. Used by the streaming encoder to locate a column's
/// offset without re-encoding every column ahead of it.
pub fn column_encoded_len(geometry: &GeometryBitmap, store: &ChunkStore, x: usize, y: usize, d: usize) -> usize {
	let mut len = 0;
	for span in plan_column(geometry, store, x, y, d) {
		len += 4 + span.top_count * 4 + span.bottom_count * 4;
	}
	len
}

/// One planned span of a column: a maximal solid run split into its top and
/// bottom color-carrying extents, with the uncolored interior implied.
struct PlannedSpan {
	run_start: usize,
	run_end: usize,
	top_count: usize,
	bottom_count: usize,
	/// Whether another header follows this one in the column's span chain.
	is_terminal: bool,
}

/// Works out the span plan for one column: which runs exist, and how much
/// of each run's top and bottom is color-carrying.
///
/// The top extent of a run is the longest prefix (from its start) of voxels
/// that actually have a stored color; the bottom extent is the longest
/// suffix of the *remaining* voxels that do, read from the run's end
/// backward. A run whose every voxel is stored (e.g. an isolated pillar
/// exposed on every side) is carried entirely by the top extent, leaving
/// nothing for the bottom one. A voxel with no stored color sandwiched
/// between two genuinely interior voxels is the one case this format can't
/// express — its color is simply dropped.
fn plan_column(geometry: &GeometryBitmap, store: &ChunkStore, x: usize, y: usize, d: usize) -> Vec<PlannedSpan> {
	let runs = solid_runs(geometry, x, y, d);
	if runs.is_empty() {
		return Vec::new();
	}

	let mut spans = Vec::with_capacity(runs.len());
	for (i, &(run_start, run_end)) in runs.iter().enumerate() {
		let is_last_run = i == runs.len() - 1;
		let run_len = run_end - run_start + 1;

		let mut top_count = 0;
		while top_count < run_len && store.find(x, y, run_start + top_count).is_some() {
			top_count += 1;
		}
		if top_count == 0 {
			// Should not occur if the store's exposure invariant holds; fall
			// back to a one-voxel top run with the default color rather than
			// dropping the voxel from the encoding entirely.
			top_count = 1;
		}

		let mut bottom_count = 0;
		if !is_last_run && top_count < run_len {
			while bottom_count < run_len - top_count && store.find(x, y, run_end - bottom_count).is_some() {
				bottom_count += 1;
			}
			if bottom_count == 0 {
				bottom_count = 1;
			}
		}

		spans.push(PlannedSpan {
			run_start,
			run_end,
			top_count,
			bottom_count,
			is_terminal: is_last_run,
		});
	}
	spans
}

/// Encodes one column's span chain, appending it to `out`.
pub fn encode_column(geometry: &GeometryBitmap, store: &ChunkStore, x: usize, y: usize, d: usize, out: &mut Vec<u8>) {
	let spans = plan_column(geometry, store, x, y, d);

	if spans.is_empty() {
		// Degenerate terminator for an all-air column: color_start = d,
		// color_end = d - 1 signals a zero-length top run. `d` can be 256,
		// which doesn't fit this one-byte field, so that particular depth
		// can't use the `d`-mirroring form (256 would wrap to 0 and collide
		// with a legitimate color_start = 0 top run). Use a depth-independent
		// sentinel instead: color_start = 1, color_end = 0 is a negative-
		// length run no real column ever produces (a real run always has
		// color_start <= color_end), and air_start = 1 keeps the interior
		// bridge in decode.rs empty too.
		let header = if d <= u8::MAX as usize {
			SpanHeader {
				length: 0,
				color_start: d as u8,
				color_end: (d - 1) as u8,
				air_start: d as u8,
			}
		} else {
			SpanHeader {
				length: 0,
				color_start: 1,
				color_end: 0,
				air_start: 1,
			}
		};
		out.extend_from_slice(&header.to_bytes());
		return;
	}

	// Should not occur if the store's exposure invariant holds; substitutes
	// the default color for a solid-exposed voxel with no stored entry
	// rather than panicking or corrupting the span layout.
	let mut color_at = |z: usize| -> Rgb { store.find(x, y, z).unwrap_or(DEFAULT_COLOR) };

	for span in &spans {
		let color_start = span.run_start;
		let color_end = span.run_start + span.top_count - 1;
		// For a non-terminal span this is where the bottom color run
		// begins; for the terminal span there is no bottom run, so it's
		// simply one past the run's own end (covering any remaining
		// uncolored interior down to where the run actually stops). A
		// non-terminal run_end is always < d - 1 (there is always another
		// run after it), so this never exceeds d - 1 here; but a terminal
		// run can reach run_end == d - 1, making air_start == d, which is
		// 256 when d == 256 and doesn't fit the one-byte field below. That
		// case is written wrapped (to 0) and decode.rs's terminal-span
		// handling reinterprets the wraparound as d.
		let air_start = span.run_end + 1 - span.bottom_count;

		let length = if span.is_terminal {
			0u8
		} else {
			(1 + span.top_count + span.bottom_count) as u8
		};

		let header = SpanHeader {
			length,
			color_start: color_start as u8,
			color_end: color_end as u8,
			air_start: air_start as u8,
		};
		out.extend_from_slice(&header.to_bytes());

		for z in color_start..=color_end {
			out.extend_from_slice(&color_at(z).to_wire().to_le_bytes());
		}
		if !span.is_terminal {
			for i in 0..span.bottom_count {
				let z = air_start + i;
				out.extend_from_slice(&color_at(z).to_wire().to_le_bytes());
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::codec::decode::decode_all;

	fn thin_pillar(d: usize) -> (GeometryBitmap, ChunkStore) {
		let mut geometry = GeometryBitmap::new(2, 2, d);
		let mut store = ChunkStore::new(2, 2);
		geometry.set_solid(0, 0, 2, true);
		store.replace_or_insert(0, 0, 2, Rgb::new(10, 20, 30));
		(geometry, store)
	}

	#[test]
	fn single_voxel_run_round_trips() {
		let (geometry, store) = thin_pillar(8);
		let bytes = encode_all(&geometry, &store, 2, 2, 8);
		let (decoded_geometry, decoded_store) = decode_all(&bytes, 2, 2, 8).unwrap();
		assert!(decoded_geometry.is_solid(0, 0, 2));
		assert_eq!(decoded_store.find(0, 0, 2), Some(Rgb::new(10, 20, 30)));
	}

	#[test]
	fn run_reaching_floor_round_trips_geometry() {
		let mut geometry = GeometryBitmap::new(1, 1, 4);
		let mut store = ChunkStore::new(1, 1);
		for z in 0..4 {
			geometry.set_solid(0, 0, z, true);
		}
		store.replace_or_insert(0, 0, 0, Rgb::new(1, 1, 1));

		let bytes = encode_all(&geometry, &store, 1, 1, 4);
		let (decoded_geometry, decoded_store) = decode_all(&bytes, 1, 1, 4).unwrap();
		for z in 0..4 {
			assert!(decoded_geometry.is_solid(0, 0, z));
		}
		assert_eq!(decoded_store.find(0, 0, 0), Some(Rgb::new(1, 1, 1)));
	}

	#[test]
	fn fully_exposed_pillar_preserves_every_color() {
		// every voxel in the run is independently colored (as if exposed on
		// every side); the whole run should be carried by the top extent.
		let mut geometry = GeometryBitmap::new(1, 1, 8);
		let mut store = ChunkStore::new(1, 1);
		for z in 0..5 {
			geometry.set_solid(0, 0, z, true);
			store.replace_or_insert(0, 0, z, Rgb::new(z as u8, 0, 0));
		}
		// leaves z=5..7 air; this is the column's only (and therefore
		// terminal) run, so its whole extent is still carried by the top
		// count regardless of the air above it.
		let bytes = encode_all(&geometry, &store, 1, 1, 8);
		let (decoded_geometry, decoded_store) = decode_all(&bytes, 1, 1, 8).unwrap();
		for z in 0..5 {
			assert!(decoded_geometry.is_solid(0, 0, z));
			assert_eq!(decoded_store.find(0, 0, z), Some(Rgb::new(z as u8, 0, 0)));
		}
		for z in 5..8 {
			assert!(!decoded_geometry.is_solid(0, 0, z));
		}
	}

	#[test]
	fn empty_column_round_trips_at_max_depth() {
		// d = 256 is the spec's maximum depth; the all-air terminator can't
		// use its usual d-mirroring encoding (256 doesn't fit a u8), so this
		// locks in the depth-independent sentinel instead.
		let geometry = GeometryBitmap::new(1, 1, 256);
		let store = ChunkStore::new(1, 1);
		let bytes = encode_all(&geometry, &store, 1, 1, 256);
		let (decoded_geometry, decoded_store) = decode_all(&bytes, 1, 1, 256).unwrap();
		for z in 0..256 {
			assert!(!decoded_geometry.is_solid(0, 0, z));
		}
		assert_eq!(decoded_store.iterate_column(0, 0).count(), 0);
	}

	#[test]
	fn terminal_run_reaching_max_depth_round_trips() {
		// a run that reaches z = 255 in a d = 256 column needs air_start =
		// 256 to bridge its uncolored interior, which wraps to 0 in the
		// one-byte wire field; this locks in decode.rs's reinterpretation of
		// that wraparound.
		let mut geometry = GeometryBitmap::new(1, 1, 256);
		let mut store = ChunkStore::new(1, 1);
		for z in 128..256 {
			geometry.set_solid(0, 0, z, true);
		}
		store.replace_or_insert(0, 0, 128, Rgb::new(5, 6, 7));

		let bytes = encode_all(&geometry, &store, 1, 1, 256);
		let (decoded_geometry, decoded_store) = decode_all(&bytes, 1, 1, 256).unwrap();
		for z in 128..256 {
			assert!(decoded_geometry.is_solid(0, 0, z));
		}
		for z in 0..128 {
			assert!(!decoded_geometry.is_solid(0, 0, z));
		}
		assert_eq!(decoded_store.find(0, 0, 128), Some(Rgb::new(5, 6, 7)));
	}
}
