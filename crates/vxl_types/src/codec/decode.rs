//! Column-span decoding.

use crate::color::Rgb;
use crate::error::VxlError;
use crate::geometry::GeometryBitmap;
use crate::store::ChunkStore;

use super::SpanHeader;

/// A cursor over an immutable byte slice, tracking its offset for
/// [`VxlError::Truncated`] reporting.
struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	fn read_u8(&mut self) -> Result<u8, VxlError> {
		let b = *self.bytes.get(self.pos).ok_or(VxlError::Truncated {
			offset: self.pos,
			expected: 1,
			actual: self.bytes.len() - self.pos,
		})?;
		self.pos += 1;
		Ok(b)
	}

	fn read_header(&mut self) -> Result<SpanHeader, VxlError> {
		Ok(SpanHeader {
			length: self.read_u8()?,
			color_start: self.read_u8()?,
			color_end: self.read_u8()?,
			air_start: self.read_u8()?,
		})
	}

	fn read_color(&mut self) -> Result<Rgb, VxlError> {
		if self.pos + 4 > self.bytes.len() {
			return Err(VxlError::Truncated {
				offset: self.pos,
				expected: 4,
				actual: self.bytes.len() - self.pos,
			});
		}
		let word = u32::from_le_bytes(self.bytes[self.pos..self.pos + 4].try_into().unwrap());
		self.pos += 4;
		Ok(Rgb::from_wire(word))
	}
}

/// Decodes every column of a `w * h * d` map from `bytes`, in (y, x) order.
///
/// Returns the reconstructed geometry and sparse color store.
pub fn decode_all(
	bytes: &[u8],
	w: usize,
	h: usize,
	d: usize,
) -> Result<(GeometryBitmap, ChunkStore), VxlError> {
	let mut geometry = GeometryBitmap::new(w, h, d);
	let mut store = ChunkStore::new(w, h);
	let mut cursor = Cursor::new(bytes);

	for y in 0..h {
		for x in 0..w {
			decode_column(&mut cursor, x, y, d, &mut geometry, &mut store)?;
		}
	}
	Ok((geometry, store))
}

/// Decodes a single column's span chain, advancing `cursor` past it.
fn decode_column(
	cursor: &mut Cursor<'_>,
	x: usize,
	y: usize,
	d: usize,
	geometry: &mut GeometryBitmap,
	store: &mut ChunkStore,
) -> Result<(), VxlError> {
	loop {
		let header = cursor.read_header()?;
		let color_start = header.color_start as usize;
		let color_end = header.color_end as usize;

		// `top_words` is the length of the color_start..=color_end run; a
		// well-formed header never has color_start more than one past
		// color_end (that would be a negative-length run), so check before
		// the subtraction instead of letting it underflow.
		let top_words = (color_end + 1).checked_sub(color_start).ok_or(VxlError::MalformedSpan {
			x,
			y,
			reason: "color_start is greater than color_end + 1",
		})?;

		// `air_start` is `run_end + 1` for a column's terminal span (see
		// encode.rs), which can legitimately equal `d` when the run
		// reaches the map's last row. `d` can be 256, which doesn't fit
		// this one-byte field, so the encoder writes that case wrapped
		// to 0. A genuine terminal-span `air_start` is always `>
		// color_end` (it is one past the end of a run that starts no
		// earlier than `color_end`), so a literal value `<= color_end`
		// can only be that wraparound and is reinterpreted as `d`.
		let air_start = header.air_start as usize;
		let air_start = if header.length == 0 && air_start <= color_end { d } else { air_start };

		// Top run: color_start..=color_end, present whenever color_end >=
		// color_start (empty for the degenerate all-air terminator, where
		// color_end = color_start - 1).
		if top_words > 0 {
			for z in color_start..=color_end {
				if z >= d {
					return Err(VxlError::ZOutOfRange { x, y, z, depth: d });
				}
				let color = cursor.read_color()?;
				geometry.set_solid(x, y, z, true);
				store.push_sorted_unchecked(x, y, z, color);
			}
		}

		// Uncolored interior, bridging the top run to wherever the bottom
		// run (or, for the terminal span, real air) begins.
		for z in (color_end + 1)..air_start {
			if z >= d {
				return Err(VxlError::ZOutOfRange { x, y, z, depth: d });
			}
			geometry.set_solid(x, y, z, true);
		}

		if header.length == 0 {
			return Ok(());
		}

		let bottom_words = (header.length as usize)
			.checked_sub(1 + top_words)
			.ok_or(VxlError::MalformedSpan {
				x,
				y,
				reason: "span length too short for its own color_start/color_end range",
			})?;

		for i in 0..bottom_words {
			let z = air_start + i;
			if z >= d {
				return Err(VxlError::ZOutOfRange { x, y, z, depth: d });
			}
			let color = cursor.read_color()?;
			geometry.set_solid(x, y, z, true);
			store.push_sorted_unchecked(x, y, z, color);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::codec::encode::encode_all;

	#[test]
	fn empty_map_round_trips_through_terminator_spans() {
		let geometry = GeometryBitmap::new(4, 4, 8);
		let store = ChunkStore::new(4, 4);
		let bytes = encode_all(&geometry, &store, 4, 4, 8);

		let (decoded_geometry, decoded_store) = decode_all(&bytes, 4, 4, 8).unwrap();
		for y in 0..4 {
			for x in 0..4 {
				for z in 0..8 {
					assert!(!decoded_geometry.is_solid(x, y, z));
				}
				assert_eq!(decoded_store.iterate_column(x, y).count(), 0);
			}
		}
	}

	#[test]
	fn truncated_input_reports_truncated_error() {
		let err = decode_all(&[0, 0], 1, 1, 8).unwrap_err();
		assert!(matches!(err, VxlError::Truncated { .. }));
	}

	#[test]
	fn non_terminal_span_with_color_start_past_color_end_reports_malformed_error() {
		// length=5, color_start=10, color_end=2, air_start=20: a non-terminal
		// header whose top run is negative-length, rather than panicking on
		// the `top_words` subtraction.
		let bytes = [5, 10, 2, 20];
		let err = decode_all(&bytes, 1, 1, 32).unwrap_err();
		assert!(matches!(err, VxlError::MalformedSpan { .. }));
	}
}
