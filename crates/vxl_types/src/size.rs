//! Map size detection (`libvxl_size` in the reference library): recovers
//! `(w, h, d)` from a raw byte buffer by scanning spans, without decoding
//! into a [`crate::Map`].
//!
//! This is a heuristic, not an exact inverse of the encoder: it assumes a
//! square map (`w == h`) and rounds the observed maximum `z` up to the next
//! power of two. Both assumptions match the reference implementation and
//! hold for every map this format is actually used for, but callers that
//! know their own dimensions should prefer those over this scan.

use crate::error::VxlError;

/// Scans `bytes` as a column-span stream and returns `(w, h, d)`.
///
/// Counts columns by counting length-0 (terminator) spans, and tracks the
/// highest `z` referenced by any span. Errors if the buffer is truncated
/// mid-span, if the column count isn't a perfect square, or if no complete
/// column was found at all.
pub fn detect_size(bytes: &[u8]) -> Result<(usize, usize, usize), VxlError> {
	let mut pos = 0usize;
	let mut columns = 0usize;
	let mut max_z: usize = 0;

	while pos < bytes.len() {
		if pos + 4 > bytes.len() {
			return Err(VxlError::Truncated {
				offset: pos,
				expected: 4,
				actual: bytes.len() - pos,
			});
		}
		let length = bytes[pos] as usize;
		let color_start = bytes[pos + 1] as usize;
		let color_end = bytes[pos + 2] as usize;
		let air_start = bytes[pos + 3] as usize;
		pos += 4;

		let top_words = if color_end + 1 > color_start { color_end + 1 - color_start } else { 0 };
		if top_words > 0 {
			max_z = max_z.max(color_end);
		}
		pos = advance(pos, top_words, bytes.len())?;

		if length == 0 {
			columns += 1;
			max_z = max_z.max(air_start.saturating_sub(1));
			continue;
		}

		let bottom_words = length.checked_sub(1 + top_words).ok_or(VxlError::MalformedSpan {
			x: 0,
			y: 0,
			reason: "span length too short for its own color_start/color_end range",
		})?;
		if bottom_words > 0 {
			max_z = max_z.max(air_start + bottom_words - 1);
		}
		pos = advance(pos, bottom_words, bytes.len())?;
	}

	if columns == 0 {
		return Err(VxlError::MalformedSpan {
			x: 0,
			y: 0,
			reason: "no terminated column found while detecting map size",
		});
	}

	let side = (columns as f64).sqrt().round() as usize;
	if side == 0 || side * side != columns {
		return Err(VxlError::MalformedSpan {
			x: 0,
			y: 0,
			reason: "column count is not a perfect square; cannot infer a square width/height",
		});
	}

	let mut d = 1usize;
	while d < max_z + 1 {
		d <<= 1;
	}
	Ok((side, side, d))
}

fn advance(pos: usize, words: usize, len: usize) -> Result<usize, VxlError> {
	let bytes = words * 4;
	let new_pos = pos.checked_add(bytes).ok_or(VxlError::Truncated {
		offset: pos,
		expected: bytes,
		actual: len.saturating_sub(pos),
	})?;
	if new_pos > len {
		return Err(VxlError::Truncated {
			offset: pos,
			expected: bytes,
			actual: len - pos,
		});
	}
	Ok(new_pos)
}
