//! The stream encoder: emits a map's encoded bytes in caller-bounded chunks
//! without materializing the whole buffer up front.

use std::io::{self, Read};

use crate::codec::{column_encoded_len, encode_column};
use crate::map::Map;

/// Produces the encoded byte stream of a borrowed [`Map`] across repeated
/// [`Read::read`] calls, resuming wherever the previous call left off.
///
/// Borrowing `&'a Map` is the idiomatic stand-in for the reference library's
/// runtime "streamed" flag: the borrow checker statically forbids any
/// mutation of the map for as long as a `StreamEncoder` exists, which is a
/// strictly stronger guarantee than a flag checked at each call site.
pub struct StreamEncoder<'a> {
	map: &'a Map,
	/// Cumulative byte length up to and including each column, in (y, x)
	/// traversal order. `offsets[i]` is the total size after column `i`.
	offsets: Vec<usize>,
	/// Scratch buffer holding the currently re-encoded column.
	scratch: Vec<u8>,
	/// Index, within `scratch`, of the column it currently holds. `None`
	/// until the first read.
	scratch_column: Option<usize>,
	pos: usize,
}

impl<'a> StreamEncoder<'a> {
	/// Opens a stream over `map`, precomputing the per-column offset table.
	/// O(W·H).
	pub fn new(map: &'a Map) -> Self {
		let (w, h, d) = (map.width(), map.height(), map.depth());
		let mut offsets = Vec::with_capacity(w * h);
		let mut total = 0;
		for y in 0..h {
			for x in 0..w {
				total += column_encoded_len(map.geometry(), map.store(), x, y, d);
				offsets.push(total);
			}
		}
		Self {
			map,
			offsets,
			scratch: Vec::new(),
			scratch_column: None,
			pos: 0,
		}
	}

	/// Total size of the encoded stream, in bytes.
	pub fn total_len(&self) -> usize {
		self.offsets.last().copied().unwrap_or(0)
	}

	/// Current read position, in bytes.
	pub fn position(&self) -> usize {
		self.pos
	}

	fn column_index_of(&self, byte_pos: usize) -> usize {
		self.offsets.partition_point(|&end| end <= byte_pos)
	}

	fn column_xy(&self, index: usize) -> (usize, usize) {
		let w = self.map.width();
		(index % w, index / w)
	}

	fn ensure_scratch_holds(&mut self, column: usize) {
		if self.scratch_column == Some(column) {
			return;
		}
		self.scratch.clear();
		let (x, y) = self.column_xy(column);
		encode_column(self.map.geometry(), self.map.store(), x, y, self.map.depth(), &mut self.scratch);
		self.scratch_column = Some(column);
	}

	fn column_start(&self, column: usize) -> usize {
		if column == 0 {
			0
		} else {
			self.offsets[column - 1]
		}
	}
}

impl Read for StreamEncoder<'_> {
	/// Fills `buf` with up to `buf.len()` bytes of encoded stream, resuming
	/// from the previous call's position. Returns `0` once the stream is
	/// exhausted, idempotently.
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		let total = self.total_len();
		if self.pos >= total || buf.is_empty() {
			return Ok(0);
		}
		let end = (self.pos + buf.len()).min(total);
		let mut written = 0;
		let mut cursor = self.pos;
		while cursor < end {
			let column = self.column_index_of(cursor);
			self.ensure_scratch_holds(column);
			let column_start = self.column_start(column);
			let offset_in_column = cursor - column_start;
			let take = (self.scratch.len() - offset_in_column).min(end - cursor);
			buf[written..written + take]
				.copy_from_slice(&self.scratch[offset_in_column..offset_in_column + take]);
			written += take;
			cursor += take;
		}
		self.pos = end;
		Ok(written)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stream_output_matches_one_shot_write() {
		let map = Map::new_empty(6, 6, 16);
		let one_shot = map.write();

		for chunk_size in [1usize, 3, 64, 1024] {
			let mut stream = StreamEncoder::new(&map);
			let mut collected = Vec::new();
			let mut buf = vec![0u8; chunk_size];
			loop {
				let n = stream.read(&mut buf).unwrap();
				if n == 0 {
					break;
				}
				collected.extend_from_slice(&buf[..n]);
			}
			assert_eq!(collected, one_shot, "chunk_size={chunk_size}");
		}
	}

	#[test]
	fn read_past_end_is_idempotent_zero() {
		let map = Map::new_empty(2, 2, 8);
		let mut stream = StreamEncoder::new(&map);
		let mut buf = vec![0u8; 4096];
		loop {
			if stream.read(&mut buf).unwrap() == 0 {
				break;
			}
		}
		assert_eq!(stream.read(&mut buf).unwrap(), 0);
		assert_eq!(stream.read(&mut buf).unwrap(), 0);
	}
}
