//! Error types for VXL decoding.

use thiserror::Error;

/// Errors that can occur when decoding a VXL byte stream into a [`crate::Map`].
///
/// Construction from a well-formed buffer never fails; these only surface
/// when the input does not respect the column-span encoding described by the
/// format (truncated buffers, span headers that overrun the buffer, or span
/// data that implies voxels outside the map's declared depth).
#[derive(Debug, Error)]
pub enum VxlError {
	/// The buffer ended in the middle of a span header or color word.
	#[error(
		"truncated VXL stream: expected at least {expected} more bytes at offset {offset}, found {actual}"
	)]
	Truncated {
		/// Byte offset at which the read was attempted.
		offset: usize,
		/// Number of bytes the read required.
		expected: usize,
		/// Number of bytes actually remaining in the buffer.
		actual: usize,
	},

	/// A span's header implies a `z` value outside `[0, depth)`.
	#[error("span at column ({x}, {y}) references z={z}, outside the map depth {depth}")]
	ZOutOfRange {
		/// Column X coordinate.
		x: usize,
		/// Column Y coordinate.
		y: usize,
		/// The offending z value.
		z: usize,
		/// Map depth.
		depth: usize,
	},

	/// A span header described a run with `color_end < color_start`, or a
	/// bottom-run length that underflowed.
	#[error("malformed span at column ({x}, {y}): {reason}")]
	MalformedSpan {
		/// Column X coordinate.
		x: usize,
		/// Column Y coordinate.
		y: usize,
		/// Human-readable description of the malformed field.
		reason: &'static str,
	},
}
