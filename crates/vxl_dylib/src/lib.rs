//! C ABI surface for `vxl-rs`, for linking into an enclosing game engine
//! written in C or C++.
//!
//! The safe Rust API (see `vxl_internal::prelude`) uses the borrow checker
//! to forbid mutating a [`Map`] while a [`StreamEncoder`] is open, in place
//! of the reference library's runtime "streamed" flag. That guarantee does
//! not cross the FFI boundary: callers of this crate must themselves honor
//! the discipline documented on [`vxl_stream_begin`] — free the stream
//! before mutating or freeing its map.
//!
//! Every exported function catches panics at the boundary and reports them
//! as a reserved negative/error sentinel rather than unwinding into foreign
//! code, which is undefined behavior.

use std::panic::{self, AssertUnwindSafe};
use std::slice;

use log::error;
use vxl_internal::vxl_types::{Map, StreamEncoder};

/// Sentinel returned by boolean-ish query functions when the call panicked.
const VXL_PANIC: i32 = -1;

fn guard<T>(default: T, f: impl FnOnce() -> T) -> T {
	match panic::catch_unwind(AssertUnwindSafe(f)) {
		Ok(value) => value,
		Err(_) => {
			error!("panic caught at vxl_dylib FFI boundary; returning sentinel");
			default
		}
	}
}

/// Creates a map. If `data` is non-null, decodes it as `w * h * d` VXL
/// bytes; if null, builds the default empty map (lower half solid). Writes
/// the new map's handle to `*out` and returns 0 on success; leaves `*out`
/// untouched and returns a negative status on decode failure or a caught
/// panic.
///
/// # Safety
/// `data` must be null or point to at least `len` readable bytes; `out`
/// must be valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vxl_create(
	w: usize,
	h: usize,
	d: usize,
	data: *const u8,
	len: usize,
	out: *mut *mut Map,
) -> i32 {
	guard(VXL_PANIC, || {
		let map = if data.is_null() {
			Map::new_empty(w, h, d)
		} else {
			// SAFETY: caller guarantees `data` is valid for `len` bytes.
			let bytes = unsafe { slice::from_raw_parts(data, len) };
			match Map::from_bytes(bytes, w, h, d) {
				Ok(map) => map,
				Err(e) => {
					error!("vxl_create: decode failed: {e}");
					return -1;
				}
			}
		};
		// SAFETY: caller guarantees `out` is writable.
		unsafe {
			*out = Box::into_raw(Box::new(map));
		}
		0
	})
}

/// Releases a map created by [`vxl_create`]. A null pointer is a no-op.
///
/// # Safety
/// `map` must be either null or a pointer previously returned by
/// [`vxl_create`] and not already freed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vxl_free(map: *mut Map) {
	if map.is_null() {
		return;
	}
	// SAFETY: caller guarantees `map` came from `vxl_create` and is owned.
	let _ = guard((), || unsafe {
		drop(Box::from_raw(map));
	});
}

/// # Safety
/// `map` must be a live pointer from [`vxl_create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vxl_is_solid(map: *const Map, x: usize, y: usize, z: usize) -> i32 {
	guard(VXL_PANIC, || {
		// SAFETY: caller guarantees `map` is live.
		let map = unsafe { &*map };
		i32::from(map.is_solid(x, y, z))
	})
}

/// # Safety
/// `map` must be a live pointer from [`vxl_create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vxl_on_surface(map: *const Map, x: usize, y: usize, z: usize) -> i32 {
	guard(VXL_PANIC, || {
		// SAFETY: caller guarantees `map` is live.
		let map = unsafe { &*map };
		i32::from(map.on_surface(x, y, z))
	})
}

/// Returns the color word at `(x, y, z)` (0x00RRGGBB), or 0 if out of
/// bounds, air, or on panic.
///
/// # Safety
/// `map` must be a live pointer from [`vxl_create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vxl_get(map: *const Map, x: usize, y: usize, z: usize) -> u32 {
	guard(0, || {
		// SAFETY: caller guarantees `map` is live.
		let map = unsafe { &*map };
		map.get(x, y, z).to_wire()
	})
}

/// Scans up from `z = 0` for the first solid voxel of column `(x, y)`.
/// Returns 1 and writes `*out_color`/`*out_z` on success, 0 if the column
/// is all air or out of bounds (outputs untouched), or [`VXL_PANIC`] on a
/// caught panic.
///
/// # Safety
/// `map` must be a live pointer from [`vxl_create`]; `out_color` and `out_z`
/// must be valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vxl_gettop(
	map: *const Map,
	x: usize,
	y: usize,
	out_color: *mut u32,
	out_z: *mut usize,
) -> i32 {
	guard(VXL_PANIC, || {
		// SAFETY: caller guarantees `map` is live.
		let map = unsafe { &*map };
		match map.gettop(x, y) {
			Some((color, z)) => {
				// SAFETY: caller guarantees `out_color`/`out_z` are writable.
				unsafe {
					*out_color = color.to_wire();
					*out_z = z;
				}
				1
			}
			None => 0,
		}
	})
}

/// # Safety
/// `map` must be a live pointer from [`vxl_create`], not concurrently
/// streamed via an open [`vxl_stream_begin`] handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vxl_set(map: *mut Map, x: usize, y: usize, z: usize, color: u32) {
	let _ = guard((), || {
		// SAFETY: caller guarantees `map` is live and exclusively held.
		let map = unsafe { &mut *map };
		map.set(x, y, z, color);
	});
}

/// # Safety
/// `map` must be a live pointer from [`vxl_create`], not concurrently
/// streamed via an open [`vxl_stream_begin`] handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vxl_setair(map: *mut Map, x: usize, y: usize, z: usize) {
	let _ = guard((), || {
		// SAFETY: caller guarantees `map` is live and exclusively held.
		let map = unsafe { &mut *map };
		map.setair(x, y, z);
	});
}

/// One-shot encode into a caller-provided buffer. Writes the number of
/// bytes written to `*out_written` and returns 0 on success; returns a
/// negative status (leaving `*out_written` untouched) if `out_buf_len` is
/// too small or a panic was caught. On the too-small case, `*out_written`
/// is still left untouched rather than reporting the required size;
/// callers that don't know their map's encoded size up front should use
/// [`vxl_stream_begin`] instead of guessing a buffer size.
///
/// # Safety
/// `map` must be a live pointer from [`vxl_create`]; `out_buf` must be
/// valid for writes of `out_buf_len` bytes; `out_written` must be valid
/// for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vxl_write(map: *const Map, out_buf: *mut u8, out_buf_len: usize, out_written: *mut usize) -> i32 {
	guard(VXL_PANIC, || {
		// SAFETY: caller guarantees `map` is live.
		let map = unsafe { &*map };
		let bytes = map.write();
		if bytes.len() > out_buf_len {
			return -1;
		}
		// SAFETY: caller guarantees `out_buf` is writable for `out_buf_len`
		// bytes, and we just checked `bytes.len() <= out_buf_len`.
		unsafe {
			std::ptr::copy_nonoverlapping(bytes.as_ptr(), out_buf, bytes.len());
			*out_written = bytes.len();
		}
		0
	})
}

/// Opens a streaming encoder over `map`. Returns null on panic.
///
/// # Safety
/// `map` must be a live pointer from [`vxl_create`] and must not be
/// mutated, freed, or handed to another `vxl_stream_begin` call until the
/// returned handle is released with [`vxl_stream_free`]. This crate cannot
/// enforce that across the FFI boundary the way the safe Rust API enforces
/// it with a borrow.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vxl_stream_begin(map: *const Map) -> *mut StreamEncoder<'static> {
	guard(std::ptr::null_mut(), || {
		// SAFETY: caller guarantees `map` outlives the stream handle, per
		// this function's documented contract; we extend the borrow to
		// 'static to cross the FFI boundary, which is sound only because
		// the caller upholds that contract.
		let map: &'static Map = unsafe { &*map };
		Box::into_raw(Box::new(StreamEncoder::new(map)))
	})
}

/// Reads up to `buf_len` bytes into `buf`, resuming from the previous call.
/// Returns bytes written, 0 at end of stream, or -1 on panic.
///
/// # Safety
/// `stream` must be a live pointer from [`vxl_stream_begin`]; `buf` must be
/// valid for writes of `buf_len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vxl_stream_read(stream: *mut StreamEncoder<'static>, buf: *mut u8, buf_len: usize) -> isize {
	use std::io::Read;
	guard(-1, || {
		// SAFETY: caller guarantees `stream` is live and exclusively held.
		let stream = unsafe { &mut *stream };
		// SAFETY: caller guarantees `buf` is writable for `buf_len` bytes.
		let out = unsafe { slice::from_raw_parts_mut(buf, buf_len) };
		match stream.read(out) {
			Ok(n) => n as isize,
			Err(e) => {
				error!("vxl_stream_read: {e}");
				-1
			}
		}
	})
}

/// Releases a stream handle created by [`vxl_stream_begin`]. A null
/// pointer is a no-op.
///
/// # Safety
/// `stream` must be either null or a pointer previously returned by
/// [`vxl_stream_begin`] and not already freed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vxl_stream_free(stream: *mut StreamEncoder<'static>) {
	if stream.is_null() {
		return;
	}
	let _ = guard((), || unsafe {
		drop(Box::from_raw(stream));
	});
}

/// Heuristically recovers `(w, h, d)` from a raw VXL buffer (`libvxl_size`
/// in the reference library). Returns 1 on success (outputs written), 0 if
/// the buffer doesn't parse as a square map, or [`VXL_PANIC`] on a caught
/// panic.
///
/// # Safety
/// `data` must point to at least `len` readable bytes; `out_w`, `out_h`,
/// `out_d` must be valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vxl_size_hint(
	data: *const u8,
	len: usize,
	out_w: *mut usize,
	out_h: *mut usize,
	out_d: *mut usize,
) -> i32 {
	guard(VXL_PANIC, || {
		// SAFETY: caller guarantees `data` is valid for `len` bytes.
		let bytes = unsafe { slice::from_raw_parts(data, len) };
		match vxl_internal::vxl_types::detect_size(bytes) {
			Ok((w, h, d)) => {
				// SAFETY: caller guarantees the three out-pointers are writable.
				unsafe {
					*out_w = w;
					*out_h = h;
					*out_d = d;
				}
				1
			}
			Err(e) => {
				error!("vxl_size_hint: {e}");
				0
			}
		}
	})
}
