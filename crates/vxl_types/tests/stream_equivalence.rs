//! The streaming encoder must produce exactly the same bytes as the
//! one-shot `Map::write`, regardless of how the caller chunks its reads.

use std::io::Read;

use vxl_types::prelude::*;

const W: usize = 24;
const H: usize = 24;
const D: usize = 40;

fn build_map() -> Map {
	let mut map = Map::new_empty(W, H, D);
	for y in 0..H {
		for x in 0..W {
			if (x * 7 + y * 3) % 11 == 0 {
				for z in 0..D {
					map.setair(x, y, z);
				}
			}
		}
	}
	map
}

#[test]
fn stream_matches_oneshot_across_chunk_sizes() {
	let map = build_map();
	let expected = map.write();

	for chunk_size in [1usize, 2, 3, 7, 64, 4096] {
		let mut encoder = StreamEncoder::new(&map);
		let mut out = Vec::new();
		let mut buf = vec![0u8; chunk_size];
		loop {
			let n = encoder.read(&mut buf).expect("stream read must not fail");
			if n == 0 {
				break;
			}
			out.extend_from_slice(&buf[..n]);
		}
		assert_eq!(out, expected, "chunk size {chunk_size} produced divergent output");
	}
}

#[test]
fn stream_total_len_matches_oneshot_len() {
	let map = build_map();
	let expected = map.write();
	let encoder = StreamEncoder::new(&map);
	assert_eq!(encoder.total_len(), expected.len());
}

#[test]
fn stream_can_be_read_one_byte_at_a_time_and_resume_mid_column() {
	let map = build_map();
	let expected = map.write();

	let mut encoder = StreamEncoder::new(&map);
	let mut out = Vec::with_capacity(expected.len());
	let mut byte = [0u8; 1];
	loop {
		let n = encoder.read(&mut byte).unwrap();
		if n == 0 {
			break;
		}
		out.push(byte[0]);
	}
	assert_eq!(out, expected);
}
