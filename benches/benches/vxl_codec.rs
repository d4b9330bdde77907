//! Benchmark suite for the VXL span codec
//!
//! This benchmark measures the performance of VXL decoding, encoding, and
//! streaming, and helps identify hot paths in the column codec.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use std::hint::black_box;
use std::io::Read;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use vxl_benches::{generate_sparse_pillars_map, generate_terrain_map, sizes};
use vxl_types::map::Map;
use vxl_types::stream::StreamEncoder;

/// Benchmark decoding encoded terrain maps of increasing size
fn bench_decode_terrain(c: &mut Criterion) {
	let mut group = c.benchmark_group("vxl_decode_terrain");

	for &size in &[sizes::TINY, sizes::SMALL, sizes::MEDIUM] {
		let map = generate_terrain_map(size, sizes::DEPTH);
		let bytes = map.write();

		group.throughput(Throughput::Bytes(bytes.len() as u64));
		group.bench_with_input(BenchmarkId::new("decode", size), &bytes, |b, bytes| {
			b.iter(|| {
				let result = Map::from_bytes(black_box(bytes), size, size, sizes::DEPTH);
				black_box(result)
			});
		});
	}

	group.finish();
}

/// Benchmark encoding terrain maps of increasing size
fn bench_encode_terrain(c: &mut Criterion) {
	let mut group = c.benchmark_group("vxl_encode_terrain");

	for &size in &[sizes::TINY, sizes::SMALL, sizes::MEDIUM] {
		let map = generate_terrain_map(size, sizes::DEPTH);

		group.throughput(Throughput::Elements((size * size) as u64));
		group.bench_with_input(BenchmarkId::new("encode", size), &map, |b, map| {
			b.iter(|| {
				let result = black_box(map).write();
				black_box(result)
			});
		});
	}

	group.finish();
}

/// Benchmark the fully-exposed-pillar case, where every voxel in a run is
/// independently colored rather than sharing a thin top/bottom crust
fn bench_encode_sparse_pillars(c: &mut Criterion) {
	let mut group = c.benchmark_group("vxl_encode_sparse_pillars");

	let map = generate_sparse_pillars_map(sizes::SMALL, sizes::DEPTH);
	group.throughput(Throughput::Elements((sizes::SMALL * sizes::SMALL) as u64));
	group.bench_function("encode", |b| {
		b.iter(|| {
			let result = black_box(&map).write();
			black_box(result)
		});
	});

	group.finish();
}

/// Benchmark the streaming encoder against the one-shot `Map::write`
fn bench_stream_vs_oneshot(c: &mut Criterion) {
	let mut group = c.benchmark_group("vxl_stream_vs_oneshot");

	let map = generate_terrain_map(sizes::SMALL, sizes::DEPTH);

	group.bench_function("oneshot_write", |b| {
		b.iter(|| {
			let result = black_box(&map).write();
			black_box(result)
		});
	});

	group.bench_function("stream_read_4k_chunks", |b| {
		b.iter(|| {
			let mut encoder = StreamEncoder::new(black_box(&map));
			let mut chunk = [0u8; 4096];
			let mut total = 0usize;
			loop {
				let n = encoder.read(&mut chunk).unwrap();
				if n == 0 {
					break;
				}
				total += n;
			}
			black_box(total)
		});
	});

	group.finish();
}

/// Benchmark `detect_size` heuristic scanning
fn bench_detect_size(c: &mut Criterion) {
	let mut group = c.benchmark_group("vxl_detect_size");

	let map = generate_terrain_map(sizes::MEDIUM, sizes::DEPTH);
	let bytes = map.write();

	group.throughput(Throughput::Bytes(bytes.len() as u64));
	group.bench_function("detect_size", |b| {
		b.iter(|| {
			let result = vxl_types::size::detect_size(black_box(&bytes));
			black_box(result)
		});
	});

	group.finish();
}

criterion_group!(
	benches,
	bench_decode_terrain,
	bench_encode_terrain,
	bench_encode_sparse_pillars,
	bench_stream_vs_oneshot,
	bench_detect_size,
);

criterion_main!(benches);
