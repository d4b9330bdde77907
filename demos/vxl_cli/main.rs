//! VXL Voxel Map CLI Utility
//!
//! A command-line tool for inspecting, round-tripping, and streaming VXL
//! voxel map files.
//!
//! # Features
//!
//! - **info**: Report a VXL file's detected dimensions and column stats
//! - **roundtrip**: Decode then re-encode a VXL file, reporting size delta
//! - **stream**: Write a VXL file out via the chunked streaming encoder
//!
//! # Usage
//!
//! ```bash
//! cargo run --example vxl_cli info map.vxl
//! cargo run --example vxl_cli info map.vxl --format json
//! cargo run --example vxl_cli roundtrip map.vxl 512 512 64 output.vxl
//! cargo run --example vxl_cli stream map.vxl 512 512 64 output.vxl
//! ```

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use vxl_rs::prelude::*;

#[derive(Parser)]
#[command(name = "vxl_cli")]
#[command(author = "vxl-rs project")]
#[command(version = "1.0")]
#[command(about = "VXL voxel map utility - inspect, round-trip, and stream VXL files", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
	/// Human-readable text
	Text,
	/// JSON format
	Json,
}

#[derive(serde::Serialize)]
struct InfoReport {
	path: String,
	width: usize,
	height: usize,
	depth: usize,
	file_size: usize,
	bytes_per_column: f64,
}

#[derive(Subcommand)]
enum Commands {
	/// Report a VXL file's detected dimensions without a full decode
	Info {
		/// Input VXL file path
		#[arg(value_name = "INPUT_VXL")]
		input: PathBuf,

		/// Output format
		#[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},

	/// Decode a VXL file, then re-encode it, reporting the size delta
	Roundtrip {
		/// Input VXL file path
		#[arg(value_name = "INPUT_VXL")]
		input: PathBuf,

		/// Map width
		width: usize,

		/// Map height
		height: usize,

		/// Map depth
		depth: usize,

		/// Output VXL file path
		#[arg(value_name = "OUTPUT_VXL")]
		output: PathBuf,
	},

	/// Decode a VXL file and re-encode it via the chunked streaming encoder
	Stream {
		/// Input VXL file path
		#[arg(value_name = "INPUT_VXL")]
		input: PathBuf,

		/// Map width
		width: usize,

		/// Map height
		height: usize,

		/// Map depth
		depth: usize,

		/// Output VXL file path
		#[arg(value_name = "OUTPUT_VXL")]
		output: PathBuf,

		/// Size in bytes of each chunk read from the stream
		#[arg(short, long, default_value_t = 4096)]
		chunk_size: usize,
	},
}

fn handle_info(input: PathBuf, format: OutputFormat) -> anyhow::Result<()> {
	let bytes = fs::read(&input)?;
	let (w, h, d) = detect_size(&bytes)?;
	let report = InfoReport {
		path: input.display().to_string(),
		width: w,
		height: h,
		depth: d,
		file_size: bytes.len(),
		bytes_per_column: bytes.len() as f64 / (w * h) as f64,
	};

	match format {
		OutputFormat::Text => {
			println!("{}", report.path);
			println!("  detected size: {}x{}x{}", report.width, report.height, report.depth);
			println!("  file size:     {} bytes", report.file_size);
			println!("  bytes/column:  {:.1}", report.bytes_per_column);
		}
		OutputFormat::Json => {
			println!("{}", serde_json::to_string_pretty(&report)?);
		}
	}

	Ok(())
}

fn handle_roundtrip(input: PathBuf, width: usize, height: usize, depth: usize, output: PathBuf) -> anyhow::Result<()> {
	let original = fs::read(&input)?;
	log::info!("decoding {} ({width}x{height}x{depth})", input.display());
	let map = Map::from_bytes(&original, width, height, depth)?;

	let rewritten = map.write();
	fs::write(&output, &rewritten)?;

	let delta = rewritten.len() as i64 - original.len() as i64;
	println!(
		"✓ {} -> {} ({} -> {} bytes, {:+} bytes)",
		input.display(),
		output.display(),
		original.len(),
		rewritten.len(),
		delta
	);

	Ok(())
}

fn handle_stream(
	input: PathBuf,
	width: usize,
	height: usize,
	depth: usize,
	output: PathBuf,
	chunk_size: usize,
) -> anyhow::Result<()> {
	let original = fs::read(&input)?;
	let map = Map::from_bytes(&original, width, height, depth)?;

	let mut encoder = StreamEncoder::new(&map);
	let mut out = Vec::with_capacity(encoder.total_len());
	let mut chunk = vec![0u8; chunk_size.max(1)];
	loop {
		let n = encoder.read(&mut chunk)?;
		if n == 0 {
			break;
		}
		out.extend_from_slice(&chunk[..n]);
	}

	fs::write(&output, &out)?;
	println!(
		"✓ streamed {} -> {} in {} byte chunks ({} bytes total)",
		input.display(),
		output.display(),
		chunk_size,
		out.len()
	);

	Ok(())
}

fn main() -> anyhow::Result<()> {
	env_logger::init();
	let cli = Cli::parse();

	match cli.command {
		Commands::Info { input, format } => handle_info(input, format),
		Commands::Roundtrip {
			input,
			width,
			height,
			depth,
			output,
		} => handle_roundtrip(input, width, height, depth, output),
		Commands::Stream {
			input,
			width,
			height,
			depth,
			output,
			chunk_size,
		} => handle_stream(input, width, height, depth, output, chunk_size),
	}
}
