//! `terse` — compress greyscale TIFF files to `.trpx`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::error;

use terse_cli::{has_extension, init_logging, BatchStats};

/// Compress greyscale TIFF images into Terse `.trpx` files.
///
/// Every argument that is a regular file with a .tif or .tiff extension is
/// rewritten as a sibling .trpx file; the original is removed on success.
/// Failures are logged and the batch continues.
#[derive(Parser, Debug)]
#[command(name = "terse")]
#[command(version)]
#[command(about = "Compress greyscale TIFF images into Terse .trpx files")]
struct Args {
    /// Files to compress; non-TIFF paths are skipped
    files: Vec<PathBuf>,

    /// Print summary statistics when done
    #[arg(short, long)]
    verbose: bool,

    /// Print each file as it is compressed
    #[arg(short, long)]
    list: bool,

    /// Keep the input files instead of removing them
    #[arg(short, long)]
    keep: bool,
}

fn compress_one(path: &Path, keep: bool) -> anyhow::Result<(u64, u64, PathBuf)> {
    let input = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let output = terse::compress(&input).with_context(|| format!("compressing {}", path.display()))?;
    let target = path.with_extension("trpx");
    fs::write(&target, &output).with_context(|| format!("writing {}", target.display()))?;
    if !keep {
        fs::remove_file(path).with_context(|| format!("removing {}", path.display()))?;
    }
    Ok((input.len() as u64, output.len() as u64, target))
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut stats = BatchStats::new();
    for path in &args.files {
        if !path.is_file() || !has_extension(path, &["tif", "tiff"]) {
            continue;
        }
        match compress_one(path, args.keep) {
            Ok((bytes_in, bytes_out, target)) => {
                stats.record(bytes_in, bytes_out);
                if args.list {
                    println!("Compressed: {} -> {}", path.display(), target.display());
                }
            }
            Err(err) => {
                stats.fail();
                error!("{err:#}");
            }
        }
    }

    if args.verbose {
        stats.print_summary("compressed");
    }
}
