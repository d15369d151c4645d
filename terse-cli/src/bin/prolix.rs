//! `prolix` — expand Terse `.trpx` files back to greyscale TIFF.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::error;

use terse_cli::{has_extension, init_logging, BatchStats};

/// Expand Terse `.trpx` files back into greyscale TIFF images.
///
/// Every argument that is a regular file with a .trpx (or legacy .trs)
/// extension is rewritten as a sibling .tif file; the original is removed
/// on success. Failures are logged and the batch continues.
#[derive(Parser, Debug)]
#[command(name = "prolix")]
#[command(version)]
#[command(about = "Expand Terse .trpx files back into greyscale TIFF images")]
struct Args {
    /// Files to expand; paths without a .trpx/.trs extension are skipped
    files: Vec<PathBuf>,

    /// Print summary statistics when done
    #[arg(short, long)]
    verbose: bool,

    /// Print each file as it is expanded
    #[arg(short, long)]
    list: bool,

    /// Keep the input files instead of removing them
    #[arg(short, long)]
    keep: bool,
}

fn expand_one(path: &Path, keep: bool) -> anyhow::Result<(u64, u64, PathBuf)> {
    let input = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let output = terse::expand(&input).with_context(|| format!("expanding {}", path.display()))?;
    let target = path.with_extension("tif");
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
        if !path.is_file() || !has_extension(path, &["trpx", "trs"]) {
            continue;
        }
        match expand_one(path, args.keep) {
            Ok((bytes_in, bytes_out, target)) => {
                stats.record(bytes_in, bytes_out);
                if args.list {
                    println!("Expanded: {} -> {}", path.display(), target.display());
                }
            }
            Err(err) => {
                stats.fail();
                error!("{err:#}");
            }
        }
    }

    if args.verbose {
        stats.print_summary("expanded");
    }
}
