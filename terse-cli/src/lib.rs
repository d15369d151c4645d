//! Shared plumbing for the `terse` and `prolix` command-line tools.

use std::path::Path;
use std::time::Instant;

use console::style;

/// Initialise logging to stderr; DEBUG level when verbose.
pub fn init_logging(verbose: bool) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Whether the path ends in one of the given extensions, ignoring case.
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|x| e.eq_ignore_ascii_case(x)))
        .unwrap_or(false)
}

/// Format bytes as a human-readable size.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Running totals for one batch of files.
pub struct BatchStats {
    /// Files converted successfully.
    pub converted: usize,
    /// Files that failed and were left in place.
    pub failed: usize,
    /// Total input bytes of converted files.
    pub bytes_in: u64,
    /// Total output bytes of converted files.
    pub bytes_out: u64,
    started: Instant,
}

impl Default for BatchStats {
    fn default() -> Self {
        BatchStats::new()
    }
}

impl BatchStats {
    /// Fresh counters, starting the clock.
    pub fn new() -> Self {
        BatchStats {
            converted: 0,
            failed: 0,
            bytes_in: 0,
            bytes_out: 0,
            started: Instant::now(),
        }
    }

    /// Record one successful conversion.
    pub fn record(&mut self, bytes_in: u64, bytes_out: u64) {
        self.converted += 1;
        self.bytes_in += bytes_in;
        self.bytes_out += bytes_out;
    }

    /// Record one failure.
    pub fn fail(&mut self) {
        self.failed += 1;
    }

    /// Output size as a fraction of input size, in percent.
    pub fn output_ratio_percent(&self) -> f64 {
        if self.bytes_in == 0 {
            return 0.0;
        }
        self.bytes_out as f64 * 100.0 / self.bytes_in as f64
    }

    /// Print the verbose summary block.
    pub fn print_summary(&self, verb: &str) {
        println!();
        println!("{}", style("Summary:").cyan().bold());
        println!("  Files {verb}:  {}", style(self.converted).green());
        if self.failed > 0 {
            println!("  Failed:            {}", style(self.failed).red());
        }
        println!("  Input size:        {}", format_size(self.bytes_in));
        println!("  Output size:       {}", format_size(self.bytes_out));
        println!(
            "  Size ratio:        {}",
            style(format!("{:.1}%", self.output_ratio_percent())).yellow()
        );
        println!(
            "  Elapsed:           {:.2}s",
            self.started.elapsed().as_secs_f64()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("a/b/frame.tif"), &["tif", "tiff"]));
        assert!(has_extension(Path::new("frame.TIFF"), &["tif", "tiff"]));
        assert!(!has_extension(Path::new("frame.trpx"), &["tif", "tiff"]));
        assert!(!has_extension(Path::new("frame"), &["tif"]));
        assert!(!has_extension(&PathBuf::from(".tif"), &["tif"]));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(format_size(2 * 1024 * 1024 * 1024), "2.00 GB");
    }

    #[test]
    fn test_batch_stats() {
        let mut stats = BatchStats::new();
        stats.record(1000, 300);
        stats.record(1000, 300);
        stats.fail();
        assert_eq!(stats.converted, 2);
        assert_eq!(stats.failed, 1);
        assert!((stats.output_ratio_percent() - 30.0).abs() < 1e-9);

        let empty = BatchStats::new();
        assert_eq!(empty.output_ratio_percent(), 0.0);
    }
}
