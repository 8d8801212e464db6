//! Progress display and diagnostics
//!
//! Diagnostics are a capability injected into the expander and the merger:
//! both take a [`Reporter`] and never touch the console directly, so
//! embedders and tests can capture warnings. [`ConsoleReporter`] is the
//! interactive implementation with styled warnings and a bytes progress bar;
//! [`NullReporter`] discards everything.

use std::time::{Duration, Instant};

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Periodic snapshot handed to [`Reporter::progress`] during a merge.
#[derive(Debug, Clone, Copy)]
pub struct ProgressUpdate {
    /// Completed round-robin rounds.
    pub rounds: u64,
    /// Lines read across all files so far.
    pub lines_read: u64,
    /// Lines emitted (first occurrences) so far.
    pub unique_lines: u64,
    /// Decoded input bytes consumed so far.
    pub bytes_read: u64,
    /// Cursors still alive.
    pub open_files: usize,
}

/// Diagnostics capability used by both the expander and the merger.
///
/// The core operates correctly with a no-op implementation; nothing it does
/// depends on these callbacks.
pub trait Reporter {
    /// A recoverable per-pattern or per-file problem.
    fn warning(&self, message: &str);

    /// Periodic merge status. Default: ignore.
    fn progress(&self, update: &ProgressUpdate) {
        let _ = update;
    }
}

/// Discards all diagnostics.
pub struct NullReporter;

impl Reporter for NullReporter {
    fn warning(&self, _message: &str) {}
}

/// Console implementation: styled warnings plus an indicatif bytes bar
/// during the merge phase.
pub struct ConsoleReporter {
    bar: ProgressBar,
    quiet: bool,
}

impl ConsoleReporter {
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: ProgressBar::hidden(),
            quiet,
        }
    }

    /// Switch to a bytes progress bar for the merge phase.
    pub fn begin_merge(&mut self, total_bytes: u64) {
        if !self.quiet {
            self.bar = create_bytes_progress_bar(total_bytes, "Weave-merging...");
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Reporter for ConsoleReporter {
    fn warning(&self, message: &str) {
        self.bar.suspend(|| print_warning(message));
    }

    fn progress(&self, update: &ProgressUpdate) {
        self.bar.set_position(update.bytes_read);
        self.bar.set_message(format!(
            "{} unique lines",
            format_number(update.unique_lines)
        ));
    }
}

/// Print the application banner
pub fn print_banner() {
    let banner = r#"
╔══════════════════════════════════════════════════════════════╗
║                                                              ║
║                   WORDLIST-MERGER  v1.0.0                    ║
║                                                              ║
║          Weave-Merge Wordlist Deduplication Engine           ║
║                   For Penetration Testing                    ║
║                                                              ║
╚══════════════════════════════════════════════════════════════╝
"#;

    println!("{}", banner.green());
}

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    println!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Print a bullet point
pub fn print_bullet(text: &str) {
    println!("  {} {}", "•".green(), text);
}

/// Create a bytes-based progress bar
pub fn create_bytes_progress_bar(total_bytes: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total_bytes);

    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.green/dim}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}")
            .unwrap()
            .progress_chars("█▓░")
    );

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Statistics for one merge run
#[derive(Debug, Clone)]
pub struct MergeStats {
    pub files_resolved: usize,
    pub files_merged: usize,
    pub files_skipped: usize,
    pub rounds: u64,
    pub total_lines: u64,
    pub unique_lines: u64,
    pub duplicate_lines: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
    /// Approximate seen-set memory at the end of the run.
    pub seen_set_bytes: usize,
    start_time: Instant,
}

impl MergeStats {
    pub fn new() -> Self {
        Self {
            files_resolved: 0,
            files_merged: 0,
            files_skipped: 0,
            rounds: 0,
            total_lines: 0,
            unique_lines: 0,
            duplicate_lines: 0,
            bytes_read: 0,
            bytes_written: 0,
            seen_set_bytes: 0,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn lines_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.total_lines as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Print final statistics
    pub fn print_summary(&self) {
        println!();
        println!("{}", "═".repeat(60).green());
        println!("{}", "                      MERGE COMPLETE".green().bold());
        println!("{}", "═".repeat(60).green());
        println!();

        println!("  {} {}", "Files merged:   ".green(),
            format!("{}/{}", self.files_merged, self.files_resolved));
        if self.files_skipped > 0 {
            println!("  {} {}", "Files skipped:  ".red(),
                format_number(self.files_skipped as u64).red());
        }
        println!("  {} {}", "Data read:      ".green(), ByteSize(self.bytes_read));
        println!();

        println!("  {} {}", "Total lines:    ".green(),
            format_number(self.total_lines));
        println!("  {} {}", "Duplicates:     ".yellow(),
            format_number(self.duplicate_lines));
        println!("  {} {}", "Unique output:  ".green().bold(),
            format_number(self.unique_lines).green().bold());
        println!();

        println!("  {} {}", "Output size:    ".green(), ByteSize(self.bytes_written));
        println!("  {} ~{}", "Seen-set memory:".green(),
            ByteSize(self.seen_set_bytes as u64));
        println!("  {} {:?}", "Duration:       ".green(), self.elapsed());
        println!("  {} {:.2} lines/sec", "Throughput:     ".green(),
            self.lines_per_second());
        println!();
        println!("{}", "═".repeat(60).green());
    }
}

impl Default for MergeStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Reporter that collects warnings for inspection in tests.
#[cfg(test)]
pub(crate) struct CollectingReporter {
    pub warnings: std::cell::RefCell<Vec<String>>,
    pub updates: std::cell::RefCell<Vec<ProgressUpdate>>,
}

#[cfg(test)]
impl CollectingReporter {
    pub fn new() -> Self {
        Self {
            warnings: std::cell::RefCell::new(Vec::new()),
            updates: std::cell::RefCell::new(Vec::new()),
        }
    }
}

#[cfg(test)]
impl Reporter for CollectingReporter {
    fn warning(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }

    fn progress(&self, update: &ProgressUpdate) {
        self.updates.borrow_mut().push(*update);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn null_reporter_ignores_everything() {
        let reporter = NullReporter;
        reporter.warning("nothing happens");
        reporter.progress(&ProgressUpdate {
            rounds: 1,
            lines_read: 2,
            unique_lines: 2,
            bytes_read: 10,
            open_files: 1,
        });
    }

    #[test]
    fn collecting_reporter_captures_warnings() {
        let reporter = CollectingReporter::new();
        reporter.warning("first");
        reporter.warning("second");
        assert_eq!(*reporter.warnings.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn stats_throughput_is_finite() {
        let mut stats = MergeStats::new();
        stats.total_lines = 100;
        assert!(stats.lines_per_second().is_finite());
    }
}
