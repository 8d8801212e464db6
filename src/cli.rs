//! Command-line interface definition for wordlist-merger
//!
//! Provides argument parsing and validation for the wordlist merging tool.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// High-performance wordlist merger for penetration testing
///
/// Weave-merge any number of wordlists into one deduplicated output,
/// interleaving the sources round-robin instead of concatenating them.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wordlist-merger",
    author = "m0h1nd4",
    version,
    about = "High-performance wordlist merger for penetration testing",
    long_about = r#"
╔══════════════════════════════════════════════════════════════════════════════╗
║                          WORDLIST-MERGER v1.0.0                              ║
║                     Weave-Merge Wordlist Deduplication                        ║
║                         For Penetration Testing                               ║
╚══════════════════════════════════════════════════════════════════════════════╝

Merge any number of wordlists into a single deduplicated output. Files are
read in lock-step rounds ("weave" order), so the output samples evenly
across all sources instead of exhausting one file before starting the next.
Every distinct line is written exactly once.

EXAMPLES:
    # Merge two wordlists into merged.txt
    wordlist-merger rockyou.txt darkweb2017.txt

    # Merge everything matching a wildcard
    wordlist-merger -o all.txt /wordlists/*.txt

    # Mix literals and wildcards
    wordlist-merger -o combo.txt base.txt leaks/dump?.txt

    # Collision-free dedup (stores line bytes instead of fingerprints)
    wordlist-merger --dedup-strategy exact -o all.txt *.txt

WILDCARD PATTERNS:
    *    matches any run of characters      (*.txt, rockyou*)
    ?    matches exactly one character      (dump?.txt matches dump1.txt,
                                             not dump10.txt)
    Wildcards match direct entries of one directory only - subdirectories
    are not descended into. No character classes, no ** recursion.
"#,
    after_help = "For more information, visit: https://github.com/m0h1nd4/wordlist-merger"
)]
pub struct Args {
    /// Input files or wildcard patterns (*.txt, dump?.txt, ...)
    #[arg(required = true, value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Output file
    #[arg(short, long, value_name = "FILE", default_value = "merged.txt")]
    pub output: PathBuf,

    /// Deduplication strategy
    #[arg(long, value_enum, default_value_t = DedupStrategy::Fingerprint)]
    pub dedup_strategy: DedupStrategy,

    /// Read buffer size per input file
    #[arg(long, value_name = "SIZE", default_value = "128KB")]
    pub buffer_size: String,

    /// Write buffer size for the output file
    #[arg(long, value_name = "SIZE", default_value = "1MB")]
    pub output_buffer_size: String,

    /// Quiet mode - minimal output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// How seen lines are remembered during the merge
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DedupStrategy {
    /// 64-bit fingerprints: fixed memory per line, theoretical collision risk
    Fingerprint,
    /// Owned line bytes: collision-free, memory grows with line content
    Exact,
}

impl Args {
    /// Parse the per-file read buffer size to bytes
    pub fn parse_buffer_size(&self) -> anyhow::Result<usize> {
        parse_size(&self.buffer_size)
    }

    /// Parse the output write buffer size to bytes
    pub fn parse_output_buffer_size(&self) -> anyhow::Result<usize> {
        parse_size(&self.output_buffer_size)
    }
}

/// Parse human-readable size string to bytes
fn parse_size(size_str: &str) -> anyhow::Result<usize> {
    let size_str = size_str.trim().to_uppercase();

    let (num_str, multiplier) = if size_str.ends_with("GB") {
        (&size_str[..size_str.len() - 2], 1024 * 1024 * 1024)
    } else if size_str.ends_with("MB") {
        (&size_str[..size_str.len() - 2], 1024 * 1024)
    } else if size_str.ends_with("KB") {
        (&size_str[..size_str.len() - 2], 1024)
    } else if size_str.ends_with("B") {
        (&size_str[..size_str.len() - 1], 1)
    } else {
        (size_str.as_str(), 1)
    };

    let num: usize = num_str
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid size format: '{}'", size_str))?;

    Ok(num * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_at_least_one_pattern() {
        assert!(Args::try_parse_from(["wordlist-merger"]).is_err());
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["wordlist-merger", "a.txt"]).unwrap();

        assert_eq!(args.patterns, vec!["a.txt"]);
        assert_eq!(args.output, PathBuf::from("merged.txt"));
        assert_eq!(args.dedup_strategy, DedupStrategy::Fingerprint);
        assert_eq!(args.parse_buffer_size().unwrap(), 128 * 1024);
        assert_eq!(args.parse_output_buffer_size().unwrap(), 1024 * 1024);
        assert!(!args.quiet);
        assert!(!args.verbose);
    }

    #[test]
    fn patterns_keep_input_order() {
        let args =
            Args::try_parse_from(["wordlist-merger", "b.txt", "a.txt", "*.lst"]).unwrap();
        assert_eq!(args.patterns, vec!["b.txt", "a.txt", "*.lst"]);
    }

    #[test]
    fn output_flag() {
        let args =
            Args::try_parse_from(["wordlist-merger", "-o", "all.txt", "a.txt"]).unwrap();
        assert_eq!(args.output, PathBuf::from("all.txt"));
    }

    #[test]
    fn exact_strategy_flag() {
        let args = Args::try_parse_from([
            "wordlist-merger",
            "--dedup-strategy",
            "exact",
            "a.txt",
        ])
        .unwrap();
        assert_eq!(args.dedup_strategy, DedupStrategy::Exact);
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("64MB").unwrap(), 64 * 1024 * 1024);
        assert_eq!(parse_size("8GB").unwrap(), 8 * 1024 * 1024 * 1024);
        assert_eq!(parse_size("1024KB").unwrap(), 1024 * 1024);
        assert_eq!(parse_size("128kb").unwrap(), 128 * 1024);
        assert_eq!(parse_size("512B").unwrap(), 512);
        assert_eq!(parse_size("4096").unwrap(), 4096);
        assert!(parse_size("lots").is_err());
    }
}
