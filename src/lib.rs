//! # Wordlist Merger
//!
//! High-performance wordlist merging tool for penetration testing.
//!
//! ## Features
//!
//! - **Weave merge**: sources are interleaved round-robin, one line per file
//!   per round, so the output samples evenly across all inputs instead of
//!   exhausting one file before starting the next
//! - **Streaming deduplication**: every distinct line is written exactly
//!   once; by default only a 64-bit fingerprint per unique line is kept in
//!   memory, with an exact mode for collision-free dedup
//! - **Wildcard expansion**: `*` and `?` patterns resolve against a single
//!   directory, deterministically
//! - **Encoding tolerance**: UTF-16 wordlists (with BOM) decode
//!   transparently; byte wordlists pass through untouched
//! - **Injected diagnostics**: warnings and progress go through a reporter
//!   capability, so embedders decide what reaches the console
//!
//! ## Usage
//!
//! ```bash
//! # Merge two wordlists into merged.txt
//! wordlist-merger rockyou.txt darkweb2017.txt
//!
//! # Merge everything matching a wildcard
//! wordlist-merger -o all.txt /wordlists/*.txt
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use wordlist_merger::cli::DedupStrategy;
//! use wordlist_merger::expand::expand_patterns;
//! use wordlist_merger::merge::{MergeConfig, Merger};
//! use wordlist_merger::progress::NullReporter;
//! use std::path::PathBuf;
//!
//! let files = expand_patterns(&["wordlists/*.txt".to_string()], &NullReporter)?;
//!
//! let config = MergeConfig {
//!     output: PathBuf::from("merged.txt"),
//!     strategy: DedupStrategy::Fingerprint,
//!     buffer_size: 128 * 1024,
//!     output_buffer_size: 1024 * 1024,
//! };
//!
//! let stats = Merger::new(config).merge(&files, &NullReporter)?;
//! println!("{} unique lines", stats.unique_lines);
//! # Ok::<(), wordlist_merger::MergeError>(())
//! ```

pub mod cli;
pub mod cursor;
pub mod dedup;
pub mod error;
pub mod expand;
pub mod merge;
pub mod output;
pub mod progress;

pub use cli::Args;
pub use error::MergeError;
pub use expand::expand_patterns;
pub use merge::{MergeConfig, Merger};
