//! Weave-merge engine
//!
//! Reads all input files in lock-step rounds: each round takes one line from
//! every file that still has lines, in the order the files were resolved.
//! A line is written to the output only the first time its content is seen,
//! so the result is a deduplicated interleaving that samples evenly across
//! the sources instead of exhausting one file before starting the next.
//!
//! Single-threaded by design: one control thread advances one open handle
//! per input file. The bottleneck is I/O and hashing, and the deterministic
//! weave order falls out of the round-robin schedule for free.

use std::path::PathBuf;

use bstr::ByteSlice;

use crate::cli::{Args, DedupStrategy};
use crate::cursor::FileCursor;
use crate::dedup::create_deduplicator;
use crate::error::MergeError;
use crate::output::OutputWriter;
use crate::progress::{MergeStats, ProgressUpdate, Reporter};

/// Rounds between progress callbacks.
const PROGRESS_INTERVAL: u64 = 10_000;

/// Rough bytes-per-line estimate used to pre-size the seen-set.
const ESTIMATED_BYTES_PER_LINE: u64 = 10;

/// Merger configuration
pub struct MergeConfig {
    pub output: PathBuf,
    pub strategy: DedupStrategy,
    /// Read buffer capacity per input file.
    pub buffer_size: usize,
    /// Write buffer capacity for the output file.
    pub output_buffer_size: usize,
}

impl MergeConfig {
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        Ok(Self {
            output: args.output.clone(),
            strategy: args.dedup_strategy,
            buffer_size: args.parse_buffer_size()?,
            output_buffer_size: args.parse_output_buffer_size()?,
        })
    }
}

/// The weave merger
pub struct Merger {
    config: MergeConfig,
}

impl Merger {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    /// Weave-merge `files` into the configured output.
    ///
    /// The output is opened (and truncated) before any input file, so an
    /// unavailable destination aborts before processing starts. Files that
    /// fail to open are warned about and excluded; if none open, the merge
    /// aborts and the freshly created output file is left empty.
    pub fn merge(
        &self,
        files: &[PathBuf],
        reporter: &dyn Reporter,
    ) -> Result<MergeStats, MergeError> {
        let mut stats = MergeStats::new();
        stats.files_resolved = files.len();

        let mut out =
            OutputWriter::create(self.config.output.clone(), self.config.output_buffer_size)?;

        let mut cursors: Vec<FileCursor> = Vec::with_capacity(files.len());
        for path in files {
            match FileCursor::open(path, self.config.buffer_size) {
                Ok(cursor) => cursors.push(cursor),
                Err(e) => {
                    stats.files_skipped += 1;
                    reporter.warning(&format!(
                        "Could not open file {}: {e}",
                        path.display()
                    ));
                }
            }
        }

        if cursors.is_empty() {
            return Err(MergeError::NoFilesOpened {
                candidates: files.len(),
            });
        }
        stats.files_merged = cursors.len();
        log::debug!("weave-merging {} files", cursors.len());

        let estimated_lines = estimated_input_bytes(files) / ESTIMATED_BYTES_PER_LINE;
        let mut dedup = create_deduplicator(self.config.strategy, estimated_lines as usize);

        let mut rounds = 0u64;
        while !cursors.is_empty() {
            rounds += 1;

            for cursor in cursors.iter_mut() {
                match cursor.read_line() {
                    Ok(Some(line)) => {
                        stats.total_lines += 1;
                        if dedup.insert(line) {
                            out.write_line(line)?;
                            stats.unique_lines += 1;
                        } else {
                            stats.duplicate_lines += 1;
                            log::trace!("duplicate dropped: {}", line.as_bstr());
                        }
                    }
                    // Cursor marked itself dead at end-of-file.
                    Ok(None) => {}
                    // A mid-stream read error retires the cursor, not the merge.
                    Err(e) => {
                        reporter.warning(&format!(
                            "Error reading {}: {e}",
                            cursor.path().display()
                        ));
                        cursor.kill();
                    }
                }
            }

            // Dropping dead cursors at the round boundary releases their
            // handles; retain preserves the weave order of the survivors.
            for cursor in &cursors {
                if !cursor.is_alive() {
                    stats.bytes_read += cursor.bytes_read();
                }
            }
            cursors.retain(FileCursor::is_alive);

            if rounds % PROGRESS_INTERVAL == 0 {
                reporter.progress(&ProgressUpdate {
                    rounds,
                    lines_read: stats.total_lines,
                    unique_lines: stats.unique_lines,
                    bytes_read: stats.bytes_read
                        + cursors.iter().map(FileCursor::bytes_read).sum::<u64>(),
                    open_files: cursors.len(),
                });
            }
        }

        out.flush()?;
        debug_assert_eq!(stats.unique_lines, out.lines_written());
        debug_assert_eq!(stats.unique_lines as usize, dedup.len());

        stats.rounds = rounds;
        stats.bytes_written = out.bytes_written();
        stats.seen_set_bytes = dedup.memory_usage();

        reporter.progress(&ProgressUpdate {
            rounds,
            lines_read: stats.total_lines,
            unique_lines: stats.unique_lines,
            bytes_read: stats.bytes_read,
            open_files: 0,
        });

        Ok(stats)
    }
}

/// Total size of the input files, for pre-sizing the seen-set and the
/// progress bar. Files that cannot be statted contribute zero.
pub fn estimated_input_bytes(files: &[PathBuf]) -> u64 {
    files
        .iter()
        .filter_map(|path| std::fs::metadata(path).ok())
        .map(|meta| meta.len())
        .sum()
}
