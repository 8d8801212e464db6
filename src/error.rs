//! Fatal error taxonomy for pattern expansion and merging.
//!
//! Per-file problems (a missing literal, an unreadable directory, a file that
//! fails to open) are recovered locally and surfaced as warnings through the
//! injected reporter; only total failure is represented here.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a merge run.
#[derive(Debug, Error)]
pub enum MergeError {
    /// Every supplied pattern expanded to zero files.
    #[error("no valid input files found")]
    NoFilesResolved,

    /// Every resolved file failed to open at merge time. The output file has
    /// already been created at this point and is left empty.
    #[error("none of the {candidates} input files could be opened for weave-merge")]
    NoFilesOpened { candidates: usize },

    /// The output destination could not be opened for writing.
    #[error("could not open output file: {path}")]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An I/O error while writing an emitted line or flushing the sink.
    #[error("error writing to output file: {path}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
