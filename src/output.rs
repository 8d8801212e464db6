//! Output sink for merged wordlists
//!
//! A buffered, append-only writer that counts what it emits. Lines are
//! written exactly once, each with a trailing newline; there is no seeking
//! and no rewriting.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::MergeError;

pub struct OutputWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    lines_written: u64,
    bytes_written: u64,
}

impl OutputWriter {
    /// Create (or truncate) the output file with the given buffer capacity.
    pub fn create(path: PathBuf, buffer_size: usize) -> Result<Self, MergeError> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|source| MergeError::OutputUnavailable {
                path: path.clone(),
                source,
            })?;

        let writer = BufWriter::with_capacity(buffer_size, file);

        Ok(Self {
            writer,
            path,
            lines_written: 0,
            bytes_written: 0,
        })
    }

    /// Write one line followed by a newline.
    pub fn write_line(&mut self, line: &[u8]) -> Result<(), MergeError> {
        self.writer
            .write_all(line)
            .and_then(|()| self.writer.write_all(b"\n"))
            .map_err(|source| MergeError::OutputWrite {
                path: self.path.clone(),
                source,
            })?;
        self.lines_written += 1;
        self.bytes_written += line.len() as u64 + 1;
        Ok(())
    }

    /// Flush the buffer to disk.
    pub fn flush(&mut self) -> Result<(), MergeError> {
        self.writer.flush().map_err(|source| MergeError::OutputWrite {
            path: self.path.clone(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

impl Drop for OutputWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_lines_with_trailing_newlines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("merged.txt");

        let mut writer = OutputWriter::create(path.clone(), 1024).unwrap();
        writer.write_line(b"hello").unwrap();
        writer.write_line(b"world").unwrap();
        writer.flush().unwrap();

        assert_eq!(writer.lines_written(), 2);
        assert_eq!(writer.bytes_written(), 12);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "hello\nworld\n");
    }

    #[test]
    fn create_truncates_existing_output() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("merged.txt");
        std::fs::write(&path, "stale contents\n").unwrap();

        let writer = OutputWriter::create(path.clone(), 1024).unwrap();
        drop(writer);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn unwritable_destination_is_fatal() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("no_such_dir").join("merged.txt");

        let result = OutputWriter::create(path, 1024);
        assert!(matches!(result, Err(MergeError::OutputUnavailable { .. })));
    }

    #[test]
    fn flushes_on_drop() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("merged.txt");

        {
            let mut writer = OutputWriter::create(path.clone(), 64 * 1024).unwrap();
            writer.write_line(b"buffered").unwrap();
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "buffered\n");
    }
}
