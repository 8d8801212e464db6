//! Per-file read state for the weave merge.
//!
//! A [`FileCursor`] owns one open input file and hands out its lines one at a
//! time. Files are read through a BOM-sniffing decoder so UTF-16 wordlists
//! decode transparently while plain byte wordlists pass through untouched.
//! The cursor goes dead at end-of-file; dropping it releases the handle.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use encoding_rs_io::{DecodeReaderBytes, DecodeReaderBytesBuilder};

pub struct FileCursor {
    path: PathBuf,
    reader: BufReader<DecodeReaderBytes<File, Vec<u8>>>,
    line: Vec<u8>,
    alive: bool,
    bytes_read: u64,
}

impl FileCursor {
    /// Open `path` for line reading with the given buffer capacity.
    pub fn open(path: &Path, buffer_size: usize) -> io::Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(
            buffer_size,
            DecodeReaderBytesBuilder::new()
                .bom_sniffing(true)
                .strip_bom(true)
                .utf8_passthru(true)
                .build(file),
        );

        Ok(Self {
            path: path.to_path_buf(),
            reader,
            line: Vec::with_capacity(256),
            alive: true,
            bytes_read: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Decoded bytes consumed so far, line terminators included.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Mark the cursor dead without reading further (used on read errors).
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Read the next line, with the `\n` (and `\r` for CRLF input) stripped.
    /// Returns `None` at end-of-file, after which the cursor is dead. A final
    /// line without a terminator still counts as a line.
    pub fn read_line(&mut self) -> io::Result<Option<&[u8]>> {
        self.line.clear();
        let n = self.reader.read_until(b'\n', &mut self.line)?;
        if n == 0 {
            self.alive = false;
            return Ok(None);
        }
        self.bytes_read += n as u64;

        if self.line.last() == Some(&b'\n') {
            self.line.pop();
        }
        if self.line.last() == Some(&b'\r') {
            self.line.pop();
        }

        Ok(Some(&self.line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn cursor_for(contents: &[u8]) -> (NamedTempFile, FileCursor) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        let cursor = FileCursor::open(file.path(), 16 * 1024).unwrap();
        (file, cursor)
    }

    fn drain(cursor: &mut FileCursor) -> Vec<Vec<u8>> {
        let mut lines = Vec::new();
        while let Some(line) = cursor.read_line().unwrap() {
            lines.push(line.to_vec());
        }
        lines
    }

    #[test]
    fn reads_lines_and_strips_terminators() {
        let (_file, mut cursor) = cursor_for(b"alpha\nbravo\r\ncharlie");
        assert_eq!(drain(&mut cursor), vec![b"alpha".to_vec(), b"bravo".to_vec(), b"charlie".to_vec()]);
        assert!(!cursor.is_alive());
    }

    #[test]
    fn empty_file_is_immediately_dead() {
        let (_file, mut cursor) = cursor_for(b"");
        assert_eq!(cursor.read_line().unwrap(), None);
        assert!(!cursor.is_alive());
        assert_eq!(cursor.bytes_read(), 0);
    }

    #[test]
    fn empty_lines_are_lines() {
        let (_file, mut cursor) = cursor_for(b"a\n\nb\n");
        assert_eq!(drain(&mut cursor), vec![b"a".to_vec(), b"".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn utf16le_input_is_decoded() {
        // UTF-16LE BOM followed by "pass\nword\n"
        let mut bytes = vec![0xFF, 0xFE];
        for b in "pass\nword\n".bytes() {
            bytes.push(b);
            bytes.push(0);
        }
        let (_file, mut cursor) = cursor_for(&bytes);
        assert_eq!(drain(&mut cursor), vec![b"pass".to_vec(), b"word".to_vec()]);
    }

    #[test]
    fn tiny_buffer_still_reads_long_lines() {
        let long = "x".repeat(4096);
        let contents = format!("{long}\nshort\n");
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();

        let mut cursor = FileCursor::open(file.path(), 64).unwrap();
        assert_eq!(cursor.read_line().unwrap(), Some(long.as_bytes()));
        assert_eq!(cursor.read_line().unwrap(), Some(&b"short"[..]));
        assert_eq!(cursor.read_line().unwrap(), None);
    }

    #[test]
    fn bytes_read_counts_terminators() {
        let (_file, mut cursor) = cursor_for(b"ab\ncd\n");
        drain(&mut cursor);
        assert_eq!(cursor.bytes_read(), 6);
    }
}
