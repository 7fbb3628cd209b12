//! Line-oriented wordlist reader

use crate::Result;
use crate::error::IoError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Streaming wordlist, one candidate per line
///
/// Lines are yielded as raw bytes, so words in any encoding reach the
/// primitives unchanged. Trailing `\r\n` or `\n` is removed and empty
/// lines are skipped. A read error ends iteration; it can be retrieved
/// afterwards with [`Wordlist::take_error`].
pub struct Wordlist<R = BufReader<File>> {
    reader: R,
    path: Option<PathBuf>,
    line: Vec<u8>,
    error: Option<IoError>,
}

impl Wordlist {
    /// Open a wordlist file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| IoError::from_std(e).with_path(path))?;
        log::debug!("Opened wordlist {}", path.display());

        Ok(Self {
            reader: BufReader::new(file),
            path: Some(path.to_path_buf()),
            line: Vec::new(),
            error: None,
        })
    }
}

impl<R: BufRead> Wordlist<R> {
    /// Wordlist over any buffered reader
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            path: None,
            line: Vec::new(),
            error: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The read error that ended iteration, if any
    pub fn take_error(&mut self) -> Option<IoError> {
        self.error.take()
    }

    /// Read every remaining word into memory
    pub fn read_all(mut self) -> Result<Vec<Vec<u8>>> {
        let words: Vec<Vec<u8>> = self.by_ref().collect();
        match self.take_error() {
            Some(error) => Err(error.into()),
            None => Ok(words),
        }
    }
}

impl<R: BufRead> Iterator for Wordlist<R> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        loop {
            self.line.clear();
            match self.reader.read_until(b'\n', &mut self.line) {
                Ok(0) => return None,
                Ok(_) => {
                    let mut end = self.line.len();
                    while end > 0 && matches!(self.line[end - 1], b'\n' | b'\r') {
                        end -= 1;
                    }
                    if end == 0 {
                        continue;
                    }
                    return Some(self.line[..end].to_vec());
                }
                Err(e) => {
                    let mut error = IoError::from_std(e);
                    if let Some(path) = &self.path {
                        error = error.with_path(path);
                    }
                    log::warn!("Stopped reading wordlist: {error}");
                    self.error = Some(error);
                    return None;
                }
            }
        }
    }
}
