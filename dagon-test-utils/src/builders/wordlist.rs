//! Temporary wordlist files

use std::io::{self, Write};
use tempfile::NamedTempFile;

/// Builder for wordlist files on disk
#[derive(Debug, Clone, Default)]
pub struct WordlistBuilder {
    words: Vec<String>,
    crlf: bool,
}

impl WordlistBuilder {
    /// Create a new wordlist builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a word
    pub fn with_word(mut self, word: &str) -> Self {
        self.words.push(word.to_string());
        self
    }

    /// Append several words
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().to_string()));
        self
    }

    /// Append `count` words that match nothing (`filler0`, `filler1`, ...)
    pub fn with_filler(mut self, count: usize) -> Self {
        let start = self.words.len();
        self.words
            .extend((start..start + count).map(|i| format!("filler{i}")));
        self
    }

    /// Terminate lines with `\r\n` instead of `\n`
    pub fn with_crlf(mut self) -> Self {
        self.crlf = true;
        self
    }

    /// The words in order, without touching the filesystem
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Write the wordlist to a temporary file
    pub fn build(self) -> io::Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        let newline = if self.crlf { "\r\n" } else { "\n" };
        for word in &self.words {
            write!(file, "{word}{newline}")?;
        }
        file.flush()?;
        Ok(file)
    }
}
