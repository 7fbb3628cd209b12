//! Brute-force keyspace
//!
//! A [`Keyspace`] enumerates every string over an alphabet between two
//! lengths, shortest first and in alphabet order within a length.

use crate::Result;
use crate::error::ValidationError;

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:'\",.<>/?\\|`~ ";

/// Named alphabet presets
pub fn preset(name: &str) -> Option<String> {
    let alphabet = match name.trim().to_lowercase().as_str() {
        "lower" => LOWERCASE.to_string(),
        "upper" => UPPERCASE.to_string(),
        "digits" => DIGITS.to_string(),
        "alpha" => format!("{LOWERCASE}{UPPERCASE}"),
        "alnum" => format!("{LOWERCASE}{UPPERCASE}{DIGITS}"),
        "lower-digits" => format!("{LOWERCASE}{DIGITS}"),
        "all" => format!("{LOWERCASE}{UPPERCASE}{DIGITS}{SYMBOLS}"),
        _ => return None,
    };
    Some(alphabet)
}

/// All strings over an alphabet with lengths in `min_len..=max_len`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyspace {
    alphabet: Vec<char>,
    min_len: usize,
    max_len: usize,
}

impl Keyspace {
    /// Repeated alphabet characters are kept once, in first-seen order
    pub fn new(alphabet: &str, min_len: usize, max_len: usize) -> Result<Self> {
        let mut chars: Vec<char> = Vec::new();
        for c in alphabet.chars() {
            if !chars.contains(&c) {
                chars.push(c);
            }
        }

        if chars.is_empty() {
            return Err(ValidationError::invalid_parameter("charset", "must not be empty").into());
        }
        if min_len > max_len {
            return Err(ValidationError::invalid_parameter(
                "length",
                &format!("minimum {min_len} exceeds maximum {max_len}"),
            )
            .into());
        }

        Ok(Self {
            alphabet: chars,
            min_len,
            max_len,
        })
    }

    /// Number of strings in the keyspace, `None` when it overflows `u64`
    pub fn size(&self) -> Option<u64> {
        let base = self.alphabet.len() as u64;
        (self.min_len..=self.max_len).try_fold(0u64, |total, len| {
            let count = base.checked_pow(u32::try_from(len).ok()?)?;
            total.checked_add(count)
        })
    }

    pub fn iter(&self) -> KeyspaceIter<'_> {
        KeyspaceIter {
            keyspace: self,
            indices: vec![0; self.min_len],
            done: false,
        }
    }
}

impl<'a> IntoIterator for &'a Keyspace {
    type Item = String;
    type IntoIter = KeyspaceIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Odometer over alphabet indices
pub struct KeyspaceIter<'a> {
    keyspace: &'a Keyspace,
    indices: Vec<usize>,
    done: bool,
}

impl KeyspaceIter<'_> {
    fn advance(&mut self) {
        let base = self.keyspace.alphabet.len();
        for digit in self.indices.iter_mut().rev() {
            *digit += 1;
            if *digit < base {
                return;
            }
            *digit = 0;
        }

        // every position wrapped: move to the next length
        if self.indices.len() >= self.keyspace.max_len {
            self.done = true;
        } else {
            self.indices = vec![0; self.indices.len() + 1];
        }
    }
}

impl Iterator for KeyspaceIter<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        let current = self
            .indices
            .iter()
            .map(|&i| self.keyspace.alphabet[i])
            .collect();
        self.advance();
        Some(current)
    }
}
