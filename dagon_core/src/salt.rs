//! Salt modeling
//!
//! A [`Salt`] is a value plus a placement. The same [`Salt::apply`] is used
//! when building a salted digest and when rebuilding recovery candidates, so
//! the two stay symmetric.

use crate::advisory::Advisory;
use crate::error::ValidationError;
use crate::{Error, Result};
use rand::Rng;
use rand::rngs::ThreadRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Salt length used when none is requested
pub const DEFAULT_SALT_LENGTH: usize = 8;

/// Salts at or above this length get a performance advisory
pub const LONG_SALT_THRESHOLD: usize = 12;

const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

/// Where the salt goes relative to the plaintext
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaltPlacement {
    Prefix,
    Suffix,
}

impl fmt::Display for SaltPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaltPlacement::Prefix => write!(f, "prefix"),
            SaltPlacement::Suffix => write!(f, "suffix"),
        }
    }
}

impl FromStr for SaltPlacement {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "prefix" | "front" => Ok(SaltPlacement::Prefix),
            "suffix" | "back" => Ok(SaltPlacement::Suffix),
            _ => Err(ValidationError::invalid_placement(s).into()),
        }
    }
}

/// A salt value and its placement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Salt {
    value: String,
    placement: SaltPlacement,
}

impl Salt {
    /// Create a salt from a supplied value
    pub fn new(value: impl Into<String>, placement: SaltPlacement) -> Self {
        Self {
            value: value.into(),
            placement,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn placement(&self) -> SaltPlacement {
        self.placement
    }

    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Combine the salt with a plaintext according to the placement
    pub fn apply(&self, plaintext: &str) -> String {
        match self.placement {
            SaltPlacement::Prefix => format!("{}{}", self.value, plaintext),
            SaltPlacement::Suffix => format!("{}{}", plaintext, self.value),
        }
    }

    /// Byte-level [`Salt::apply`], used by the hash primitives
    pub fn apply_bytes(&self, plaintext: &[u8]) -> Vec<u8> {
        let salt = self.value.as_bytes();
        let mut out = Vec::with_capacity(salt.len() + plaintext.len());
        match self.placement {
            SaltPlacement::Prefix => {
                out.extend_from_slice(salt);
                out.extend_from_slice(plaintext);
            }
            SaltPlacement::Suffix => {
                out.extend_from_slice(plaintext);
                out.extend_from_slice(salt);
            }
        }
        out
    }
}

/// Parameters for generating a salt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaltRequest {
    pub use_letters: bool,
    pub use_digits: bool,
    /// Raw length as supplied by the user, parsed during generation
    pub length: Option<String>,
    /// Random when not set
    pub placement: Option<SaltPlacement>,
}

impl SaltRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_letters(mut self, use_letters: bool) -> Self {
        self.use_letters = use_letters;
        self
    }

    pub fn with_digits(mut self, use_digits: bool) -> Self {
        self.use_digits = use_digits;
        self
    }

    pub fn with_length(mut self, length: impl ToString) -> Self {
        self.length = Some(length.to_string());
        self
    }

    pub fn with_placement(mut self, placement: SaltPlacement) -> Self {
        self.placement = Some(placement);
        self
    }
}

/// A generated salt together with the advisories raised while building it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaltGeneration {
    pub salt: Salt,
    pub advisories: Vec<Advisory>,
}

/// Parse a user supplied salt length, defaulting to [`DEFAULT_SALT_LENGTH`]
pub fn parse_length(length: Option<&str>) -> Result<usize> {
    let Some(raw) = length else {
        return Ok(DEFAULT_SALT_LENGTH);
    };

    let parsed: usize = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::invalid_length(raw, "must be a positive integer"))?;

    if parsed == 0 {
        return Err(ValidationError::invalid_length(raw, "must be greater than 0").into());
    }

    Ok(parsed)
}

/// Random salt generator
pub struct SaltGenerator<R = ThreadRng> {
    rng: R,
}

impl Default for SaltGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl SaltGenerator<ThreadRng> {
    /// Generator backed by the thread-local RNG
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl<R: Rng> SaltGenerator<R> {
    /// Generator backed by a caller supplied RNG (seeded RNGs in tests)
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a salt
    ///
    /// With neither letters nor digits requested the alphabet falls back to
    /// digits and a [`Advisory::SaltAlphabetDefaulted`] is attached. Lengths
    /// of [`LONG_SALT_THRESHOLD`] or more are accepted with an
    /// [`Advisory::LongSalt`].
    pub fn generate(&mut self, request: &SaltRequest) -> Result<SaltGeneration> {
        let length = parse_length(request.length.as_deref())?;
        let mut advisories = Vec::new();

        let mut charset = String::new();
        if request.use_letters {
            charset.push_str(LETTERS);
        }
        if request.use_digits {
            charset.push_str(DIGITS);
        }
        if charset.is_empty() {
            log::warn!("No choice given as salt, defaulting to numbers");
            advisories.push(Advisory::SaltAlphabetDefaulted);
            charset.push_str(DIGITS);
        }

        if length >= LONG_SALT_THRESHOLD {
            log::warn!(
                "It is recommended to keep salt length under {LONG_SALT_THRESHOLD} for faster hashing"
            );
            advisories.push(Advisory::LongSalt { length });
        }

        let charset = charset.as_bytes();
        let value: String = (0..length)
            .map(|_| charset[self.rng.random_range(0..charset.len())] as char)
            .collect();

        let placement = match request.placement {
            Some(placement) => placement,
            None if self.rng.random_bool(0.5) => SaltPlacement::Prefix,
            None => SaltPlacement::Suffix,
        };

        Ok(SaltGeneration {
            salt: Salt::new(value, placement),
            advisories,
        })
    }
}
