//! Non-fatal advisories attached to results
//!
//! Advisories never interrupt an operation. They travel with the value they
//! describe so the presentation layer can decide how loudly to show them.

use serde::Serialize;
use std::fmt;

use crate::salt::LONG_SALT_THRESHOLD;

/// Informational signal produced alongside a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// Neither letters nor digits were requested, digits were used
    SaltAlphabetDefaulted,
    /// The salt is long enough to slow hashing down noticeably
    LongSalt { length: usize },
    /// Classification with all types requested found a single candidate
    SingleCandidate,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::SaltAlphabetDefaulted => {
                write!(f, "No salt alphabet chosen, defaulted to numbers")
            }
            Advisory::LongSalt { length } => write!(
                f,
                "Salt length {length} is long, keeping it under {LONG_SALT_THRESHOLD} \
                 characters makes hashing faster"
            ),
            Advisory::SingleCandidate => write!(f, "Only one possible type found for given hash"),
        }
    }
}
