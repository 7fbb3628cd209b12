//! Terminal values of a recovery session

use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

fn as_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(elapsed.as_millis().try_into().unwrap_or(u64::MAX))
}

/// A matched candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecoveryResult {
    /// The candidate word as it appeared in the source, never salted
    ///
    /// Words that are not valid UTF-8 are shown lossily here and carried
    /// exactly in `plaintext_hex`.
    pub plaintext: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plaintext_hex: Option<String>,
    pub algorithm: String,
    pub code: u32,
    /// The target digest in canonical form
    pub digest: String,
    /// 1-based index of the matching attempt
    pub attempts: u64,
    #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
    pub elapsed: Duration,
}

/// Why a session ended without a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionReason {
    /// Every candidate was tried
    Exhausted,
    /// The session deadline passed
    Timeout,
    /// The caller cancelled the session
    Cancelled,
}

impl fmt::Display for ExhaustionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExhaustionReason::Exhausted => write!(f, "candidates exhausted"),
            ExhaustionReason::Timeout => write!(f, "timed out"),
            ExhaustionReason::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A session that ended without a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecoveryFailure {
    /// Digest computations performed
    pub attempts: u64,
    pub reason: ExhaustionReason,
    #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
    pub elapsed: Duration,
}

/// Either terminal value of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecoveryOutcome {
    Found(RecoveryResult),
    Failed(RecoveryFailure),
}

impl RecoveryOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, RecoveryOutcome::Found(_))
    }

    pub fn result(&self) -> Option<&RecoveryResult> {
        match self {
            RecoveryOutcome::Found(result) => Some(result),
            RecoveryOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&RecoveryFailure> {
        match self {
            RecoveryOutcome::Found(_) => None,
            RecoveryOutcome::Failed(failure) => Some(failure),
        }
    }

    pub fn attempts(&self) -> u64 {
        match self {
            RecoveryOutcome::Found(result) => result.attempts,
            RecoveryOutcome::Failed(failure) => failure.attempts,
        }
    }

    pub fn elapsed(&self) -> Duration {
        match self {
            RecoveryOutcome::Found(result) => result.elapsed,
            RecoveryOutcome::Failed(failure) => failure.elapsed,
        }
    }
}
