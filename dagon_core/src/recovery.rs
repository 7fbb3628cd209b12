//! Plaintext recovery
//!
//! [`RecoveryEngine`] runs one sequential session over a lazily consumed
//! candidate sequence. [`ParallelRecovery`] shards a materialised slice over
//! worker threads. Both end in a [`RecoveryOutcome`]: a match, or a failure
//! carrying the attempts made and why the search stopped.

mod engine;
mod outcome;
mod parallel;

pub use engine::{DEFAULT_PROGRESS_INTERVAL, RecoveryEngine, RecoveryOptions};
pub use outcome::{ExhaustionReason, RecoveryFailure, RecoveryOutcome, RecoveryResult};
pub use parallel::ParallelRecovery;
pub use tokio_util::sync::CancellationToken;
