//! Dagon Core Library
//!
//! Hash identification and plaintext recovery. The library classifies an
//! opaque digest against a registry of known algorithm shapes, models salts,
//! and searches candidate sequences for the plaintext of a digest. It returns
//! structured values and never formats output.
//!
//! ```no_run
//! use dagon_core::{AlgorithmRegistry, Classifier, RecoveryEngine};
//!
//! let registry = AlgorithmRegistry::with_builtins();
//! let ranking = Classifier::new(&registry).classify("5f4dcc3b5aa765d61d8327deb882cf99", false);
//! let outcome = RecoveryEngine::new()
//!     .recover_ranked(&ranking, ["hello", "password"], None)
//!     .unwrap();
//! assert!(outcome.is_found());
//! ```

pub mod advisory;
pub mod candidates;
pub mod classifier;
pub mod error;
pub mod hashing;
pub mod progress;
pub mod recovery;
pub mod salt;

// Re-export main types
pub use advisory::Advisory;
pub use candidates::{Keyspace, Wordlist};
pub use classifier::{Candidate, CandidateRanking, Classifier};
pub use error::{Error, Result};
pub use hashing::{AlgorithmRegistry, AlgorithmSpec, DigestFingerprint, HashAlgorithmImpl};
pub use progress::{ChannelProvider, NullProvider, ProgressProvider, ProgressUpdate};
pub use recovery::{
    CancellationToken, ExhaustionReason, ParallelRecovery, RecoveryEngine, RecoveryFailure,
    RecoveryOptions, RecoveryOutcome, RecoveryResult,
};
pub use salt::{Salt, SaltGenerator, SaltPlacement, SaltRequest};
