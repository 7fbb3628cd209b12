//! Internal library error types

use thiserror::Error;

/// Internal library errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InternalError {
    /// A primitive could not produce a digest for the given input
    #[error("Hash calculation failed for algorithm '{algorithm}': {message}")]
    HashCalculation { algorithm: String, message: String },

    /// A recovery worker terminated abnormally
    #[error("Recovery worker failed: {message}")]
    Worker { message: String },
}

impl InternalError {
    /// Create a hash calculation error
    pub fn hash_calculation(algorithm: &str, message: &str) -> Self {
        Self::HashCalculation {
            algorithm: algorithm.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a worker failure error
    pub fn worker(message: impl Into<String>) -> Self {
        Self::Worker {
            message: message.into(),
        }
    }
}
