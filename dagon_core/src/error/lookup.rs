//! Registry lookup error types

use thiserror::Error;

/// Errors raised when resolving an algorithm by name or identification code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No algorithm is registered under this name
    #[error("Unknown algorithm: '{name}'")]
    UnknownAlgorithm { name: String },

    /// The code is an integer but not part of the identification table
    #[error("Invalid identification code: {code}")]
    InvalidIdentificationCode { code: i64 },

    /// The code could not be interpreted as an integer
    #[error("Identification code must be an integer, got '{input}'")]
    NonIntegerCode { input: String },

    /// The algorithm is known but has no primitive yet
    #[error("Algorithm '{name}' is not implemented yet")]
    NotImplemented { name: String },
}

impl LookupError {
    /// Create an unknown algorithm error
    pub fn unknown_algorithm(name: &str) -> Self {
        Self::UnknownAlgorithm {
            name: name.to_string(),
        }
    }

    /// Create an invalid identification code error
    pub fn invalid_identification_code(code: i64) -> Self {
        Self::InvalidIdentificationCode { code }
    }

    /// Create a non-integer code error
    pub fn non_integer_code(input: &str) -> Self {
        Self::NonIntegerCode {
            input: input.to_string(),
        }
    }

    /// Create a not implemented error
    pub fn not_implemented(name: &str) -> Self {
        Self::NotImplemented {
            name: name.to_string(),
        }
    }
}
