//! Error types for the Dagon core library
//!
//! Errors are grouped into categories so callers can branch on the kind of
//! failure without inspecting messages. Expected search outcomes (an empty
//! candidate ranking, an exhausted wordlist, a timeout) are not errors and
//! never appear here; they are returned as values by the classifier and the
//! recovery engine.

use thiserror::Error;

pub mod internal;
pub mod io;
pub mod lookup;
pub mod validation;

pub use self::io::{IoError, IoErrorKind};
pub use self::lookup::LookupError;
pub use self::validation::ValidationError;
pub use internal::InternalError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Dagon core library
///
/// Errors are categorized into four main types:
/// - Lookup errors: unknown algorithm names and identification codes
/// - Validation errors: user supplied parameters that cannot be used
/// - I/O errors: reading candidate sources from disk
/// - Internal errors: primitive or worker failures
#[derive(Error, Debug)]
pub enum Error {
    /// Registry lookup errors
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Internal library errors
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}

impl Error {
    /// Whether the error was caused by user input rather than the library
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Lookup(_) | Self::Validation(_))
    }
}
