//! Errors from reading wordlists and hash lists

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What went wrong while reading a candidate source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoErrorKind {
    FileNotFound,
    PermissionDenied,
    Other,
}

impl From<io::ErrorKind> for IoErrorKind {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => Self::FileNotFound,
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for IoErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound => write!(f, "file not found"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::Other => write!(f, "read failed"),
        }
    }
}

/// A failed open or read, tagged with the file when it is known
#[derive(Error, Debug)]
#[error("{}{kind} ({source})", location(.path.as_deref()))]
pub struct IoError {
    pub kind: IoErrorKind,
    pub path: Option<PathBuf>,
    #[source]
    pub source: io::Error,
}

fn location(path: Option<&Path>) -> String {
    path.map(|path| format!("{}: ", path.display()))
        .unwrap_or_default()
}

impl IoError {
    pub fn from_std(source: io::Error) -> Self {
        Self {
            kind: source.kind().into(),
            path: None,
            source,
        }
    }

    pub fn with_path(mut self, path: &Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }
}
