//! CLI error categories and exit codes

use colored::*;
use thiserror::Error;

/// Semantic exit codes for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    Misuse = 2,
    /// Nothing was identified or recovered
    NoResult = 3,
    FilesystemError = 4,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Errors raised by the CLI itself rather than the core
#[derive(Debug, Error)]
pub enum CliError {
    /// The command line is inconsistent
    #[error("{message}")]
    Misuse { message: String },
}

impl CliError {
    pub fn misuse(message: &str) -> Self {
        Self::Misuse {
            message: message.to_string(),
        }
    }
}

/// Exit code for an error that reached `main`
pub fn exit_code(error: &anyhow::Error) -> ExitCode {
    for cause in error.chain() {
        if let Some(core) = cause.downcast_ref::<dagon_core::Error>() {
            return match core {
                dagon_core::Error::Io(_) => ExitCode::FilesystemError,
                e if e.is_user_error() => ExitCode::Misuse,
                _ => ExitCode::GeneralError,
            };
        }
        if cause.downcast_ref::<CliError>().is_some() {
            return ExitCode::Misuse;
        }
        if cause.downcast_ref::<std::io::Error>().is_some() {
            return ExitCode::FilesystemError;
        }
    }
    ExitCode::GeneralError
}

/// Format an error for the user, with the cause chain in debug mode
pub fn format_for_user(error: &anyhow::Error, debug: bool) -> String {
    let prefix = match exit_code(error) {
        ExitCode::Misuse => "Usage Error".yellow(),
        ExitCode::FilesystemError => "File Error".red(),
        _ => "Error".red(),
    };

    let mut output = if debug {
        format!("{prefix}: {error:?}")
    } else {
        format!("{prefix}: {error:#}")
    };

    if exit_code(error) == ExitCode::Misuse {
        output.push_str("\n\nRun 'dagon --help' for usage information");
    }
    output
}
