//! Subcommand implementations
//!
//! Each subcommand has a clap `Args` struct and an `execute` function
//! returning the exit code. The work itself lives in functions that return
//! report values so tests can drive it without a process.

pub mod config;
pub mod crack;
pub mod hash;
pub mod list;
pub mod verify;

use crate::config::AppConfig;
use crate::output::{OutputFormat, OutputFormatter, create_formatter};
use crate::terminal;
use anyhow::Result;
use dagon_core::{Salt, SaltPlacement};

/// Format from the command line, falling back to the configured default
pub(crate) fn resolve_format(arg: Option<OutputFormat>, config: &AppConfig) -> Result<OutputFormat> {
    match arg {
        Some(format) => Ok(format),
        None => OutputFormat::from_string(&config.output.default_format),
    }
}

pub(crate) fn formatter(format: OutputFormat, config: &AppConfig) -> Box<dyn OutputFormatter> {
    create_formatter(format, terminal::should_use_color(config.output.color_enabled))
}

/// A user supplied salt, suffixed unless told otherwise
pub(crate) fn supplied_salt(value: Option<&str>, placement: Option<&str>) -> Result<Option<Salt>> {
    let placement = match placement {
        Some(text) => text.parse::<SaltPlacement>()?,
        None => SaltPlacement::Suffix,
    };
    Ok(value.map(|value| Salt::new(value, placement)))
}
