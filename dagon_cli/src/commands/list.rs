//! `dagon list`: the identification table

use super::{formatter, resolve_format};
use crate::config::AppConfig;
use crate::error::ExitCode;
use crate::output::OutputFormat;
use anyhow::Result;
use clap::Args;
use dagon_core::AlgorithmRegistry;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Include algorithms that are recognised but not implemented
    #[arg(short = 'A', long)]
    pub all: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

pub fn execute(args: ListArgs, config: &AppConfig, registry: &AlgorithmRegistry) -> Result<ExitCode> {
    let format = resolve_format(args.format, config)?;
    let specs: Vec<_> = registry
        .specs()
        .filter(|spec| args.all || spec.is_implemented())
        .collect();

    println!("{}", formatter(format, config).format_algorithms(&specs)?);
    Ok(ExitCode::Success)
}
