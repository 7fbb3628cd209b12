//! `dagon verify`: identify the algorithm of a digest

use super::{formatter, resolve_format};
use crate::config::AppConfig;
use crate::error::ExitCode;
use crate::output::OutputFormat;
use anyhow::Result;
use clap::Args;
use dagon_core::{AlgorithmRegistry, Classifier};

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Digest to identify
    pub digest: String,

    /// Also list partially matching types, implemented or not
    #[arg(short = 'A', long)]
    pub all: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

pub fn execute(args: VerifyArgs, config: &AppConfig, registry: &AlgorithmRegistry) -> Result<ExitCode> {
    let format = resolve_format(args.format, config)?;
    let ranking = Classifier::new(registry).classify(&args.digest, args.all);

    println!("{}", formatter(format, config).format_ranking(&ranking)?);

    if ranking.is_empty() {
        log::warn!("No algorithm identified for the given digest");
        return Ok(ExitCode::NoResult);
    }
    Ok(ExitCode::Success)
}
