//! `dagon hash`: produce a digest for a known plaintext

use super::{formatter, resolve_format, supplied_salt};
use crate::config::{AppConfig, SaltConfig};
use crate::error::{CliError, ExitCode};
use crate::output::{HashReport, OutputFormat};
use anyhow::Result;
use clap::Args;
use dagon_core::hashing::SaltUsage;
use dagon_core::{AlgorithmRegistry, SaltGenerator, SaltPlacement, SaltRequest};

#[derive(Debug, Args)]
pub struct HashArgs {
    /// Plaintext to hash
    pub plaintext: String,

    /// Identification code of the algorithm (see `dagon list`)
    #[arg(short, long, value_name = "CODE")]
    pub algorithm: String,

    /// Salt value to apply
    #[arg(short, long, conflicts_with = "random_salt")]
    pub salt: Option<String>,

    /// Salt placement: prefix (front) or suffix (back)
    #[arg(short, long)]
    pub placement: Option<String>,

    /// Generate a random salt
    #[arg(short = 'R', long)]
    pub random_salt: bool,

    /// Use letters in the generated salt
    #[arg(long, requires = "random_salt")]
    pub salt_letters: bool,

    /// Use digits in the generated salt
    #[arg(long, requires = "random_salt")]
    pub salt_digits: bool,

    /// Length of the generated salt
    #[arg(long, value_name = "N", requires = "random_salt")]
    pub salt_length: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl HashArgs {
    /// Salt request from the flags, with the configuration filling the gaps
    fn salt_request(&self, defaults: &SaltConfig) -> Result<SaltRequest> {
        let (use_letters, use_digits) = if self.salt_letters || self.salt_digits {
            (self.salt_letters, self.salt_digits)
        } else {
            (defaults.use_letters, defaults.use_digits)
        };

        let mut request = SaltRequest::new()
            .with_letters(use_letters)
            .with_digits(use_digits)
            .with_length(
                self.salt_length
                    .clone()
                    .unwrap_or_else(|| defaults.length.to_string()),
            );
        if let Some(placement) = &self.placement {
            request = request.with_placement(placement.parse::<SaltPlacement>()?);
        }
        Ok(request)
    }
}

/// Compute the digest described by `args`
pub fn hash_plaintext(
    args: &HashArgs,
    config: &AppConfig,
    registry: &AlgorithmRegistry,
) -> Result<HashReport> {
    let spec = registry.resolve_str(&args.algorithm)?;
    let primitive = spec.primitive()?;

    let (salt, advisories) = if args.random_salt {
        let generation = SaltGenerator::new().generate(&args.salt_request(&config.salt)?)?;
        (Some(generation.salt), generation.advisories)
    } else {
        (supplied_salt(args.salt.as_deref(), args.placement.as_deref())?, Vec::new())
    };

    if args.placement.is_some() && salt.is_none() {
        return Err(CliError::misuse("--placement needs --salt or --random-salt").into());
    }
    if salt.is_some() && primitive.salt_usage() != SaltUsage::Concatenated {
        log::info!(
            "{} uses the salt as part of its construction, placement is ignored",
            spec.name()
        );
    }

    let digest = match &salt {
        Some(salt) => primitive.hash_salted(args.plaintext.as_bytes(), salt)?,
        None => primitive.hash_bytes(args.plaintext.as_bytes()),
    };

    Ok(HashReport {
        algorithm: spec.name().to_string(),
        code: spec.code(),
        plaintext: args.plaintext.clone(),
        digest,
        salt,
        advisories,
    })
}

pub fn execute(args: HashArgs, config: &AppConfig, registry: &AlgorithmRegistry) -> Result<ExitCode> {
    let format = resolve_format(args.format, config)?;
    let report = hash_plaintext(&args, config, registry)?;

    println!("{}", formatter(format, config).format_hash(&report)?);
    Ok(ExitCode::Success)
}
