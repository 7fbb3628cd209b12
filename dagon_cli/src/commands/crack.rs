//! `dagon crack`: recover the plaintext of one digest or a list of them

use super::{formatter, resolve_format, supplied_salt};
use crate::config::AppConfig;
use crate::error::{CliError, ExitCode};
use crate::output::{CrackReport, OutputFormat};
use crate::progress::ProgressSession;
use crate::terminal;
use anyhow::{Context, Result};
use clap::Args;
use dagon_core::candidates::preset;
use dagon_core::progress::{ProgressProvider, ProgressUpdate};
use dagon_core::{
    AlgorithmRegistry, AlgorithmSpec, CandidateRanking, Classifier, Keyspace, ParallelRecovery,
    RecoveryEngine, RecoveryOptions, RecoveryOutcome, Salt, Wordlist,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Args)]
pub struct CrackArgs {
    /// Digest to crack
    #[arg(required_unless_present = "hash_list", conflicts_with = "hash_list")]
    pub digest: Option<String>,

    /// File with one digest per line, each cracked in its own session
    #[arg(short = 'l', long, value_name = "FILE")]
    pub hash_list: Option<PathBuf>,

    /// Identification code of the algorithm; classified when omitted
    #[arg(short, long, value_name = "CODE")]
    pub algorithm: Option<String>,

    /// Wordlist to draw candidates from
    #[arg(short, long, value_name = "FILE", required_unless_present = "bruteforce")]
    pub wordlist: Option<PathBuf>,

    /// Enumerate a keyspace instead of reading a wordlist
    #[arg(short, long, conflicts_with = "wordlist")]
    pub bruteforce: bool,

    /// Keyspace alphabet: a preset (lower, upper, digits, alpha, alnum,
    /// lower-digits, all) or literal characters
    #[arg(long, default_value = "lower-digits", requires = "bruteforce")]
    pub charset: String,

    /// Shortest keyspace candidate
    #[arg(long, default_value_t = 1, requires = "bruteforce")]
    pub min_length: usize,

    /// Longest keyspace candidate
    #[arg(long, default_value_t = 5, requires = "bruteforce")]
    pub max_length: usize,

    /// Salt the candidates were hashed with
    #[arg(short, long)]
    pub salt: Option<String>,

    /// Salt placement: prefix (front) or suffix (back)
    #[arg(short, long, requires = "salt")]
    pub placement: Option<String>,

    /// Worker threads for wordlist sessions
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,

    /// Give up after this many seconds per digest
    #[arg(short, long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Disable the progress display
    #[arg(long)]
    pub no_progress: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Where candidates come from
pub enum CandidateSource {
    Wordlist(PathBuf),
    Keyspace(Keyspace),
}

impl CandidateSource {
    pub fn from_args(args: &CrackArgs) -> Result<Self> {
        if args.bruteforce {
            let alphabet = preset(&args.charset).unwrap_or_else(|| args.charset.clone());
            let keyspace = Keyspace::new(&alphabet, args.min_length, args.max_length)?;
            match keyspace.size() {
                Some(size) => log::debug!("Keyspace holds {size} candidates"),
                None => log::warn!("Keyspace is too large to count"),
            }
            return Ok(Self::Keyspace(keyspace));
        }

        match &args.wordlist {
            Some(path) => Ok(Self::Wordlist(path.clone())),
            None => Err(CliError::misuse("either --wordlist or --bruteforce is required").into()),
        }
    }
}

/// Settings shared by every session of one invocation
pub struct CrackSettings {
    pub algorithm: Option<String>,
    pub source: CandidateSource,
    pub salt: Option<Salt>,
    pub workers: usize,
    pub timeout: Option<Duration>,
    pub progress_interval: u64,
    pub show_progress: bool,
}

impl CrackSettings {
    /// Merge the command line over the configuration
    pub fn resolve(args: &CrackArgs, config: &AppConfig) -> Result<Self> {
        let workers = args.workers.unwrap_or(config.recovery.workers);
        if workers == 0 {
            return Err(CliError::misuse("--workers must be at least 1").into());
        }

        let timeout = match args.timeout {
            Some(0) => None,
            Some(seconds) => Some(Duration::from_secs(seconds)),
            None => config.recovery.timeout(),
        };

        Ok(Self {
            algorithm: args.algorithm.clone(),
            source: CandidateSource::from_args(args)?,
            salt: supplied_salt(args.salt.as_deref(), args.placement.as_deref())?,
            workers,
            timeout,
            progress_interval: config.recovery.progress_interval,
            show_progress: !args.no_progress
                && config.output.progress_enabled
                && terminal::should_show_progress_by_default(),
        })
    }

    fn engine(&self, progress: &ProgressSession) -> RecoveryEngine {
        let mut options = RecoveryOptions::new().with_progress_interval(self.progress_interval);
        if let Some(timeout) = self.timeout {
            options = options.with_timeout(timeout);
        }
        RecoveryEngine::new()
            .with_options(options)
            .with_progress(progress.provider())
    }
}

/// What a session searches with
enum Plan<'r> {
    /// An algorithm chosen by code
    Single(&'r AlgorithmSpec),
    /// Every implemented likely algorithm of a classification
    Ranked(CandidateRanking),
}

impl<'r> Plan<'r> {
    fn select(digest: &str, settings: &CrackSettings, registry: &'r AlgorithmRegistry) -> Result<Self> {
        match &settings.algorithm {
            Some(code) => {
                let spec = registry.resolve_str(code)?;
                spec.primitive()?;
                Ok(Self::Single(spec))
            }
            None => Ok(Self::Ranked(Classifier::new(registry).classify(digest, false))),
        }
    }

    /// Algorithm names in search order
    fn algorithms(&self) -> Vec<String> {
        match self {
            Self::Single(spec) => vec![spec.name().to_string()],
            Self::Ranked(ranking) => ranking
                .implemented_likely()
                .filter(|spec| spec.accepts(ranking.digest()))
                .map(|spec| spec.name().to_string())
                .collect(),
        }
    }
}

/// Run one recovery session for `digest`
pub fn crack_digest(
    digest: &str,
    settings: &CrackSettings,
    registry: &AlgorithmRegistry,
) -> Result<CrackReport> {
    let digest = digest.trim();
    let plan = Plan::select(digest, settings, registry)?;
    let algorithms = plan.algorithms();

    if algorithms.is_empty() {
        log::warn!("No implemented algorithm matches {digest}");
        return Ok(CrackReport {
            digest: digest.to_string(),
            algorithms,
            outcome: None,
        });
    }

    let progress = ProgressSession::start(settings.show_progress);
    progress.provider().report(ProgressUpdate::Status {
        message: format!("Cracking {digest} as {}", algorithms.join(", ")),
    });

    let outcome = search(digest, &plan, settings, &progress);
    progress.finish();

    Ok(CrackReport {
        digest: digest.to_string(),
        algorithms,
        outcome: Some(outcome?),
    })
}

fn search(
    digest: &str,
    plan: &Plan<'_>,
    settings: &CrackSettings,
    progress: &ProgressSession,
) -> Result<RecoveryOutcome> {
    let engine = settings.engine(progress);
    let salt = settings.salt.as_ref();

    match &settings.source {
        CandidateSource::Keyspace(keyspace) => {
            if settings.workers > 1 {
                log::debug!("Keyspace sessions run on a single worker");
            }
            run_sequential(&engine, digest, plan, keyspace, salt)
        }
        CandidateSource::Wordlist(path) if settings.workers > 1 => {
            let words = Wordlist::open(path)
                .and_then(Wordlist::read_all)
                .with_context(|| format!("Failed to read wordlist {}", path.display()))?;
            let parallel = ParallelRecovery::new(engine, settings.workers)?;
            let outcome = match plan {
                Plan::Single(spec) => parallel.recover(digest, spec, &words, salt)?,
                Plan::Ranked(ranking) => parallel.recover_ranked(ranking, &words, salt)?,
            };
            Ok(outcome)
        }
        CandidateSource::Wordlist(path) => {
            let mut wordlist = Wordlist::open(path)
                .with_context(|| format!("Failed to open wordlist {}", path.display()))?;
            let outcome = run_sequential(&engine, digest, plan, wordlist.by_ref(), salt)?;
            if let Some(error) = wordlist.take_error() {
                return Err(dagon_core::Error::from(error))
                    .with_context(|| format!("Failed to read wordlist {}", path.display()));
            }
            Ok(outcome)
        }
    }
}

fn run_sequential<I>(
    engine: &RecoveryEngine,
    digest: &str,
    plan: &Plan<'_>,
    candidates: I,
    salt: Option<&Salt>,
) -> Result<RecoveryOutcome>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let outcome = match plan {
        Plan::Single(spec) => engine.recover(digest, spec, candidates, salt)?,
        Plan::Ranked(ranking) => engine.recover_ranked(ranking, candidates, salt)?,
    };
    Ok(outcome)
}

/// Digests listed in a hash list file
pub fn read_hash_list(path: &Path) -> Result<Vec<String>> {
    let digests: Vec<String> = Wordlist::open(path)
        .and_then(Wordlist::read_all)
        .with_context(|| format!("Failed to read hash list {}", path.display()))?
        .into_iter()
        .map(|line| String::from_utf8_lossy(&line).trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    if digests.is_empty() {
        return Err(CliError::misuse(&format!("hash list {} is empty", path.display())).into());
    }
    Ok(digests)
}

pub fn execute(args: CrackArgs, config: &AppConfig, registry: &AlgorithmRegistry) -> Result<ExitCode> {
    let format = resolve_format(args.format, config)?;
    let settings = CrackSettings::resolve(&args, config)?;
    let output = formatter(format, config);

    let recovered = match (&args.digest, &args.hash_list) {
        (Some(digest), _) => {
            let report = crack_digest(digest, &settings, registry)?;
            println!("{}", output.format_crack(&report)?);
            report.is_found()
        }
        (None, Some(path)) => {
            let digests = read_hash_list(path)?;
            log::debug!("Cracking {} digest(s) from {}", digests.len(), path.display());

            let reports = digests
                .iter()
                .map(|digest| crack_digest(digest, &settings, registry))
                .collect::<Result<Vec<_>>>()?;
            println!("{}", output.format_crack_batch(&reports)?);
            reports.iter().all(CrackReport::is_found)
        }
        (None, None) => return Err(CliError::misuse("a digest or --hash-list is required").into()),
    };

    Ok(if recovered {
        ExitCode::Success
    } else {
        ExitCode::NoResult
    })
}
