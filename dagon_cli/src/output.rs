//! Result presentation
//!
//! The core hands back structured values; this module turns them into text
//! or JSON.

mod formatters;

pub use formatters::{JsonFormatter, TextFormatter};

use anyhow::Result;
use dagon_core::{Advisory, AlgorithmSpec, CandidateRanking, RecoveryOutcome, Salt};
use serde::Serialize;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!("Unknown output format: {}", s),
        }
    }
}

/// One recovery session for one digest
#[derive(Debug, Clone, Serialize)]
pub struct CrackReport {
    pub digest: String,
    /// Algorithms the session searched, in search order
    pub algorithms: Vec<String>,
    /// `None` when no implemented algorithm could be tried
    pub outcome: Option<RecoveryOutcome>,
}

impl CrackReport {
    pub fn is_found(&self) -> bool {
        self.outcome.as_ref().is_some_and(RecoveryOutcome::is_found)
    }
}

/// A digest produced by `dagon hash`
#[derive(Debug, Clone, Serialize)]
pub struct HashReport {
    pub algorithm: String,
    pub code: u32,
    pub plaintext: String,
    pub digest: String,
    pub salt: Option<Salt>,
    pub advisories: Vec<Advisory>,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Classification of a digest
    fn format_ranking(&self, ranking: &CandidateRanking) -> Result<String>;

    /// A single recovery session
    fn format_crack(&self, report: &CrackReport) -> Result<String>;

    /// Several sessions, one per line of a hash list
    fn format_crack_batch(&self, reports: &[CrackReport]) -> Result<String> {
        let formatted: Result<Vec<String>> =
            reports.iter().map(|r| self.format_crack(r)).collect();

        Ok(formatted?.join("\n"))
    }

    fn format_hash(&self, report: &HashReport) -> Result<String>;

    /// The identification table
    fn format_algorithms(&self, specs: &[&AlgorithmSpec]) -> Result<String>;
}

/// Create a formatter based on output format
pub fn create_formatter(format: OutputFormat, use_color: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}
