//! Sequential recovery loop

use super::outcome::{ExhaustionReason, RecoveryFailure, RecoveryOutcome, RecoveryResult};
use crate::Result;
use crate::classifier::CandidateRanking;
use crate::error::ValidationError;
use crate::hashing::{AlgorithmSpec, HashAlgorithmImpl};
use crate::progress::{NullProvider, ProgressProvider, ProgressUpdate};
use crate::salt::Salt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Attempts between two progress reports
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10_000;

/// Session limits and hooks
#[derive(Debug, Clone)]
pub struct RecoveryOptions {
    /// Session deadline, measured from the start of the call
    pub timeout: Option<Duration>,
    pub cancellation: CancellationToken,
    /// Report progress every this many attempts, 0 disables reports
    pub progress_interval: u64,
}

impl Default for RecoveryOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            cancellation: CancellationToken::new(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl RecoveryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }
}

/// One algorithm of a session with its canonical target
pub(crate) struct Trial<'a> {
    spec: &'a AlgorithmSpec,
    primitive: &'a Arc<dyn HashAlgorithmImpl>,
    target: String,
}

impl<'a> Trial<'a> {
    /// `None` when the primitive cannot read its parameters from `target`
    fn new(spec: &'a AlgorithmSpec, target: &str) -> Result<Option<Self>> {
        let primitive = spec.primitive()?;
        let target = spec.shape().canonicalize(target);
        if !primitive.accepts_target(&target) {
            return Ok(None);
        }
        Ok(Some(Self {
            spec,
            primitive,
            target,
        }))
    }

    pub(crate) fn single(spec: &'a AlgorithmSpec, target: &str) -> Result<Vec<Self>> {
        match Self::new(spec, target)? {
            Some(trial) => Ok(vec![trial]),
            None => Err(ValidationError::invalid_parameter(
                "digest",
                &format!("not a well-formed {} digest", spec.name()),
            )
            .into()),
        }
    }

    /// Trials for the implemented likely tier of a ranking, in ranking order
    ///
    /// Algorithms whose embedded parameters cannot be read from the digest
    /// are left out.
    pub(crate) fn ranked(ranking: &'a CandidateRanking) -> Result<Vec<Self>> {
        let mut trials = Vec::new();
        for spec in ranking.implemented_likely() {
            match Self::new(spec, ranking.digest())? {
                Some(trial) => trials.push(trial),
                None => log::warn!(
                    "Skipping {}: digest does not carry its parameters",
                    spec.name()
                ),
            }
        }

        if trials.is_empty() {
            return Err(ValidationError::invalid_parameter(
                "ranking",
                "no implemented algorithm in the likely tier",
            )
            .into());
        }
        Ok(trials)
    }
}

/// How a search over one candidate sequence ended
pub(crate) enum SearchEnd {
    Found {
        word: Vec<u8>,
        /// 0-based position of the word in the searched sequence
        word_index: u64,
        /// Index into the trial list
        trial: usize,
    },
    Stopped {
        attempts: u64,
        reason: ExhaustionReason,
    },
}

/// Dictionary and brute-force recovery engine
///
/// The engine owns nothing but its options; each call to
/// [`RecoveryEngine::recover`] is an independent session.
#[derive(Clone)]
pub struct RecoveryEngine {
    options: RecoveryOptions,
    progress: Arc<dyn ProgressProvider>,
}

impl Default for RecoveryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RecoveryEngine {
    pub fn new() -> Self {
        Self {
            options: RecoveryOptions::default(),
            progress: Arc::new(NullProvider),
        }
    }

    pub fn with_options(mut self, options: RecoveryOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressProvider>) -> Self {
        self.progress = progress;
        self
    }

    pub fn options(&self) -> &RecoveryOptions {
        &self.options
    }

    pub(crate) fn progress(&self) -> &Arc<dyn ProgressProvider> {
        &self.progress
    }

    pub(crate) fn deadline(&self, start: Instant) -> Option<Instant> {
        self.options.timeout.map(|timeout| start + timeout)
    }

    /// Search `candidates` for the plaintext of `target` under one algorithm
    ///
    /// Candidates are consumed lazily and in order and hashed as raw bytes.
    /// The first exact match ends the session; the reported plaintext is the
    /// candidate as given, before salting.
    pub fn recover<I>(
        &self,
        target: &str,
        algorithm: &AlgorithmSpec,
        candidates: I,
        salt: Option<&Salt>,
    ) -> Result<RecoveryOutcome>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let trials = Trial::single(algorithm, target)?;
        self.run(&trials, candidates, salt)
    }

    /// Search under every implemented likely algorithm of a ranking
    ///
    /// Order is word-major: each word is tried against all algorithms before
    /// the next word is drawn. Every digest computation counts as one attempt.
    pub fn recover_ranked<I>(
        &self,
        ranking: &CandidateRanking,
        candidates: I,
        salt: Option<&Salt>,
    ) -> Result<RecoveryOutcome>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let trials = Trial::ranked(ranking)?;
        self.run(&trials, candidates, salt)
    }

    fn run<I>(&self, trials: &[Trial<'_>], candidates: I, salt: Option<&Salt>) -> Result<RecoveryOutcome>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let start = Instant::now();
        log::debug!(
            "Starting recovery with {} algorithm(s): {}",
            trials.len(),
            trials.iter().map(|p| p.spec.name()).collect::<Vec<_>>().join(", ")
        );

        let end = self.search(
            trials,
            candidates,
            salt,
            &self.options.cancellation,
            self.deadline(start),
            self.progress.as_ref(),
        )?;
        self.progress.complete();

        let outcome = finish(trials, end, 0, start.elapsed());
        log::debug!("Recovery finished after {} attempts", outcome.attempts());
        Ok(outcome)
    }

    /// The attempt loop shared by sequential and sharded sessions
    pub(crate) fn search<I>(
        &self,
        trials: &[Trial<'_>],
        candidates: I,
        salt: Option<&Salt>,
        token: &CancellationToken,
        deadline: Option<Instant>,
        progress: &dyn ProgressProvider,
    ) -> Result<SearchEnd>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let interval = self.options.progress_interval;
        let mut attempts: u64 = 0;

        for (word_index, word) in candidates.into_iter().enumerate() {
            let word = word.as_ref();

            for (index, trial) in trials.iter().enumerate() {
                if token.is_cancelled() {
                    return Ok(SearchEnd::Stopped {
                        attempts,
                        reason: ExhaustionReason::Cancelled,
                    });
                }
                if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                    return Ok(SearchEnd::Stopped {
                        attempts,
                        reason: ExhaustionReason::Timeout,
                    });
                }

                let digest = trial
                    .primitive
                    .hash_against(word, salt, &trial.target)?;
                attempts += 1;

                if digest == trial.target {
                    return Ok(SearchEnd::Found {
                        word: word.to_vec(),
                        word_index: word_index as u64,
                        trial: index,
                    });
                }

                if interval > 0 && attempts % interval == 0 {
                    progress.report(ProgressUpdate::Attempts {
                        algorithm: trial.spec.name().to_string(),
                        attempts,
                        current: String::from_utf8_lossy(word).into_owned(),
                    });
                }
            }
        }

        Ok(SearchEnd::Stopped {
            attempts,
            reason: ExhaustionReason::Exhausted,
        })
    }
}

/// Freeze a search end into an outcome
///
/// `offset` is the position of the searched sequence's first word within
/// the whole candidate sequence.
pub(crate) fn finish(
    trials: &[Trial<'_>],
    end: SearchEnd,
    offset: u64,
    elapsed: Duration,
) -> RecoveryOutcome {
    match end {
        SearchEnd::Found {
            word,
            word_index,
            trial,
        } => {
            let matched = &trials[trial];
            let (plaintext, plaintext_hex) = match String::from_utf8(word) {
                Ok(plaintext) => (plaintext, None),
                Err(e) => {
                    let word = e.into_bytes();
                    (String::from_utf8_lossy(&word).into_owned(), Some(hex::encode(&word)))
                }
            };
            RecoveryOutcome::Found(RecoveryResult {
                plaintext,
                plaintext_hex,
                algorithm: matched.spec.name().to_string(),
                code: matched.spec.code(),
                digest: matched.target.clone(),
                attempts: (offset + word_index) * trials.len() as u64 + trial as u64 + 1,
                elapsed,
            })
        }
        SearchEnd::Stopped { attempts, reason } => RecoveryOutcome::Failed(RecoveryFailure {
            attempts,
            reason,
            elapsed,
        }),
    }
}
