//! Sharded recovery across worker threads
//!
//! The candidate slice is split into contiguous, disjoint shards, one per
//! worker. Workers race; the first match cancels the rest through a token
//! derived from the caller's cancellation token.

use super::engine::{Trial, RecoveryEngine, SearchEnd, finish};
use super::outcome::{ExhaustionReason, RecoveryFailure, RecoveryOutcome};
use crate::Result;
use crate::classifier::CandidateRanking;
use crate::error::{InternalError, ValidationError};
use crate::hashing::AlgorithmSpec;
use crate::salt::Salt;
use std::thread;
use std::time::Instant;

/// Multi-worker front end of [`RecoveryEngine`]
pub struct ParallelRecovery {
    engine: RecoveryEngine,
    workers: usize,
}

impl ParallelRecovery {
    /// Recovery over `workers` threads, which must be at least one
    pub fn new(engine: RecoveryEngine, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(ValidationError::invalid_parameter("workers", "must be at least 1").into());
        }
        Ok(Self { engine, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Sharded [`RecoveryEngine::recover`]
    ///
    /// The reported attempt index is the global position of the match, as if
    /// the whole slice had been searched sequentially.
    pub fn recover<S>(
        &self,
        target: &str,
        algorithm: &AlgorithmSpec,
        candidates: &[S],
        salt: Option<&Salt>,
    ) -> Result<RecoveryOutcome>
    where
        S: AsRef<[u8]> + Sync,
    {
        let trials = Trial::single(algorithm, target)?;
        self.run(&trials, candidates, salt)
    }

    /// Sharded [`RecoveryEngine::recover_ranked`], word-major inside each shard
    pub fn recover_ranked<S>(
        &self,
        ranking: &CandidateRanking,
        candidates: &[S],
        salt: Option<&Salt>,
    ) -> Result<RecoveryOutcome>
    where
        S: AsRef<[u8]> + Sync,
    {
        let trials = Trial::ranked(ranking)?;
        self.run(&trials, candidates, salt)
    }

    fn run<S>(&self, trials: &[Trial<'_>], candidates: &[S], salt: Option<&Salt>) -> Result<RecoveryOutcome>
    where
        S: AsRef<[u8]> + Sync,
    {
        let start = Instant::now();
        let deadline = self.engine.deadline(start);
        let caller = &self.engine.options().cancellation;
        let race = caller.child_token();
        let shard_len = candidates.len().div_ceil(self.workers).max(1);

        log::debug!(
            "Starting sharded recovery: {} candidates over {} shard(s)",
            candidates.len(),
            candidates.len().div_ceil(shard_len)
        );

        let ends: Vec<Result<(u64, SearchEnd)>> = thread::scope(|scope| {
            let handles: Vec<_> = candidates
                .chunks(shard_len)
                .enumerate()
                .map(|(shard, words)| {
                    let race = &race;
                    let progress = self.engine.progress().create_child(&format!("shard {shard}"));
                    scope.spawn(move || -> Result<(u64, SearchEnd)> {
                        let end = self
                            .engine
                            .search(trials, words, salt, race, deadline, progress.as_ref())
                            .inspect_err(|_| race.cancel())?;
                        if matches!(end, SearchEnd::Found { .. }) {
                            race.cancel();
                        }
                        Ok(((shard * shard_len) as u64, end))
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle.join().unwrap_or_else(|_| {
                        race.cancel();
                        Err(InternalError::worker("recovery shard panicked").into())
                    })
                })
                .collect()
        });
        self.engine.progress().complete();

        let mut best: Option<(u64, SearchEnd)> = None;
        let mut attempts = 0;
        let mut timed_out = false;
        for end in ends {
            match end? {
                (offset, found @ SearchEnd::Found { .. }) => {
                    let position = global_position(offset, &found);
                    if best.as_ref().is_none_or(|(o, b)| global_position(*o, b) > position) {
                        best = Some((offset, found));
                    }
                }
                (_, SearchEnd::Stopped { attempts: n, reason }) => {
                    attempts += n;
                    timed_out |= reason == ExhaustionReason::Timeout;
                }
            }
        }

        let elapsed = start.elapsed();
        let outcome = match best {
            Some((offset, found)) => finish(trials, found, offset, elapsed),
            None => {
                let reason = if caller.is_cancelled() {
                    ExhaustionReason::Cancelled
                } else if timed_out {
                    ExhaustionReason::Timeout
                } else {
                    ExhaustionReason::Exhausted
                };
                RecoveryOutcome::Failed(RecoveryFailure {
                    attempts,
                    reason,
                    elapsed,
                })
            }
        };

        log::debug!("Sharded recovery finished after {} attempts", outcome.attempts());
        Ok(outcome)
    }
}

/// (word, trial) position of a match in the unsharded sequence
fn global_position(offset: u64, end: &SearchEnd) -> (u64, usize) {
    match end {
        SearchEnd::Found {
            word_index, trial, ..
        } => (offset + word_index, *trial),
        SearchEnd::Stopped { .. } => (u64::MAX, usize::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classifier;
    use crate::hashing::AlgorithmRegistry;
    use crate::recovery::{CancellationToken, RecoveryOptions};

    const MD5_PASSWORD: &str = "5f4dcc3b5aa765d61d8327deb882cf99";

    fn words(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("word{i}")).collect()
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(ParallelRecovery::new(RecoveryEngine::new(), 0).is_err());
    }

    #[test]
    fn test_global_attempt_index() {
        let registry = AlgorithmRegistry::with_builtins();
        let md5 = registry.spec("md5").unwrap();
        let mut candidates = words(100);
        candidates[73] = "password".to_string();

        for workers in [1, 2, 3, 8, 200] {
            let parallel = ParallelRecovery::new(RecoveryEngine::new(), workers).unwrap();
            let outcome = parallel.recover(MD5_PASSWORD, md5, &candidates, None).unwrap();
            let result = outcome.result().unwrap();
            assert_eq!(result.plaintext, "password");
            assert_eq!(result.attempts, 74, "workers = {workers}");
        }
    }

    #[test]
    fn test_exhaustion_sums_shards() {
        let registry = AlgorithmRegistry::with_builtins();
        let md5 = registry.spec("md5").unwrap();
        let candidates = words(57);

        let parallel = ParallelRecovery::new(RecoveryEngine::new(), 4).unwrap();
        let outcome = parallel.recover(MD5_PASSWORD, md5, &candidates, None).unwrap();

        let failure = outcome.failure().unwrap();
        assert_eq!(failure.attempts, 57);
        assert_eq!(failure.reason, ExhaustionReason::Exhausted);
    }

    #[test]
    fn test_empty_candidates() {
        let registry = AlgorithmRegistry::with_builtins();
        let md5 = registry.spec("md5").unwrap();
        let parallel = ParallelRecovery::new(RecoveryEngine::new(), 4).unwrap();
        let outcome = parallel.recover::<&str>(MD5_PASSWORD, md5, &[], None).unwrap();
        assert_eq!(outcome.attempts(), 0);
    }

    #[test]
    fn test_caller_cancellation_wins() {
        let registry = AlgorithmRegistry::with_builtins();
        let md5 = registry.spec("md5").unwrap();
        let token = CancellationToken::new();
        token.cancel();

        let engine =
            RecoveryEngine::new().with_options(RecoveryOptions::new().with_cancellation(token));
        let parallel = ParallelRecovery::new(engine, 3).unwrap();
        let outcome = parallel.recover(MD5_PASSWORD, md5, &words(30), None).unwrap();

        assert_eq!(outcome.failure().unwrap().reason, ExhaustionReason::Cancelled);
    }

    #[test]
    fn test_match_does_not_cancel_the_caller() {
        let registry = AlgorithmRegistry::with_builtins();
        let md5 = registry.spec("md5").unwrap();
        let token = CancellationToken::new();
        let mut candidates = words(60);
        candidates[5] = "password".to_string();

        let engine = RecoveryEngine::new()
            .with_options(RecoveryOptions::new().with_cancellation(token.clone()));
        let parallel = ParallelRecovery::new(engine, 3).unwrap();
        assert!(parallel.recover(MD5_PASSWORD, md5, &candidates, None).unwrap().is_found());
        assert!(!token.is_cancelled());

        // the same token still drives a second session to completion
        let outcome = parallel.recover(MD5_PASSWORD, md5, &words(10), None).unwrap();
        assert_eq!(outcome.failure().unwrap().reason, ExhaustionReason::Exhausted);
    }

    #[test]
    fn test_ranked_sharded_matches_sequential() {
        let registry = AlgorithmRegistry::with_builtins();
        let ranking = Classifier::new(&registry).classify(MD5_PASSWORD, false);
        let mut candidates = words(40);
        candidates[25] = "password".to_string();

        let sequential = RecoveryEngine::new()
            .recover_ranked(&ranking, &candidates, None)
            .unwrap();
        let sharded = ParallelRecovery::new(RecoveryEngine::new(), 4)
            .unwrap()
            .recover_ranked(&ranking, &candidates, None)
            .unwrap();

        assert_eq!(
            sequential.result().map(|r| r.attempts),
            sharded.result().map(|r| r.attempts)
        );
    }
}
