//! Digest classification
//!
//! The classifier fingerprints a digest and compares it against the shape of
//! every registered algorithm. Exact shape matches form the likely tier,
//! partial matches the unlikely tier. Whether an algorithm can actually be
//! computed is a separate facet and never moves it between tiers.

use crate::advisory::Advisory;
use crate::hashing::{AlgorithmRegistry, AlgorithmSpec, DigestFingerprint, ShapeMatch};
use serde::Serialize;
use std::cmp::Reverse;

/// One algorithm in a ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    #[serde(flatten)]
    pub spec: AlgorithmSpec,
    /// Exact shape match
    pub likely: bool,
}

impl Candidate {
    pub fn is_implemented(&self) -> bool {
        self.spec.is_implemented()
    }
}

/// Ordered result of one classification call
///
/// Likely candidates come first, ordered by descending shape specificity and
/// then ascending identification code. Unlikely candidates follow in the same
/// order. An empty ranking means no algorithm was identified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateRanking {
    digest: String,
    fingerprint: DigestFingerprint,
    candidates: Vec<Candidate>,
    advisories: Vec<Advisory>,
}

impl CandidateRanking {
    /// The digest as given, trimmed
    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn fingerprint(&self) -> &DigestFingerprint {
        &self.fingerprint
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn likely(&self) -> impl Iterator<Item = &AlgorithmSpec> {
        self.candidates.iter().filter(|c| c.likely).map(|c| &c.spec)
    }

    pub fn unlikely(&self) -> impl Iterator<Item = &AlgorithmSpec> {
        self.candidates.iter().filter(|c| !c.likely).map(|c| &c.spec)
    }

    /// Likely algorithms the recovery engine can run
    pub fn implemented_likely(&self) -> impl Iterator<Item = &AlgorithmSpec> {
        self.likely().filter(|spec| spec.is_implemented())
    }

    pub fn likely_names(&self) -> Vec<&'static str> {
        self.likely().map(AlgorithmSpec::name).collect()
    }

    pub fn unlikely_names(&self) -> Vec<&'static str> {
        self.unlikely().map(AlgorithmSpec::name).collect()
    }
}

/// Classifier over a borrowed registry
pub struct Classifier<'r> {
    registry: &'r AlgorithmRegistry,
}

impl<'r> Classifier<'r> {
    pub fn new(registry: &'r AlgorithmRegistry) -> Self {
        Self { registry }
    }

    /// Rank the registered algorithms for `digest`
    ///
    /// The unlikely tier is only filled when `all_types` is set. Repeated
    /// calls with the same input return the same ranking.
    pub fn classify(&self, digest: &str, all_types: bool) -> CandidateRanking {
        let digest = digest.trim();
        let fingerprint = DigestFingerprint::of(digest);

        let mut likely = Vec::new();
        let mut unlikely = Vec::new();
        for spec in self.registry.specs() {
            match spec.shape().compare(digest, &fingerprint) {
                ShapeMatch::Exact => likely.push(spec),
                ShapeMatch::Partial if all_types => unlikely.push(spec),
                _ => {}
            }
        }

        // specs() is in code order, so a stable sort keeps ties by code
        likely.sort_by_key(|spec| Reverse(spec.shape().specificity()));
        unlikely.sort_by_key(|spec| Reverse(spec.shape().specificity()));

        let candidates: Vec<Candidate> = likely
            .into_iter()
            .map(|spec| (spec, true))
            .chain(unlikely.into_iter().map(|spec| (spec, false)))
            .map(|(spec, likely)| Candidate {
                spec: spec.clone(),
                likely,
            })
            .collect();

        let mut advisories = Vec::new();
        if all_types && candidates.iter().filter(|c| c.likely).count() == 1 {
            log::info!("Only one possible type found for given hash");
            advisories.push(Advisory::SingleCandidate);
        }

        log::debug!(
            "Classified {}-character digest: {} likely, {} unlikely",
            fingerprint.length,
            candidates.iter().filter(|c| c.likely).count(),
            candidates.iter().filter(|c| !c.likely).count(),
        );

        CandidateRanking {
            digest: digest.to_string(),
            fingerprint,
            candidates,
            advisories,
        }
    }
}
