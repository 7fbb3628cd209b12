//! Mock implementations of core collaborators

use dagon_core::{ProgressProvider, ProgressUpdate};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Progress provider that records every update
///
/// Children share the parent's log and tag their updates with the name they
/// were created under.
#[derive(Clone, Default)]
pub struct RecordingProvider {
    scope: Option<String>,
    updates: Arc<Mutex<Vec<(Option<String>, ProgressUpdate)>>>,
    completions: Arc<AtomicUsize>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates received so far, children included
    pub fn updates(&self) -> Vec<ProgressUpdate> {
        self.updates
            .lock()
            .map(|updates| updates.iter().map(|(_, update)| update.clone()).collect())
            .unwrap_or_default()
    }

    /// Attempt counters reported by the child created as `name`
    pub fn attempt_counts_for(&self, name: &str) -> Vec<u64> {
        self.updates
            .lock()
            .map(|updates| {
                updates
                    .iter()
                    .filter(|(scope, _)| scope.as_deref() == Some(name))
                    .filter_map(|(_, update)| match update {
                        ProgressUpdate::Attempts { attempts, .. } => Some(*attempts),
                        ProgressUpdate::Status { .. } => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Attempt counters received so far
    pub fn attempt_counts(&self) -> Vec<u64> {
        self.updates()
            .into_iter()
            .filter_map(|update| match update {
                ProgressUpdate::Attempts { attempts, .. } => Some(attempts),
                ProgressUpdate::Status { .. } => None,
            })
            .collect()
    }

    /// Number of `complete` calls
    pub fn completions(&self) -> usize {
        self.completions.load(Ordering::SeqCst)
    }
}

impl ProgressProvider for RecordingProvider {
    fn report(&self, update: ProgressUpdate) {
        if let Ok(mut updates) = self.updates.lock() {
            updates.push((self.scope.clone(), update));
        }
    }

    fn create_child(&self, name: &str) -> Box<dyn ProgressProvider> {
        Box::new(Self {
            scope: Some(name.to_string()),
            ..self.clone()
        })
    }

    fn complete(&self) {
        self.completions.fetch_add(1, Ordering::SeqCst);
    }
}
