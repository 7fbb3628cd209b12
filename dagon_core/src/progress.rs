//! Progress reporting abstractions for recovery sessions
//!
//! This module provides a trait-based abstraction for progress reporting,
//! allowing the core library to report progress without depending on
//! specific channel implementations or UI concerns.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

/// Core trait for progress reporting
///
/// This trait abstracts away the progress reporting mechanism,
/// allowing different implementations (channels, logging, null, etc.)
pub trait ProgressProvider: Send + Sync {
    /// Report a progress update
    fn report(&self, update: ProgressUpdate);

    /// Create a child provider for a worker of the same session
    fn create_child(&self, name: &str) -> Box<dyn ProgressProvider>;

    /// Signal that the operation is complete
    fn complete(&self);
}

/// Unified progress update type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressUpdate {
    /// Periodic attempt counter of a running session
    Attempts {
        algorithm: String,
        attempts: u64,
        /// Candidate word currently being tried
        current: String,
    },

    /// Generic status message
    Status { message: String },
}

/// Null implementation for when no progress is needed
pub struct NullProvider;

impl ProgressProvider for NullProvider {
    fn report(&self, _update: ProgressUpdate) {}

    fn create_child(&self, _name: &str) -> Box<dyn ProgressProvider> {
        Box::new(NullProvider)
    }

    fn complete(&self) {}
}

/// Helper functions for creating providers
impl dyn ProgressProvider {
    /// Create a null provider (useful for tests and when progress isn't needed)
    pub fn null() -> Arc<dyn ProgressProvider> {
        Arc::new(NullProvider)
    }
}

/// Provider forwarding updates over an mpsc channel
///
/// [`ProgressProvider::complete`] drops the sender so the receiving side sees
/// the channel close.
pub struct ChannelProvider {
    tx: Mutex<Option<Sender<ProgressUpdate>>>,
}

impl ChannelProvider {
    pub fn new(tx: Sender<ProgressUpdate>) -> Self {
        Self {
            tx: Mutex::new(Some(tx)),
        }
    }

    fn sender(&self) -> Option<Sender<ProgressUpdate>> {
        self.tx.lock().ok().and_then(|guard| guard.clone())
    }
}

impl ProgressProvider for ChannelProvider {
    fn report(&self, update: ProgressUpdate) {
        // The receiver may already be gone
        if let Some(tx) = self.sender() {
            let _ = tx.send(update);
        }
    }

    fn create_child(&self, _name: &str) -> Box<dyn ProgressProvider> {
        Box::new(ChannelProvider {
            tx: Mutex::new(self.sender()),
        })
    }

    fn complete(&self) {
        if let Ok(mut guard) = self.tx.lock() {
            *guard = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn status(message: &str) -> ProgressUpdate {
        ProgressUpdate::Status {
            message: message.to_string(),
        }
    }

    #[test]
    fn test_null_provider() {
        let provider = NullProvider;
        provider.report(status("Test"));
        provider.create_child("shard 0").report(status("Child test"));
        provider.complete();
    }

    #[test]
    fn test_channel_provider_closes_on_complete() {
        let (tx, rx) = mpsc::channel();
        let provider = ChannelProvider::new(tx);
        let child = provider.create_child("shard 0");

        provider.report(status("one"));
        child.report(status("two"));
        provider.complete();
        child.complete();
        provider.report(status("dropped"));

        let received: Vec<_> = rx.iter().collect();
        assert_eq!(received, vec![status("one"), status("two")]);
    }
}
