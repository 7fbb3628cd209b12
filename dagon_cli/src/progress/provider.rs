//! Wiring between the core progress sink and the renderer thread

use super::renderer::render_progress;
use dagon_core::progress::{ChannelProvider, ProgressProvider, ProgressUpdate};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

/// Create a progress provider and the receiving end for a renderer
pub fn create_progress_infrastructure() -> (Arc<dyn ProgressProvider>, Receiver<ProgressUpdate>) {
    let (tx, rx) = mpsc::channel();
    let provider = Arc::new(ChannelProvider::new(tx)) as Arc<dyn ProgressProvider>;
    (provider, rx)
}

/// A provider plus the thread rendering it, if any
pub struct ProgressSession {
    provider: Arc<dyn ProgressProvider>,
    renderer: Option<JoinHandle<()>>,
}

impl ProgressSession {
    /// Spinner-backed session when `enabled`, otherwise a null sink
    pub fn start(enabled: bool) -> Self {
        if !enabled {
            return Self {
                provider: <dyn ProgressProvider>::null(),
                renderer: None,
            };
        }

        let (provider, rx) = create_progress_infrastructure();
        let renderer = thread::Builder::new()
            .name("progress".to_string())
            .spawn(move || render_progress(rx))
            .inspect_err(|e| log::warn!("Progress display unavailable: {e}"))
            .ok();

        Self { provider, renderer }
    }

    pub fn provider(&self) -> Arc<dyn ProgressProvider> {
        Arc::clone(&self.provider)
    }

    /// Close the channel and wait for the renderer to clear its line
    pub fn finish(self) {
        self.provider.complete();
        if let Some(handle) = self.renderer {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infrastructure_delivers_updates() {
        let (provider, rx) = create_progress_infrastructure();
        provider.report(ProgressUpdate::Status {
            message: "starting".to_string(),
        });
        provider.complete();

        let received: Vec<_> = rx.iter().collect();
        assert_eq!(received.len(), 1);
    }

    #[test]
    fn test_disabled_session_is_silent() {
        let session = ProgressSession::start(false);
        session.provider().report(ProgressUpdate::Status {
            message: "ignored".to_string(),
        });
        session.finish();
    }
}
