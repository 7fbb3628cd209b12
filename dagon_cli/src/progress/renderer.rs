//! Progress rendering for the CLI

use super::utils::{format_count, format_rate};
use colored::*;
use dagon_core::progress::ProgressUpdate;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

/// Render progress updates until the channel closes
pub fn render_progress(rx: Receiver<ProgressUpdate>) {
    let mut renderer = ProgressRenderer::new();

    for update in rx {
        renderer.handle_update(update);
    }

    renderer.finish();
}

/// Spinner showing the attempt counter of the running session
pub struct ProgressRenderer {
    spinner: Option<ProgressBar>,
    start_time: Instant,
}

impl ProgressRenderer {
    pub fn new() -> Self {
        Self {
            spinner: None,
            start_time: Instant::now(),
        }
    }

    pub fn handle_update(&mut self, update: ProgressUpdate) {
        match update {
            ProgressUpdate::Attempts {
                algorithm,
                attempts,
                current,
            } => self.update_attempts(&algorithm, attempts, &current),
            ProgressUpdate::Status { message } => self.show_status(&message),
        }
    }

    fn update_attempts(&mut self, algorithm: &str, attempts: u64, current: &str) {
        let spinner = self.spinner.get_or_insert_with(|| {
            let spinner = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} [{elapsed_precise}] {msg}")
            {
                spinner.set_style(style);
            }
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner
        });

        spinner.set_message(format!(
            "{}: {} attempts ({}) | {}",
            algorithm.bold(),
            format_count(attempts),
            format_rate(attempts, self.start_time.elapsed()),
            current.dimmed()
        ));
    }

    fn show_status(&self, message: &str) {
        let line = format!("{} {}", "→".green(), message);
        match &self.spinner {
            Some(spinner) => spinner.println(line),
            None => eprintln!("{line}"),
        }
    }

    pub fn finish(self) {
        if let Some(spinner) = self.spinner {
            spinner.finish_and_clear();
        }
    }
}

impl Default for ProgressRenderer {
    fn default() -> Self {
        Self::new()
    }
}
