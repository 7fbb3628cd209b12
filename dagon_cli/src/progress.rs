//! Progress reporting module for the CLI
//!
//! The core reports through a channel; a renderer thread turns the updates
//! into an `indicatif` spinner on stderr.

pub mod provider;
pub mod renderer;
pub mod utils;

pub use provider::{ProgressSession, create_progress_infrastructure};
pub use renderer::{ProgressRenderer, render_progress};
pub use utils::{format_count, format_duration, format_rate};
