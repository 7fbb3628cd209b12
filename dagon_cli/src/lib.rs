//! Dagon command line interface
//!
//! The binary in `main.rs` parses arguments and dispatches to [`commands`].
//! Everything else lives here so integration tests can reach it.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod progress;
pub mod terminal;
