//! Test utilities for Dagon
//!
//! This crate provides fixtures, builders and mock implementations shared by
//! the tests of the core library and the CLI.

pub mod builders;
pub mod fixtures;
pub mod mocks;

// Re-export commonly used types
pub use builders::{TargetBuilder, WordlistBuilder};
pub use mocks::RecordingProvider;
