//! Builders for test scenarios

mod target;
mod wordlist;

pub use target::TargetBuilder;
pub use wordlist::WordlistBuilder;
