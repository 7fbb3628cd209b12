//! Candidate sources for the recovery engine
//!
//! Both sources are plain iterators of `String`. The engine accepts any
//! iterator of string-like items, so an in-memory list works just as well.

pub mod keyspace;
mod wordlist;

pub use keyspace::{Keyspace, KeyspaceIter, preset};
pub use wordlist::Wordlist;
