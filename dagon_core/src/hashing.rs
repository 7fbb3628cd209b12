//! Hash primitives and the algorithm registry
//!
//! Every algorithm is an [`AlgorithmSpec`]: an identification code, a stable
//! name, the [`DigestShape`] its output takes and, when the registry can
//! compute it, a [`HashAlgorithmImpl`] primitive.

mod algorithm;
pub mod algorithms;
mod registry;
mod shape;
mod traits;

pub use algorithm::AlgorithmSpec;
pub use registry::AlgorithmRegistry;
pub use shape::{Alphabet, CharClass, DigestFingerprint, DigestShape, HexCase, ShapeMatch};
pub use traits::{HashAlgorithmImpl, SaltUsage};
