//! Core traits for the hash primitive system

use crate::Result;
use crate::salt::Salt;

/// How a primitive consumes a salt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaltUsage {
    /// Salt is concatenated with the plaintext according to its placement
    Concatenated,
    /// Salt is a fixed part of the construction (user names, double wraps)
    Structural,
    /// Salt is stored inside the digest and read back from it
    Embedded,
}

/// Core trait that all hash primitives must implement
pub trait HashAlgorithmImpl: Send + Sync {
    /// Canonical lowercase name
    fn id(&self) -> &'static str;

    /// Display name for user interfaces
    fn display_name(&self) -> &'static str;

    /// Digest of unsalted input in the primitive's canonical encoding
    fn hash_bytes(&self, data: &[u8]) -> String;

    /// How this primitive uses a salt
    fn salt_usage(&self) -> SaltUsage {
        SaltUsage::Concatenated
    }

    /// Digest of salted input
    fn hash_salted(&self, data: &[u8], salt: &Salt) -> Result<String> {
        Ok(self.hash_bytes(&salt.apply_bytes(data)))
    }

    /// Whether `target` carries everything [`Self::hash_against`] reads back
    ///
    /// Only formats with embedded parameters can reject a target.
    fn accepts_target(&self, _target: &str) -> bool {
        true
    }

    /// Digest of `data` computed so it is comparable with `target`
    ///
    /// Formats that embed their salt or cost in the digest read those
    /// parameters back from `target`. Everything else ignores it.
    fn hash_against(&self, data: &[u8], salt: Option<&Salt>, _target: &str) -> Result<String> {
        match salt {
            Some(salt) => self.hash_salted(data, salt),
            None => Ok(self.hash_bytes(data)),
        }
    }
}
