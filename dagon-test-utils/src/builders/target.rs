//! Target digests computed through the real registry

use dagon_core::{AlgorithmRegistry, Result, Salt, SaltPlacement};

/// Builder for a digest of a known plaintext
pub struct TargetBuilder {
    algorithm: String,
    plaintext: String,
    salt: Option<Salt>,
}

impl TargetBuilder {
    /// Digest of `plaintext` under the algorithm named `algorithm`
    pub fn new(algorithm: &str, plaintext: &str) -> Self {
        Self {
            algorithm: algorithm.to_string(),
            plaintext: plaintext.to_string(),
            salt: None,
        }
    }

    /// Salt the plaintext before hashing
    pub fn with_salt(mut self, value: &str, placement: SaltPlacement) -> Self {
        self.salt = Some(Salt::new(value, placement));
        self
    }

    pub fn salt(&self) -> Option<&Salt> {
        self.salt.as_ref()
    }

    /// Compute the digest
    pub fn build(&self) -> Result<String> {
        let registry = AlgorithmRegistry::with_builtins();
        let primitive = registry.get(&self.algorithm)?;
        match &self.salt {
            Some(salt) => primitive.hash_salted(self.plaintext.as_bytes(), salt),
            None => Ok(primitive.hash_bytes(self.plaintext.as_bytes())),
        }
    }
}
