//! Salted SHA-1 (`{SSHA}`) as used by LDAP directories

use crate::Result;
use crate::error::InternalError;
use crate::hashing::traits::{HashAlgorithmImpl, SaltUsage};
use crate::salt::Salt;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::Rng;
use sha1::{Digest, Sha1};

const PREFIX: &str = "{SSHA}";
const SHA1_LEN: usize = 20;
const GENERATED_SALT_LEN: usize = 8;

/// `{SSHA}` + base64(sha1(pass + salt) + salt)
pub struct Ssha;

impl Ssha {
    fn encode(data: &[u8], salt: &[u8]) -> String {
        let mut hasher = Sha1::new();
        hasher.update(data);
        hasher.update(salt);

        let mut raw = hasher.finalize().to_vec();
        raw.extend_from_slice(salt);
        format!("{PREFIX}{}", STANDARD.encode(raw))
    }

    /// Salt bytes stored in an SSHA digest
    fn embedded_salt(target: &str) -> Result<Vec<u8>> {
        let raw = target
            .trim()
            .strip_prefix(PREFIX)
            .and_then(|body| STANDARD.decode(body).ok())
            .filter(|raw| raw.len() > SHA1_LEN)
            .ok_or_else(|| InternalError::hash_calculation("ssha", "target is not an SSHA digest"))?;
        Ok(raw[SHA1_LEN..].to_vec())
    }
}

impl HashAlgorithmImpl for Ssha {
    fn id(&self) -> &'static str {
        "ssha"
    }

    fn display_name(&self) -> &'static str {
        "Salted SHA1"
    }

    /// Uses a fresh random salt, so repeated calls differ
    fn hash_bytes(&self, data: &[u8]) -> String {
        let mut salt = [0u8; GENERATED_SALT_LEN];
        rand::rng().fill(&mut salt);
        Self::encode(data, &salt)
    }

    fn salt_usage(&self) -> SaltUsage {
        SaltUsage::Embedded
    }

    fn hash_salted(&self, data: &[u8], salt: &Salt) -> Result<String> {
        Ok(Self::encode(data, salt.value().as_bytes()))
    }

    fn accepts_target(&self, target: &str) -> bool {
        Self::embedded_salt(target).is_ok()
    }

    fn hash_against(&self, data: &[u8], _salt: Option<&Salt>, target: &str) -> Result<String> {
        let salt = Self::embedded_salt(target)?;
        Ok(Self::encode(data, &salt))
    }
}
