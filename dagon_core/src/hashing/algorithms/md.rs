//! MD family constructions that need more than a plain digest

use super::generic::utf16le;
use crate::Result;
use crate::hashing::traits::{HashAlgorithmImpl, SaltUsage};
use crate::salt::Salt;
use md4::Md4;
use md5::{Digest, Md5};

fn md5_hex(data: &[u8]) -> String {
    hex::encode(Md5::digest(data))
}

/// md5(md5(pass) + md5(salt))
///
/// The salt value is hashed on its own, so placement does not apply.
pub struct Md5SaltedPair;

impl HashAlgorithmImpl for Md5SaltedPair {
    fn id(&self) -> &'static str {
        "md5(md5(pass)+md5(salt))"
    }

    fn display_name(&self) -> &'static str {
        "MD5 of MD5 pass and MD5 salt"
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        let combined = md5_hex(data) + &md5_hex(b"");
        md5_hex(combined.as_bytes())
    }

    fn salt_usage(&self) -> SaltUsage {
        SaltUsage::Structural
    }

    fn hash_salted(&self, data: &[u8], salt: &Salt) -> Result<String> {
        let combined = md5_hex(data) + &md5_hex(salt.value().as_bytes());
        Ok(md5_hex(combined.as_bytes()))
    }
}

/// md5(salt + pass + salt)
pub struct Md5SaltWrapped;

impl HashAlgorithmImpl for Md5SaltWrapped {
    fn id(&self) -> &'static str {
        "md5(salt+pass+salt)"
    }

    fn display_name(&self) -> &'static str {
        "MD5 salt wrapped"
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        md5_hex(data)
    }

    fn salt_usage(&self) -> SaltUsage {
        SaltUsage::Structural
    }

    fn hash_salted(&self, data: &[u8], salt: &Salt) -> Result<String> {
        let salt = salt.value().as_bytes();
        let wrapped = [salt, data, salt].concat();
        Ok(md5_hex(&wrapped))
    }
}

/// Windows NT hash: md4 over the UTF-16LE password
pub struct Ntlm;

impl HashAlgorithmImpl for Ntlm {
    fn id(&self) -> &'static str {
        "ntlm"
    }

    fn display_name(&self) -> &'static str {
        "NTLM"
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        hex::encode(Md4::digest(utf16le(data)))
    }
}
