//! Password formats of database servers

use super::generic::utf16le;
use crate::Result;
use crate::error::InternalError;
use crate::hashing::traits::{HashAlgorithmImpl, SaltUsage};
use crate::salt::Salt;
use des::Des;
use des::cipher::generic_array::GenericArray;
use des::cipher::{BlockEncrypt, KeyInit};
use md5::Md5;
use rand::Rng;
use sha1::{Digest, Sha1};

/// MySQL 4.1+ `PASSWORD()`: `*` + sha1(sha1_raw(pass)) in uppercase hex
pub struct MySql;

impl HashAlgorithmImpl for MySql {
    fn id(&self) -> &'static str {
        "mysql"
    }

    fn display_name(&self) -> &'static str {
        "MySQL 4.1+"
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        format!("*{}", hex::encode_upper(Sha1::digest(Sha1::digest(data))))
    }
}

/// PostgreSQL `md5` + md5(pass + user), the salt being the user name
pub struct PostgreSql;

impl HashAlgorithmImpl for PostgreSql {
    fn id(&self) -> &'static str {
        "postgresql"
    }

    fn display_name(&self) -> &'static str {
        "PostgreSQL MD5"
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        format!("md5{}", hex::encode(Md5::digest(data)))
    }

    fn salt_usage(&self) -> SaltUsage {
        SaltUsage::Structural
    }

    fn hash_salted(&self, data: &[u8], salt: &Salt) -> Result<String> {
        let combined = [data, salt.value().as_bytes()].concat();
        Ok(self.hash_bytes(&combined))
    }
}

/// Oracle 10g DES based hash, the salt being the user name
pub struct Oracle10g;

impl Oracle10g {
    pub const DEFAULT_USER: &'static str = "SYSTEM";
    const INITIAL_KEY: [u8; 8] = [0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF];

    fn compute(user: &str, password: &[u8]) -> String {
        let combined = format!("{user}{}", String::from_utf8_lossy(password)).to_uppercase();
        let mut data: Vec<u8> = combined
            .encode_utf16()
            .flat_map(u16::to_be_bytes)
            .collect();
        let padded = data.len().div_ceil(8) * 8;
        data.resize(padded, 0);

        let second_key = des_cbc_mac(&Self::INITIAL_KEY, &data);
        hex::encode_upper(des_cbc_mac(&second_key, &data))
    }
}

/// Last block of a zero-IV DES-CBC encryption
fn des_cbc_mac(key: &[u8; 8], data: &[u8]) -> [u8; 8] {
    let cipher = Des::new(GenericArray::from_slice(key));
    let mut chain = [0u8; 8];

    for block in data.chunks(8) {
        for (c, b) in chain.iter_mut().zip(block) {
            *c ^= b;
        }
        let mut buffer = GenericArray::from(chain);
        cipher.encrypt_block(&mut buffer);
        chain.copy_from_slice(&buffer);
    }

    chain
}

impl HashAlgorithmImpl for Oracle10g {
    fn id(&self) -> &'static str {
        "oracle 10g"
    }

    fn display_name(&self) -> &'static str {
        "Oracle 10g"
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        Self::compute(Self::DEFAULT_USER, data)
    }

    fn salt_usage(&self) -> SaltUsage {
        SaltUsage::Structural
    }

    fn hash_salted(&self, data: &[u8], salt: &Salt) -> Result<String> {
        Ok(Self::compute(salt.value(), data))
    }
}

/// Oracle 11g `S:` + sha1(pass + salt) + salt, all uppercase hex
pub struct Oracle11g;

impl Oracle11g {
    const PREFIX: &'static str = "S:";
    const SALT_LEN: usize = 10;

    fn compute(data: &[u8], salt: &[u8]) -> String {
        let mut hasher = Sha1::new();
        hasher.update(data);
        hasher.update(salt);
        format!(
            "{}{}{}",
            Self::PREFIX,
            hex::encode_upper(hasher.finalize()),
            hex::encode_upper(salt)
        )
    }

    fn embedded_salt(target: &str) -> Result<Vec<u8>> {
        target
            .trim()
            .strip_prefix(Self::PREFIX)
            .and_then(|body| body.get(40..))
            .and_then(|salt| hex::decode(salt).ok())
            .filter(|salt| !salt.is_empty())
            .ok_or_else(|| {
                InternalError::hash_calculation("oracle 11g", "target is not an oracle 11g digest")
                    .into()
            })
    }
}

impl HashAlgorithmImpl for Oracle11g {
    fn id(&self) -> &'static str {
        "oracle 11g"
    }

    fn display_name(&self) -> &'static str {
        "Oracle 11g"
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        let mut salt = [0u8; Self::SALT_LEN];
        rand::rng().fill(&mut salt);
        Self::compute(data, &salt)
    }

    fn salt_usage(&self) -> SaltUsage {
        SaltUsage::Embedded
    }

    fn hash_salted(&self, data: &[u8], salt: &Salt) -> Result<String> {
        Ok(Self::compute(data, salt.value().as_bytes()))
    }

    fn accepts_target(&self, target: &str) -> bool {
        Self::embedded_salt(target).is_ok()
    }

    fn hash_against(&self, data: &[u8], _salt: Option<&Salt>, target: &str) -> Result<String> {
        let salt = Self::embedded_salt(target)?;
        Ok(Self::compute(data, &salt))
    }
}

/// Microsoft SQL Server `0x0100` hashes over the UTF-16LE password
///
/// The 2000 variant appends a second digest of the uppercased password.
pub struct MsSql {
    legacy: bool,
}

impl MsSql {
    const PREFIX: &'static str = "0x0100";
    const SALT_LEN: usize = 4;

    pub const fn v2000() -> Self {
        Self { legacy: true }
    }

    pub const fn v2005() -> Self {
        Self { legacy: false }
    }

    fn compute(&self, data: &[u8], salt: &[u8]) -> String {
        let sha1 = |password: &[u8]| {
            let mut hasher = Sha1::new();
            hasher.update(utf16le(password));
            hasher.update(salt);
            hex::encode_upper(hasher.finalize())
        };

        let mut digest = format!("{}{}{}", Self::PREFIX, hex::encode_upper(salt), sha1(data));
        if self.legacy {
            let upper = String::from_utf8_lossy(data).to_uppercase();
            digest.push_str(&sha1(upper.as_bytes()));
        }
        digest
    }

    fn embedded_salt(&self, target: &str) -> Result<Vec<u8>> {
        target
            .trim()
            .strip_prefix(Self::PREFIX)
            .and_then(|body| body.get(..Self::SALT_LEN * 2))
            .and_then(|salt| hex::decode(salt).ok())
            .ok_or_else(|| {
                InternalError::hash_calculation(self.id(), "target is not an mssql digest").into()
            })
    }
}

impl HashAlgorithmImpl for MsSql {
    fn id(&self) -> &'static str {
        if self.legacy { "mssql 2000" } else { "mssql 2005" }
    }

    fn display_name(&self) -> &'static str {
        if self.legacy {
            "Microsoft SQL Server 2000"
        } else {
            "Microsoft SQL Server 2005"
        }
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        let mut salt = [0u8; Self::SALT_LEN];
        rand::rng().fill(&mut salt);
        self.compute(data, &salt)
    }

    fn salt_usage(&self) -> SaltUsage {
        SaltUsage::Embedded
    }

    fn hash_salted(&self, data: &[u8], salt: &Salt) -> Result<String> {
        Ok(self.compute(data, salt.value().as_bytes()))
    }

    fn accepts_target(&self, target: &str) -> bool {
        self.embedded_salt(target).is_ok()
    }

    fn hash_against(&self, data: &[u8], _salt: Option<&Salt>, target: &str) -> Result<String> {
        let salt = self.embedded_salt(target)?;
        Ok(self.compute(data, &salt))
    }
}
