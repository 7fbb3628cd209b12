//! Non-cryptographic checksums

use crate::hashing::traits::HashAlgorithmImpl;
use crc::{CRC_64_XZ, Crc};

const CRC64: Crc<u64> = Crc::<u64>::new(&CRC_64_XZ);

pub struct Crc32Algorithm;

impl HashAlgorithmImpl for Crc32Algorithm {
    fn id(&self) -> &'static str {
        "crc32"
    }

    fn display_name(&self) -> &'static str {
        "CRC32"
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        format!("{:08x}", crc32fast::hash(data))
    }
}

/// CRC-64/XZ (ECMA-182 polynomial, reflected)
pub struct Crc64Algorithm;

impl HashAlgorithmImpl for Crc64Algorithm {
    fn id(&self) -> &'static str {
        "crc64"
    }

    fn display_name(&self) -> &'static str {
        "CRC64"
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        format!("{:016x}", CRC64.checksum(data))
    }
}
