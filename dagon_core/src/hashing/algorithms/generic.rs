//! Adapters turning RustCrypto hash functions into registry primitives

use crate::hashing::traits::HashAlgorithmImpl;
use digest::Digest;
use std::marker::PhantomData;

/// Lowercase hex digest of a single hash function
pub struct DigestAlgorithm<D> {
    id: &'static str,
    display_name: &'static str,
    _hasher: PhantomData<fn() -> D>,
}

impl<D> DigestAlgorithm<D> {
    pub const fn new(id: &'static str, display_name: &'static str) -> Self {
        Self {
            id,
            display_name,
            _hasher: PhantomData,
        }
    }
}

impl<D: Digest> HashAlgorithmImpl for DigestAlgorithm<D> {
    fn id(&self) -> &'static str {
        self.id
    }

    fn display_name(&self) -> &'static str {
        self.display_name
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        hex::encode(D::digest(data))
    }
}

/// Hash function applied repeatedly to its own hex output
pub struct IteratedDigest<D> {
    id: &'static str,
    display_name: &'static str,
    rounds: usize,
    _hasher: PhantomData<fn() -> D>,
}

impl<D> IteratedDigest<D> {
    pub const fn new(id: &'static str, display_name: &'static str, rounds: usize) -> Self {
        Self {
            id,
            display_name,
            rounds,
            _hasher: PhantomData,
        }
    }
}

impl<D: Digest> HashAlgorithmImpl for IteratedDigest<D> {
    fn id(&self) -> &'static str {
        self.id
    }

    fn display_name(&self) -> &'static str {
        self.display_name
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        let mut digest = hex::encode(D::digest(data));
        for _ in 1..self.rounds {
            digest = hex::encode(D::digest(digest.as_bytes()));
        }
        digest
    }
}

/// Middle sixteen hex characters of a digest
pub struct HalfDigest<D> {
    id: &'static str,
    display_name: &'static str,
    _hasher: PhantomData<fn() -> D>,
}

impl<D> HalfDigest<D> {
    pub const fn new(id: &'static str, display_name: &'static str) -> Self {
        Self {
            id,
            display_name,
            _hasher: PhantomData,
        }
    }
}

impl<D: Digest> HashAlgorithmImpl for HalfDigest<D> {
    fn id(&self) -> &'static str {
        self.id
    }

    fn display_name(&self) -> &'static str {
        self.display_name
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        let digest = hex::encode(D::digest(data));
        digest[8..24].to_string()
    }
}

/// UTF-16LE encoding of (lossily decoded) UTF-8 input
pub(super) fn utf16le(data: &[u8]) -> Vec<u8> {
    String::from_utf8_lossy(data)
        .encode_utf16()
        .flat_map(u16::to_le_bytes)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use md5::Md5;
    use sha1::Sha1;

    #[test]
    fn test_plain_digest() {
        let md5 = DigestAlgorithm::<Md5>::new("md5", "MD5");
        assert_eq!(md5.hash_bytes(b"password"), "5f4dcc3b5aa765d61d8327deb882cf99");
        assert_eq!(md5.hash_bytes(b""), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_iterated_digest_hashes_hex_output() {
        let md5 = DigestAlgorithm::<Md5>::new("md5", "MD5");
        let double = IteratedDigest::<Md5>::new("md5(md5(pass))", "Double MD5", 2);
        let triple = IteratedDigest::<Md5>::new("md5(md5(md5(pass)))", "Triple MD5", 3);

        let once = md5.hash_bytes(b"password");
        let twice = md5.hash_bytes(once.as_bytes());
        assert_eq!(double.hash_bytes(b"password"), twice);
        assert_eq!(triple.hash_bytes(b"password"), md5.hash_bytes(twice.as_bytes()));
    }

    #[test]
    fn test_half_digest() {
        let half = HalfDigest::<Sha1>::new("half sha1", "Half SHA1");
        let full = "5baa61e4c9b93f3f0682250b6cf8331b7ee68fd8";
        assert_eq!(half.hash_bytes(b"password"), &full[8..24]);
    }

    #[test]
    fn test_utf16le() {
        assert_eq!(utf16le(b"ab"), vec![b'a', 0, b'b', 0]);
    }
}
