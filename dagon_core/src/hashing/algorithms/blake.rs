//! BLAKE, the SHA-3 finalist (not BLAKE2)

use crate::hashing::traits::HashAlgorithmImpl;
use blake_hash::{Blake224, Blake256, Blake384, Blake512, Digest};

/// Output width of a BLAKE instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlakeWidth {
    W224,
    W256,
    W384,
    W512,
}

pub struct Blake {
    width: BlakeWidth,
}

impl Blake {
    pub const fn new(width: BlakeWidth) -> Self {
        Self { width }
    }
}

impl HashAlgorithmImpl for Blake {
    fn id(&self) -> &'static str {
        match self.width {
            BlakeWidth::W224 => "blake224",
            BlakeWidth::W256 => "blake256",
            BlakeWidth::W384 => "blake384",
            BlakeWidth::W512 => "blake512",
        }
    }

    fn display_name(&self) -> &'static str {
        match self.width {
            BlakeWidth::W224 => "BLAKE-224",
            BlakeWidth::W256 => "BLAKE-256",
            BlakeWidth::W384 => "BLAKE-384",
            BlakeWidth::W512 => "BLAKE-512",
        }
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        match self.width {
            BlakeWidth::W224 => hex::encode(Blake224::digest(data)),
            BlakeWidth::W256 => hex::encode(Blake256::digest(data)),
            BlakeWidth::W384 => hex::encode(Blake384::digest(data)),
            BlakeWidth::W512 => hex::encode(Blake512::digest(data)),
        }
    }
}
