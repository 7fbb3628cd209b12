//! bcrypt (`$2a$`, `$2b$`, `$2y$`)

use crate::Result;
use crate::error::{InternalError, ValidationError};
use crate::hashing::traits::{HashAlgorithmImpl, SaltUsage};
use crate::salt::Salt;
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use bcrypt::Version;
use rand::Rng;

/// bcrypt's own base64 dialect, 22 characters for the 16 byte salt
const BCRYPT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::BCRYPT,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

const ENCODED_SALT_LEN: usize = 22;
const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;
const ENCODED_DIGEST_LEN: usize = 53;

/// Parameters read back from a bcrypt digest
struct BcryptParams {
    version: Version,
    cost: u32,
    salt: [u8; 16],
}

fn decode_salt(encoded: &str) -> Option<[u8; 16]> {
    let raw = BCRYPT_BASE64.decode(encoded).ok()?;
    <[u8; 16]>::try_from(raw.as_slice()).ok()
}

fn parse_target(target: &str) -> Option<BcryptParams> {
    let mut fields = target.trim().split('$');
    fields.next().filter(|leading| leading.is_empty())?;

    let version = match fields.next()? {
        "2a" => Version::TwoA,
        "2b" => Version::TwoB,
        "2y" => Version::TwoY,
        _ => return None,
    };
    let cost = fields.next()?.parse().ok()?;
    let rest = fields.next()?;
    if fields.next().is_some() || rest.len() != ENCODED_DIGEST_LEN {
        return None;
    }

    Some(BcryptParams {
        version,
        cost,
        salt: decode_salt(rest.get(..ENCODED_SALT_LEN)?)?,
    })
}

/// Blowfish based bcrypt
pub struct Blowfish {
    cost: u32,
}

impl Default for Blowfish {
    fn default() -> Self {
        Self::new()
    }
}

impl Blowfish {
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Cost used when a digest is produced from scratch, clamped to 4..=31
    pub fn with_cost(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_COST, MAX_COST),
        }
    }

    fn compute(&self, data: &[u8], params: BcryptParams) -> Result<String> {
        bcrypt::hash_with_salt(data, params.cost, params.salt)
            .map(|parts| parts.format_for_version(params.version))
            .map_err(|e| InternalError::hash_calculation(self.id(), &e.to_string()).into())
    }
}

impl HashAlgorithmImpl for Blowfish {
    fn id(&self) -> &'static str {
        "blowfish"
    }

    fn display_name(&self) -> &'static str {
        "Blowfish (bcrypt)"
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        let mut salt = [0u8; 16];
        rand::rng().fill(&mut salt);
        let params = BcryptParams {
            version: Version::TwoB,
            cost: self.cost,
            salt,
        };
        // cost is clamped on construction so hashing cannot fail here
        self.compute(data, params).unwrap_or_default()
    }

    fn salt_usage(&self) -> SaltUsage {
        SaltUsage::Embedded
    }

    fn hash_salted(&self, data: &[u8], salt: &Salt) -> Result<String> {
        let raw = decode_salt(salt.value()).filter(|_| salt.len() == ENCODED_SALT_LEN);
        let Some(salt) = raw else {
            return Err(ValidationError::invalid_parameter(
                "salt",
                "bcrypt salts are 22 characters of bcrypt base64",
            )
            .into());
        };

        self.compute(
            data,
            BcryptParams {
                version: Version::TwoB,
                cost: self.cost,
                salt,
            },
        )
    }

    fn accepts_target(&self, target: &str) -> bool {
        parse_target(target).is_some_and(|params| (MIN_COST..=MAX_COST).contains(&params.cost))
    }

    fn hash_against(&self, data: &[u8], _salt: Option<&Salt>, target: &str) -> Result<String> {
        let params = parse_target(target).ok_or_else(|| {
            InternalError::hash_calculation(self.id(), "target is not a bcrypt digest")
        })?;
        self.compute(data, params)
    }
}
