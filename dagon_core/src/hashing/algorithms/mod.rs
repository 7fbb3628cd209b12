//! Hash algorithm implementations and the built-in identification table

use super::algorithm::AlgorithmSpec;
use super::registry::AlgorithmRegistry;
use super::shape::{Alphabet, DigestShape};

mod blake;
mod blowfish;
mod checksum;
mod database;
mod generic;
mod md;
mod sha;

pub use blake::{Blake, BlakeWidth};
pub use blowfish::Blowfish;
pub use checksum::{Crc32Algorithm, Crc64Algorithm};
pub use database::{MsSql, MySql, Oracle10g, Oracle11g, PostgreSql};
pub use generic::{DigestAlgorithm, HalfDigest, IteratedDigest};
pub use md::{Md5SaltWrapped, Md5SaltedPair, Ntlm};
pub use sha::Ssha;

const HEX_32: DigestShape = DigestShape::hex(32);
const HEX_40: DigestShape = DigestShape::hex(40);
const HEX_56: DigestShape = DigestShape::hex(56);
const HEX_64: DigestShape = DigestShape::hex(64);
const HEX_96: DigestShape = DigestShape::hex(96);
const HEX_128: DigestShape = DigestShape::hex(128);

/// Every entry of the built-in table, in code order
fn builtin_specs() -> Vec<AlgorithmSpec> {
    use md2::Md2;
    use md4::Md4;
    use md5::Md5;
    use ripemd::Ripemd160;
    use sha1::Sha1;
    use sha2::{Sha224, Sha256, Sha384, Sha512};
    use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};
    use tiger::Tiger;
    use whirlpool::Whirlpool;

    vec![
        // MD family
        AlgorithmSpec::implemented(100, "md5", HEX_32, DigestAlgorithm::<Md5>::new("md5", "MD5")),
        AlgorithmSpec::implemented(110, "md2", HEX_32, DigestAlgorithm::<Md2>::new("md2", "MD2")),
        AlgorithmSpec::implemented(120, "md4", HEX_32, DigestAlgorithm::<Md4>::new("md4", "MD4")),
        AlgorithmSpec::implemented(130, "md5(md5(pass)+md5(salt))", HEX_32, Md5SaltedPair),
        AlgorithmSpec::implemented(
            131,
            "md5(md5(pass))",
            HEX_32,
            IteratedDigest::<Md5>::new("md5(md5(pass))", "Double MD5", 2),
        ),
        AlgorithmSpec::implemented(
            132,
            "half md5",
            DigestShape::hex(16),
            HalfDigest::<Md5>::new("half md5", "Half MD5"),
        ),
        AlgorithmSpec::implemented(133, "md5(salt+pass+salt)", HEX_32, Md5SaltWrapped),
        AlgorithmSpec::implemented(
            134,
            "md5(md5(md5(pass)))",
            HEX_32,
            IteratedDigest::<Md5>::new("md5(md5(md5(pass)))", "Triple MD5", 3),
        ),
        // BLAKE
        AlgorithmSpec::implemented(200, "blake224", HEX_56, Blake::new(BlakeWidth::W224)),
        AlgorithmSpec::implemented(210, "blake256", HEX_64, Blake::new(BlakeWidth::W256)),
        AlgorithmSpec::implemented(220, "blake384", HEX_96, Blake::new(BlakeWidth::W384)),
        AlgorithmSpec::implemented(230, "blake512", HEX_128, Blake::new(BlakeWidth::W512)),
        // SHA-1 and SHA-2
        AlgorithmSpec::implemented(300, "sha1", HEX_40, DigestAlgorithm::<Sha1>::new("sha1", "SHA1")),
        AlgorithmSpec::implemented(
            310,
            "sha224",
            HEX_56,
            DigestAlgorithm::<Sha224>::new("sha224", "SHA224"),
        ),
        AlgorithmSpec::implemented(
            320,
            "sha256",
            HEX_64,
            DigestAlgorithm::<Sha256>::new("sha256", "SHA256"),
        ),
        AlgorithmSpec::implemented(
            330,
            "sha384",
            HEX_96,
            DigestAlgorithm::<Sha384>::new("sha384", "SHA384"),
        ),
        AlgorithmSpec::implemented(
            340,
            "sha512",
            HEX_128,
            DigestAlgorithm::<Sha512>::new("sha512", "SHA512"),
        ),
        AlgorithmSpec::implemented(
            351,
            "half sha1",
            DigestShape::hex(16),
            HalfDigest::<Sha1>::new("half sha1", "Half SHA1"),
        ),
        AlgorithmSpec::implemented(
            352,
            "sha1(sha1(pass))",
            HEX_40,
            IteratedDigest::<Sha1>::new("sha1(sha1(pass))", "Double SHA1", 2),
        ),
        AlgorithmSpec::implemented(
            353,
            "ssha",
            DigestShape::encoded(Alphabet::Base64, 28, 88).with_prefixes(&["{SSHA}"]),
            Ssha,
        ),
        AlgorithmSpec::implemented(
            354,
            "sha1(sha1(sha1(pass)))",
            HEX_40,
            IteratedDigest::<Sha1>::new("sha1(sha1(sha1(pass)))", "Triple SHA1", 3),
        ),
        // SHA-3
        AlgorithmSpec::implemented(
            400,
            "sha3_224",
            HEX_56,
            DigestAlgorithm::<Sha3_224>::new("sha3_224", "SHA3-224"),
        ),
        AlgorithmSpec::implemented(
            410,
            "sha3_256",
            HEX_64,
            DigestAlgorithm::<Sha3_256>::new("sha3_256", "SHA3-256"),
        ),
        AlgorithmSpec::implemented(
            420,
            "sha3_384",
            HEX_96,
            DigestAlgorithm::<Sha3_384>::new("sha3_384", "SHA3-384"),
        ),
        AlgorithmSpec::implemented(
            430,
            "sha3_512",
            HEX_128,
            DigestAlgorithm::<Sha3_512>::new("sha3_512", "SHA3-512"),
        ),
        // Application and database formats
        AlgorithmSpec::implemented(
            500,
            "blowfish",
            DigestShape::encoded(Alphabet::Crypt, 53, 53)
                .with_prefixes(&["$2a$", "$2b$", "$2y$"])
                .with_cost_field(),
            Blowfish::new(),
        )
        .with_aliases(&["bcrypt"]),
        AlgorithmSpec::implemented(
            510,
            "mysql",
            DigestShape::upper_hex(40).with_prefixes(&["*"]),
            MySql,
        ),
        AlgorithmSpec::implemented(
            520,
            "oracle 11g",
            DigestShape::upper_hex(60).with_prefixes(&["S:"]),
            Oracle11g,
        ),
        AlgorithmSpec::implemented(530, "oracle 10g", DigestShape::upper_hex(16), Oracle10g),
        AlgorithmSpec::implemented(
            540,
            "mssql 2005",
            DigestShape::upper_hex(48).with_prefixes(&["0x0100"]),
            MsSql::v2005(),
        ),
        AlgorithmSpec::implemented(
            550,
            "postgresql",
            DigestShape::hex(32).with_prefixes(&["md5"]),
            PostgreSql,
        ),
        AlgorithmSpec::implemented(
            560,
            "mssql 2000",
            DigestShape::upper_hex(88).with_prefixes(&["0x0100"]),
            MsSql::v2000(),
        ),
        // Other digests and checksums
        AlgorithmSpec::implemented(
            600,
            "ripemd160",
            HEX_40,
            DigestAlgorithm::<Ripemd160>::new("ripemd160", "RIPEMD-160"),
        ),
        AlgorithmSpec::implemented(
            700,
            "tiger192",
            DigestShape::hex(48),
            DigestAlgorithm::<Tiger>::new("tiger192", "Tiger/192"),
        ),
        AlgorithmSpec::implemented(
            800,
            "whirlpool",
            HEX_128,
            DigestAlgorithm::<Whirlpool>::new("whirlpool", "Whirlpool"),
        ),
        AlgorithmSpec::implemented(900, "crc32", DigestShape::hex(8), Crc32Algorithm),
        AlgorithmSpec::implemented(1000, "ntlm", HEX_32, Ntlm)
            .with_aliases(&["windows local (ntlm)"]),
        AlgorithmSpec::implemented(1100, "crc64", DigestShape::hex(16), Crc64Algorithm),
        // Recognised but not computable
        AlgorithmSpec::unimplemented(
            1200,
            "wordpress",
            DigestShape::encoded(Alphabet::Crypt, 31, 31).with_prefixes(&["$P$", "$H$"]),
        )
        .with_aliases(&["phpass"]),
        AlgorithmSpec::unimplemented(
            1210,
            "md5crypt",
            DigestShape::encoded(Alphabet::Crypt, 23, 31).with_prefixes(&["$1$"]),
        ),
        AlgorithmSpec::unimplemented(
            1220,
            "sha512crypt",
            DigestShape::encoded(Alphabet::Crypt, 87, 103).with_prefixes(&["$6$"]),
        ),
        AlgorithmSpec::unimplemented(
            1230,
            "scrypt",
            DigestShape::encoded(Alphabet::Crypt, 55, 120).with_prefixes(&["$7$"]),
        ),
        AlgorithmSpec::unimplemented(1240, "haval160", HEX_40),
        AlgorithmSpec::unimplemented(1250, "tiger160", HEX_40),
        AlgorithmSpec::unimplemented(1260, "mysql323", DigestShape::hex(16)),
    ]
}

/// Register all built-in algorithms with the registry
pub(crate) fn register_all(registry: &mut AlgorithmRegistry) {
    for spec in builtin_specs() {
        let code = spec.code();
        if let Err(e) = registry.register(spec) {
            log::error!("Skipping built-in algorithm {code}: {e}");
        }
    }
}
