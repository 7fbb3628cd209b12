//! Well-known digests and word lists

/// md5("password")
pub const MD5_PASSWORD: &str = "5f4dcc3b5aa765d61d8327deb882cf99";

/// sha1("password")
pub const SHA1_PASSWORD: &str = "5baa61e4c9b93f3f0682250b6cf8331b7ee68fd8";

/// sha256("password")
pub const SHA256_PASSWORD: &str =
    "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8";

/// NTLM("password")
pub const NTLM_PASSWORD: &str = "8846f7eaee8fb117ad06bdd830b7586c";

/// MySQL 4.1+ PASSWORD('password')
pub const MYSQL_PASSWORD: &str = "*2470C0C06DEE42FD1618BB99005ADCA2EC9D1E19";

/// A bcrypt digest with cost 10
pub const BCRYPT_SAMPLE: &str = "$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";

/// An md5crypt digest, a format the registry recognises but cannot compute
pub const MD5CRYPT_SAMPLE: &str = "$1$abcdefgh$ABCDEFGHIJKLMNOPQRSTUV";

/// Short dictionary containing "password" at 1-based position 4
pub const COMMON_WORDS: &[&str] = &["123456", "qwerty", "letmein", "password", "dragon"];
