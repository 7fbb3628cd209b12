//! Digest shapes and fingerprints
//!
//! A [`DigestShape`] is the static description of what an algorithm's output
//! looks like. A [`DigestFingerprint`] is derived from a concrete digest
//! string. The classifier compares the two.

use serde::Serialize;

/// Characters that separate fields in structured digest formats
const SEPARATORS: &[char] = &['$', ':', '*', '{', '}'];

/// Character set of a digest body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alphabet {
    /// `0-9a-fA-F`
    Hex,
    /// Standard base64 including padding
    Base64,
    /// crypt(3) style `./0-9A-Za-z` plus `$` field separators
    Crypt,
}

impl Alphabet {
    pub fn contains(self, c: char) -> bool {
        match self {
            Alphabet::Hex => c.is_ascii_hexdigit(),
            Alphabet::Base64 => c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='),
            Alphabet::Crypt => c.is_ascii_alphanumeric() || matches!(c, '.' | '/' | '$'),
        }
    }

    /// Narrower alphabets say more about a digest
    fn specificity(self) -> u32 {
        match self {
            Alphabet::Hex => 3,
            Alphabet::Crypt => 2,
            Alphabet::Base64 => 1,
        }
    }
}

/// Case a primitive emits hex digits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HexCase {
    Lower,
    Upper,
}

/// How well a digest fits a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ShapeMatch {
    None,
    /// Shares some structure (length family, prefix) but not all of it
    Partial,
    Exact,
}

/// Expected structure of an algorithm's digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DigestShape {
    /// Accepted literal prefixes; empty means none is required
    prefixes: &'static [&'static str],
    /// Body length range in characters, after the prefix
    min_len: usize,
    max_len: usize,
    alphabet: Alphabet,
    case: HexCase,
    /// Body starts with a two digit cost and `$`, not counted in the length
    cost_field: bool,
}

impl DigestShape {
    /// Fixed-length lowercase hex
    pub const fn hex(len: usize) -> Self {
        Self {
            prefixes: &[],
            min_len: len,
            max_len: len,
            alphabet: Alphabet::Hex,
            case: HexCase::Lower,
            cost_field: false,
        }
    }

    /// Fixed-length uppercase hex
    pub const fn upper_hex(len: usize) -> Self {
        Self {
            case: HexCase::Upper,
            ..Self::hex(len)
        }
    }

    /// Variable-length body in a given alphabet
    pub const fn encoded(alphabet: Alphabet, min_len: usize, max_len: usize) -> Self {
        Self {
            prefixes: &[],
            min_len,
            max_len,
            alphabet,
            case: HexCase::Lower,
            cost_field: false,
        }
    }

    /// Require one of `prefixes` in front of the body
    pub const fn with_prefixes(mut self, prefixes: &'static [&'static str]) -> Self {
        self.prefixes = prefixes;
        self
    }

    /// Require a `NN$` cost field between the prefix and the body
    pub const fn with_cost_field(mut self) -> Self {
        self.cost_field = true;
        self
    }

    pub fn prefixes(&self) -> &'static [&'static str] {
        self.prefixes
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Ranking weight: a required prefix beats a fixed length beats an alphabet
    pub fn specificity(&self) -> u32 {
        let prefix = self.prefixes.iter().map(|p| p.len()).max().unwrap_or(0) as u32;
        let fixed = if self.min_len == self.max_len { 10 } else { 0 };
        prefix * 100 + fixed + self.alphabet.specificity()
    }

    fn body_fits(&self, body: &str) -> (bool, bool) {
        let body = if self.cost_field {
            match body.as_bytes() {
                [a, b, b'$', ..] if a.is_ascii_digit() && b.is_ascii_digit() => &body[3..],
                _ => return (false, body.chars().all(|c| self.alphabet.contains(c))),
            }
        } else {
            body
        };
        let len = body.chars().count();
        let len_ok = (self.min_len..=self.max_len).contains(&len);
        let alphabet_ok = body.chars().all(|c| self.alphabet.contains(c));
        (len_ok, alphabet_ok)
    }

    fn strip_prefix<'d>(&self, digest: &'d str) -> Option<&'d str> {
        if self.prefixes.is_empty() {
            return Some(digest);
        }
        self.prefixes.iter().find_map(|p| digest.strip_prefix(p))
    }

    /// Compare a digest against this shape
    ///
    /// Unprefixed shapes match partially when the length fits but the
    /// alphabet does not. Prefixed shapes match partially when the prefix is
    /// present but the body is off, or when the prefix is missing and the
    /// whole digest, free of separators, looks like a bare body.
    pub fn compare(&self, digest: &str, fingerprint: &DigestFingerprint) -> ShapeMatch {
        if fingerprint.length == 0 {
            return ShapeMatch::None;
        }

        match self.strip_prefix(digest) {
            Some(body) => match self.body_fits(body) {
                (true, true) => ShapeMatch::Exact,
                (true, false) => ShapeMatch::Partial,
                (false, true) if !self.prefixes.is_empty() => ShapeMatch::Partial,
                _ => ShapeMatch::None,
            },
            None if fingerprint.has_separators() => ShapeMatch::None,
            None => match self.body_fits(digest) {
                (true, true) => ShapeMatch::Partial,
                _ => ShapeMatch::None,
            },
        }
    }

    /// Fold a digest into the form the primitive emits
    ///
    /// Only the hex case of the body changes; anything else is returned
    /// trimmed but otherwise untouched.
    pub fn canonicalize(&self, digest: &str) -> String {
        let digest = digest.trim();
        if self.alphabet != Alphabet::Hex {
            return digest.to_string();
        }

        let (prefix, body) = match self.prefixes.iter().find(|p| digest.starts_with(**p)) {
            Some(prefix) => digest.split_at(prefix.len()),
            None if self.prefixes.is_empty() => ("", digest),
            None => return digest.to_string(),
        };

        match self.case {
            HexCase::Lower => format!("{prefix}{}", body.to_ascii_lowercase()),
            HexCase::Upper => format!("{prefix}{}", body.to_ascii_uppercase()),
        }
    }
}

/// Whole-string character class of a digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CharClass {
    Hex,
    Base64,
    Mixed,
}

/// Structural features of a concrete digest string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DigestFingerprint {
    pub length: usize,
    pub char_class: CharClass,
    /// Distinct separator characters in order of first appearance
    pub separators: Vec<char>,
}

impl DigestFingerprint {
    pub fn of(digest: &str) -> Self {
        let digest = digest.trim();

        let char_class = if digest.is_empty() {
            CharClass::Mixed
        } else if digest.chars().all(|c| Alphabet::Hex.contains(c)) {
            CharClass::Hex
        } else if digest.chars().all(|c| Alphabet::Base64.contains(c)) {
            CharClass::Base64
        } else {
            CharClass::Mixed
        };

        let mut separators = Vec::new();
        for c in digest.chars().filter(|c| SEPARATORS.contains(c)) {
            if !separators.contains(&c) {
                separators.push(c);
            }
        }

        Self {
            length: digest.chars().count(),
            char_class,
            separators,
        }
    }

    pub fn has_separators(&self) -> bool {
        !self.separators.is_empty()
    }
}
