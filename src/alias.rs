//! Deterministic filename → alias codec.
//!
//! Every gallery image gets an 8-character alias over `[a-z0-9]` that is used
//! as the URL fragment of a shareable deep link (`index.html#7itsvedo`). The
//! alias is derived from the filename alone, so the same file always produces
//! the same link, across builds and across implementations.
//!
//! ## Algorithm
//!
//! ```text
//! hash  = 0
//! for each UTF-16 code unit c:   hash = wrap_i32(hash * 31 + c)
//! seed  = |hash|                  (as u64, so i32::MIN does not overflow)
//! repeat 8 times:
//!     seed = (seed * 1664525 + 1013904223) mod 2^32
//!     emit ALPHABET[seed mod 36]
//! ```
//!
//! The arithmetic has to stay bit-exact: links that were already shared would
//! otherwise stop resolving. Hashing iterates UTF-16 code units rather than
//! `char`s because that is what browsers hash, which matters for non-BMP
//! characters (an emoji contributes two surrogate units).
//!
//! This is an obfuscating checksum, not a security boundary. Collisions are
//! possible in the 36^8 space and are not detected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Output alphabet. Index = `seed % 36`.
pub const ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Number of characters in every alias.
pub const ALIAS_LEN: usize = 8;

const LCG_MULTIPLIER: u64 = 1_664_525;
const LCG_INCREMENT: u64 = 1_013_904_223;
const LCG_MODULUS: u64 = 1 << 32;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AliasError {
    #[error("alias must be 8 characters, got {0}")]
    Length(usize),
    #[error("alias contains invalid character {0:?} (expected a-z or 0-9)")]
    InvalidChar(char),
}

/// An 8-character `[a-z0-9]` token identifying a gallery image in a URL fragment.
///
/// Stored inline; cheap to copy and hash. Construct with [`encode`] or
/// [`Alias::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Alias([u8; ALIAS_LEN]);

impl Alias {
    /// Parse an alias from fragment text. The input must already have its
    /// leading `#` removed.
    pub fn parse(s: &str) -> Result<Self, AliasError> {
        let bytes = s.as_bytes();
        if let Some(bad) = s
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        {
            return Err(AliasError::InvalidChar(bad));
        }
        if bytes.len() != ALIAS_LEN {
            return Err(AliasError::Length(bytes.len()));
        }
        let mut out = [0u8; ALIAS_LEN];
        out.copy_from_slice(bytes);
        Ok(Self(out))
    }

    pub fn as_str(&self) -> &str {
        // Only ever built from ALPHABET bytes, which are ASCII.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alias {
    type Err = AliasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Alias {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Serialize for Alias {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Alias {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Alias::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Java-style string hash over UTF-16 code units with 32-bit signed wraparound.
pub fn filename_hash(filename: &str) -> i32 {
    filename
        .encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_mul(31).wrapping_add(i32::from(unit))
        })
}

/// Run the LCG from an initial seed and collect the alias characters.
///
/// `seed` is `|hash|`, which is at most `2^31`, so it needs more than 31 bits.
pub fn alias_from_seed(seed: u64) -> Alias {
    let mut seed = seed;
    let mut out = [0u8; ALIAS_LEN];
    for slot in &mut out {
        seed = (seed * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        *slot = ALPHABET[(seed % ALPHABET.len() as u64) as usize];
    }
    Alias(out)
}

/// Derive the alias for a filename. Pure, deterministic, total.
pub fn encode(filename: &str) -> Alias {
    let hash = filename_hash(filename);
    alias_from_seed(u64::from(hash.unsigned_abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Known vectors (captured from a reference browser run)
    // =========================================================================

    #[test]
    fn known_vector_photo1() {
        assert_eq!(encode("photo1.jpg").as_str(), "7itsvedo");
    }

    #[test]
    fn known_vectors_short_names() {
        assert_eq!(encode("a.png").as_str(), "l836h4zm");
        assert_eq!(encode("b.png").as_str(), "at8z2t4j");
        assert_eq!(encode("c.png").as_str(), "zehore9c");
        assert_eq!(encode("sunset.webp").as_str(), "tcv2poj2");
    }

    #[test]
    fn known_vector_non_ascii() {
        assert_eq!(encode("été-à-paris.jpg").as_str(), "n29ovel4");
    }

    #[test]
    fn known_vector_surrogate_pair() {
        // U+1F304 is two UTF-16 code units
        assert_eq!(encode("🌄.png").as_str(), "s7e9kv2h");
    }

    #[test]
    fn empty_filename_is_defined() {
        let alias = encode("");
        assert_eq!(alias.as_str(), "h0buh43q");
        assert_eq!(alias.as_str().len(), ALIAS_LEN);
    }

    // =========================================================================
    // Hash arithmetic
    // =========================================================================

    #[test]
    fn hash_wraps_negative() {
        assert_eq!(filename_hash("photo1.jpg"), -552_151_630);
        assert_eq!(filename_hash("sunset.webp"), -1_889_321_996);
    }

    #[test]
    fn hash_positive() {
        assert_eq!(filename_hash("a.png"), 91_063_068);
        assert_eq!(filename_hash("🌄.png"), 1_139_885_443);
    }

    #[test]
    fn hash_of_empty_is_zero() {
        assert_eq!(filename_hash(""), 0);
        assert_eq!(encode(""), alias_from_seed(0));
    }

    #[test]
    fn min_hash_seed_does_not_overflow() {
        let seed = u64::from(i32::MIN.unsigned_abs());
        assert_eq!(seed, 1 << 31);
        assert_eq!(alias_from_seed(seed).as_str(), "1kra1kn6");
    }

    #[test]
    fn max_positive_seed() {
        assert_eq!(alias_from_seed(i32::MAX as u64).as_str(), "8v2tcjmh");
    }

    // =========================================================================
    // Alias parsing
    // =========================================================================

    #[test]
    fn parse_accepts_encoded_output() {
        let alias = encode("photo1.jpg");
        assert_eq!(Alias::parse(alias.as_str()), Ok(alias));
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert_eq!(Alias::parse("abc"), Err(AliasError::Length(3)));
        assert_eq!(Alias::parse(""), Err(AliasError::Length(0)));
        assert_eq!(Alias::parse("abcdefghi"), Err(AliasError::Length(9)));
    }

    #[test]
    fn parse_rejects_uppercase_and_symbols() {
        assert_eq!(Alias::parse("ABCDEFGH"), Err(AliasError::InvalidChar('A')));
        assert_eq!(Alias::parse("#bcdefgh"), Err(AliasError::InvalidChar('#')));
        assert_eq!(Alias::parse("abcdéfgh"), Err(AliasError::InvalidChar('é')));
    }

    #[test]
    fn from_str_matches_parse() {
        let alias: Alias = "7itsvedo".parse().unwrap();
        assert_eq!(alias, encode("photo1.jpg"));
    }

    #[test]
    fn display_is_raw_token() {
        assert_eq!(format!("#{}", encode("a.png")), "#l836h4zm");
    }

    #[test]
    fn serde_as_plain_string() {
        let alias = encode("a.png");
        let json = serde_json::to_string(&alias).unwrap();
        assert_eq!(json, "\"l836h4zm\"");
        let back: Alias = serde_json::from_str(&json).unwrap();
        assert_eq!(back, alias);
        assert!(serde_json::from_str::<Alias>("\"nope\"").is_err());
    }
}
