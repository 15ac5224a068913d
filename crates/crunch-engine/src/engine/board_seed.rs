use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for deterministic board generation and refill.
///
/// This is a 128-bit (16-byte) seed for the board's random number
/// generator. Two boards built from the same seed and mask, and driven by
/// the same sequence of swaps, go through exactly the same states. It is
/// written as a 32-character hex string.
///
/// # Example
///
/// ```
/// use crunch_engine::BoardSeed;
/// use rand::Rng as _;
///
/// let seed: BoardSeed = rand::rng().random();
/// let parsed: BoardSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed: {reason}")]
pub struct ParseSeedError {
    #[error(not(source))]
    reason: String,
}

impl BoardSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub(crate) fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for BoardSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for BoardSeed {
    type Err = ParseSeedError;

    fn from_str(hex_str: &str) -> Result<Self, Self::Err> {
        if hex_str.len() != 32 {
            return Err(ParseSeedError {
                reason: format!("expected 32 characters, got {}", hex_str.len()),
            });
        }
        let num = u128::from_str_radix(hex_str, 16).map_err(|e| ParseSeedError {
            reason: format!("{hex_str} ({e})"),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for BoardSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BoardSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `BoardSeed` values with `rng.random()`.
impl Distribution<BoardSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BoardSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        BoardSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng as _;

    use super::*;

    #[test]
    fn test_format_is_32_char_hex_string() {
        let seed: BoardSeed = rand::rng().random();
        let serialized = serde_json::to_string(&seed).unwrap();
        let hex_str = serialized.trim_matches('"');
        assert_eq!(hex_str.len(), 32);
        assert!(hex_str.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_known_value_sequential_bytes() {
        // Big-endian: first byte appears first in the hex string
        let seed = BoardSeed::from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");

        let deserialized: BoardSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, seed);
    }

    #[test]
    fn test_parse_uppercase_hex() {
        let seed: BoardSeed = "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF".parse().unwrap();
        assert_eq!(seed.as_bytes(), &[0xFF; 16]);
    }

    #[test]
    fn test_error_cases() {
        let too_short = "0123456789abcdef0123456789abcde".parse::<BoardSeed>();
        assert!(too_short.unwrap_err().to_string().contains("invalid hex"));

        let not_hex = "ghijklmnopqrstuvwxyzghijklmnopqr".parse::<BoardSeed>();
        assert!(not_hex.unwrap_err().to_string().contains("invalid hex"));

        let result: Result<BoardSeed, _> = serde_json::from_str("\"\"");
        assert!(result.unwrap_err().to_string().contains("invalid hex"));
    }

    #[test]
    fn test_same_seed_same_rng_stream() {
        let seed: BoardSeed = rand::rng().random();
        let mut rng1 = seed.rng();
        let mut rng2 = seed.rng();
        for _ in 0..20 {
            assert_eq!(rng1.random::<u32>(), rng2.random::<u32>());
        }
    }
}
