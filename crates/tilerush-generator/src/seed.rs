use std::{fmt, str::FromStr};

use rand::prelude::*;
use rand_pcg::Pcg64;

/// A 256-bit seed from which a board (or a bot run) is derived.
///
/// Seeds are displayed and parsed as 64 lowercase hexadecimal characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSeed([u8; 32]);

impl BoardSeed {
    /// Draws a fresh seed from the thread-local generator.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::rng().random())
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Creates the deterministic generator for this seed.
    #[must_use]
    pub fn rng(&self) -> Pcg64 {
        Pcg64::from_seed(self.0)
    }
}

impl From<[u8; 32]> for BoardSeed {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for BoardSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Errors returned when parsing a [`BoardSeed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SeedParseError {
    /// The input is not 64 characters long.
    #[display("seed must be 64 hex characters, got {len}")]
    InvalidLength {
        /// Length of the rejected input.
        len: usize,
    },
    /// The input contains a non-hexadecimal character.
    #[display("invalid hex digit at position {position}")]
    InvalidHex {
        /// Character offset of the first invalid digit.
        position: usize,
    },
}

impl FromStr for BoardSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 64 {
            return Err(SeedParseError::InvalidLength { len: s.len() });
        }

        let digits = s.as_bytes();
        let nibble = |position: usize| {
            char::from(digits[position])
                .to_digit(16)
                .and_then(|digit| u8::try_from(digit).ok())
                .ok_or(SeedParseError::InvalidHex { position })
        };

        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let hi = nibble(2 * i)?;
            let lo = nibble(2 * i + 1)?;
            *byte = (hi << 4) | lo;
        }
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1";

    #[test]
    fn test_display_parse_roundtrip() {
        let seed: BoardSeed = SEED.parse().unwrap();
        assert_eq!(seed.to_string(), SEED);
        assert_eq!(seed.as_bytes()[0], 0xc1);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "abc".parse::<BoardSeed>(),
            Err(SeedParseError::InvalidLength { len: 3 })
        );
        let mut bad = SEED.to_owned();
        bad.replace_range(10..11, "z");
        assert_eq!(
            bad.parse::<BoardSeed>(),
            Err(SeedParseError::InvalidHex { position: 10 })
        );
    }

    #[test]
    fn test_rng_is_deterministic() {
        let seed: BoardSeed = SEED.parse().unwrap();
        let a: [u64; 4] = seed.rng().random();
        let b: [u64; 4] = seed.rng().random();
        assert_eq!(a, b);
    }
}
