//! Random-number abstraction.
//!
//! Only the interface is in scope: the original engine's `Randlib`
//! generator (a Park/Miller-derived `randlib`/`randomc` implementation) is
//! an out-of-scope collaborator. `IRandom` documents the contract any
//! concrete generator must satisfy; `SystemRandom` is a usable default
//! backed by `rand`, substituting for `Randlib` without reproducing its
//! exact bit stream.

use crate::err::{EngineError, Result};

/// Abstract source of uniform randomness and UUIDs, mirroring the
/// original `IRandom` interface (`getUniform` over `long`/`UNIT` ranges,
/// `getUUIDv4`, seed get/set).
pub trait IRandom {
    /// Inclusive-range uniform integer in `[low, high]`.
    fn uniform_int(&mut self, low: i64, high: i64) -> i64;

    /// Uniform real in `[low, high)`.
    fn uniform_real(&mut self, low: f64, high: f64) -> f64;

    /// Uniform real in `[0, 1)`.
    fn uniform(&mut self) -> f64 {
        self.uniform_real(0.0, 1.0)
    }

    /// A RFC 4122 version-4 UUID as a lowercase 36-character string.
    fn uuid_v4(&mut self) -> String;

    /// Opaque, serializable seed state (the processor-identified string
    /// content the original wrote inside a `<seed>` element).
    fn get_seed(&self) -> String;

    /// Reinitializes the generator from a previously-recorded seed, or a
    /// fresh phrase/integer-pair seed per the legacy format (see
    /// `parse_seed`).
    fn set_seed(&mut self, seed: &str) -> Result<()>;
}

/// UUID identifying this generator implementation, analogous to
/// `Randlib::s_strUUID`.
pub const GENERATOR_UUID: &str = "B7C9BB5D-C495-411D-82B2-1929FD30A7A3";

/// Parses the legacy seed format: a quoted phrase (first character `'` or
/// `"`) or two whitespace-separated signed integers within
/// `[i64::MIN+1, i64::MAX-1]`.
pub fn parse_seed(seed: &str) -> Result<ParsedSeed> {
    if seed.is_empty() {
        return Err(EngineError::BadArguments("seed must not be empty".into()));
    }

    let first = seed.chars().next().unwrap();
    if first == '\'' || first == '"' {
        return Ok(ParsedSeed::Phrase(seed.to_string()));
    }

    let mut parts = seed.split_whitespace();
    let first_tok = parts
        .next()
        .ok_or_else(|| EngineError::BadArguments(format!("{seed} requires two long values")))?;
    let second_tok = parts
        .next()
        .ok_or_else(|| EngineError::BadArguments(format!("{seed} requires two long values")))?;

    let seed1 = first_tok
        .parse::<i64>()
        .map_err(|_| EngineError::BadArguments(format!("{seed} contains an illegal seed value")))?;
    let seed2 = second_tok
        .parse::<i64>()
        .map_err(|_| EngineError::BadArguments(format!("{seed} contains an illegal seed value")))?;

    if seed1 == i64::MAX || seed1 == i64::MIN || seed2 == i64::MAX || seed2 == i64::MIN {
        return Err(EngineError::BadArguments(format!(
            "{seed} contains an illegal seed value"
        )));
    }

    Ok(ParsedSeed::Integers(seed1, seed2))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedSeed {
    Phrase(String),
    Integers(i64, i64),
}

/// Default `IRandom` implementation, backed by `rand`'s small, fast PRNG.
/// Seeded deterministically from the legacy seed formats above so that a
/// recorded seed reproduces the same trial sequence.
pub struct SystemRandom {
    rng: rand::rngs::StdRng,
    seed_display: String,
}

impl SystemRandom {
    pub fn from_seed(seed: &str) -> Result<Self> {
        let mut rng = Self {
            rng: seed_rng(seed),
            seed_display: String::new(),
        };
        rng.set_seed(seed)?;
        Ok(rng)
    }

    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self {
            rng: rand::rngs::StdRng::from_entropy(),
            seed_display: "0 0".to_string(),
        }
    }
}

fn seed_rng(seed: &str) -> rand::rngs::StdRng {
    use rand::SeedableRng;
    let mut bytes = [0u8; 32];
    for (i, b) in seed.bytes().enumerate() {
        bytes[i % 32] ^= b;
    }
    rand::rngs::StdRng::from_seed(bytes)
}

impl IRandom for SystemRandom {
    fn uniform_int(&mut self, low: i64, high: i64) -> i64 {
        use rand::Rng;
        self.rng.gen_range(low..=high)
    }

    fn uniform_real(&mut self, low: f64, high: f64) -> f64 {
        use rand::Rng;
        self.rng.gen_range(low..high)
    }

    fn uuid_v4(&mut self) -> String {
        let mut bytes = [0u8; 16];
        for b in bytes.iter_mut() {
            *b = self.uniform_int(0, 255) as u8;
        }

        // RFC 4122 variant/version bits, at the byte indices the original
        // engine set them (the UUID is assembled high-index-first below).
        bytes[7] = (bytes[7] & 0x3f) | 0x80;
        bytes[9] = (bytes[9] & 0x0f) | 0x40;

        format!(
            "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            bytes[15], bytes[14], bytes[13], bytes[12],
            bytes[11], bytes[10],
            bytes[9], bytes[8],
            bytes[7], bytes[6],
            bytes[5], bytes[4], bytes[3], bytes[2], bytes[1], bytes[0],
        )
    }

    fn get_seed(&self) -> String {
        self.seed_display.clone()
    }

    fn set_seed(&mut self, seed: &str) -> Result<()> {
        parse_seed(seed)?;
        self.rng = seed_rng(seed);
        self.seed_display = seed.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrase_seed_detected_by_leading_quote() {
        assert_eq!(
            parse_seed("'hello world").unwrap(),
            ParsedSeed::Phrase("'hello world".to_string())
        );
        assert_eq!(
            parse_seed("\"hello world").unwrap(),
            ParsedSeed::Phrase("\"hello world".to_string())
        );
    }

    #[test]
    fn integer_pair_seed_parses() {
        assert_eq!(parse_seed("12 34").unwrap(), ParsedSeed::Integers(12, 34));
    }

    #[test]
    fn integer_pair_seed_rejects_extremes() {
        let too_big = format!("{} 1", i64::MAX);
        assert!(parse_seed(&too_big).is_err());
    }

    #[test]
    fn integer_pair_seed_requires_two_tokens() {
        assert!(parse_seed("12").is_err());
    }

    #[test]
    fn uuid_v4_matches_rfc4122_shape() {
        let mut rng = SystemRandom::from_seed("1 2").unwrap();
        let uuid = rng.uuid_v4();
        assert_eq!(uuid.len(), 36);
        let parts: Vec<&str> = uuid.split('-').collect();
        assert_eq!(parts.iter().map(|p| p.len()).collect::<Vec<_>>(), vec![8, 4, 4, 4, 12]);
        assert!(parts[2].starts_with('4'));
        assert!(matches!(parts[3].chars().next().unwrap(), '8' | '9' | 'a' | 'b'));
        assert!(uuid.chars().all(|c| c.is_ascii_hexdigit() || c == '-'));
    }

    #[test]
    fn seeded_generator_is_deterministic() {
        let mut a = SystemRandom::from_seed("42 7").unwrap();
        let mut b = SystemRandom::from_seed("42 7").unwrap();
        let seq_a: Vec<i64> = (0..10).map(|_| a.uniform_int(0, 1000)).collect();
        let seq_b: Vec<i64> = (0..10).map(|_| b.uniform_int(0, 1000)).collect();
        assert_eq!(seq_a, seq_b);
    }
}
