//! Seeded pseudo-random generation shared with the game client.
//!
//! # Determinism
//!
//! The server must rebuild exactly the obstacle layout the client rendered,
//! so the generator here is bit-compatible with the client's mulberry32:
//! same 32-bit seed, same float stream, forever. Nothing in this module
//! touches global state or the operating system.

use crate::error::{ErrorSeverity, GameError};

/// Source of uniformly distributed floats in `[0, 1)`.
///
/// Implementations must be deterministic: two sources built from the same
/// seed yield identical sequences.
pub trait RandomSource {
    /// Next float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform value in `[min, max)`.
    fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Full-width 32-bit value derived from one draw.
    ///
    /// Used to seed private sub-generators.
    fn next_seed(&mut self) -> u32 {
        (self.next_f64() * Mulberry32::OUTPUT_SCALE) as u32
    }
}

/// mulberry32: one 32-bit word of state, additive step plus xor-multiply mix.
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces same output
/// - **Restartable**: Cloning captures the full state
/// - **Portable**: Only wrapping 32-bit arithmetic, no floats in the state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Additive step applied before every output.
    const INCREMENT: u32 = 0x6D2B_79F5;

    /// 2^32, maps a 32-bit output onto `[0, 1)`.
    const OUTPUT_SCALE: f64 = 4_294_967_296.0;

    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current internal state, for traces.
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Advances the state and returns the mixed 32-bit output.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }
}

impl RandomSource for Mulberry32 {
    #[inline]
    fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / Self::OUTPUT_SCALE
    }
}

/// Malformed session seed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SeedError {
    #[error("seed is empty")]
    Empty,

    #[error("seed contains non-hex character {character:?} at offset {offset}")]
    NotHex { character: char, offset: usize },
}

impl GameError for SeedError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Protocol
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "SEED_EMPTY",
            Self::NotHex { .. } => "SEED_NOT_HEX",
        }
    }
}

/// Derives the generator seed from a hex session seed.
///
/// The client parses the whole hex string as an arbitrary-precision integer
/// and keeps the low 32 bits, which are exactly the last eight hex digits.
pub fn seed_number_from_hex(seed: &str) -> Result<u32, SeedError> {
    let digits = seed
        .strip_prefix("0x")
        .or_else(|| seed.strip_prefix("0X"))
        .unwrap_or(seed);
    if digits.is_empty() {
        return Err(SeedError::Empty);
    }
    if let Some((offset, character)) = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_hexdigit())
    {
        return Err(SeedError::NotHex { character, offset });
    }

    let tail = &digits[digits.len().saturating_sub(8)..];
    u32::from_str_radix(tail, 16).map_err(|_| SeedError::Empty)
}
