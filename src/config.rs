// Key Generation Configuration
// Tunables for prime sampling and key pair generation

use serde::{Deserialize, Serialize};

use crate::error::{FormatError, Result};

/// Conventional public exponent (F4)
pub const DEFAULT_PUBLIC_EXPONENT: u64 = 65537;

/// Miller-Rabin rounds. Each round passes a composite with probability
/// at most 1/4, so 40 rounds bound the error by 2^-80 per accepted prime.
pub const DEFAULT_MILLER_RABIN_ROUNDS: usize = 40;

/// Configuration for key generation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyGenConfig {
    pub public_exponent: u64,
    pub miller_rabin_rounds: usize,
    /// Bound on resampling p, q when they collide or gcd(e, φ(n)) != 1
    pub max_attempts: usize,
    /// Bound on candidates drawn by a single prime search
    pub max_prime_candidates: usize,
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        Self {
            public_exponent: DEFAULT_PUBLIC_EXPONENT,
            miller_rabin_rounds: DEFAULT_MILLER_RABIN_ROUNDS,
            max_attempts: 64,
            max_prime_candidates: 1_000_000,
        }
    }
}

impl KeyGenConfig {
    /// Parse a (possibly partial) JSON document, missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config = serde_json::from_str(json).map_err(FormatError::from)?;
        Ok(config)
    }

    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.miller_rabin_rounds = rounds;
        self
    }

    pub fn with_public_exponent(mut self, e: u64) -> Self {
        self.public_exponent = e;
        self
    }

    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_max_prime_candidates(mut self, candidates: usize) -> Self {
        self.max_prime_candidates = candidates;
        self
    }
}
