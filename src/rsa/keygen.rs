// RSA Key Generation
// Implements RSA key pair generation (public and private keys)

use num_traits::One;
use rand::{CryptoRng, RngCore};

use super::bigint::{from_u64, gcd, mod_inverse, RsaBigInt};
use super::prime::generate_random_prime_with;
use crate::config::KeyGenConfig;
use crate::error::{Error, Result};

/// RSA Public Key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RsaPublicKey {
    pub e: RsaBigInt, // Public exponent
    pub n: RsaBigInt, // Modulus
}

/// RSA Private Key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RsaPrivateKey {
    pub d: RsaBigInt, // Private exponent
    pub n: RsaBigInt, // Modulus (same as public)
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
}

impl RsaPublicKey {
    pub fn new(e: RsaBigInt, n: RsaBigInt) -> Self {
        Self { e, n }
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Encrypt a message one byte per block
    pub fn encrypt(&self, message: &str) -> Result<Vec<RsaBigInt>> {
        super::encrypt::encrypt_message(message, &self.e, &self.n)
    }

    /// Check a signature over `message`
    pub fn verify(&self, signature: &RsaBigInt, message: &str) -> bool {
        super::signature::verify_signature(signature, message, &self.e, &self.n)
    }
}

impl RsaPrivateKey {
    pub fn new(d: RsaBigInt, n: RsaBigInt) -> Self {
        Self { d, n }
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Decrypt blocks produced by [`RsaPublicKey::encrypt`]
    pub fn decrypt(&self, blocks: &[RsaBigInt]) -> Result<String> {
        super::decrypt::decrypt_message(blocks, &self.d, &self.n)
    }

    /// Sign the SHA-256 digest of `message`
    pub fn sign(&self, message: &str) -> Result<RsaBigInt> {
        super::signature::generate_signature(message, &self.d, &self.n)
    }
}

impl RsaKeyPair {
    /// Get the bit length of the key
    pub fn bit_length(&self) -> u64 {
        self.public_key.bit_length()
    }
}

/// Key pair together with the primes it was derived from
pub(crate) struct KeyMaterial {
    pub key_pair: RsaKeyPair,
    pub p: RsaBigInt,
    pub q: RsaBigInt,
}

/// Generate an RSA key pair from primes sampled in [min_prime, max_prime]
pub fn generate_keys<R: RngCore + CryptoRng + ?Sized>(
    min_prime: &RsaBigInt,
    max_prime: &RsaBigInt,
    rng: &mut R,
) -> Result<RsaKeyPair> {
    generate_keys_with(min_prime, max_prime, &KeyGenConfig::default(), rng)
}

/// Generate an RSA key pair with explicit settings
pub fn generate_keys_with<R: RngCore + CryptoRng + ?Sized>(
    min_prime: &RsaBigInt,
    max_prime: &RsaBigInt,
    config: &KeyGenConfig,
    rng: &mut R,
) -> Result<RsaKeyPair> {
    let material = generate_key_material(min_prime, max_prime, config, rng)?;
    debug_assert_eq!(material.key_pair.public_key.n, &material.p * &material.q);
    Ok(material.key_pair)
}

/// Generate a key pair whose primes are exactly `prime_bits` long
pub fn generate_keypair<R: RngCore + CryptoRng + ?Sized>(
    prime_bits: u32,
    rng: &mut R,
) -> Result<RsaKeyPair> {
    let (min, max) = prime_range(prime_bits)?;
    generate_keys(&min, &max, rng)
}

/// Inclusive range of integers with exactly `bits` bits
pub fn prime_range(bits: u32) -> Result<(RsaBigInt, RsaBigInt)> {
    if bits < 2 {
        return Err(Error::InvalidKeySize(bits));
    }
    let min = RsaBigInt::one() << (bits - 1);
    let max = (RsaBigInt::one() << bits) - 1u8;
    Ok((min, max))
}

pub(crate) fn generate_key_material<R: RngCore + CryptoRng + ?Sized>(
    min_prime: &RsaBigInt,
    max_prime: &RsaBigInt,
    config: &KeyGenConfig,
    rng: &mut R,
) -> Result<KeyMaterial> {
    if config.public_exponent < 3 || config.public_exponent % 2 == 0 {
        return Err(Error::InvalidExponent(config.public_exponent));
    }
    if config.miller_rabin_rounds == 0 {
        return Err(Error::InvalidRounds(config.miller_rabin_rounds));
    }
    let e = from_u64(config.public_exponent);

    // Step 1: Choose p, then q distinct from it
    let mut p = generate_random_prime_with(min_prime, max_prime, config, rng)?;

    for attempt in 1..=config.max_attempts {
        let q = generate_random_prime_with(min_prime, max_prime, config, rng)?;
        if q == p {
            log::debug!("attempt {}: q collided with p, resampling q", attempt);
            continue;
        }

        // Step 2: Compute n = p * q and φ(n) = (p-1)(q-1)
        let n = &p * &q;
        let phi_n = (&p - 1u8) * (&q - 1u8);

        // Step 3: e must be coprime with φ(n)
        if !gcd(&e, &phi_n).is_one() {
            log::debug!("attempt {}: gcd(e, φ(n)) != 1, resampling primes", attempt);
            p = generate_random_prime_with(min_prime, max_prime, config, rng)?;
            continue;
        }
        if e >= phi_n {
            log::warn!("public exponent exceeds φ(n) for a {}-bit modulus", n.bits());
        }

        // Step 4: Compute d = e^(-1) mod φ(n)
        let d = mod_inverse(&e, &phi_n)?;

        log::debug!("generated {}-bit key after {} attempts", n.bits(), attempt);

        // Step 5: Assemble the pair, p and q leave with the caller only
        let key_pair = RsaKeyPair {
            public_key: RsaPublicKey::new(e, n.clone()),
            private_key: RsaPrivateKey::new(d, n),
        };
        return Ok(KeyMaterial { key_pair, p, q });
    }

    Err(Error::KeyGenerationExhausted {
        attempts: config.max_attempts,
    })
}
