// RSA Big Integer Operations
// Modular arithmetic on num-bigint values

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Error, Result};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Create a big integer from bytes (big-endian)
pub fn from_bytes(bytes: &[u8]) -> RsaBigInt {
    RsaBigInt::from_bytes_be(bytes)
}

/// Convert big integer to bytes (big-endian)
pub fn to_bytes(n: &RsaBigInt) -> Vec<u8> {
    n.to_bytes_be()
}

/// Modular exponentiation: base^exp mod modulus
/// Uses square-and-multiply, reducing after every product
pub fn mod_exp(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> Result<RsaBigInt> {
    if modulus.is_zero() {
        return Err(Error::ZeroModulus);
    }
    if modulus.is_one() {
        return Ok(RsaBigInt::zero());
    }

    let mut result = RsaBigInt::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    Ok(result)
}

/// Extended Euclidean Algorithm
/// Returns (gcd, x, y) such that a*x + b*y = gcd(a, b)
pub fn extended_gcd(a: &RsaBigInt, b: &RsaBigInt) -> (RsaBigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (BigInt::from(a.clone()), BigInt::from(b.clone()));
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let quotient = &old_r / &r;

        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);

        let next_t = &old_t - &quotient * &t;
        old_t = std::mem::replace(&mut t, next_t);
    }

    // Remainders stay non-negative for non-negative inputs
    let gcd = old_r.to_biguint().unwrap_or_default();
    (gcd, old_s, old_t)
}

/// Compute modular inverse: a^(-1) mod m, normalized into [0, m)
pub fn mod_inverse(a: &RsaBigInt, m: &RsaBigInt) -> Result<RsaBigInt> {
    if m.is_zero() {
        return Err(Error::ZeroModulus);
    }

    let (gcd, x, _) = extended_gcd(a, m);
    if !gcd.is_one() {
        return Err(Error::NoInverse);
    }

    let m_signed = BigInt::from(m.clone());
    let normalized = x.mod_floor(&m_signed);
    match normalized.to_biguint() {
        Some(inv) => Ok(inv),
        None => Err(Error::NoInverse),
    }
}

/// Greatest common divisor, always non-negative
pub fn gcd(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    a.gcd(b)
}

/// Parse a non-negative decimal integer, rejecting signs and whitespace
pub fn parse_decimal(text: &str) -> Option<RsaBigInt> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    RsaBigInt::parse_bytes(text.as_bytes(), 10)
}
