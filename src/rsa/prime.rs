// Primality Testing and Prime Generation
// Trial division by small primes followed by Miller-Rabin

use num_bigint::RandBigInt;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand::{CryptoRng, RngCore};

use super::bigint::{mod_exp, RsaBigInt};
use crate::config::{KeyGenConfig, DEFAULT_MILLER_RABIN_ROUNDS};
use crate::error::{Error, Result};

/// Primes below 256. Any composite below 256^2 has one of these as a factor.
const SMALL_PRIMES: [u32; 54] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191,
    193, 197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

const TRIAL_DIVISION_LIMIT: u64 = 256 * 256;

/// Outcome of the trial division pass
enum TrialDivision {
    Prime,
    Composite,
    Undecided,
}

fn trial_division(n: &RsaBigInt) -> TrialDivision {
    for &p in SMALL_PRIMES.iter() {
        if n == &RsaBigInt::from(p) {
            return TrialDivision::Prime;
        }
        if (n % p).is_zero() {
            return TrialDivision::Composite;
        }
    }

    match n.to_u64() {
        Some(small) if small < TRIAL_DIVISION_LIMIT => TrialDivision::Prime,
        _ => TrialDivision::Undecided,
    }
}

/// Primality test with the default number of Miller-Rabin rounds
pub fn is_prime<R: RngCore + CryptoRng + ?Sized>(n: &RsaBigInt, rng: &mut R) -> bool {
    is_probable_prime(n, DEFAULT_MILLER_RABIN_ROUNDS, rng)
}

/// Miller-Rabin primality test
/// Returns true if n is probably prime. Primes are never rejected; a composite
/// survives each round with probability at most 1/4.
pub fn is_probable_prime<R: RngCore + CryptoRng + ?Sized>(
    n: &RsaBigInt,
    rounds: usize,
    rng: &mut R,
) -> bool {
    if n < &RsaBigInt::from(2u8) {
        return false;
    }

    match trial_division(n) {
        TrialDivision::Prime => return true,
        TrialDivision::Composite => return false,
        TrialDivision::Undecided => {}
    }

    // Write n-1 as d * 2^s with d odd
    let n_minus_one = n - 1u8;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    let two = RsaBigInt::from(2u8);

    'witness: for _ in 0..rounds {
        // Pick random witness a in [2, n-2]
        let a = rng.gen_biguint_range(&two, &n_minus_one);

        let mut x = match mod_exp(&a, &d, n) {
            Ok(x) => x,
            Err(_) => return false,
        };

        if x.is_one() || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }

        // Composite
        return false;
    }

    // Probably prime
    true
}

/// Sample a random probable prime in [min, max] with default settings
pub fn generate_random_prime<R: RngCore + CryptoRng + ?Sized>(
    min: &RsaBigInt,
    max: &RsaBigInt,
    rng: &mut R,
) -> Result<RsaBigInt> {
    generate_random_prime_with(min, max, &KeyGenConfig::default(), rng)
}

/// Sample random odd candidates in [min, max] until one passes the primality test
pub fn generate_random_prime_with<R: RngCore + CryptoRng + ?Sized>(
    min: &RsaBigInt,
    max: &RsaBigInt,
    config: &KeyGenConfig,
    rng: &mut R,
) -> Result<RsaBigInt> {
    if config.miller_rabin_rounds == 0 {
        return Err(Error::InvalidRounds(0));
    }
    if min > max {
        return Err(Error::EmptyRange {
            min: min.to_string(),
            max: max.to_string(),
        });
    }

    let two = RsaBigInt::from(2u8);
    if max < &two {
        return Err(Error::NoPrimeInRange { candidates: 0 });
    }
    if min == max || (min <= &two && max == &two) {
        // Degenerate ranges hold a single interesting candidate
        let only = if max == &two { two } else { min.clone() };
        return if is_probable_prime(&only, config.miller_rabin_rounds, rng) {
            Ok(only)
        } else {
            Err(Error::NoPrimeInRange { candidates: 1 })
        };
    }

    let upper = max + 1u8;
    for candidates in 1..=config.max_prime_candidates {
        let mut candidate = rng.gen_biguint_range(min, &upper);

        // Make it odd, 2 is the only even prime
        if candidate.is_even() && candidate != two {
            candidate += 1u8;
            if &candidate > max {
                continue;
            }
        }

        if is_probable_prime(&candidate, config.miller_rabin_rounds, rng) {
            log::trace!("found {}-bit prime after {} candidates", candidate.bits(), candidates);
            return Ok(candidate);
        }
    }

    Err(Error::NoPrimeInRange {
        candidates: config.max_prime_candidates,
    })
}
