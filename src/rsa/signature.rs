// RSA Signatures
// Signs the SHA-256 digest of a message reduced into the modulus range

use num_traits::Zero;
use sha2::{Digest, Sha256};

use super::bigint::{from_bytes, mod_exp, RsaBigInt};
use crate::error::{Error, Result};

/// SHA-256 of `message` as a big-endian integer reduced mod n
pub fn message_digest(message: &[u8], n: &RsaBigInt) -> Result<RsaBigInt> {
    if n.is_zero() {
        return Err(Error::ZeroModulus);
    }
    let hash = Sha256::digest(message);
    Ok(from_bytes(&hash) % n)
}

/// signature = digest(message)^d mod n
pub fn generate_signature(message: &str, d: &RsaBigInt, n: &RsaBigInt) -> Result<RsaBigInt> {
    let digest = message_digest(message.as_bytes(), n)?;
    mod_exp(&digest, d, n)
}

/// True iff signature^e mod n equals the digest of `message`
pub fn verify_signature(signature: &RsaBigInt, message: &str, e: &RsaBigInt, n: &RsaBigInt) -> bool {
    if signature >= n {
        return false;
    }

    let expected = match message_digest(message.as_bytes(), n) {
        Ok(digest) => digest,
        Err(_) => return false,
    };

    match mod_exp(signature, e, n) {
        Ok(recovered) => recovered == expected,
        Err(_) => false,
    }
}
