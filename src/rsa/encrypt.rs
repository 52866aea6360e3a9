// RSA Encryption Implementation
// Splits a message into integer blocks below the modulus and encrypts each one

use rand::{CryptoRng, RngCore};

use super::bigint::{from_bytes, mod_exp, RsaBigInt};
use super::padding::add_padding;
use crate::error::{Error, Result};

/// Marks the start of every modulus-sized block so leading zero bytes survive
pub(crate) const BLOCK_SENTINEL: u8 = 0x01;

/// How plaintext bytes are grouped into blocks before exponentiation
///
/// `PerByte` encrypts every byte on its own. It is simple and needs only
/// n > 255, but costs one modular exponentiation per byte and lets identical
/// bytes produce identical blocks. `ModulusSized` packs as many bytes as the
/// modulus allows behind a sentinel byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChunkPolicy {
    #[default]
    PerByte,
    ModulusSized,
}

impl ChunkPolicy {
    /// Smallest modulus bit length the policy can work with
    pub fn min_modulus_bits(self) -> u64 {
        match self {
            ChunkPolicy::PerByte => 9,
            ChunkPolicy::ModulusSized => 17,
        }
    }

    /// Number of payload bytes carried by a single block under modulus `n`
    pub fn chunk_len(self, n: &RsaBigInt) -> Result<usize> {
        let bits = n.bits();
        if bits < self.min_modulus_bits() {
            return Err(Error::ModulusTooSmall {
                bits,
                required: self.min_modulus_bits(),
            });
        }
        Ok(match self {
            ChunkPolicy::PerByte => 1,
            // The sentinel plus payload must stay below 2^(bits-1) <= n
            ChunkPolicy::ModulusSized => ((bits - 1) / 8) as usize - 1,
        })
    }
}

/// Encrypt a single number: c = m^e mod n
pub fn encrypt_number(m: &RsaBigInt, e: &RsaBigInt, n: &RsaBigInt) -> Result<RsaBigInt> {
    mod_exp(m, e, n)
}

/// Convert plaintext bytes into blocks, every block strictly less than n
pub fn chunk_message(data: &[u8], n: &RsaBigInt, policy: ChunkPolicy) -> Result<Vec<RsaBigInt>> {
    let chunk_len = policy.chunk_len(n)?;

    let blocks = match policy {
        ChunkPolicy::PerByte => data.iter().map(|&b| RsaBigInt::from(b)).collect(),
        ChunkPolicy::ModulusSized => data
            .chunks(chunk_len)
            .map(|chunk| {
                let mut block = Vec::with_capacity(chunk.len() + 1);
                block.push(BLOCK_SENTINEL);
                block.extend_from_slice(chunk);
                from_bytes(&block)
            })
            .collect(),
    };

    Ok(blocks)
}

/// Encrypt a text message one byte per block
pub fn encrypt_message(message: &str, e: &RsaBigInt, n: &RsaBigInt) -> Result<Vec<RsaBigInt>> {
    encrypt_bytes(message.as_bytes(), e, n, ChunkPolicy::PerByte)
}

/// Encrypt raw bytes using the given chunking policy
pub fn encrypt_bytes(
    data: &[u8],
    e: &RsaBigInt,
    n: &RsaBigInt,
    policy: ChunkPolicy,
) -> Result<Vec<RsaBigInt>> {
    let blocks = chunk_message(data, n, policy)?;
    log::trace!("encrypting {} bytes as {} blocks", data.len(), blocks.len());

    blocks.iter().map(|block| encrypt_number(block, e, n)).collect()
}

/// Apply the length-header padding, then encrypt
pub fn encrypt_padded<R: RngCore + CryptoRng + ?Sized>(
    data: &[u8],
    min_len: usize,
    e: &RsaBigInt,
    n: &RsaBigInt,
    policy: ChunkPolicy,
    rng: &mut R,
) -> Result<Vec<RsaBigInt>> {
    let padded = add_padding(data, min_len, rng)?;
    encrypt_bytes(&padded, e, n, policy)
}
