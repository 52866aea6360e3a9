// RSA Decryption Implementation
// Recovers plaintext blocks and reassembles them in encryption order

use num_traits::ToPrimitive;

use super::bigint::{mod_exp, to_bytes, RsaBigInt};
use super::encrypt::{ChunkPolicy, BLOCK_SENTINEL};
use super::padding::remove_padding;
use crate::error::{FormatError, Result};

/// Decrypt a single number: m = c^d mod n
pub fn decrypt_number(c: &RsaBigInt, d: &RsaBigInt, n: &RsaBigInt) -> Result<RsaBigInt> {
    mod_exp(c, d, n)
}

/// Decrypt blocks produced by `encrypt_message` back into text
pub fn decrypt_message(blocks: &[RsaBigInt], d: &RsaBigInt, n: &RsaBigInt) -> Result<String> {
    let bytes = decrypt_bytes(blocks, d, n, ChunkPolicy::PerByte)?;
    let message = String::from_utf8(bytes).map_err(FormatError::from)?;
    Ok(message)
}

/// Decrypt blocks into raw bytes using the policy they were encrypted with
pub fn decrypt_bytes(
    blocks: &[RsaBigInt],
    d: &RsaBigInt,
    n: &RsaBigInt,
    policy: ChunkPolicy,
) -> Result<Vec<u8>> {
    policy.chunk_len(n)?;
    log::trace!("decrypting {} blocks", blocks.len());

    let mut plaintext = Vec::with_capacity(blocks.len());
    for (index, block) in blocks.iter().enumerate() {
        if block >= n {
            return Err(FormatError::InvalidBlock { index }.into());
        }

        let m = decrypt_number(block, d, n)?;
        match policy {
            ChunkPolicy::PerByte => match m.to_u8() {
                Some(byte) => plaintext.push(byte),
                None => return Err(FormatError::InvalidBlock { index }.into()),
            },
            ChunkPolicy::ModulusSized => {
                let bytes = to_bytes(&m);
                match bytes.split_first() {
                    Some((&BLOCK_SENTINEL, chunk)) => plaintext.extend_from_slice(chunk),
                    _ => return Err(FormatError::InvalidBlock { index }.into()),
                }
            }
        }
    }

    Ok(plaintext)
}

/// Decrypt and strip the length-header padding
pub fn decrypt_padded(
    blocks: &[RsaBigInt],
    d: &RsaBigInt,
    n: &RsaBigInt,
    policy: ChunkPolicy,
) -> Result<Vec<u8>> {
    let padded = decrypt_bytes(blocks, d, n, policy)?;
    remove_padding(&padded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::rsa::bigint::from_u64;
    use crate::rsa::encrypt::{encrypt_bytes, encrypt_message, encrypt_padded};
    use crate::rsa::keygen::{generate_keypair, RsaKeyPair};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn keypair(seed: u64) -> RsaKeyPair {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        generate_keypair(128, &mut rng).unwrap()
    }

    fn test_roundtrip(keypair: &RsaKeyPair, message: &[u8], policy: ChunkPolicy) {
        let (e, d, n) = (&keypair.public_key.e, &keypair.private_key.d, &keypair.public_key.n);
        let ciphertext = encrypt_bytes(message, e, n, policy).unwrap();
        let decrypted = decrypt_bytes(&ciphertext, d, n, policy).unwrap();
        assert_eq!(message, decrypted.as_slice());
    }

    #[test]
    fn test_decrypt_number() {
        // Textbook key: p = 61, q = 53
        let m = decrypt_number(&from_u64(2790), &from_u64(2753), &from_u64(3233)).unwrap();
        assert_eq!(m, from_u64(65));
    }

    #[test]
    fn test_decrypt_message() {
        let keypair = keypair(1);
        let message = "Hello, RSA!";

        let ciphertext = encrypt_message(message, &keypair.public_key.e, &keypair.public_key.n).unwrap();
        let decrypted = decrypt_message(&ciphertext, &keypair.private_key.d, &keypair.private_key.n).unwrap();

        assert_eq!(message, decrypted);
    }

    #[test]
    fn test_decrypt_unicode() {
        let keypair = keypair(2);
        let message = "Zażółć gęślą jaźń";
        let ciphertext = keypair.public_key.encrypt(message).unwrap();
        assert_eq!(ciphertext.len(), message.len());
        assert_eq!(keypair.private_key.decrypt(&ciphertext).unwrap(), message);
    }

    #[test]
    fn test_roundtrip_various_sizes() {
        let keypair = keypair(3);

        let test_cases: Vec<Vec<u8>> = vec![
            b"".to_vec(),
            b"A".to_vec(),
            b"Hello, World!".to_vec(),
            vec![0u8; 100],
            vec![255u8; 100],
            (0..=255u8).collect(),
        ];

        for message in &test_cases {
            test_roundtrip(&keypair, message, ChunkPolicy::PerByte);
            test_roundtrip(&keypair, message, ChunkPolicy::ModulusSized);
        }
    }

    #[test]
    fn test_decrypt_block_out_of_range() {
        let keypair = keypair(4);
        let blocks = vec![keypair.public_key.n.clone()];
        let result = keypair.private_key.decrypt(&blocks);
        assert!(matches!(result, Err(Error::Format(FormatError::InvalidBlock { index: 0 }))));
    }

    #[test]
    fn test_decrypt_wrong_key() {
        let keypair1 = keypair(5);
        let keypair2 = keypair(6);

        let ciphertext = keypair1.public_key.encrypt("Test").unwrap();
        let blocks: Vec<RsaBigInt> = ciphertext
            .into_iter()
            .filter(|block| block < &keypair2.private_key.n)
            .collect();

        // A foreign key recovers values far above a single byte
        if !blocks.is_empty() {
            assert!(keypair2.private_key.decrypt(&blocks).is_err());
        }
    }

    #[test]
    fn test_padded_roundtrip() {
        let keypair = keypair(7);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let (e, d, n) = (&keypair.public_key.e, &keypair.private_key.d, &keypair.public_key.n);

        for policy in [ChunkPolicy::PerByte, ChunkPolicy::ModulusSized] {
            let blocks = encrypt_padded(b"padded secret", 64, e, n, policy, &mut rng).unwrap();
            assert_eq!(decrypt_padded(&blocks, d, n, policy).unwrap(), b"padded secret");
        }
    }

    #[test]
    fn test_decrypt_invalid_utf8() {
        let keypair = keypair(9);
        let blocks = encrypt_bytes(&[0xff, 0xfe], &keypair.public_key.e, &keypair.public_key.n, ChunkPolicy::PerByte)
            .unwrap();
        assert!(matches!(
            keypair.private_key.decrypt(&blocks),
            Err(Error::Format(FormatError::Utf8(_)))
        ));
    }
}
