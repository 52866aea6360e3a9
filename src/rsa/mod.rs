// RSA Module - Main module file
// Exports the number-theoretic engine: arithmetic, primes, keys, messages, signatures

pub mod bigint;
pub mod decrypt;
pub mod encrypt;
pub mod keygen;
pub mod padding;
pub mod prime;
pub mod signature;

pub use bigint::{extended_gcd, gcd, mod_exp, mod_inverse, RsaBigInt};
pub use decrypt::{decrypt_bytes, decrypt_message, decrypt_number, decrypt_padded};
pub use encrypt::{encrypt_bytes, encrypt_message, encrypt_number, encrypt_padded, ChunkPolicy};
pub use keygen::{
    generate_keypair, generate_keys, generate_keys_with, prime_range, RsaKeyPair, RsaPrivateKey,
    RsaPublicKey,
};
pub use padding::{add_padding, remove_padding};
pub use prime::{generate_random_prime, generate_random_prime_with, is_prime, is_probable_prime};
pub use signature::{generate_signature, message_digest, verify_signature};
