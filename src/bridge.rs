// Foreign Boundary
// String-in, string-out adapters for callers that only exchange text.
// Keys travel as structured (JSON) text, ciphertext as comma-terminated
// decimal blocks and signatures as a decimal string.

use rand::thread_rng;

use crate::codec::{Exportable, Format};
use crate::error::{Error, FormatError, Result};
use crate::rsa::bigint::parse_decimal;
use crate::rsa::{generate_keypair, RsaBigInt, RsaKeyPair, RsaPrivateKey, RsaPublicKey};

/// Generate a key pair from primes of `prime_bits` bits, as
/// `{"privateKey":{"d":..,"n":..},"publicKey":{"e":..,"n":..}}`
pub fn generate_keys(prime_bits: u32) -> Result<String> {
    let key_pair: RsaKeyPair = generate_keypair(prime_bits, &mut thread_rng())?;
    log::info!("generated {}-bit key pair", key_pair.bit_length());
    key_pair.export(Format::Structured)
}

/// Encrypt with a structured public key; every block is followed by a comma
pub fn encrypt_message(message: &str, public_key_json: &str) -> Result<String> {
    let key = RsaPublicKey::import(Format::Structured, public_key_json)?;
    let blocks = key.encrypt(message)?;

    let mut encrypted = String::new();
    for block in &blocks {
        encrypted.push_str(&block.to_str_radix(10));
        encrypted.push(',');
    }
    Ok(encrypted)
}

/// Parse comma-separated decimal blocks, a single trailing comma is allowed
fn parse_blocks(cipher_text: &str) -> Result<Vec<RsaBigInt>> {
    let trimmed = cipher_text.trim();
    let body = trimmed.strip_suffix(',').unwrap_or(trimmed);
    if body.is_empty() {
        return Ok(Vec::new());
    }

    body.split(',')
        .map(|block| parse_decimal(block.trim()).ok_or(Error::Format(FormatError::InvalidNumber("cipherText"))))
        .collect()
}

pub fn decrypt_message(cipher_text: &str, private_key_json: &str) -> Result<String> {
    let key = RsaPrivateKey::import(Format::Structured, private_key_json)?;
    key.decrypt(&parse_blocks(cipher_text)?)
}

/// Sign with a structured private key, returning the decimal signature
pub fn generate_signature(message: &str, private_key_json: &str) -> Result<String> {
    let key = RsaPrivateKey::import(Format::Structured, private_key_json)?;
    Ok(key.sign(message)?.to_str_radix(10))
}

/// A malformed signature string is an error, a wrong signature is `Ok(false)`
pub fn verify_signature(signature_text: &str, message: &str, public_key_json: &str) -> Result<bool> {
    let key = RsaPublicKey::import(Format::Structured, public_key_json)?;
    let signature = parse_decimal(signature_text.trim()).ok_or(FormatError::InvalidNumber("signature"))?;
    Ok(key.verify(&signature, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::structured;

    const PUBLIC_KEY: &str = r#"{"e":"17","n":"3233"}"#;
    const PRIVATE_KEY: &str = r#"{"d":"2753","n":"3233"}"#;

    #[test]
    fn test_encrypt_layout() {
        assert_eq!(encrypt_message("A", PUBLIC_KEY).unwrap(), "2790,");
        assert_eq!(encrypt_message("", PUBLIC_KEY).unwrap(), "");
    }

    #[test]
    fn test_encrypt_decrypt() {
        let cipher = encrypt_message("Hello, RSA!", PUBLIC_KEY).unwrap();
        assert_eq!(cipher.matches(',').count(), "Hello, RSA!".len());
        assert_eq!(decrypt_message(&cipher, PRIVATE_KEY).unwrap(), "Hello, RSA!");

        let without_trailing = cipher.trim_end_matches(',');
        assert_eq!(decrypt_message(without_trailing, PRIVATE_KEY).unwrap(), "Hello, RSA!");
        assert_eq!(decrypt_message("", PRIVATE_KEY).unwrap(), "");
    }

    #[test]
    fn test_bad_cipher_text() {
        assert!(matches!(
            decrypt_message("2790,,2790", PRIVATE_KEY),
            Err(Error::Format(FormatError::InvalidNumber("cipherText")))
        ));
        assert!(matches!(
            decrypt_message("27x0,", PRIVATE_KEY),
            Err(Error::Format(FormatError::InvalidNumber("cipherText")))
        ));
    }

    #[test]
    fn test_bad_key_json() {
        assert!(matches!(
            encrypt_message("hi", r#"{"n":"3233"}"#),
            Err(Error::Format(FormatError::MissingField("e")))
        ));
        assert!(matches!(decrypt_message("1,", "not json"), Err(Error::Format(FormatError::Json(_)))));
    }

    #[test]
    fn test_sign_verify() {
        let signature = generate_signature("Hello, RSA!", PRIVATE_KEY).unwrap();
        assert!(signature.bytes().all(|b| b.is_ascii_digit()));
        assert!(verify_signature(&signature, "Hello, RSA!", PUBLIC_KEY).unwrap());
        assert!(matches!(
            verify_signature("12ab", "Hello, RSA!", PUBLIC_KEY),
            Err(Error::Format(FormatError::InvalidNumber("signature")))
        ));
    }

    #[test]
    fn test_generate_keys_json() {
        let json = generate_keys(64).unwrap();
        let object = structured::parse_object(&json).unwrap();
        let public_json = structured::to_text(structured::object_field(&object, "publicKey").unwrap().clone());
        let private_json = structured::to_text(structured::object_field(&object, "privateKey").unwrap().clone());

        let cipher = encrypt_message("bridge", &public_json).unwrap();
        assert_eq!(decrypt_message(&cipher, &private_json).unwrap(), "bridge");

        let signature = generate_signature("bridge", &private_json).unwrap();
        assert!(verify_signature(&signature, "bridge", &public_json).unwrap());
        assert!(!verify_signature(&signature, "bridgE", &public_json).unwrap());

        assert!(generate_keys(1).is_err());
    }
}
