// Export Module
// Keys, ciphertext, certificates and signatures in the armored and structured formats

pub mod certificate;
pub mod keys;
pub mod signature;

pub use certificate::{canonical_public_key, Certificate};
pub use keys::EncryptedMessage;
pub use signature::{export_signature, import_signature, SignedMessage};
