// rsa_armor - Library root
// Textbook RSA with key exchange formats:
// rsa holds the arithmetic, primes, keys, block encryption, padding and signatures;
// codec holds base64 plus the armored and structured (JSON) text formats;
// export carries certificates, signed messages and ciphertext;
// bridge offers string-only adapters for foreign callers.
// Every function that needs entropy takes the random source as an argument.

pub mod bridge;
pub mod codec;
pub mod config;
pub mod error;
pub mod export;
pub mod rsa;

pub use codec::{Exportable, Format, Label};
pub use config::KeyGenConfig;
pub use error::{Error, FormatError, Result};
pub use export::{export_signature, import_signature, Certificate, EncryptedMessage, SignedMessage};
pub use rsa::{ChunkPolicy, RsaBigInt, RsaKeyPair, RsaPrivateKey, RsaPublicKey};
