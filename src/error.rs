// RSA Error Types
// Arithmetic, domain and format failures raised by the engine and the codecs

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("modulus must not be zero")]
    ZeroModulus,

    #[error("no modular inverse exists")]
    NoInverse,

    #[error("empty sampling range: min {min} is greater than max {max}")]
    EmptyRange { min: String, max: String },

    #[error("no prime found in range after {candidates} candidates")]
    NoPrimeInRange { candidates: usize },

    #[error("key generation gave up after {attempts} attempts")]
    KeyGenerationExhausted { attempts: usize },

    #[error("invalid key size: {0} bits")]
    InvalidKeySize(u32),

    #[error("invalid public exponent {0}, must be odd and at least 3")]
    InvalidExponent(u64),

    #[error("invalid Miller-Rabin round count {0}, at least one round is required")]
    InvalidRounds(usize),

    #[error("modulus of {bits} bits is too small, at least {required} bits are required")]
    ModulusTooSmall { bits: u64, required: u64 },

    #[error("message of {len} bytes is too long, max {max}")]
    MessageTooLong { len: usize, max: usize },

    #[error("format error: {0}")]
    Format(#[from] FormatError),
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("missing `{0}` marker")]
    MissingMarker(String),

    #[error("mismatched markers: BEGIN {begin}, END {end}")]
    MismatchedMarker { begin: String, end: String },

    #[error("unexpected label `{found}`, expected `{expected}`")]
    UnexpectedLabel { expected: String, found: String },

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object")]
    NotAnObject,

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{0}` is not a non-negative decimal integer")]
    InvalidNumber(&'static str),

    #[error("field `{0}` is not a string")]
    InvalidText(&'static str),

    #[error("public and private key moduli differ")]
    ModulusMismatch,

    #[error("payload truncated while reading `{0}`")]
    Truncated(&'static str),

    #[error("{0} unexpected trailing bytes")]
    TrailingBytes(usize),

    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("padded message too short: {0} bytes")]
    PaddingTooShort(usize),

    #[error("invalid padding length header")]
    PaddingHeader,

    #[error("padding declares {declared} bytes but only {available} are present")]
    PaddingOverrun { declared: usize, available: usize },

    #[error("ciphertext block {index} does not decode to a valid chunk")]
    InvalidBlock { index: usize },
}
