// Base64 codec (RFC 4648 standard alphabet, padded)

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::error::{FormatError, Result};

pub fn encode(data: &[u8]) -> String {
    BASE64.encode(data)
}

/// Strict decode: invalid characters or wrong padding are format errors
pub fn decode(encoded: &str) -> Result<Vec<u8>> {
    let data = BASE64.decode(encoded).map_err(FormatError::from)?;
    Ok(data)
}
