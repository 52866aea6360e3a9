// Length-Header Padding
// Format: 8 ASCII decimal digits holding len(message) || message || random filler
// The filler hides the true message size up to the requested minimum length

use rand::{CryptoRng, RngCore};

use crate::error::{Error, FormatError, Result};

/// Width of the decimal length header
pub const HEADER_LEN: usize = 8;

/// Largest message length the header can express
pub const MAX_MESSAGE_LEN: usize = 99_999_999;

/// Prepend the length header and fill with random bytes up to `desired_min_len`
pub fn add_padding<R: RngCore + CryptoRng + ?Sized>(
    message: &[u8],
    desired_min_len: usize,
    rng: &mut R,
) -> Result<Vec<u8>> {
    if message.len() > MAX_MESSAGE_LEN {
        return Err(Error::MessageTooLong {
            len: message.len(),
            max: MAX_MESSAGE_LEN,
        });
    }

    let mut result = Vec::with_capacity(desired_min_len.max(HEADER_LEN + message.len()));
    result.extend_from_slice(format!("{:0width$}", message.len(), width = HEADER_LEN).as_bytes());
    result.extend_from_slice(message);

    if result.len() < desired_min_len {
        let start = result.len();
        result.resize(desired_min_len, 0);
        rng.fill_bytes(&mut result[start..]);
    }

    Ok(result)
}

/// Validate the header and return exactly the original message bytes
pub fn remove_padding(padded: &[u8]) -> Result<Vec<u8>> {
    if padded.len() < HEADER_LEN {
        return Err(FormatError::PaddingTooShort(padded.len()).into());
    }

    let (header, data) = padded.split_at(HEADER_LEN);
    if !header.iter().all(u8::is_ascii_digit) {
        return Err(FormatError::PaddingHeader.into());
    }

    // Eight digits always fit in usize
    let declared = header
        .iter()
        .fold(0usize, |acc, &digit| acc * 10 + usize::from(digit - b'0'));

    if declared > data.len() {
        return Err(FormatError::PaddingOverrun {
            declared,
            available: data.len(),
        }
        .into());
    }

    Ok(data[..declared].to_vec())
}
