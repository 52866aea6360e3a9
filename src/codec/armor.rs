// Armored Text Format
// -----BEGIN <LABEL>-----
// base64 payload, wrapped at LINE_WIDTH columns
// -----END <LABEL>-----
//
// The payload is a sequence of fields, each a u32 big-endian length followed
// by that many bytes.

use num_bigint::BigUint;

use super::base64;
use super::Label;
use crate::error::{Error, FormatError, Result};

const MARKER_DASHES: &str = "-----";

/// Base64 characters per payload line
pub const LINE_WIDTH: usize = 64;

pub fn begin_marker(label: Label) -> String {
    format!("{}BEGIN {}{}", MARKER_DASHES, label.as_str(), MARKER_DASHES)
}

pub fn end_marker(label: Label) -> String {
    format!("{}END {}{}", MARKER_DASHES, label.as_str(), MARKER_DASHES)
}

/// Wrap a binary payload between the BEGIN/END markers of `label`
pub fn armor(label: Label, payload: &[u8]) -> String {
    let encoded = base64::encode(payload);

    let mut out = begin_marker(label);
    out.push('\n');
    for line in encoded.as_bytes().chunks(LINE_WIDTH) {
        // base64 output is ASCII, so every chunk boundary is a char boundary
        out.push_str(&String::from_utf8_lossy(line));
        out.push('\n');
    }
    out.push_str(&end_marker(label));
    out
}

/// Return the label name inside a marker line such as `-----BEGIN X-----`
fn marker_label<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    line.trim()
        .strip_prefix(MARKER_DASHES)?
        .strip_suffix(MARKER_DASHES)?
        .strip_prefix(keyword)?
        .strip_prefix(' ')
}

/// Split armored text into its label and decoded payload
pub fn parse_armor(text: &str) -> Result<(Label, Vec<u8>)> {
    let lines: Vec<&str> = text.trim().lines().collect();

    let begin = lines
        .first()
        .and_then(|line| marker_label(line, "BEGIN"))
        .ok_or_else(|| FormatError::MissingMarker("BEGIN".to_string()))?;
    let end = match lines.split_first() {
        Some((_, rest)) => rest.last().and_then(|line| marker_label(line, "END")),
        None => None,
    }
    .ok_or_else(|| FormatError::MissingMarker("END".to_string()))?;

    if begin != end {
        return Err(FormatError::MismatchedMarker {
            begin: begin.to_string(),
            end: end.to_string(),
        }
        .into());
    }

    let label = Label::from_name(begin).ok_or_else(|| FormatError::UnexpectedLabel {
        expected: "a known artifact label".to_string(),
        found: begin.to_string(),
    })?;

    let body: String = lines[1..lines.len() - 1]
        .iter()
        .flat_map(|line| line.chars())
        .filter(|c| !c.is_whitespace())
        .collect();
    let payload = base64::decode(&body)?;

    Ok((label, payload))
}

/// Decode armored text whose markers must carry `expected`
pub fn dearmor(expected: Label, text: &str) -> Result<Vec<u8>> {
    let (label, payload) = parse_armor(text)?;
    if label != expected {
        log::debug!("expected a {} block, found {}", expected, label);
        return Err(FormatError::UnexpectedLabel {
            expected: expected.as_str().to_string(),
            found: label.as_str().to_string(),
        }
        .into());
    }
    Ok(payload)
}

/// Builds a length-prefixed field payload
#[derive(Debug, Default)]
pub struct PayloadWriter {
    buf: Vec<u8>,
}

/// Length of a field or count as its u32 wire form
pub fn wire_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::MessageTooLong {
        len,
        max: u32::MAX as usize,
    })
}

impl PayloadWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_bytes(&mut self, data: &[u8]) -> Result<&mut Self> {
        let len = wire_len(data.len())?;
        self.buf.extend_from_slice(&len.to_be_bytes());
        self.buf.extend_from_slice(data);
        Ok(self)
    }

    pub fn put_uint(&mut self, value: &BigUint) -> Result<&mut Self> {
        self.put_bytes(&value.to_bytes_be())
    }

    pub fn put_str(&mut self, value: &str) -> Result<&mut Self> {
        self.put_bytes(value.as_bytes())
    }

    pub fn put_u32(&mut self, value: u32) -> Result<&mut Self> {
        self.put_bytes(&value.to_be_bytes())
    }

    pub fn finish(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buf)
    }
}

/// Reads fields written by [`PayloadWriter`] in the same order
#[derive(Debug)]
pub struct PayloadReader<'a> {
    data: &'a [u8],
}

impl<'a> PayloadReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn bytes(&mut self, field: &'static str) -> Result<&'a [u8]> {
        if self.data.len() < 4 {
            return Err(FormatError::Truncated(field).into());
        }
        let (len, rest) = self.data.split_at(4);
        let len = u32::from_be_bytes([len[0], len[1], len[2], len[3]]) as usize;
        if rest.len() < len {
            return Err(FormatError::Truncated(field).into());
        }
        let (value, rest) = rest.split_at(len);
        self.data = rest;
        Ok(value)
    }

    pub fn uint(&mut self, field: &'static str) -> Result<BigUint> {
        let bytes = self.bytes(field)?;
        if bytes.is_empty() {
            return Err(FormatError::InvalidNumber(field).into());
        }
        Ok(BigUint::from_bytes_be(bytes))
    }

    pub fn text(&mut self, field: &'static str) -> Result<String> {
        let bytes = self.bytes(field)?.to_vec();
        let text = String::from_utf8(bytes).map_err(FormatError::from)?;
        Ok(text)
    }

    pub fn u32(&mut self, field: &'static str) -> Result<u32> {
        match self.bytes(field)? {
            [a, b, c, d] => Ok(u32::from_be_bytes([*a, *b, *c, *d])),
            _ => Err(FormatError::InvalidNumber(field).into()),
        }
    }

    /// Fail if any bytes remain unread
    pub fn finish(self) -> Result<()> {
        if self.data.is_empty() {
            Ok(())
        } else {
            Err(FormatError::TrailingBytes(self.data.len()).into())
        }
    }
}
