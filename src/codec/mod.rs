// Codec Module
// Text formats for exchanging keys, ciphertext, certificates and signatures.
// Every exportable artifact supports both Format variants through the
// Exportable trait, so call sites pick the format with a value.

pub mod armor;
pub mod base64;
pub mod structured;

use std::fmt;
use std::str::FromStr;

use crate::error::Result;

/// Output format selected at the call site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// `-----BEGIN <LABEL>-----` / `-----END <LABEL>-----` around base64
    Armored,
    /// Brace-delimited JSON object
    Structured,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Armored => write!(f, "armored"),
            Format::Structured => write!(f, "structured"),
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "armored" | "armor" | "pgp" | "pem" => Ok(Format::Armored),
            "structured" | "json" => Ok(Format::Structured),
            other => Err(format!("unknown format `{}`", other)),
        }
    }
}

/// Armor label naming the kind of artifact between the markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Message,
    PublicKey,
    PrivateKey,
    Certificate,
    KeyBlock,
    Signature,
}

impl Label {
    pub const ALL: [Label; 6] = [
        Label::Message,
        Label::PublicKey,
        Label::PrivateKey,
        Label::Certificate,
        Label::KeyBlock,
        Label::Signature,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Message => "MESSAGE",
            Label::PublicKey => "PUBLIC KEY",
            Label::PrivateKey => "PRIVATE KEY",
            Label::Certificate => "CERTIFICATE",
            Label::KeyBlock => "KEY BLOCK",
            Label::Signature => "SIGNATURE",
        }
    }

    pub fn from_name(name: &str) -> Option<Label> {
        Label::ALL.into_iter().find(|label| label.as_str() == name)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialization in both text formats behind one interface
pub trait Exportable: Sized {
    fn export(&self, format: Format) -> Result<String>;

    fn import(format: Format, text: &str) -> Result<Self>;
}
