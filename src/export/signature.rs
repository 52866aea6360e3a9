// Signature Manager
// Transports a (signature, message) pair; verification stays with the caller

use serde_json::Value;

use crate::codec::armor::{self, PayloadReader, PayloadWriter};
use crate::codec::structured::{self, Object};
use crate::codec::{Exportable, Format, Label};
use crate::error::Result;
use crate::rsa::{RsaBigInt, RsaPrivateKey, RsaPublicKey};

/// A message together with its signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedMessage {
    pub signature: RsaBigInt,
    pub message: String,
}

impl SignedMessage {
    pub fn new(signature: RsaBigInt, message: impl Into<String>) -> Self {
        Self {
            signature,
            message: message.into(),
        }
    }

    /// Sign `message` with `key`
    pub fn sign(message: &str, key: &RsaPrivateKey) -> Result<Self> {
        Ok(Self::new(key.sign(message)?, message))
    }

    pub fn verify(&self, key: &RsaPublicKey) -> bool {
        key.verify(&self.signature, &self.message)
    }
}

impl Exportable for SignedMessage {
    fn export(&self, format: Format) -> Result<String> {
        match format {
            Format::Armored => {
                let payload = PayloadWriter::new()
                    .put_uint(&self.signature)?
                    .put_str(&self.message)?
                    .finish();
                Ok(armor::armor(Label::Signature, &payload))
            }
            Format::Structured => {
                let mut object = Object::new();
                object.insert("signature".to_string(), structured::uint_value(&self.signature));
                object.insert("message".to_string(), Value::String(self.message.clone()));
                Ok(structured::to_text(object))
            }
        }
    }

    fn import(format: Format, text: &str) -> Result<Self> {
        match format {
            Format::Armored => {
                let payload = armor::dearmor(Label::Signature, text)?;
                let mut reader = PayloadReader::new(&payload);
                let signature = reader.uint("signature")?;
                let message = reader.text("message")?;
                reader.finish()?;
                Ok(Self::new(signature, message))
            }
            Format::Structured => {
                let object = structured::parse_object(text)?;
                Ok(Self::new(
                    structured::uint_field(&object, "signature")?,
                    structured::text_field(&object, "message")?,
                ))
            }
        }
    }
}

pub fn export_signature(format: Format, signature: &RsaBigInt, message: &str) -> Result<String> {
    SignedMessage::new(signature.clone(), message).export(format)
}

pub fn import_signature(format: Format, text: &str) -> Result<(RsaBigInt, String)> {
    let signed = SignedMessage::import(format, text)?;
    Ok((signed.signature, signed.message))
}
