// Certificate Manager
// Binds an owner name to a public key with a signature from an issuer.
// No chain-of-trust validation happens here, only identity binding and transport.

use std::fmt;

use serde_json::Value;
use sha2::{Digest, Sha256};

use super::keys::{public_key_from_object, public_key_object};
use crate::codec::armor::{self, PayloadReader, PayloadWriter};
use crate::codec::structured::{self, Object};
use crate::codec::{Exportable, Format, Label};
use crate::error::Result;
use crate::rsa::{generate_signature, verify_signature, RsaBigInt, RsaKeyPair, RsaPrivateKey, RsaPublicKey};

/// Text that gets signed when a public key is certified
pub fn canonical_public_key(key: &RsaPublicKey) -> String {
    structured::to_text(public_key_object(key))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    owner_name: String,
    public_key: RsaPublicKey,
    signature: RsaBigInt,
}

impl Certificate {
    /// Certify `public_key` for `owner_name`, signed with the issuer's private key
    pub fn new(owner_name: &str, public_key: RsaPublicKey, issuer: &RsaPrivateKey) -> Result<Self> {
        let signature = generate_signature(&canonical_public_key(&public_key), &issuer.d, &issuer.n)?;
        log::debug!("issued certificate for {:?}", owner_name);
        Ok(Self {
            owner_name: owner_name.to_string(),
            public_key,
            signature,
        })
    }

    /// Certificate whose subject key pair also acts as the issuer
    pub fn self_signed(owner_name: &str, key_pair: &RsaKeyPair) -> Result<Self> {
        Self::new(owner_name, key_pair.public_key.clone(), &key_pair.private_key)
    }

    /// Reassemble a certificate from already-known fields, nothing is checked
    pub fn from_parts(owner_name: String, public_key: RsaPublicKey, signature: RsaBigInt) -> Self {
        Self {
            owner_name,
            public_key,
            signature,
        }
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    pub fn signature(&self) -> &RsaBigInt {
        &self.signature
    }

    /// Check the signature over the subject key against the issuer's public key
    pub fn verify(&self, issuer: &RsaPublicKey) -> bool {
        verify_signature(
            &self.signature,
            &canonical_public_key(&self.public_key),
            &issuer.e,
            &issuer.n,
        )
    }

    /// Lowercase hex SHA-256 of the subject public key
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha256::digest(canonical_public_key(&self.public_key).as_bytes()))
    }

    pub fn export_certificate(&self, format: Format) -> Result<String> {
        self.export(format)
    }

    pub fn import_certificate(format: Format, text: &str) -> Result<Self> {
        Self::import(format, text)
    }
}

impl Exportable for Certificate {
    fn export(&self, format: Format) -> Result<String> {
        match format {
            Format::Armored => {
                let payload = PayloadWriter::new()
                    .put_str(&self.owner_name)?
                    .put_uint(&self.public_key.e)?
                    .put_uint(&self.public_key.n)?
                    .put_uint(&self.signature)?
                    .finish();
                Ok(armor::armor(Label::Certificate, &payload))
            }
            Format::Structured => {
                let mut object = Object::new();
                object.insert("ownerName".to_string(), Value::String(self.owner_name.clone()));
                object.insert("publicKey".to_string(), Value::Object(public_key_object(&self.public_key)));
                object.insert("signature".to_string(), structured::uint_value(&self.signature));
                Ok(structured::to_text(object))
            }
        }
    }

    fn import(format: Format, text: &str) -> Result<Self> {
        match format {
            Format::Armored => {
                let payload = armor::dearmor(Label::Certificate, text)?;
                let mut reader = PayloadReader::new(&payload);
                let owner_name = reader.text("ownerName")?;
                let public_key = RsaPublicKey::new(reader.uint("e")?, reader.uint("n")?);
                let signature = reader.uint("signature")?;
                reader.finish()?;
                Ok(Self::from_parts(owner_name, public_key, signature))
            }
            Format::Structured => {
                let object = structured::parse_object(text)?;
                let owner_name = structured::text_field(&object, "ownerName")?;
                let public_key = public_key_from_object(structured::object_field(&object, "publicKey")?)?;
                let signature = structured::uint_field(&object, "signature")?;
                Ok(Self::from_parts(owner_name, public_key, signature))
            }
        }
    }
}

impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Owner:       {}", self.owner_name)?;
        writeln!(f, "Key size:    {} bits", self.public_key.bit_length())?;
        writeln!(f, "Exponent:    {}", self.public_key.e)?;
        write!(f, "Fingerprint: {}", self.fingerprint())
    }
}
