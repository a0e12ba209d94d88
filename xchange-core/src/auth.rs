//! HMAC signing and base64 helpers used by the request signers.

use crate::error::{Error, Result};
use base64::{Engine as _, engine::general_purpose};
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use std::fmt;

/// Hash function behind an HMAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        };
        write!(f, "{s}")
    }
}

/// Output encoding of a digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestFormat {
    /// Lowercase hexadecimal
    Hex,
    /// Standard base64 with padding
    Base64,
}

/// Signs `message` with a UTF-8 secret.
///
/// ```
/// use xchange_core::auth::{hmac_sign, HashAlgorithm, DigestFormat};
///
/// let signature = hmac_sign("message", "secret", HashAlgorithm::Sha256, DigestFormat::Hex).unwrap();
/// assert_eq!(signature.len(), 64);
/// ```
pub fn hmac_sign(
    message: &str,
    secret: &str,
    algorithm: HashAlgorithm,
    digest: DigestFormat,
) -> Result<String> {
    hmac_sign_bytes(message.as_bytes(), secret.as_bytes(), algorithm, digest)
}

/// Signs `message` with a raw key, e.g. a base64-decoded secret.
pub fn hmac_sign_bytes(
    message: &[u8],
    key: &[u8],
    algorithm: HashAlgorithm,
    digest: DigestFormat,
) -> Result<String> {
    let signature = match algorithm {
        HashAlgorithm::Sha256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(key).map_err(invalid_key)?;
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
        HashAlgorithm::Sha384 => {
            let mut mac = Hmac::<Sha384>::new_from_slice(key).map_err(invalid_key)?;
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
        HashAlgorithm::Sha512 => {
            let mut mac = Hmac::<Sha512>::new_from_slice(key).map_err(invalid_key)?;
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
    };
    Ok(encode_bytes(&signature, digest))
}

fn invalid_key(e: hmac::digest::InvalidLength) -> Error {
    Error::authentication(format!("invalid HMAC key: {e}"))
}

fn encode_bytes(bytes: &[u8], digest: DigestFormat) -> String {
    match digest {
        DigestFormat::Hex => hex::encode(bytes),
        DigestFormat::Base64 => general_purpose::STANDARD.encode(bytes),
    }
}

/// Standard base64 encoding.
pub fn base64_encode(data: &[u8]) -> String {
    general_purpose::STANDARD.encode(data)
}

/// Standard base64 decoding; a malformed secret is an authentication error.
pub fn base64_decode(data: &str) -> Result<Vec<u8>> {
    general_purpose::STANDARD
        .decode(data)
        .map_err(|e| Error::authentication(format!("secret is not valid base64: {e}")))
}
