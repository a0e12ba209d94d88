//! Credentials: zeroizing secret storage and per-exchange required-credential sets.
//!
//! Secrets are cleared from memory on drop and never printed by `Debug` or `Display`.
//!
//! ```rust
//! use xchange_core::credentials::SecretString;
//!
//! let api_key = SecretString::new("my-api-key");
//! assert_eq!(api_key.expose_secret(), "my-api-key");
//! assert_eq!(format!("{api_key:?}"), "[REDACTED]");
//! ```

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// A string that is zeroed when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    /// Creates a new secret string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the secret value. Use it immediately and do not persist it.
    #[inline]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Returns the secret as bytes.
    #[inline]
    pub fn expose_secret_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Returns the length of the secret string.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the secret string is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One credential slot of an exchange configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialField {
    /// API key.
    ApiKey,
    /// API secret.
    Secret,
    /// Account user id.
    Uid,
    /// Passphrase.
    Password,
}

impl CredentialField {
    /// Name used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ApiKey => "apiKey",
            Self::Secret => "secret",
            Self::Uid => "uid",
            Self::Password => "password",
        }
    }
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which credentials an exchange needs for signed endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredCredentials {
    /// API key is required.
    pub api_key: bool,
    /// Secret is required.
    pub secret: bool,
    /// User id is required.
    pub uid: bool,
    /// Passphrase is required.
    pub password: bool,
}

impl RequiredCredentials {
    /// API key and secret.
    pub const KEY_SECRET: Self = Self {
        api_key: true,
        secret: true,
        uid: false,
        password: false,
    };

    /// API key, secret and passphrase.
    pub const KEY_SECRET_PASSWORD: Self = Self {
        api_key: true,
        secret: true,
        uid: false,
        password: true,
    };

    /// Required fields in a stable order.
    pub fn fields(&self) -> impl Iterator<Item = CredentialField> + '_ {
        [
            (self.api_key, CredentialField::ApiKey),
            (self.secret, CredentialField::Secret),
            (self.uid, CredentialField::Uid),
            (self.password, CredentialField::Password),
        ]
        .into_iter()
        .filter_map(|(required, field)| required.then_some(field))
    }
}

impl Default for RequiredCredentials {
    fn default() -> Self {
        Self::KEY_SECRET
    }
}

/// Credential values an exchange was configured with.
///
/// Implemented by [`ExchangeConfig`](crate::base_exchange::ExchangeConfig).
pub trait CredentialSource {
    /// Whether the given slot holds a non-empty value.
    fn has_credential(&self, field: CredentialField) -> bool;
}

/// Fails with an authentication error naming the first missing required credential.
pub fn check_required_credentials(
    exchange_id: &str,
    source: &impl CredentialSource,
    required: RequiredCredentials,
) -> Result<()> {
    match required.fields().find(|f| !source.has_credential(*f)) {
        Some(field) => Err(Error::authentication(format!(
            "{exchange_id} requires `{field}`"
        ))),
        None => Ok(()),
    }
}

/// Construction-time check: supplying any credential obliges all required ones.
pub fn validate_credential_set(
    exchange_id: &str,
    source: &impl CredentialSource,
    required: RequiredCredentials,
) -> Result<()> {
    let all = [
        CredentialField::ApiKey,
        CredentialField::Secret,
        CredentialField::Uid,
        CredentialField::Password,
    ];
    if !all.iter().any(|f| source.has_credential(*f)) {
        return Ok(());
    }
    let missing: Vec<&str> = required
        .fields()
        .filter(|f| !source.has_credential(*f))
        .map(CredentialField::as_str)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::configuration(format!(
            "{exchange_id} credentials incomplete, missing: {}",
            missing.join(", ")
        )))
    }
}
