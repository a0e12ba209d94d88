//! Exchange configuration structures and builders

use crate::credentials::{CredentialField, CredentialSource, SecretString};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Adapter configuration
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    /// Exchange identifier
    pub id: String,
    /// Exchange display name
    pub name: String,
    /// API key (zeroed on drop)
    pub api_key: Option<SecretString>,
    /// API secret (zeroed on drop)
    pub secret: Option<SecretString>,
    /// Passphrase (zeroed on drop)
    pub password: Option<SecretString>,
    /// User ID
    pub uid: Option<String>,
    /// Request timeout (default: 30 seconds)
    pub timeout: Duration,
    /// TCP connection timeout (default: 10 seconds)
    pub connect_timeout: Duration,
    /// Log every request and response at debug level
    pub verbose: bool,
    /// Map legacy currency codes (XBT, BCC, DRK) to their common names
    pub substitute_common_currency_codes: bool,
    /// Shift signing timestamps by the measured server clock offset
    pub adjust_for_time_difference: bool,
    /// Exchange-specific options
    pub options: HashMap<String, Value>,
    /// Base URL overrides per API namespace, used for mocking
    pub url_overrides: HashMap<String, String>,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            api_key: None,
            secret: None,
            password: None,
            uid: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            verbose: false,
            substitute_common_currency_codes: true,
            adjust_for_time_difference: false,
            options: HashMap::new(),
            url_overrides: HashMap::new(),
        }
    }
}

impl ExchangeConfig {
    /// Create a new configuration builder
    ///
    /// # Example
    ///
    /// ```rust
    /// use xchange_core::base_exchange::ExchangeConfig;
    ///
    /// let config = ExchangeConfig::builder()
    ///     .api_key("your-api-key")
    ///     .secret("your-secret")
    ///     .url_override("public", "http://127.0.0.1:8080")
    ///     .build();
    /// assert_eq!(config.base_url("public", "https://api.binance.com"), "http://127.0.0.1:8080");
    /// ```
    pub fn builder() -> ExchangeConfigBuilder {
        ExchangeConfigBuilder::default()
    }

    /// Base URL for a namespace, preferring an override.
    pub fn base_url<'a>(&'a self, namespace: &str, default: &'a str) -> &'a str {
        self.url_overrides
            .get(namespace)
            .map_or(default, String::as_str)
    }

    /// Reads a string option.
    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(Value::as_str)
    }
}

impl CredentialSource for ExchangeConfig {
    fn has_credential(&self, field: CredentialField) -> bool {
        match field {
            CredentialField::ApiKey => self.api_key.as_ref().is_some_and(|s| !s.is_empty()),
            CredentialField::Secret => self.secret.as_ref().is_some_and(|s| !s.is_empty()),
            CredentialField::Password => self.password.as_ref().is_some_and(|s| !s.is_empty()),
            CredentialField::Uid => self.uid.as_ref().is_some_and(|s| !s.is_empty()),
        }
    }
}

/// Fluent builder for [`ExchangeConfig`]
#[derive(Debug, Clone, Default)]
pub struct ExchangeConfigBuilder {
    config: ExchangeConfig,
}

impl ExchangeConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the exchange identifier
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.config.id = id.into();
        self
    }

    /// Set the exchange display name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(SecretString::new(key));
        self
    }

    /// Set the API secret
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.config.secret = Some(SecretString::new(secret));
        self
    }

    /// Set the passphrase
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = Some(SecretString::new(password));
        self
    }

    /// Set the user ID
    pub fn uid(mut self, uid: impl Into<String>) -> Self {
        self.config.uid = Some(uid.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the TCP connection timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Enable or disable verbose logging
    pub fn verbose(mut self, enabled: bool) -> Self {
        self.config.verbose = enabled;
        self
    }

    /// Enable or disable common currency code substitution
    pub fn substitute_common_currency_codes(mut self, enabled: bool) -> Self {
        self.config.substitute_common_currency_codes = enabled;
        self
    }

    /// Enable or disable server time adjustment for signed requests
    pub fn adjust_for_time_difference(mut self, enabled: bool) -> Self {
        self.config.adjust_for_time_difference = enabled;
        self
    }

    /// Set a custom option
    pub fn option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.config.options.insert(key.into(), value);
        self
    }

    /// Set a URL override for a namespace (e.g., "public", "private")
    pub fn url_override(mut self, key: impl Into<String>, url: impl Into<String>) -> Self {
        self.config.url_overrides.insert(key.into(), url.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> ExchangeConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExchangeConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.substitute_common_currency_codes);
        assert!(!config.adjust_for_time_difference);
    }

    #[test]
    fn test_empty_secret_is_not_a_credential() {
        let config = ExchangeConfig::builder().api_key("k").secret("").build();
        assert!(config.has_credential(CredentialField::ApiKey));
        assert!(!config.has_credential(CredentialField::Secret));
        assert!(!config.has_credential(CredentialField::Password));
    }

    #[test]
    fn test_base_url_falls_back_to_default() {
        let config = ExchangeConfig::builder()
            .url_override("private", "http://localhost:1")
            .build();
        assert_eq!(config.base_url("public", "https://x"), "https://x");
        assert_eq!(config.base_url("private", "https://x"), "http://localhost:1");
    }
}
