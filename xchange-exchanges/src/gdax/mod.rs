//! Gdax exchange implementation.
//!
//! Spot REST API with passphrase-protected HMAC authentication.

use std::sync::Arc;
use xchange_core::nonce::{MonotonicNonce, NonceSource};
use xchange_core::{BaseExchange, ExchangeConfig, Result};

pub mod auth;
pub mod constants;
mod exchange_impl;
pub mod parser;

pub use auth::GdaxSigningStrategy;

/// Gdax exchange structure.
#[derive(Debug)]
pub struct Gdax {
    base: BaseExchange,
}

impl Gdax {
    /// Creates a new Gdax instance.
    ///
    /// Signed endpoints need `api_key`, `secret` (base64) and `password` (the passphrase).
    pub fn new(config: ExchangeConfig) -> Result<Self> {
        Self::with_nonce(config, Arc::new(MonotonicNonce::new()))
    }

    /// Creates a Gdax instance with a custom nonce source.
    pub fn with_nonce(config: ExchangeConfig, nonce: Arc<dyn NonceSource>) -> Result<Self> {
        let signer = GdaxSigningStrategy::new(&config, nonce);
        let base = BaseExchange::new(config, &constants::DESCRIPTOR, Arc::new(signer))?;
        Ok(Self { base })
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use xchange_core::Exchange;

    #[test]
    fn test_gdax_creation() {
        let gdax = Gdax::new(ExchangeConfig::default()).unwrap();
        assert_eq!(gdax.id(), "gdax");
        assert_eq!(gdax.name(), "GDAX");
        assert!(
            gdax.base()
                .api
                .table()
                .endpoints()
                .any(|e| e.name == "productsIdBook")
        );
    }

    #[test]
    fn test_partial_credentials_rejected() {
        let config = ExchangeConfig::builder().api_key("key").secret("c2VjcmV0").build();
        let err = Gdax::new(config).unwrap_err();
        assert!(err.to_string().contains("password"));
    }
}
