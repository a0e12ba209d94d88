//! Binance exchange implementation.
//!
//! Spot REST API: public market data from `api/v1`, signed trading from `api/v3` and
//! funding from `wapi/v3`.

use std::sync::Arc;
use xchange_core::nonce::{MonotonicNonce, NonceSource};
use xchange_core::{BaseExchange, ExchangeConfig, Result};

pub mod constants;
mod exchange_impl;
pub mod parser;
mod rest;
pub mod signing_strategy;
pub mod time_sync;

pub use signing_strategy::BinanceSigningStrategy;
pub use time_sync::TimeDifference;

/// Binance exchange structure.
#[derive(Debug)]
pub struct Binance {
    /// Base exchange instance.
    base: BaseExchange,
    /// Local clock offset against the server, shared with the signer.
    time_difference: Arc<TimeDifference>,
}

impl Binance {
    /// Creates a new Binance instance.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use xchange_core::ExchangeConfig;
    /// use xchange_exchanges::binance::Binance;
    ///
    /// let config = ExchangeConfig::builder()
    ///     .api_key("your-api-key")
    ///     .secret("your-secret")
    ///     .adjust_for_time_difference(true)
    ///     .build();
    ///
    /// let binance = Binance::new(config).unwrap();
    /// ```
    pub fn new(config: ExchangeConfig) -> Result<Self> {
        Self::with_nonce(config, Arc::new(MonotonicNonce::new()))
    }

    /// Creates a Binance instance with a custom nonce source.
    pub fn with_nonce(config: ExchangeConfig, nonce: Arc<dyn NonceSource>) -> Result<Self> {
        let time_difference = Arc::new(TimeDifference::new());
        let signer =
            BinanceSigningStrategy::new(&config, nonce, Arc::clone(&time_difference));
        let base = BaseExchange::new(config, &constants::DESCRIPTOR, Arc::new(signer))?;
        Ok(Self {
            base,
            time_difference,
        })
    }

    /// Returns a reference to the base exchange.
    pub fn base(&self) -> &BaseExchange {
        &self.base
    }

    /// Clock offset state used when signing.
    pub fn time_difference(&self) -> &TimeDifference {
        &self.time_difference
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_binance_creation() {
        let binance = Binance::new(ExchangeConfig::default()).unwrap();
        assert_eq!(binance.base().id(), "binance");
        assert!(!binance.time_difference().is_initialized());
    }

    #[test]
    fn test_catalog_compiles_every_namespace() {
        let binance = Binance::new(ExchangeConfig::default()).unwrap();
        let table = binance.base().api.table();
        assert!(table.endpoints().any(|e| e.name == "ticker24Hr"));
        assert!(table.endpoints().any(|e| e.name == "depositAddress" && e.signed));
        assert!(table.endpoints().any(|e| e.name == "exchangeInfo" && !e.signed));
    }
}
