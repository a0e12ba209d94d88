//! Kucoin exchange implementation.
//!
//! REST API v1. Every reply is wrapped in a `{success, code, msg, data}` envelope, except
//! the TradingView chart host which answers with bare column arrays.

use std::sync::Arc;
use xchange_core::nonce::{MonotonicNonce, NonceSource};
use xchange_core::{BaseExchange, ExchangeConfig, Result};

pub mod auth;
pub mod constants;
mod exchange_impl;
pub mod parser;

pub use auth::KucoinSigningStrategy;

/// Kucoin exchange structure.
#[derive(Debug)]
pub struct Kucoin {
    base: BaseExchange,
}

impl Kucoin {
    /// Creates a new Kucoin instance.
    pub fn new(config: ExchangeConfig) -> Result<Self> {
        Self::with_nonce(config, Arc::new(MonotonicNonce::new()))
    }

    /// Creates a Kucoin instance with a custom nonce source.
    pub fn with_nonce(config: ExchangeConfig, nonce: Arc<dyn NonceSource>) -> Result<Self> {
        let signer = KucoinSigningStrategy::new(&config, nonce);
        let base = BaseExchange::new(config, &constants::DESCRIPTOR, Arc::new(signer))?;
        Ok(Self { base })
    }
}
