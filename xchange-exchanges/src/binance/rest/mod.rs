//! Binance REST API implementation organized by functionality.
//!
//! - `market_data`: public market data (catalog, server time, tickers, order book, trades, OHLCV)
//! - `account`: balance, orders and account trades
//! - `funding`: deposit addresses and withdrawals
//!
//! All methods are implemented directly on the `Binance` struct; the `Exchange` trait
//! implementation delegates to them.

mod account;
mod funding;
mod market_data;

use super::Binance;
use std::sync::Arc;
use xchange_core::types::Market;
use xchange_core::{Error, Exchange, Result};

impl Binance {
    /// Loads the catalog if needed and returns the market for `symbol`.
    pub(crate) async fn loaded_market(&self, symbol: &str) -> Result<Arc<Market>> {
        self.load_markets(false).await?;
        self.base.market(symbol).await
    }

    /// Like [`Self::loaded_market`], for endpoints that cannot run without a symbol.
    pub(crate) async fn required_market(
        &self,
        symbol: Option<&str>,
        method: &str,
    ) -> Result<Arc<Market>> {
        let symbol = symbol.ok_or_else(|| {
            Error::invalid_request(format!("Binance {method} requires a symbol argument"))
        })?;
        self.loaded_market(symbol).await
    }
}
