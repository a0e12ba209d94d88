//! # xchange
//!
//! One canonical data model over the Binance, Gdax and Kucoin REST APIs: markets, tickers,
//! order books, trades, orders and reconciled balances, whichever exchange answered.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use xchange::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let exchange = xchange::create_exchange("binance", ExchangeConfig::default())?;
//!     let ticker = exchange.fetch_ticker("ETH/BTC").await?;
//!     println!("{} last {:?}", ticker.symbol, ticker.last);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

use std::sync::Arc;

// Re-export core types and traits
pub use xchange_core::{
    ArcExchange, Exchange, ExchangeConfig, Params,
    error::{Error, Result},
    types::*,
};

// Re-export exchange implementations
pub use xchange_exchanges::{binance::Binance, gdax::Gdax, kucoin::Kucoin};

/// Ids accepted by [`create_exchange`].
pub const EXCHANGES: &[&str] = &["binance", "gdax", "kucoin"];

/// Builds an adapter by its lowercase id.
pub fn create_exchange(id: &str, config: ExchangeConfig) -> Result<ArcExchange> {
    let exchange: ArcExchange = match id.to_ascii_lowercase().as_str() {
        "binance" => Arc::new(Binance::new(config)?),
        "gdax" => Arc::new(Gdax::new(config)?),
        "kucoin" => Arc::new(Kucoin::new(config)?),
        other => return Err(Error::not_supported(format!("exchange {other}"))),
    };
    Ok(exchange)
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::create_exchange;
    pub use xchange_exchanges::prelude::*;
}
