//! xchange core library
//!
//! Canonical data model, declarative endpoint tables, request signing primitives, the
//! market/currency catalog, payload normalization helpers and balance reconciliation shared
//! by every exchange adapter.
//!
//! # Example
//!
//! ```rust
//! use xchange_core::prelude::*;
//!
//! let market = Market::new("ETHBTC", "ETH", "BTC", "ETH", "BTC");
//! assert_eq!(market.symbol, "ETH/BTC");
//!
//! let order = Order::new(
//!     "1",
//!     "ETH/BTC",
//!     OrderSide::Sell,
//!     1_500_000_000_000,
//!     rust_decimal_macros::dec!(2),
//!     rust_decimal_macros::dec!(0.5),
//!     OrderStatus::Open,
//! );
//! assert_eq!(order.remaining, rust_decimal_macros::dec!(1.5));
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Suppressed globally:
// - module_name_repetitions: OrderType in the order module and similar
// - missing_errors_doc / missing_panics_doc: every fallible fn returns our Result
// - must_use_candidate, return_self_not_must_use: accessors and builders
// - doc_markdown: OHLCV, HMAC and friends
// - similar_names: bid/ask, buy/sell
// - cast_sign_loss / cast_possible_wrap / cast_possible_truncation: timestamp arithmetic
// - unreadable_literal: millisecond timestamps
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::unreadable_literal)]

pub use rust_decimal;
pub use serde;
pub use serde_json;

pub mod aggregation;
pub mod auth;
pub mod base_exchange;
pub mod credentials;
pub mod endpoint;
pub mod error;
pub mod exchange;
pub mod http_client;
pub mod logging;
pub mod nonce;
pub mod order_store;
pub mod parser_utils;
pub mod precision;
pub mod reconcile;
pub mod signed_request;
pub mod time;
pub mod transport;
pub mod types;

pub use base_exchange::{BaseExchange, ExchangeConfig, ExchangeConfigBuilder, ExchangeDescriptor};
pub use credentials::{RequiredCredentials, SecretString};
pub use endpoint::{ApiCatalog, ApiClient, EndpointTable, RequestDescriptor};
pub use error::{ContextExt, Error, ExchangeErrorDetails, NetworkError, ParseError, Result};
pub use exchange::{ArcExchange, Exchange, Params};
pub use types::{
    Balance, BalanceEntry, Currency, Fee, Market, MarketLimits, MarketPrecision, MinMax, Ohlcv,
    Order, OrderBook, OrderBookEntry, OrderSide, OrderStatus, OrderType, TakerOrMaker, Ticker,
    Trade, TradingFees,
};

/// Common imports.
///
/// ```rust
/// use xchange_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::aggregation::fetch_balances;
    pub use crate::base_exchange::{BaseExchange, ExchangeConfig, ExchangeConfigBuilder};
    pub use crate::endpoint::RequestDescriptor;
    pub use crate::error::{ContextExt, Error, Result};
    pub use crate::exchange::{ArcExchange, Exchange, Params};
    pub use crate::logging::{LogConfig, LogFormat, LogLevel, init_logging, try_init_logging};
    pub use crate::precision::{RoundingMode, number_to_string, precision_from_string};
    pub use crate::time::{iso8601, milliseconds, parse8601, seconds, ymdhms};
    pub use crate::types::{
        Balance, BalanceEntry, Currency, DepositAddress, Fee, Market, Ohlcv, Order, OrderBook,
        OrderBookEntry, OrderSide, OrderStatus, OrderType, Symbol, TakerOrMaker, Ticker,
        Timestamp, Trade, Transaction,
    };
    pub use rust_decimal::Decimal;
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
