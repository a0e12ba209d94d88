//! Canonical data model
//!
//! Every adapter normalizes its raw payloads into these records, so consumers see one shape
//! for markets, tickers, order books, orders, trades and balances regardless of the exchange.

pub mod balance;
pub mod currency;
pub mod fee;
pub mod market;
pub mod ohlcv;
pub mod order;
pub mod orderbook;
pub mod ticker;
pub mod trade;
/// Deposit addresses and funding transactions
pub mod transaction;

pub use balance::{Balance, BalanceEntry, RawBalanceEntry};
pub use currency::{Currency, CurrencyLimits};
pub use fee::{Fee, TakerOrMaker, TradingFees};
pub use market::{Market, MarketLimits, MarketPrecision, MinMax};
pub use ohlcv::Ohlcv;
pub use order::{Order, OrderSide, OrderStatus, OrderType};
pub use orderbook::{OrderBook, OrderBookEntry};
pub use ticker::Ticker;
pub use trade::Trade;
pub use transaction::{DepositAddress, Transaction};

/// Type alias for timestamps (milliseconds since Unix epoch)
pub type Timestamp = i64;

/// Type alias for trading symbols (e.g., "BTC/USDT")
pub type Symbol = String;
