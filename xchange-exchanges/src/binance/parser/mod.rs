//! Binance data parser module.
//!
//! Converts Binance API responses into the canonical structures. Parsers are pure: market
//! lookups happen in the caller, which passes the resolved [`Market`] when it has one.
//!
//! [`Market`]: xchange_core::types::Market

pub use balance::parse_balance;
pub use market::{parse_market, parse_markets};
pub use ohlcv::parse_ohlcv;
pub use order::{parse_order, parse_order_status};
pub use ticker::parse_ticker;
pub use trade::parse_trade;
pub use transaction::{parse_deposit_address, parse_withdrawal};

mod balance;
mod market;
mod ohlcv;
mod order;
mod ticker;
mod trade;
mod transaction;

use xchange_core::base_exchange::common_currency_code;

/// Canonical code for a Binance asset id.
pub(crate) fn currency_code(id: &str, substitute: bool) -> String {
    common_currency_code(id, substitute)
}

/// Binance asset id for a canonical code; the exchange still lists BCH as `BCC`.
pub fn currency_id(code: &str) -> String {
    match code {
        "BCH" => "BCC".to_string(),
        other => other.to_string(),
    }
}
