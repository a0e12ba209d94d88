//! Market type definitions
//!
//! A [`Market`] is one tradable pair as listed by an exchange, carrying both the exchange's
//! own identifiers and the canonical `BASE/QUOTE` symbol.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Symbol;

/// Lower and upper bound, either of which may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinMax {
    /// Minimum value
    pub min: Option<Decimal>,
    /// Maximum value
    pub max: Option<Decimal>,
}

impl MinMax {
    /// Creates a bound pair.
    pub fn new(min: Option<Decimal>, max: Option<Decimal>) -> Self {
        Self { min, max }
    }
}

/// Market precision in decimal places
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketPrecision {
    /// Base currency precision
    pub base: Option<u32>,
    /// Quote currency precision
    pub quote: Option<u32>,
    /// Amount precision
    pub amount: Option<u32>,
    /// Price precision
    pub price: Option<u32>,
}

/// Order limits of a market
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketLimits {
    /// Amount limits
    pub amount: MinMax,
    /// Price limits
    pub price: MinMax,
    /// Cost (amount * price) limits
    pub cost: MinMax,
}

/// A trading pair
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Market {
    /// Exchange-specific market ID
    pub id: String,

    /// Unified symbol (e.g., "BTC/USDT")
    pub symbol: Symbol,

    /// Base currency code (e.g., "BTC")
    pub base: String,

    /// Quote currency code (e.g., "USDT")
    pub quote: String,

    /// Base currency ID on exchange
    pub base_id: String,

    /// Quote currency ID on exchange
    pub quote_id: String,

    /// Is market active for trading
    pub active: bool,

    /// Precision settings
    pub precision: MarketPrecision,

    /// Limits for orders
    pub limits: MarketLimits,

    /// Maker fee rate
    pub maker: Option<Decimal>,

    /// Taker fee rate
    pub taker: Option<Decimal>,

    /// Raw exchange payload
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub info: Value,
}

impl Market {
    /// Creates a market whose symbol is derived from the base and quote codes.
    pub fn new(
        id: impl Into<String>,
        base: impl Into<String>,
        quote: impl Into<String>,
        base_id: impl Into<String>,
        quote_id: impl Into<String>,
    ) -> Self {
        let base = base.into();
        let quote = quote.into();
        Self {
            id: id.into(),
            symbol: format!("{base}/{quote}"),
            base,
            quote,
            base_id: base_id.into(),
            quote_id: quote_id.into(),
            ..Self::default()
        }
    }

    /// Sets the raw payload.
    #[must_use]
    pub fn with_info(mut self, info: Value) -> Self {
        self.info = info;
        self
    }

    /// Precision a derived base currency inherits: base, then amount, then 8.
    pub fn base_currency_precision(&self) -> u32 {
        self.precision.base.or(self.precision.amount).unwrap_or(8)
    }

    /// Precision a derived quote currency inherits: quote, then price, then 8.
    pub fn quote_currency_precision(&self) -> u32 {
        self.precision.quote.or(self.precision.price).unwrap_or(8)
    }
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.symbol, self.id)
    }
}
