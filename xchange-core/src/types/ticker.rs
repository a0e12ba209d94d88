//! Ticker type definitions

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Symbol, Timestamp};

/// 24h statistics and best prices of one market
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Ticker {
    /// Unified symbol
    pub symbol: Symbol,

    /// Timestamp in milliseconds
    pub timestamp: Timestamp,

    /// ISO8601 datetime string
    pub datetime: String,

    /// Highest price in 24h
    pub high: Option<Decimal>,

    /// Lowest price in 24h
    pub low: Option<Decimal>,

    /// Current best bid price
    pub bid: Option<Decimal>,

    /// Current best bid amount
    #[serde(rename = "bidVolume")]
    pub bid_volume: Option<Decimal>,

    /// Current best ask price
    pub ask: Option<Decimal>,

    /// Current best ask amount
    #[serde(rename = "askVolume")]
    pub ask_volume: Option<Decimal>,

    /// Volume-weighted average price
    pub vwap: Option<Decimal>,

    /// Opening price
    pub open: Option<Decimal>,

    /// Closing price
    pub close: Option<Decimal>,

    /// Last traded price
    pub last: Option<Decimal>,

    /// Absolute change
    pub change: Option<Decimal>,

    /// Relative change in percent
    pub percentage: Option<Decimal>,

    /// Base volume traded in 24h
    #[serde(rename = "baseVolume")]
    pub base_volume: Option<Decimal>,

    /// Quote volume traded in 24h
    #[serde(rename = "quoteVolume")]
    pub quote_volume: Option<Decimal>,

    /// Raw exchange payload
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub info: Value,
}

impl Ticker {
    /// Creates a ticker stamped at `timestamp`.
    pub fn new(symbol: impl Into<Symbol>, timestamp: Timestamp) -> Self {
        Self {
            symbol: symbol.into(),
            timestamp,
            datetime: crate::time::iso8601(timestamp).unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Midpoint of bid and ask, when both are known.
    pub fn mid_price(&self) -> Option<Decimal> {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) => Some((bid + ask) / Decimal::TWO),
            _ => None,
        }
    }
}
