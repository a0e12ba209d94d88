//! Order book type definitions

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Symbol, Timestamp};

/// One price level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookEntry {
    /// Price
    pub price: Decimal,
    /// Amount at that price
    pub amount: Decimal,
}

impl OrderBookEntry {
    /// Create a new price level
    pub fn new(price: Decimal, amount: Decimal) -> Self {
        Self { price, amount }
    }
}

/// Order book snapshot; bids descending and asks ascending by price
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderBook {
    /// Unified symbol
    pub symbol: Symbol,
    /// Bid levels, best first
    pub bids: Vec<OrderBookEntry>,
    /// Ask levels, best first
    pub asks: Vec<OrderBookEntry>,
    /// Timestamp in milliseconds
    pub timestamp: Timestamp,
    /// ISO8601 datetime
    pub datetime: String,
    /// Exchange sequence number
    pub nonce: Option<i64>,
}

impl OrderBook {
    /// Best bid
    pub fn best_bid(&self) -> Option<&OrderBookEntry> {
        self.bids.first()
    }

    /// Best ask
    pub fn best_ask(&self) -> Option<&OrderBookEntry> {
        self.asks.first()
    }

    /// Ask minus bid
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()?.price - self.best_bid()?.price)
    }
}
