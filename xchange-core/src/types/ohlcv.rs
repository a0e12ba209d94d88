//! OHLCV candle

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Timestamp;

/// `[timestamp, open, high, low, close, volume]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ohlcv {
    /// Candle open time in milliseconds
    pub timestamp: Timestamp,
    /// Opening price
    pub open: Decimal,
    /// Highest price
    pub high: Decimal,
    /// Lowest price
    pub low: Decimal,
    /// Closing price
    pub close: Decimal,
    /// Base volume
    pub volume: Decimal,
}

impl Ohlcv {
    /// Create a new candle
    pub fn new(
        timestamp: Timestamp,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}
