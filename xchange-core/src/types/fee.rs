//! Fee type definitions

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fee charged on an order or trade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    /// Fee currency code
    pub currency: String,
    /// Fee cost
    pub cost: Decimal,
    /// Fee rate (if known)
    pub rate: Option<Decimal>,
}

impl Fee {
    /// Create a new fee
    pub fn new(currency: impl Into<String>, cost: Decimal) -> Self {
        Self {
            currency: currency.into(),
            cost,
            rate: None,
        }
    }

    /// Create a new fee with rate
    pub fn with_rate(currency: impl Into<String>, cost: Decimal, rate: Decimal) -> Self {
        Self {
            currency: currency.into(),
            cost,
            rate: Some(rate),
        }
    }
}

/// Liquidity role of a fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TakerOrMaker {
    /// Removed liquidity
    Taker,
    /// Added liquidity
    Maker,
}

impl TakerOrMaker {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Taker => "taker",
            Self::Maker => "maker",
        }
    }
}

/// Default trading fee table of an exchange
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TradingFees {
    /// Maker rate
    pub maker: Decimal,
    /// Taker rate
    pub taker: Decimal,
}

impl TradingFees {
    /// Creates a fee table.
    pub const fn new(maker: Decimal, taker: Decimal) -> Self {
        Self { maker, taker }
    }

    /// Rate for the given role.
    pub fn rate(&self, role: TakerOrMaker) -> Decimal {
        match role {
            TakerOrMaker::Taker => self.taker,
            TakerOrMaker::Maker => self.maker,
        }
    }
}
