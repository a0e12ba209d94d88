//! Currency type definitions

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::MinMax;

/// Amount and withdrawal limits of a currency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyLimits {
    /// Amount limits
    pub amount: MinMax,
    /// Withdrawal limits
    pub withdraw: MinMax,
}

/// A currency, either listed by the exchange or derived from its markets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Currency {
    /// Exchange-specific currency ID
    pub id: String,
    /// Unified currency code
    pub code: String,
    /// Display name
    pub name: Option<String>,
    /// Decimal places
    pub precision: u32,
    /// Deposits and withdrawals enabled
    pub active: bool,
    /// Withdrawal fee
    pub fee: Option<Decimal>,
    /// Limits
    pub limits: CurrencyLimits,
    /// Raw exchange payload
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub info: Value,
}

impl Currency {
    /// A currency derived from market listings.
    pub fn derived(id: impl Into<String>, code: impl Into<String>, precision: u32) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            precision,
            active: true,
            ..Self::default()
        }
    }
}
