//! Balance type definitions

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Balance of a single currency; `total == free + used`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceEntry {
    /// Available for trading
    pub free: Decimal,
    /// Locked in open orders
    pub used: Decimal,
    /// `free + used`
    pub total: Decimal,
}

impl BalanceEntry {
    /// Create a new balance entry
    pub fn new(free: Decimal, used: Decimal) -> Self {
        Self {
            free,
            used,
            total: free + used,
        }
    }
}

/// Balance figures as reported by an exchange, before reconciliation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawBalanceEntry {
    /// Reported free amount
    pub free: Decimal,
    /// Reported used amount, if the exchange reports it
    pub used: Option<Decimal>,
}

impl RawBalanceEntry {
    /// Free and used both reported.
    pub fn reported(free: Decimal, used: Decimal) -> Self {
        Self {
            free,
            used: Some(used),
        }
    }

    /// Only free reported.
    pub fn free_only(free: Decimal) -> Self {
        Self {
            free,
            used: None,
        }
    }
}

/// Account balances keyed by unified currency code
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Balance {
    /// Per-currency entries
    pub currencies: HashMap<String, BalanceEntry>,

    /// Free amount per currency
    pub free: HashMap<String, Decimal>,

    /// Used amount per currency
    pub used: HashMap<String, Decimal>,

    /// Total amount per currency
    pub total: HashMap<String, Decimal>,

    /// Raw exchange payload
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub info: Value,
}

impl Balance {
    /// Create a new empty balance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get balance for a specific currency
    pub fn get(&self, currency: &str) -> Option<&BalanceEntry> {
        self.currencies.get(currency)
    }

    /// Set balance for a currency, keeping the aggregate maps in step
    pub fn set(&mut self, currency: impl Into<String>, entry: BalanceEntry) {
        let currency = currency.into();
        self.free.insert(currency.clone(), entry.free);
        self.used.insert(currency.clone(), entry.used);
        self.total.insert(currency.clone(), entry.total);
        self.currencies.insert(currency, entry);
    }

    /// Number of currencies
    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    /// Whether no currency is present
    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_set_fills_aggregates() {
        let mut balance = Balance::new();
        balance.set("BTC", BalanceEntry::new(dec!(1.5), dec!(0.5)));
        assert_eq!(balance.total["BTC"], dec!(2.0));
        assert_eq!(balance.free["BTC"], dec!(1.5));
        assert_eq!(balance.used["BTC"], dec!(0.5));
        assert_eq!(balance.len(), 1);
    }
}
