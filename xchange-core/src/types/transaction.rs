use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Deposit address of a currency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositAddress {
    /// Currency code
    pub currency: String,
    /// Address
    pub address: String,
    /// Memo / destination tag
    pub tag: Option<String>,
    /// Raw exchange payload
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub info: Value,
}

/// A deposit or withdrawal request accepted by the exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Exchange transaction ID
    pub id: Option<String>,
    /// Currency code
    pub currency: String,
    /// Amount
    pub amount: Decimal,
    /// Destination address, for crypto withdrawals
    pub address: Option<String>,
    /// Raw exchange payload
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub info: Value,
}
