//! Trade type definitions

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Fee, OrderSide, OrderType, Symbol, TakerOrMaker, Timestamp};

/// A public trade or an account fill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    /// Trade ID
    pub id: Option<String>,

    /// Order ID this trade belongs to
    pub order: Option<String>,

    /// Timestamp in milliseconds
    pub timestamp: Timestamp,

    /// ISO8601 datetime
    pub datetime: String,

    /// Unified symbol
    pub symbol: Symbol,

    /// Order type
    #[serde(rename = "type")]
    pub order_type: Option<OrderType>,

    /// Taker side
    pub side: OrderSide,

    /// Liquidity role
    #[serde(rename = "takerOrMaker")]
    pub taker_or_maker: Option<TakerOrMaker>,

    /// Execution price
    pub price: Decimal,

    /// Executed amount
    pub amount: Decimal,

    /// `price * amount`
    pub cost: Decimal,

    /// Fee paid
    pub fee: Option<Fee>,

    /// Raw exchange payload
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub info: Value,
}

impl Trade {
    /// Creates a trade; cost is `price * amount`.
    pub fn new(
        symbol: impl Into<Symbol>,
        timestamp: Timestamp,
        side: OrderSide,
        price: Decimal,
        amount: Decimal,
    ) -> Self {
        Self {
            id: None,
            order: None,
            timestamp,
            datetime: crate::time::iso8601(timestamp).unwrap_or_default(),
            symbol: symbol.into(),
            order_type: None,
            side,
            taker_or_maker: None,
            price,
            amount,
            cost: price * amount,
            fee: None,
            info: Value::Null,
        }
    }
}
