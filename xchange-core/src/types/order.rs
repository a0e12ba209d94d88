//! Order type definitions

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Fee, Symbol, Timestamp};

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl OrderSide {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    /// Parses `buy`/`sell` in any case.
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("buy") {
            Some(Self::Buy)
        } else if s.eq_ignore_ascii_case("sell") {
            Some(Self::Sell)
        } else {
            None
        }
    }

    /// The other side.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Market order
    Market,
    /// Limit order
    Limit,
    /// Post-only limit order
    LimitMaker,
    /// Stop order
    Stop,
    /// Stop loss order
    StopLoss,
    /// Stop loss limit order
    StopLossLimit,
    /// Take profit order
    TakeProfit,
    /// Take profit limit order
    TakeProfitLimit,
}

impl OrderType {
    /// Snake-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Limit => "limit",
            Self::LimitMaker => "limit_maker",
            Self::Stop => "stop",
            Self::StopLoss => "stop_loss",
            Self::StopLossLimit => "stop_loss_limit",
            Self::TakeProfit => "take_profit",
            Self::TakeProfitLimit => "take_profit_limit",
        }
    }

    /// Parses an exchange order type such as `LIMIT` or `stop_loss_limit`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "market" => Some(Self::Market),
            "limit" => Some(Self::Limit),
            "limit_maker" => Some(Self::LimitMaker),
            "stop" => Some(Self::Stop),
            "stop_loss" => Some(Self::StopLoss),
            "stop_loss_limit" => Some(Self::StopLossLimit),
            "take_profit" => Some(Self::TakeProfit),
            "take_profit_limit" => Some(Self::TakeProfitLimit),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical order status
///
/// Exchange statuses that have no canonical equivalent pass through lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    /// Resting on the book
    Open,
    /// Fully executed
    Closed,
    /// Canceled before full execution
    Canceled,
    /// Unmapped exchange status, lowercased
    Other(String),
}

impl OrderStatus {
    /// Status name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Canceled => "canceled",
            Self::Other(s) => s,
        }
    }

    /// Whether the order is still open.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "open" => Self::Open,
            "closed" => Self::Closed,
            "canceled" => Self::Canceled,
            _ => Self::Other(lower),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Exchange order ID
    pub id: String,

    /// Client-assigned order ID
    #[serde(rename = "clientOrderId")]
    pub client_order_id: Option<String>,

    /// Creation timestamp in milliseconds
    pub timestamp: Timestamp,

    /// ISO8601 creation datetime
    pub datetime: String,

    /// Unified symbol
    pub symbol: Symbol,

    /// Order type
    #[serde(rename = "type")]
    pub order_type: Option<OrderType>,

    /// Order side
    pub side: OrderSide,

    /// Limit price
    pub price: Option<Decimal>,

    /// Ordered amount
    pub amount: Decimal,

    /// Executed amount
    pub filled: Decimal,

    /// Amount still open, never negative
    pub remaining: Decimal,

    /// Executed value
    pub cost: Option<Decimal>,

    /// Status
    pub status: OrderStatus,

    /// Fee paid
    pub fee: Option<Fee>,

    /// Raw exchange payload
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub info: Value,
}

impl Order {
    /// Creates an order; `remaining` is derived as `max(amount - filled, 0)`.
    pub fn new(
        id: impl Into<String>,
        symbol: impl Into<Symbol>,
        side: OrderSide,
        timestamp: Timestamp,
        amount: Decimal,
        filled: Decimal,
        status: OrderStatus,
    ) -> Self {
        Self {
            id: id.into(),
            client_order_id: None,
            timestamp,
            datetime: crate::time::iso8601(timestamp).unwrap_or_default(),
            symbol: symbol.into(),
            order_type: None,
            side,
            price: None,
            amount,
            filled,
            remaining: (amount - filled).max(Decimal::ZERO),
            cost: None,
            status,
            fee: None,
            info: Value::Null,
        }
    }

    /// Whether the order is open.
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_remaining_never_negative() {
        let order = Order::new(
            "1",
            "BTC/USDT",
            OrderSide::Buy,
            0,
            dec!(1),
            dec!(1.5),
            OrderStatus::Closed,
        );
        assert_eq!(order.remaining, Decimal::ZERO);
    }

    #[test]
    fn test_status_passthrough_lowercased() {
        let status = OrderStatus::from("EXPIRED".to_string());
        assert_eq!(status, OrderStatus::Other("expired".into()));
        assert_eq!(status.to_string(), "expired");
        assert_eq!(OrderStatus::from("open".to_string()), OrderStatus::Open);
    }

    #[test]
    fn test_side_and_type_parsing() {
        assert_eq!(OrderSide::parse("SELL"), Some(OrderSide::Sell));
        assert_eq!(OrderSide::parse("x"), None);
        assert_eq!(OrderSide::Buy.opposite(), OrderSide::Sell);
        assert_eq!(OrderType::parse("STOP_LOSS_LIMIT"), Some(OrderType::StopLossLimit));
        assert_eq!(OrderType::parse("iceberg"), None);
    }
}
