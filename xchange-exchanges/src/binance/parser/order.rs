use crate::binance::constants::status;
use rust_decimal::Decimal;
use serde_json::Value;
use xchange_core::error::{Error, ParseError, Result};
use xchange_core::parser_utils::{parse_decimal, parse_string, parse_timestamp, require_string};
use xchange_core::types::{Market, Order, OrderSide, OrderStatus, OrderType};

/// Map a Binance order status to the canonical one; unknown statuses pass through lowercased.
pub fn parse_order_status(raw: &str) -> OrderStatus {
    match raw {
        status::NEW | status::PARTIALLY_FILLED => OrderStatus::Open,
        status::FILLED => OrderStatus::Closed,
        status::CANCELED => OrderStatus::Canceled,
        other => OrderStatus::from(other.to_string()),
    }
}

/// Parse an order from `/order`, `/openOrders`, `/allOrders` or an order placement reply.
///
/// The timestamp comes from `time`, else `transactTime`; an order with neither is malformed.
pub fn parse_order(data: &Value, market: Option<&Market>) -> Result<Order> {
    let id = require_string(data, "orderId")?;
    let timestamp = parse_timestamp(data, "time")
        .or_else(|| parse_timestamp(data, "transactTime"))
        .ok_or_else(|| {
            Error::from(ParseError::invalid_format(
                "order",
                format!("{id} malformed order: no time or transactTime"),
            ))
        })?;

    let symbol = match market {
        Some(m) => m.symbol.clone(),
        None => require_string(data, "symbol")?,
    };
    let side_raw = require_string(data, "side")?;
    let side = OrderSide::parse(&side_raw)
        .ok_or_else(|| ParseError::invalid_value("side", side_raw.clone()))?;
    let status = data
        .get("status")
        .and_then(Value::as_str)
        .map_or(OrderStatus::Open, parse_order_status);

    let price = parse_decimal(data, "price");
    let amount = parse_decimal(data, "origQty").unwrap_or_default();
    let filled = parse_decimal(data, "executedQty").unwrap_or_default();

    let mut order = Order::new(id, symbol, side, timestamp, amount, filled, status);
    order.client_order_id = parse_string(data, "clientOrderId");
    order.order_type = data
        .get("type")
        .and_then(Value::as_str)
        .and_then(OrderType::parse);
    order.price = price;
    order.cost = match price {
        Some(p) if p > Decimal::ZERO => Some(p * amount),
        _ => parse_decimal(data, "cummulativeQuoteQty"),
    };
    order.info = data.clone();
    Ok(order)
}
