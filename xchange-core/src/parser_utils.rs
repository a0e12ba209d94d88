//! Shared helpers for normalizing exchange payloads.
//!
//! Exchanges send numbers both as JSON numbers and as strings; every accessor here accepts
//! either. List helpers apply the common `since`/`limit` semantics and order-book ordering.

use crate::error::{Error, ParseError, Result};
use crate::precision::parse_decimal_str;
use crate::types::{Ohlcv, Order, OrderBook, OrderBookEntry, Timestamp, Trade};
use rust_decimal::Decimal;
use serde_json::Value;
use std::cmp::Reverse;

/// Decimal from a JSON number or numeric string. Empty strings are `None`.
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal_str(&n.to_string()),
        Value::String(s) if !s.is_empty() => parse_decimal_str(s),
        _ => None,
    }
}

/// Decimal field of an object.
pub fn parse_decimal(data: &Value, key: &str) -> Option<Decimal> {
    data.get(key).and_then(decimal_from_value)
}

/// Integer timestamp field, from a number or numeric string.
pub fn parse_timestamp(data: &Value, key: &str) -> Option<i64> {
    data.get(key).and_then(|v| {
        v.as_i64()
            .or_else(|| v.as_f64().map(|f| f as i64))
            .or_else(|| v.as_str().and_then(|s| s.parse::<i64>().ok()))
    })
}

/// String field; numbers are rendered as strings.
pub fn parse_string(data: &Value, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Boolean field.
pub fn parse_bool(data: &Value, key: &str) -> Option<bool> {
    data.get(key).and_then(Value::as_bool)
}

/// String field that must be present.
pub fn require_string(data: &Value, key: &'static str) -> Result<String> {
    parse_string(data, key).ok_or_else(|| Error::malformed(key))
}

/// Decimal field that must be present and numeric.
pub fn require_decimal(data: &Value, key: &'static str) -> Result<Decimal> {
    match data.get(key) {
        None | Some(Value::Null) => Err(Error::malformed(key)),
        Some(v) => decimal_from_value(v).ok_or_else(|| {
            ParseError::invalid_value(key, format!("not a decimal: {v}")).into()
        }),
    }
}

/// Array field, or an error naming the field.
pub fn require_array<'a>(data: &'a Value, key: &'static str) -> Result<&'a Vec<Value>> {
    data.get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::malformed(key))
}

/// Decimal at a position of a JSON array row.
pub fn decimal_at(row: &Value, index: usize) -> Option<Decimal> {
    row.get(index).and_then(decimal_from_value)
}

/// Parses `[[price, amount, ...], ...]` rows, skipping rows that are not numeric.
pub fn parse_bids_asks(rows: Option<&Value>, price_index: usize, amount_index: usize) -> Vec<OrderBookEntry> {
    rows.and_then(Value::as_array)
        .map(|rows| {
            rows.iter()
                .filter_map(|row| {
                    Some(OrderBookEntry::new(
                        decimal_at(row, price_index)?,
                        decimal_at(row, amount_index)?,
                    ))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Builds an order book with bids descending and asks ascending, whatever the input order.
pub fn parse_order_book(
    data: &Value,
    symbol: &str,
    timestamp: Timestamp,
    bids_key: &str,
    asks_key: &str,
) -> Result<OrderBook> {
    let mut bids = parse_bids_asks(data.get(bids_key), 0, 1);
    let mut asks = parse_bids_asks(data.get(asks_key), 0, 1);
    sort_book_sides(&mut bids, &mut asks);

    Ok(OrderBook {
        symbol: symbol.to_string(),
        bids,
        asks,
        timestamp,
        datetime: crate::time::iso8601(timestamp)?,
        nonce: None,
    })
}

/// Sorts bids by price descending and asks ascending.
pub fn sort_book_sides(bids: &mut [OrderBookEntry], asks: &mut [OrderBookEntry]) {
    bids.sort_by_key(|e| Reverse(e.price));
    asks.sort_by_key(|e| e.price);
}

/// Records with a millisecond timestamp.
pub trait Timestamped {
    fn timestamp(&self) -> Timestamp;
}

impl Timestamped for Trade {
    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

impl Timestamped for Order {
    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

impl Timestamped for Ohlcv {
    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

/// Keeps entries with `timestamp > since`, then the first `limit` of them.
pub fn filter_by_since_limit<T: Timestamped>(
    items: Vec<T>,
    since: Option<i64>,
    limit: Option<usize>,
) -> Vec<T> {
    let mut items: Vec<T> = match since {
        Some(since) => items
            .into_iter()
            .filter(|item| item.timestamp() > since)
            .collect(),
        None => items,
    };
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}

/// Sorts trades newest first, then applies [`filter_by_since_limit`].
pub fn finish_trades(mut trades: Vec<Trade>, since: Option<i64>, limit: Option<usize>) -> Vec<Trade> {
    trades.sort_by_key(|t| Reverse(t.timestamp));
    filter_by_since_limit(trades, since, limit)
}

/// Drops candles older than `since` and keeps the first `limit`, preserving native order.
pub fn filter_ohlcvs(candles: Vec<Ohlcv>, since: Option<i64>, limit: Option<usize>) -> Vec<Ohlcv> {
    candles
        .into_iter()
        .filter(|c| since.is_none_or(|since| c.timestamp >= since))
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// Parses candle rows in native order, dropping those older than `since` and stopping at
/// `limit`.
pub fn parse_ohlcvs<F>(
    rows: &[Value],
    since: Option<i64>,
    limit: Option<usize>,
    parse: F,
) -> Result<Vec<Ohlcv>>
where
    F: Fn(&Value) -> Result<Ohlcv>,
{
    let mut result = Vec::new();
    for row in rows {
        if limit.is_some_and(|limit| result.len() >= limit) {
            break;
        }
        let candle = parse(row)?;
        if since.is_some_and(|since| candle.timestamp < since) {
            continue;
        }
        result.push(candle);
    }
    Ok(result)
}

/// Standard `[ts, open, high, low, close, volume]` row.
pub fn parse_ohlcv_row(row: &Value) -> Result<Ohlcv> {
    let field = |i: usize, name: &'static str| decimal_at(row, i).ok_or_else(|| Error::malformed(name));
    let timestamp = row
        .get(0)
        .and_then(|v| v.as_i64().or_else(|| v.as_str().and_then(|s| s.parse().ok())))
        .ok_or_else(|| Error::malformed("timestamp"))?;
    Ok(Ohlcv::new(
        timestamp,
        field(1, "open")?,
        field(2, "high")?,
        field(3, "low")?,
        field(4, "close")?,
        field(5, "volume")?,
    ))
}
