//! Gdax data parser module.
//!
//! Gdax quotes numbers as strings and times as ISO-8601; both are normalized here.

use super::constants::{AMOUNT_PRECISION, PRODUCT_STATUS_ONLINE, taker_fee};
use rust_decimal::Decimal;
use serde_json::Value;
use xchange_core::base_exchange::common_currency_code;
use xchange_core::error::{Error, ParseError, Result};
use xchange_core::parser_utils::{decimal_at, parse_decimal, parse_string, require_string};
use xchange_core::precision::precision_from_string;
use xchange_core::reconcile::RawBalance;
use xchange_core::time::parse8601;
use xchange_core::types::{
    Fee, Market, MinMax, Ohlcv, Order, OrderSide, OrderStatus, OrderType, RawBalanceEntry,
    TakerOrMaker, Ticker, Trade,
};

fn parse_time(data: &Value, keys: &[&'static str]) -> Result<i64> {
    let (key, raw) = keys
        .iter()
        .find_map(|k| data.get(*k).and_then(Value::as_str).map(|s| (*k, s)))
        .ok_or_else(|| Error::malformed(keys[0]))?;
    parse8601(raw).map_err(|e| ParseError::invalid_format(key, e.to_string()).into())
}

fn parse_side(data: &Value) -> Result<OrderSide> {
    let raw = require_string(data, "side")?;
    OrderSide::parse(&raw).ok_or_else(|| ParseError::invalid_value("side", raw).into())
}

/// Parse a `/products` entry.
pub fn parse_market(data: &Value, substitute_codes: bool) -> Result<Market> {
    let id = require_string(data, "id")?;
    let base_id = require_string(data, "base_currency")?;
    let quote_id = require_string(data, "quote_currency")?;
    let base = common_currency_code(&base_id, substitute_codes);
    let quote = common_currency_code(&quote_id, substitute_codes);

    let quote_increment = parse_string(data, "quote_increment");
    let price_precision = quote_increment
        .as_deref()
        .map_or(AMOUNT_PRECISION, precision_from_string);

    let mut market = Market::new(id, base, quote, base_id, quote_id).with_info(data.clone());
    market.active = data.get("status").and_then(Value::as_str) == Some(PRODUCT_STATUS_ONLINE);
    market.precision.amount = Some(AMOUNT_PRECISION);
    market.precision.price = Some(price_precision);
    market.limits.amount = MinMax::new(
        parse_decimal(data, "base_min_size"),
        parse_decimal(data, "base_max_size"),
    );
    market.limits.price = MinMax::new(parse_decimal(data, "quote_increment"), None);
    market.limits.cost = MinMax::new(
        parse_decimal(data, "min_market_funds"),
        parse_decimal(data, "max_market_funds"),
    );
    market.maker = Some(Decimal::ZERO);
    market.taker = Some(taker_fee(&market.base));
    Ok(market)
}

/// Parse `/products/{id}/ticker`.
pub fn parse_ticker(data: &Value, market: &Market) -> Result<Ticker> {
    let timestamp = parse_time(data, &["time"])?;
    let mut ticker = Ticker::new(market.symbol.clone(), timestamp);
    ticker.bid = parse_decimal(data, "bid");
    ticker.ask = parse_decimal(data, "ask");
    ticker.last = parse_decimal(data, "price");
    ticker.close = ticker.last;
    ticker.base_volume = parse_decimal(data, "volume");
    ticker.info = data.clone();
    Ok(ticker)
}

fn parse_trade_with_side(data: &Value, market: &Market, side: OrderSide) -> Result<Trade> {
    let timestamp = parse_time(data, &["time", "created_at"])?;
    let price = parse_decimal(data, "price").ok_or_else(|| Error::malformed("price"))?;
    let amount = parse_decimal(data, "size").ok_or_else(|| Error::malformed("size"))?;

    let mut trade = Trade::new(market.symbol.clone(), timestamp, side, price, amount);
    trade.id = parse_string(data, "trade_id");
    trade.order = parse_string(data, "order_id");
    trade.taker_or_maker = match data.get("liquidity").and_then(Value::as_str) {
        Some("T") => Some(TakerOrMaker::Taker),
        Some("M") => Some(TakerOrMaker::Maker),
        _ => None,
    };
    let fee_cost = parse_decimal(data, "fill_fees").or_else(|| parse_decimal(data, "fee"));
    if let Some(cost) = fee_cost {
        let rate = match trade.taker_or_maker {
            Some(TakerOrMaker::Taker) => market.taker,
            Some(TakerOrMaker::Maker) => market.maker,
            None => None,
        };
        trade.fee = Some(match rate {
            Some(rate) => Fee::with_rate(market.quote.clone(), cost, rate),
            None => Fee::new(market.quote.clone(), cost),
        });
    }
    trade.info = data.clone();
    Ok(trade)
}

/// Parse a `/products/{id}/trades` row.
///
/// Public trades report the maker's side; the taker's side is the opposite.
pub fn parse_trade(data: &Value, market: &Market) -> Result<Trade> {
    let side = parse_side(data)?.opposite();
    parse_trade_with_side(data, market, side)
}

/// Parse a `/fills` row; fills carry the account's own side.
pub fn parse_fill(data: &Value, market: &Market) -> Result<Trade> {
    let side = parse_side(data)?;
    parse_trade_with_side(data, market, side)
}

/// Parse a `/products/{id}/candles` row `[time, low, high, open, close, volume]`.
pub fn parse_ohlcv(row: &Value) -> Result<Ohlcv> {
    let field = |i: usize, name: &'static str| decimal_at(row, i).ok_or_else(|| Error::malformed(name));
    let seconds = row
        .get(0)
        .and_then(Value::as_i64)
        .ok_or_else(|| Error::malformed("time"))?;
    Ok(Ohlcv::new(
        seconds * 1000,
        field(3, "open")?,
        field(2, "high")?,
        field(1, "low")?,
        field(4, "close")?,
        field(5, "volume")?,
    ))
}

/// Map a Gdax order status to the canonical one.
pub fn parse_order_status(raw: &str) -> OrderStatus {
    match raw {
        "pending" | "active" | "open" => OrderStatus::Open,
        "done" => OrderStatus::Closed,
        "canceled" => OrderStatus::Canceled,
        other => OrderStatus::from(other.to_string()),
    }
}

/// Parse an `/orders` entry.
///
/// Market orders may be sized in quote currency (`funds`); the amount then falls back to it.
pub fn parse_order(data: &Value, market: Option<&Market>) -> Result<Order> {
    let id = require_string(data, "id")?;
    let timestamp = parse_time(data, &["created_at"])?;
    let symbol = match market {
        Some(m) => m.symbol.clone(),
        None => require_string(data, "product_id")?,
    };
    let side = parse_side(data)?;
    let status = data
        .get("status")
        .and_then(Value::as_str)
        .map_or(OrderStatus::Open, parse_order_status);

    let amount = ["size", "funds", "specified_funds"]
        .iter()
        .find_map(|k| parse_decimal(data, k))
        .unwrap_or_default();
    let filled = parse_decimal(data, "filled_size").unwrap_or_default();

    let mut order = Order::new(id, symbol, side, timestamp, amount, filled, status);
    order.order_type = data
        .get("type")
        .and_then(Value::as_str)
        .and_then(OrderType::parse);
    order.price = parse_decimal(data, "price");
    order.cost = parse_decimal(data, "executed_value");
    if let (Some(cost), Some(market)) = (parse_decimal(data, "fill_fees"), market) {
        order.fee = Some(Fee::new(market.quote.clone(), cost));
    }
    order.info = data.clone();
    Ok(order)
}

/// Parse `/accounts`: `available` is free and `hold` is used. An account without `hold`
/// falls back to `balance - available`.
pub fn parse_balance(data: &Value, substitute_codes: bool) -> Result<RawBalance> {
    let accounts = data.as_array().ok_or_else(|| Error::malformed("accounts"))?;
    let mut raw = RawBalance::new(data.clone());
    for account in accounts {
        let currency = require_string(account, "currency")?;
        let free = parse_decimal(account, "available").unwrap_or_default();
        let used = parse_decimal(account, "hold").or_else(|| {
            parse_decimal(account, "balance").map(|total| (total - free).max(Decimal::ZERO))
        });
        let entry = RawBalanceEntry { free, used };
        raw.push(common_currency_code(&currency, substitute_codes), entry);
    }
    Ok(raw)
}
