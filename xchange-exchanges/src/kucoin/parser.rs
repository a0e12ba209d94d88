//! Kucoin data parser module.

use super::constants::MARKET_PRECISION;
use rust_decimal::Decimal;
use serde_json::Value;
use xchange_core::base_exchange::common_currency_code;
use xchange_core::error::{Error, ParseError, Result};
use xchange_core::parser_utils::{
    decimal_at, decimal_from_value, parse_bool, parse_decimal, parse_string, parse_timestamp,
    require_array, require_string,
};
use xchange_core::reconcile::RawBalance;
use xchange_core::time::milliseconds;
use xchange_core::types::{
    Currency, CurrencyLimits, Fee, Market, MinMax, Ohlcv, Order, OrderSide, OrderStatus,
    OrderType, RawBalanceEntry, Ticker, Trade,
};

/// Payload of a `{success, code, msg, data}` envelope.
///
/// A reply with `success: false` becomes an exchange error carrying `code` and `msg`.
pub fn data(response: &Value) -> Result<&Value> {
    if parse_bool(response, "success") == Some(false) {
        let code = parse_string(response, "code").unwrap_or_default();
        let msg = parse_string(response, "msg").unwrap_or_default();
        return Err(Error::exchange_with_data(code, msg, response.clone()));
    }
    response.get("data").ok_or_else(|| Error::malformed("data"))
}

fn symbol_of(data: &Value, market: Option<&Market>, substitute: bool) -> Result<String> {
    if let Some(market) = market {
        return Ok(market.symbol.clone());
    }
    let base = require_string(data, "coinType")?;
    let quote = require_string(data, "coinTypePair")?;
    Ok(format!(
        "{}/{}",
        common_currency_code(&base, substitute),
        common_currency_code(&quote, substitute)
    ))
}

/// Parse a `/market/open/symbols` entry.
pub fn parse_market(data: &Value, substitute_codes: bool) -> Result<Market> {
    let id = require_string(data, "symbol")?;
    let base_id = require_string(data, "coinType")?;
    let quote_id = require_string(data, "coinTypePair")?;
    let base = common_currency_code(&base_id, substitute_codes);
    let quote = common_currency_code(&quote_id, substitute_codes);

    let mut market = Market::new(id, base, quote, base_id, quote_id).with_info(data.clone());
    market.active = parse_bool(data, "trading").unwrap_or(false);
    market.precision.amount = Some(MARKET_PRECISION);
    market.precision.price = Some(MARKET_PRECISION);
    market.limits.amount = MinMax::new(Some(Decimal::new(1, MARKET_PRECISION)), None);
    Ok(market)
}

/// Parse a `/market/open/coins` entry.
///
/// A currency is active only when both deposits and withdrawals are enabled.
pub fn parse_currency(data: &Value, substitute_codes: bool) -> Result<Currency> {
    let id = require_string(data, "coin")?;
    let precision = parse_timestamp(data, "tradePrecision")
        .and_then(|p| u32::try_from(p).ok())
        .unwrap_or(MARKET_PRECISION);
    let active = parse_bool(data, "enableDeposit").unwrap_or(false)
        && parse_bool(data, "enableWithdraw").unwrap_or(false);

    Ok(Currency {
        code: common_currency_code(&id, substitute_codes),
        id,
        name: parse_string(data, "name"),
        precision,
        active,
        fee: parse_decimal(data, "withdrawFeeRate"),
        limits: CurrencyLimits {
            amount: MinMax::new(Some(Decimal::new(1, precision)), None),
            withdraw: MinMax::new(parse_decimal(data, "withdrawMinAmount"), None),
        },
        info: data.clone(),
    })
}

/// Parse `/open/tick` data or a `/market/open/symbols` entry.
pub fn parse_ticker(data: &Value, market: Option<&Market>, substitute_codes: bool) -> Result<Ticker> {
    let symbol = symbol_of(data, market, substitute_codes)?;
    let timestamp = parse_timestamp(data, "datetime").unwrap_or_else(milliseconds);

    let mut ticker = Ticker::new(symbol, timestamp);
    ticker.high = parse_decimal(data, "high");
    ticker.low = parse_decimal(data, "low");
    ticker.bid = parse_decimal(data, "buy");
    ticker.ask = parse_decimal(data, "sell");
    ticker.last = parse_decimal(data, "lastDealPrice");
    ticker.close = ticker.last;
    ticker.change = parse_decimal(data, "change");
    ticker.percentage = parse_decimal(data, "changeRate").map(|rate| rate * Decimal::ONE_HUNDRED);
    ticker.base_volume = parse_decimal(data, "vol");
    ticker.quote_volume = parse_decimal(data, "volValue");
    ticker.info = data.clone();
    Ok(ticker)
}

/// Parse an `/open/deal-orders` row `[timestamp, BUY|SELL, price, amount, ...]`.
pub fn parse_trade(row: &Value, market: &Market) -> Result<Trade> {
    let timestamp = row
        .get(0)
        .and_then(Value::as_i64)
        .ok_or_else(|| Error::malformed("timestamp"))?;
    let side_raw = row.get(1).and_then(Value::as_str).unwrap_or_default();
    let side = OrderSide::parse(side_raw)
        .ok_or_else(|| ParseError::invalid_value("side", side_raw.to_string()))?;
    let price = decimal_at(row, 2).ok_or_else(|| Error::malformed("price"))?;
    let amount = decimal_at(row, 3).ok_or_else(|| Error::malformed("amount"))?;

    let mut trade = Trade::new(market.symbol.clone(), timestamp, side, price, amount);
    trade.order_type = Some(OrderType::Limit);
    trade.info = row.clone();
    Ok(trade)
}

/// Parse an order from `/order/active-map` or `/order/dealt`.
///
/// Neither endpoint reports a status, so the caller supplies it. Dealt rows carry only the
/// dealt `amount`, which then counts as filled.
pub fn parse_order(
    data: &Value,
    market: Option<&Market>,
    status: OrderStatus,
    substitute_codes: bool,
) -> Result<Order> {
    let id = parse_string(data, "oid")
        .or_else(|| parse_string(data, "orderOid"))
        .ok_or_else(|| Error::malformed("oid"))?;
    let side_raw = parse_string(data, "direction")
        .or_else(|| parse_string(data, "type"))
        .ok_or_else(|| Error::malformed("direction"))?;
    let side = OrderSide::parse(&side_raw)
        .ok_or_else(|| ParseError::invalid_value("direction", side_raw.clone()))?;
    let timestamp = parse_timestamp(data, "createdAt").ok_or_else(|| Error::malformed("createdAt"))?;
    let symbol = symbol_of(data, market, substitute_codes)?;

    let price = parse_decimal(data, "price").or_else(|| parse_decimal(data, "dealPrice"));
    let pending = parse_decimal(data, "pendingAmount");
    let (amount, filled) = match (parse_decimal(data, "dealAmount"), parse_decimal(data, "amount")) {
        (Some(filled), Some(amount)) => (amount, filled),
        (Some(filled), None) => (filled + pending.unwrap_or_default(), filled),
        (None, Some(amount)) if status == OrderStatus::Closed => (amount, amount),
        (None, Some(amount)) => (amount, amount - pending.unwrap_or(amount)),
        (None, None) => (pending.unwrap_or_default(), Decimal::ZERO),
    };

    let mut order = Order::new(id, symbol, side, timestamp, amount, filled, status);
    order.order_type = Some(OrderType::Limit);
    order.price = price;
    order.cost = parse_decimal(data, "dealValue").or_else(|| price.map(|p| p * filled));
    if let Some(cost) = parse_decimal(data, "fee") {
        let currency = match (side, market) {
            (OrderSide::Buy, Some(m)) => m.base.clone(),
            (OrderSide::Sell, Some(m)) => m.quote.clone(),
            (_, None) => parse_string(data, "coinType").unwrap_or_default(),
        };
        let mut fee = Fee::new(currency, cost);
        fee.rate = parse_decimal(data, "feeRate");
        order.fee = Some(fee);
    }
    order.info = data.clone();
    Ok(order)
}

/// Parse `/account/balance` data rows: `balance` is free, `freezeBalance` is used.
pub fn parse_balance(data: &Value, info: &Value, substitute_codes: bool) -> Result<RawBalance> {
    let rows = data.as_array().ok_or_else(|| Error::malformed("balance"))?;
    let mut raw = RawBalance::new(info.clone());
    for row in rows {
        let coin = require_string(row, "coinType")?;
        let free = parse_decimal(row, "balance").unwrap_or_default();
        let used = parse_decimal(row, "freezeBalance").unwrap_or_default();
        raw.push(
            common_currency_code(&coin, substitute_codes),
            RawBalanceEntry::reported(free, used),
        );
    }
    Ok(raw)
}

/// Parse a TradingView history reply of parallel `t/o/h/l/c/v` arrays; `t` is in seconds.
pub fn parse_trading_view_ohlcvs(data: &Value) -> Result<Vec<Ohlcv>> {
    let times = require_array(data, "t")?;
    let column = |key: &'static str| require_array(data, key);
    let (open, high, low, close, volume) =
        (column("o")?, column("h")?, column("l")?, column("c")?, column("v")?);

    times
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let at = |col: &Vec<Value>, name: &'static str| {
                col.get(i)
                    .and_then(decimal_from_value)
                    .ok_or_else(|| Error::malformed(name))
            };
            let seconds = t.as_i64().ok_or_else(|| Error::malformed("t"))?;
            Ok(Ohlcv::new(
                seconds * 1000,
                at(open, "o")?,
                at(high, "h")?,
                at(low, "l")?,
                at(close, "c")?,
                at(volume, "v")?,
            ))
        })
        .collect()
}
