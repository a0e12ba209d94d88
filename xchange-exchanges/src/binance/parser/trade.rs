use super::currency_code;
use serde_json::Value;
use xchange_core::error::{Error, Result};
use xchange_core::parser_utils::{parse_bool, parse_decimal, parse_string, parse_timestamp};
use xchange_core::types::{Fee, Market, OrderSide, TakerOrMaker, Trade};

fn first_decimal(data: &Value, keys: &[&str]) -> Option<rust_decimal::Decimal> {
    keys.iter().find_map(|k| parse_decimal(data, k))
}

/// Parse an `/aggTrades` row or a `/myTrades` entry.
///
/// Aggregate trades carry `m` (buyer is maker): true means the taker sold. Account trades
/// carry `isBuyer`, which is the account's own side.
pub fn parse_trade(data: &Value, market: &Market, substitute_codes: bool) -> Result<Trade> {
    let timestamp = ["T", "time", "timestamp"]
        .iter()
        .find_map(|k| parse_timestamp(data, k))
        .ok_or_else(|| Error::malformed("timestamp"))?;
    let price = first_decimal(data, &["p", "price"]).ok_or_else(|| Error::malformed("price"))?;
    let amount = first_decimal(data, &["q", "qty"]).ok_or_else(|| Error::malformed("qty"))?;

    let side = match parse_bool(data, "m") {
        Some(true) => OrderSide::Sell,
        Some(false) => OrderSide::Buy,
        None if parse_bool(data, "isBuyer") == Some(true) => OrderSide::Buy,
        None => OrderSide::Sell,
    };

    let mut trade = Trade::new(market.symbol.clone(), timestamp, side, price, amount);
    trade.id = ["a", "id", "aggId"].iter().find_map(|k| parse_string(data, k));
    trade.order = parse_string(data, "orderId");
    trade.taker_or_maker = parse_bool(data, "isMaker").map(|maker| {
        if maker {
            TakerOrMaker::Maker
        } else {
            TakerOrMaker::Taker
        }
    });
    if let Some(cost) = parse_decimal(data, "commission") {
        let asset = parse_string(data, "commissionAsset").unwrap_or_default();
        trade.fee = Some(Fee::new(currency_code(&asset, substitute_codes), cost));
    }
    trade.info = data.clone();
    Ok(trade)
}
