use super::currency_code;
use crate::binance::constants::{MARKET_STATUS_TRADING, NULL_ID, filters};
use rust_decimal::Decimal;
use serde_json::Value;
use xchange_core::error::Result;
use xchange_core::parser_utils::{parse_decimal, parse_string, require_array, require_string};
use xchange_core::precision::precision_from_string;
use xchange_core::types::{Market, MinMax};

/// Smallest step expressible with `places` decimals.
fn step(places: u32) -> Decimal {
    Decimal::new(1, places)
}

fn precision_field(data: &Value, key: &str) -> u32 {
    data.get(key)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(8)
}

/// Parse market data from a Binance `exchangeInfo` symbol entry.
///
/// Precision starts from the declared asset precisions; `PRICE_FILTER`, `LOT_SIZE` and
/// `MIN_NOTIONAL` filters override it and the limits when present.
pub fn parse_market(data: &Value, substitute_codes: bool) -> Result<Market> {
    let id = require_string(data, "symbol")?;
    let base_id = require_string(data, "baseAsset")?;
    let quote_id = require_string(data, "quoteAsset")?;
    let base = currency_code(&base_id, substitute_codes);
    let quote = currency_code(&quote_id, substitute_codes);

    let base_precision = precision_field(data, "baseAssetPrecision");
    let quote_precision = precision_field(data, "quotePrecision");

    let mut market = Market::new(id, base, quote, base_id, quote_id).with_info(data.clone());
    market.active = data.get("status").and_then(Value::as_str) == Some(MARKET_STATUS_TRADING);
    market.precision.base = Some(base_precision);
    market.precision.quote = Some(quote_precision);
    market.precision.amount = Some(base_precision);
    market.precision.price = Some(quote_precision);
    market.limits.amount = MinMax::new(Some(step(base_precision)), None);
    market.limits.price = MinMax::new(Some(step(quote_precision)), None);

    for filter in data
        .get("filters")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
    {
        match filter.get("filterType").and_then(Value::as_str) {
            Some(filters::PRICE_FILTER) => {
                if let Some(tick) = parse_string(filter, "tickSize") {
                    market.precision.price = Some(precision_from_string(&tick));
                }
                market.limits.price =
                    MinMax::new(parse_decimal(filter, "minPrice"), parse_decimal(filter, "maxPrice"));
            }
            Some(filters::LOT_SIZE) => {
                if let Some(step_size) = parse_string(filter, "stepSize") {
                    market.precision.amount = Some(precision_from_string(&step_size));
                }
                market.limits.amount =
                    MinMax::new(parse_decimal(filter, "minQty"), parse_decimal(filter, "maxQty"));
            }
            Some(filters::MIN_NOTIONAL) => {
                market.limits.cost.min = parse_decimal(filter, "minNotional");
            }
            _ => {}
        }
    }

    Ok(market)
}

/// Parse the `symbols` array of `exchangeInfo`, skipping the placeholder market.
pub fn parse_markets(data: &Value, substitute_codes: bool) -> Result<Vec<Market>> {
    require_array(data, "symbols")?
        .iter()
        .filter(|m| m.get("symbol").and_then(Value::as_str) != Some(NULL_ID))
        .map(|m| parse_market(m, substitute_codes))
        .collect()
}
