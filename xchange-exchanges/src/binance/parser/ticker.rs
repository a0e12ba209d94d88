use serde_json::Value;
use xchange_core::error::Result;
use xchange_core::parser_utils::{parse_decimal, parse_timestamp, require_string};
use xchange_core::time::milliseconds;
use xchange_core::types::{Market, Ticker};

/// Parse a `/ticker/24hr` or `/ticker/bookTicker` entry.
///
/// The timestamp is `closeTime` when present and non-zero, otherwise the current time.
/// Without a market the symbol stays the raw exchange id.
pub fn parse_ticker(data: &Value, market: Option<&Market>) -> Result<Ticker> {
    let symbol = match market {
        Some(m) => m.symbol.clone(),
        None => require_string(data, "symbol")?,
    };
    let timestamp = parse_timestamp(data, "closeTime")
        .filter(|ts| *ts > 0)
        .unwrap_or_else(milliseconds);

    let mut ticker = Ticker::new(symbol, timestamp);
    ticker.high = parse_decimal(data, "highPrice");
    ticker.low = parse_decimal(data, "lowPrice");
    ticker.bid = parse_decimal(data, "bidPrice");
    ticker.bid_volume = parse_decimal(data, "bidQty");
    ticker.ask = parse_decimal(data, "askPrice");
    ticker.ask_volume = parse_decimal(data, "askQty");
    ticker.vwap = parse_decimal(data, "weightedAvgPrice");
    ticker.open = parse_decimal(data, "openPrice");
    ticker.close = parse_decimal(data, "prevClosePrice");
    ticker.last = parse_decimal(data, "lastPrice");
    ticker.change = parse_decimal(data, "priceChange");
    ticker.percentage = parse_decimal(data, "priceChangePercent");
    ticker.base_volume = parse_decimal(data, "volume");
    ticker.quote_volume = parse_decimal(data, "quoteVolume");
    ticker.info = data.clone();
    Ok(ticker)
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_parse_24hr_ticker() {
        let data = json!({
            "symbol": "ETHBTC",
            "priceChange": "-0.00100000",
            "priceChangePercent": "-1.5",
            "weightedAvgPrice": "0.07000000",
            "prevClosePrice": "0.07100000",
            "lastPrice": "0.06900000",
            "bidPrice": "0.06890000",
            "bidQty": "3.1",
            "askPrice": "0.06910000",
            "askQty": "2.0",
            "openPrice": "0.07000000",
            "highPrice": "0.07200000",
            "lowPrice": "0.06800000",
            "volume": "1500.5",
            "quoteVolume": "105.0",
            "closeTime": 1_500_000_000_000_i64
        });
        let market = Market::new("ETHBTC", "ETH", "BTC", "ETH", "BTC");
        let ticker = parse_ticker(&data, Some(&market)).unwrap();
        assert_eq!(ticker.symbol, "ETH/BTC");
        assert_eq!(ticker.timestamp, 1_500_000_000_000);
        assert_eq!(ticker.datetime, "2017-07-14T02:40:00.000Z");
        assert_eq!(ticker.bid, Some(dec!(0.0689)));
        assert_eq!(ticker.ask_volume, Some(dec!(2)));
        assert_eq!(ticker.last, Some(dec!(0.069)));
        assert_eq!(ticker.close, Some(dec!(0.071)));
        assert_eq!(ticker.percentage, Some(dec!(-1.5)));
        assert_eq!(ticker.base_volume, Some(dec!(1500.5)));
    }

    #[test]
    fn test_book_ticker_without_close_time_uses_now() {
        let before = milliseconds();
        let data = json!({"symbol": "ETHBTC", "bidPrice": "1", "bidQty": "2", "askPrice": "3", "askQty": "4"});
        let ticker = parse_ticker(&data, None).unwrap();
        assert_eq!(ticker.symbol, "ETHBTC");
        assert!(ticker.timestamp >= before);
        assert_eq!(ticker.high, None);
        assert_eq!(ticker.mid_price(), Some(dec!(2)));
    }
}
