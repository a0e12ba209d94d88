//! Binance public market data operations.

use super::super::constants::{
    AGG_TRADES_WINDOW_MS, DEFAULT_OHLCV_LIMIT, DEFAULT_ORDER_BOOK_LIMIT,
};
use super::super::{Binance, parser};
use serde_json::Value;
use tracing::{debug, info};
use xchange_core::endpoint::RequestDescriptor;
use xchange_core::parser_utils::{finish_trades, parse_order_book, parse_ohlcvs, parse_timestamp};
use xchange_core::time::milliseconds;
use xchange_core::types::{Market, Ohlcv, OrderBook, Ticker, Trade};
use xchange_core::{Error, Exchange, ParseError, Result};

impl Binance {
    /// Fetches `exchangeInfo` and parses the listed markets.
    ///
    /// With `adjust_for_time_difference` enabled the clock offset is refreshed first, so
    /// that the first signed call after loading is already corrected.
    pub async fn fetch_markets(&self) -> Result<Vec<Market>> {
        if self.base.config.adjust_for_time_difference {
            self.load_time_difference().await?;
        }
        let response = self
            .base
            .api
            .get("public", "exchangeInfo", RequestDescriptor::new())
            .await?;
        parser::parse_markets(&response, self.base.config.substitute_common_currency_codes)
    }

    /// Server time in milliseconds.
    pub async fn fetch_time(&self) -> Result<i64> {
        let response = self.base.api.get("public", "time", RequestDescriptor::new()).await?;
        parse_timestamp(&response, "serverTime")
            .ok_or_else(|| ParseError::missing_field("serverTime").into())
    }

    /// Measures the offset between the local clock and the server.
    ///
    /// The local reference point is the midpoint of the round trip. Returns the new offset.
    pub async fn load_time_difference(&self) -> Result<i64> {
        let before = milliseconds();
        let server_time = self.fetch_time().await?;
        let after = milliseconds();
        let offset = self.time_difference.record(before, after, server_time);
        info!(offset_ms = offset, "Binance time difference loaded");
        Ok(offset)
    }

    async fn parse_ticker_list(&self, response: &Value, symbols: Option<&[String]>) -> Result<Vec<Ticker>> {
        let rows = response
            .as_array()
            .ok_or_else(|| Error::malformed("tickers"))?;
        let mut tickers = Vec::with_capacity(rows.len());
        for row in rows {
            let market = match row.get("symbol").and_then(Value::as_str) {
                Some(id) => self.base.find_market_by_id(id).await,
                None => None,
            };
            let ticker = parser::parse_ticker(row, market.as_deref())?;
            if symbols.is_none_or(|wanted| wanted.contains(&ticker.symbol)) {
                tickers.push(ticker);
            }
        }
        Ok(tickers)
    }

    /// 24h ticker of one market.
    pub async fn fetch_ticker(&self, symbol: &str) -> Result<Ticker> {
        let market = self.loaded_market(symbol).await?;
        let response = self
            .base
            .api
            .get("public", "ticker24Hr", RequestDescriptor::new().param("symbol", &market.id))
            .await?;
        parser::parse_ticker(&response, Some(&market))
    }

    /// 24h tickers of every market, optionally restricted to `symbols`.
    pub async fn fetch_tickers(&self, symbols: Option<&[String]>) -> Result<Vec<Ticker>> {
        self.load_markets(false).await?;
        let response = self
            .base
            .api
            .get("public", "ticker24Hr", RequestDescriptor::new())
            .await?;
        self.parse_ticker_list(&response, symbols).await
    }

    /// Best bid and ask of every market, as tickers with only the book fields set.
    pub async fn fetch_bid_asks(&self, symbols: Option<&[String]>) -> Result<Vec<Ticker>> {
        self.load_markets(false).await?;
        let response = self
            .base
            .api
            .get("v3", "tickerBookTicker", RequestDescriptor::new())
            .await?;
        self.parse_ticker_list(&response, symbols).await
    }

    /// Order book from `/depth`; `limit` defaults to 100 levels.
    pub async fn fetch_order_book(&self, symbol: &str, limit: Option<u32>) -> Result<OrderBook> {
        let market = self.loaded_market(symbol).await?;
        let request = RequestDescriptor::new()
            .param("symbol", &market.id)
            .param("limit", limit.unwrap_or(DEFAULT_ORDER_BOOK_LIMIT));
        let response = self.base.api.get("public", "depth", request).await?;

        let mut book = parse_order_book(&response, &market.symbol, milliseconds(), "bids", "asks")?;
        book.nonce = parse_timestamp(&response, "lastUpdateId");
        Ok(book)
    }

    /// Aggregate trades, newest first.
    ///
    /// With `since`, the request covers the hour starting at `since`.
    pub async fn fetch_trades(
        &self,
        symbol: &str,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Trade>> {
        let market = self.loaded_market(symbol).await?;
        let request = RequestDescriptor::new()
            .param("symbol", &market.id)
            .optional_param("startTime", since)
            .optional_param("endTime", since.map(|s| s + AGG_TRADES_WINDOW_MS))
            .optional_param("limit", limit);
        let response = self.base.api.get("public", "aggTrades", request).await?;

        let substitute = self.base.config.substitute_common_currency_codes;
        let trades = response
            .as_array()
            .ok_or_else(|| Error::malformed("aggTrades"))?
            .iter()
            .map(|row| parser::parse_trade(row, &market, substitute))
            .collect::<Result<Vec<_>>>()?;
        Ok(finish_trades(trades, since, limit))
    }

    /// Candles from `/klines`; `limit` defaults to 500.
    pub async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: &str,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Ohlcv>> {
        let interval = self.timeframe_id(timeframe)?;
        let market = self.loaded_market(symbol).await?;
        let request = RequestDescriptor::new()
            .param("symbol", &market.id)
            .param("interval", interval)
            .param("limit", limit.unwrap_or(DEFAULT_OHLCV_LIMIT))
            .optional_param("startTime", since);
        let response = self.base.api.get("public", "klines", request).await?;

        let rows = response.as_array().ok_or_else(|| Error::malformed("klines"))?;
        debug!(rows = rows.len(), "Binance klines received");
        parse_ohlcvs(rows, since, limit, parser::parse_ohlcv)
    }
}
