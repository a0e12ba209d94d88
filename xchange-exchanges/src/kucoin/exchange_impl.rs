//! Exchange trait implementation for Kucoin

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use xchange_core::endpoint::RequestDescriptor;
use xchange_core::parser_utils::{
    filter_by_since_limit, filter_ohlcvs, finish_trades, parse_string,
};
use xchange_core::precision::truncate;
use xchange_core::time::{milliseconds, seconds};
use xchange_core::{
    BaseExchange, Error, Exchange, Params, Result,
    types::{
        Balance, Currency, Market, Ohlcv, Order, OrderSide, OrderStatus, OrderType, Ticker, Trade,
    },
};

use super::constants::{
    BALANCE_PAGE_SIZE, DEFAULT_CANDLES, DEFAULT_DAILY_CANDLES, DEFAULT_WEEKLY_CANDLES,
    MINUTES_PER_DAY, MINUTES_PER_WEEK, TIMEFRAMES,
};
use super::parser::{self, data};
use super::Kucoin;

/// Chart request derived from a timeframe, an optional start and an optional candle count.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ChartWindow {
    resolution: &'static str,
    from: i64,
    to: i64,
    limit: i64,
}

impl ChartWindow {
    /// Daily and weekly resolutions default to a month and a year of candles; an intraday
    /// resolution without a limit falls back to the last 1440 days.
    fn new(resolution: &'static str, since: Option<i64>, limit: Option<usize>, now: i64) -> Result<Self> {
        let limit = limit
            .map(i64::try_from)
            .transpose()
            .map_err(|_| Error::invalid_request("Kucoin candle limit out of range"))?;
        let (resolution, minutes, limit) = match resolution {
            "D" => ("D", MINUTES_PER_DAY, limit.unwrap_or(DEFAULT_DAILY_CANDLES)),
            "W" => ("W", MINUTES_PER_WEEK, limit.unwrap_or(DEFAULT_WEEKLY_CANDLES)),
            minutes => match limit {
                None => ("D", MINUTES_PER_DAY, DEFAULT_CANDLES),
                Some(limit) => {
                    let minutes: i64 = minutes.parse().map_err(|_| {
                        Error::invalid_request(format!("Invalid resolution {minutes}"))
                    })?;
                    (resolution, minutes, limit)
                }
            },
        };
        let out_of_range = || Error::invalid_request("Kucoin candle window out of range");
        let span = minutes
            .checked_mul(60)
            .and_then(|s| s.checked_mul(limit))
            .ok_or_else(out_of_range)?;
        let (from, to) = match since {
            Some(since) => {
                let from = since / 1000;
                (from, from.checked_add(span).ok_or_else(out_of_range)?)
            }
            None => (now.checked_sub(span).ok_or_else(out_of_range)?, now),
        };
        Ok(Self {
            resolution,
            from,
            to,
            limit,
        })
    }
}

impl Kucoin {
    async fn loaded_market(&self, symbol: &str) -> Result<Arc<Market>> {
        self.load_markets(false).await?;
        self.base.market(symbol).await
    }

    async fn required_market(&self, symbol: Option<&str>, method: &str) -> Result<Arc<Market>> {
        let symbol = symbol.ok_or_else(|| {
            Error::invalid_request(format!("Kucoin {method} requires a symbol argument"))
        })?;
        self.loaded_market(symbol).await
    }

    fn substitute(&self) -> bool {
        self.base.config.substitute_common_currency_codes
    }

    async fn parse_orders(
        &self,
        rows: impl Iterator<Item = &Value>,
        market: Option<&Market>,
        status: OrderStatus,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Order>> {
        let orders = rows
            .map(|row| parser::parse_order(row, market, status.clone(), self.substitute()))
            .collect::<Result<Vec<_>>>()?;
        self.base.orders.extend(orders.iter().cloned()).await;
        Ok(filter_by_since_limit(orders, since, limit))
    }
}

#[async_trait]
impl Exchange for Kucoin {
    fn base(&self) -> &BaseExchange {
        &self.base
    }

    fn timeframes(&self) -> &'static [(&'static str, &'static str)] {
        TIMEFRAMES
    }

    // ==================== Market Data (Public API) ====================

    async fn fetch_markets(&self) -> Result<Vec<Market>> {
        let response = self
            .base
            .api
            .get("public", "marketOpenSymbols", RequestDescriptor::new())
            .await?;
        data(&response)?
            .as_array()
            .ok_or_else(|| Error::malformed("symbols"))?
            .iter()
            .map(|row| parser::parse_market(row, self.substitute()))
            .collect()
    }

    async fn fetch_currencies(&self) -> Result<Vec<Currency>> {
        let response = self
            .base
            .api
            .get("public", "marketOpenCoins", RequestDescriptor::new())
            .await?;
        data(&response)?
            .as_array()
            .ok_or_else(|| Error::malformed("coins"))?
            .iter()
            .map(|row| parser::parse_currency(row, self.substitute()))
            .collect()
    }

    /// Markets plus the explicit coin listing, which overrides currencies derived from markets.
    async fn load_markets(&self, reload: bool) -> Result<Arc<HashMap<String, Arc<Market>>>> {
        self.base
            .load_markets_with_loader(reload, || async {
                let (markets, currencies) =
                    futures::try_join!(self.fetch_markets(), self.fetch_currencies())?;
                Ok((markets, Some(currencies)))
            })
            .await
    }

    async fn fetch_ticker(&self, symbol: &str) -> Result<Ticker> {
        let market = self.loaded_market(symbol).await?;
        let request = RequestDescriptor::new().param("symbol", &market.id);
        let response = self.base.api.get("public", "openTick", request).await?;
        parser::parse_ticker(data(&response)?, Some(&market), self.substitute())
    }

    async fn fetch_tickers(&self, symbols: Option<&[String]>) -> Result<Vec<Ticker>> {
        let response = self
            .base
            .api
            .get("public", "marketOpenSymbols", RequestDescriptor::new())
            .await?;
        let tickers = data(&response)?
            .as_array()
            .ok_or_else(|| Error::malformed("symbols"))?
            .iter()
            .map(|row| parser::parse_ticker(row, None, self.substitute()))
            .collect::<Result<Vec<_>>>()?;
        Ok(tickers
            .into_iter()
            .filter(|t| symbols.is_none_or(|s| s.contains(&t.symbol)))
            .collect())
    }

    async fn fetch_trades(
        &self,
        symbol: &str,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Trade>> {
        let market = self.loaded_market(symbol).await?;
        let request = RequestDescriptor::new().param("symbol", &market.id);
        let response = self.base.api.get("public", "openDealOrders", request).await?;
        let trades = data(&response)?
            .as_array()
            .ok_or_else(|| Error::malformed("deal-orders"))?
            .iter()
            .map(|row| parser::parse_trade(row, &market))
            .collect::<Result<Vec<_>>>()?;
        Ok(finish_trades(trades, since, limit))
    }

    /// Candles from the TradingView chart host.
    ///
    /// The request spans `limit` candles ending now, or starting at `since` when given.
    async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: &str,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Ohlcv>> {
        let type_id = self.timeframe_id(timeframe)?;
        let market = self.loaded_market(symbol).await?;
        let window = ChartWindow::new(type_id, since, limit, seconds())?;
        let request = RequestDescriptor::new()
            .param("symbol", &market.id)
            .param("type", type_id)
            .param("resolution", window.resolution)
            .param("from", window.from)
            .param("to", window.to);
        let response = self.base.api.get("kitchen", "openChartHistory", request).await?;

        let candles = parser::parse_trading_view_ohlcvs(&response)?;
        let limit = usize::try_from(window.limit).ok();
        Ok(filter_ohlcvs(candles, since, limit))
    }

    // ==================== Account ====================

    async fn fetch_balance(&self) -> Result<Balance> {
        self.load_markets(false).await?;
        let request = RequestDescriptor::new()
            .param("limit", BALANCE_PAGE_SIZE)
            .param("page", 1);
        let response = self.base.api.get("private", "accountBalance", request).await?;
        let raw = parser::parse_balance(data(&response)?, &response, self.substitute())?;
        Ok(self.base.reconcile_balance(raw).await)
    }

    // ==================== Trading ====================

    /// Places a limit order.
    ///
    /// The amount is truncated to the base currency's precision; the returned order is built
    /// from the arguments since Kucoin only echoes the order id.
    async fn create_order(
        &self,
        symbol: &str,
        order_type: OrderType,
        side: OrderSide,
        amount: Decimal,
        price: Option<Decimal>,
        params: Option<&Params>,
    ) -> Result<Order> {
        if order_type != OrderType::Limit {
            return Err(Error::invalid_request("Kucoin allows limit orders only"));
        }
        let price = price.ok_or_else(|| Error::invalid_request("Kucoin limit orders require a price"))?;
        let market = self.loaded_market(symbol).await?;
        let places = match self.base.currency(&market.base).await {
            Ok(currency) => Some(currency.precision),
            Err(_) => market.precision.amount,
        };
        let amount = places.map_or(amount, |p| truncate(amount, p));
        let price = self.base.price_to_precision(symbol, price).await?;

        let request = RequestDescriptor::new()
            .param("symbol", &market.id)
            .param("type", side.as_str().to_uppercase())
            .param("price", price)
            .param("amount", amount)
            .extend(params);
        let response = self.base.api.post("private", "order", request).await?;
        let id = parse_string(data(&response)?, "orderOid")
            .ok_or_else(|| Error::malformed("orderOid"))?;

        let mut order = Order::new(
            id,
            market.symbol.clone(),
            side,
            milliseconds(),
            amount,
            Decimal::ZERO,
            OrderStatus::Open,
        );
        order.order_type = Some(OrderType::Limit);
        order.price = Some(price);
        order.info = response;
        debug!(id = %order.id, symbol = %order.symbol, "Kucoin order created");
        self.base.orders.insert(order.clone()).await;
        Ok(order)
    }

    /// Cancels an order; Kucoin needs the symbol and the order's side as a `type` param.
    async fn cancel_order(
        &self,
        id: &str,
        symbol: Option<&str>,
        params: Option<&Params>,
    ) -> Result<Value> {
        let market = self.required_market(symbol, "cancel_order").await?;
        let side = params
            .and_then(|p| p.get("type"))
            .ok_or_else(|| {
                Error::invalid_request("Kucoin cancel_order requires a type (BUY or SELL) param")
            })?
            .to_uppercase();
        let request = RequestDescriptor::new()
            .param("symbol", &market.id)
            .param("orderOid", id)
            .extend(params)
            .param("type", side);
        let response = self.base.api.post("private", "cancelOrder", request).await?;
        data(&response)?;
        self.base.orders.mark_canceled(id).await;
        Ok(response)
    }

    async fn fetch_open_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Order>> {
        let market = self.required_market(symbol, "fetch_open_orders").await?;
        let request = RequestDescriptor::new().param("symbol", &market.id);
        let response = self.base.api.get("private", "orderActiveMap", request).await?;
        let book = data(&response)?;
        let side = |key: &'static str| book.get(key).and_then(Value::as_array).into_iter().flatten();
        self.parse_orders(
            side("SELL").chain(side("BUY")),
            Some(&market),
            OrderStatus::Open,
            since,
            limit,
        )
        .await
    }

    async fn fetch_closed_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Order>> {
        let market = match symbol {
            Some(symbol) => Some(self.loaded_market(symbol).await?),
            None => {
                self.load_markets(false).await?;
                None
            }
        };
        let request = RequestDescriptor::new()
            .optional_param("symbol", market.as_ref().map(|m| m.id.clone()))
            .optional_param("since", since)
            .optional_param("limit", limit);
        let response = self.base.api.get("private", "orderDealt", request).await?;
        let rows = data(&response)?
            .get("datas")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::malformed("datas"))?;
        self.parse_orders(rows.iter(), market.as_deref(), OrderStatus::Closed, since, limit)
            .await
    }
}
