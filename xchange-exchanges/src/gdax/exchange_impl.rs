//! Exchange trait implementation for Gdax

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use xchange_core::endpoint::RequestDescriptor;
use xchange_core::parser_utils::{
    filter_by_since_limit, finish_trades, parse_ohlcvs, parse_order_book, parse_string,
    parse_timestamp,
};
use xchange_core::signed_request::HttpMethod;
use xchange_core::time::{milliseconds, parse8601, ymdhms};
use xchange_core::{
    BaseExchange, Error, Exchange, ParseError, Params, Result,
    types::{
        Balance, Market, Ohlcv, Order, OrderBook, OrderSide, OrderType, Ticker, Trade,
        Transaction,
    },
};

use super::constants::{DEFAULT_OHLCV_LIMIT, ORDER_BOOK_LEVEL, TIMEFRAMES};
use super::{Gdax, parser};

/// JSON body from fixed fields plus caller params; params win on conflicts.
fn body_with_params(fields: Map<String, Value>, params: Option<&Params>) -> Value {
    let mut body = fields;
    if let Some(params) = params {
        for (key, value) in params {
            body.insert(key.clone(), Value::String(value.clone()));
        }
    }
    Value::Object(body)
}

fn transaction(response: &Value, code: &str, amount: Decimal, address: Option<&str>) -> Transaction {
    Transaction {
        id: parse_string(response, "id"),
        currency: code.to_string(),
        amount,
        address: address.map(str::to_string),
        info: response.clone(),
    }
}

impl Gdax {
    async fn loaded_market(&self, symbol: &str) -> Result<Arc<Market>> {
        self.load_markets(false).await?;
        self.base.market(symbol).await
    }

    async fn optional_market(&self, symbol: Option<&str>) -> Result<Option<Arc<Market>>> {
        match symbol {
            Some(symbol) => self.loaded_market(symbol).await.map(Some),
            None => {
                self.load_markets(false).await?;
                Ok(None)
            }
        }
    }

    async fn parse_order_with_lookup(&self, data: &Value) -> Result<Order> {
        let market = match data.get("product_id").and_then(Value::as_str) {
            Some(id) => self.base.find_market_by_id(id).await,
            None => None,
        };
        parser::parse_order(data, market.as_deref())
    }

    async fn fetch_orders_with_status(
        &self,
        symbol: Option<&str>,
        status: Option<&str>,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Order>> {
        let market = self.optional_market(symbol).await?;
        let request = RequestDescriptor::new()
            .optional_param("status", status)
            .optional_param("product_id", market.as_ref().map(|m| m.id.clone()));
        let response = self.base.api.get("private", "orders", request).await?;

        let rows = response.as_array().ok_or_else(|| Error::malformed("orders"))?;
        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            orders.push(self.parse_order_with_lookup(row).await?);
        }
        self.base.orders.extend(orders.iter().cloned()).await;
        Ok(filter_by_since_limit(orders, since, limit))
    }
}

#[async_trait]
impl Exchange for Gdax {
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
            .get("public", "products", RequestDescriptor::new())
            .await?;
        let substitute = self.base.config.substitute_common_currency_codes;
        response
            .as_array()
            .ok_or_else(|| Error::malformed("products"))?
            .iter()
            .map(|p| parser::parse_market(p, substitute))
            .collect()
    }

    async fn load_markets(&self, reload: bool) -> Result<Arc<HashMap<String, Arc<Market>>>> {
        self.base
            .load_markets_with_loader(reload, || async { Ok((self.fetch_markets().await?, None)) })
            .await
    }

    async fn fetch_time(&self) -> Result<i64> {
        let response = self.base.api.get("public", "time", RequestDescriptor::new()).await?;
        let iso = response
            .get("iso")
            .and_then(Value::as_str)
            .ok_or_else(|| ParseError::missing_field("iso"))?;
        parse8601(iso)
    }

    async fn fetch_ticker(&self, symbol: &str) -> Result<Ticker> {
        let market = self.loaded_market(symbol).await?;
        let request = RequestDescriptor::new().field("id", market.id.clone());
        let response = self.base.api.get("public", "productsIdTicker", request).await?;
        parser::parse_ticker(&response, &market)
    }

    /// The aggregated level-2 book; Gdax fixes its depth, so `limit` is ignored.
    async fn fetch_order_book(&self, symbol: &str, _limit: Option<u32>) -> Result<OrderBook> {
        let market = self.loaded_market(symbol).await?;
        let request = RequestDescriptor::new()
            .field("id", market.id.clone())
            .param("level", ORDER_BOOK_LEVEL);
        let response = self.base.api.get("public", "productsIdBook", request).await?;
        let mut book = parse_order_book(&response, &market.symbol, milliseconds(), "bids", "asks")?;
        book.nonce = parse_timestamp(&response, "sequence");
        Ok(book)
    }

    async fn fetch_trades(
        &self,
        symbol: &str,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Trade>> {
        let market = self.loaded_market(symbol).await?;
        let request = RequestDescriptor::new()
            .field("id", market.id.clone())
            .optional_param("limit", limit);
        let response = self.base.api.get("public", "productsIdTrades", request).await?;
        let trades = response
            .as_array()
            .ok_or_else(|| Error::malformed("trades"))?
            .iter()
            .map(|row| parser::parse_trade(row, &market))
            .collect::<Result<Vec<_>>>()?;
        Ok(finish_trades(trades, since, limit))
    }

    /// Candles; with `since` the window is `limit` (default 350) candles from `since`.
    async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: &str,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Ohlcv>> {
        let granularity = self.timeframe_id(timeframe)?;
        let market = self.loaded_market(symbol).await?;
        let mut request = RequestDescriptor::new()
            .field("id", market.id.clone())
            .param("granularity", granularity);
        if let Some(since) = since {
            let seconds: i64 = granularity
                .parse()
                .map_err(|_| Error::invalid_request(format!("Invalid granularity {granularity}")))?;
            let count = limit.map_or(DEFAULT_OHLCV_LIMIT, |l| l as i64);
            request = request
                .param("start", ymdhms(since, None)?)
                .param("end", ymdhms(since + count * seconds * 1000, None)?);
        }
        let response = self.base.api.get("public", "productsIdCandles", request).await?;
        let rows = response.as_array().ok_or_else(|| Error::malformed("candles"))?;
        parse_ohlcvs(rows, since, limit, parser::parse_ohlcv)
    }

    // ==================== Account ====================

    async fn fetch_balance(&self) -> Result<Balance> {
        let response = self
            .base
            .api
            .get("private", "accounts", RequestDescriptor::new())
            .await?;
        let raw = parser::parse_balance(&response, self.base.config.substitute_common_currency_codes)?;
        Ok(self.base.reconcile_balance(raw).await)
    }

    async fn fetch_my_trades(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Trade>> {
        let market = self.optional_market(symbol).await?;
        let request = RequestDescriptor::new()
            .optional_param("product_id", market.as_ref().map(|m| m.id.clone()))
            .optional_param("limit", limit);
        let response = self.base.api.get("private", "fills", request).await?;

        let mut trades = Vec::new();
        for row in response.as_array().ok_or_else(|| Error::malformed("fills"))? {
            let row_market = match (&market, row.get("product_id").and_then(Value::as_str)) {
                (Some(m), _) => Some(Arc::clone(m)),
                (None, Some(id)) => self.base.find_market_by_id(id).await,
                (None, None) => None,
            };
            match row_market {
                Some(m) => trades.push(parser::parse_fill(row, &m)?),
                None => debug!(fill = %row, "Skipping fill of unknown product"),
            }
        }
        Ok(finish_trades(trades, since, limit))
    }

    // ==================== Trading ====================

    async fn create_order(
        &self,
        symbol: &str,
        order_type: OrderType,
        side: OrderSide,
        amount: Decimal,
        price: Option<Decimal>,
        params: Option<&Params>,
    ) -> Result<Order> {
        let market = self.loaded_market(symbol).await?;
        let mut fields = Map::new();
        fields.insert("product_id".into(), json!(market.id));
        fields.insert("side".into(), json!(side.as_str()));
        fields.insert("size".into(), json!(amount.to_string()));
        fields.insert("type".into(), json!(order_type.as_str()));
        if order_type == OrderType::Limit {
            let price = price
                .ok_or_else(|| Error::invalid_request("Gdax limit orders require a price"))?;
            fields.insert("price".into(), json!(price.to_string()));
        }
        let request = RequestDescriptor::new().data(body_with_params(fields, params));
        let response = self.base.api.post("private", "orders", request).await?;

        let order = parser::parse_order(&response, Some(&market))?;
        debug!(id = %order.id, symbol = %order.symbol, "Gdax order created");
        self.base.orders.insert(order.clone()).await;
        Ok(order)
    }

    async fn cancel_order(
        &self,
        id: &str,
        _symbol: Option<&str>,
        params: Option<&Params>,
    ) -> Result<Value> {
        let request = RequestDescriptor::new().field("id", id).extend(params);
        let response = self
            .base
            .api
            .call("private", HttpMethod::Delete, "ordersId", request)
            .await?;
        self.base.orders.mark_canceled(id).await;
        Ok(response)
    }

    async fn fetch_order(&self, id: &str, _symbol: Option<&str>) -> Result<Order> {
        self.load_markets(false).await?;
        let request = RequestDescriptor::new().field("id", id);
        let response = self.base.api.get("private", "ordersId", request).await?;
        let order = self.parse_order_with_lookup(&response).await?;
        self.base.orders.insert(order.clone()).await;
        Ok(order)
    }

    async fn fetch_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Order>> {
        self.fetch_orders_with_status(symbol, Some("all"), since, limit)
            .await
    }

    async fn fetch_open_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Order>> {
        self.fetch_orders_with_status(symbol, None, since, limit).await
    }

    async fn fetch_closed_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Order>> {
        self.fetch_orders_with_status(symbol, Some("done"), since, limit)
            .await
    }

    // ==================== Funding ====================

    /// Deposits from a payment method or a Coinbase account named in `params`.
    async fn deposit(
        &self,
        code: &str,
        amount: Decimal,
        params: Option<&Params>,
    ) -> Result<Transaction> {
        let has = |key: &str| params.is_some_and(|p| p.contains_key(key));
        let endpoint = if has("payment_method_id") {
            "depositsPaymentMethod"
        } else if has("coinbase_account_id") {
            "depositsCoinbaseAccount"
        } else {
            return Err(Error::not_supported(
                "deposit without payment_method_id or coinbase_account_id",
            ));
        };
        let mut fields = Map::new();
        fields.insert("currency".into(), json!(code));
        fields.insert("amount".into(), json!(amount.to_string()));
        let request = RequestDescriptor::new().data(body_with_params(fields, params));
        let response = self.base.api.post("private", endpoint, request).await?;
        Ok(transaction(&response, code, amount, None))
    }

    /// Withdraws to a payment method, a Coinbase account, or else the crypto `address`.
    async fn withdraw(
        &self,
        code: &str,
        amount: Decimal,
        address: &str,
        params: Option<&Params>,
    ) -> Result<Transaction> {
        let has = |key: &str| params.is_some_and(|p| p.contains_key(key));
        let mut fields = Map::new();
        fields.insert("currency".into(), json!(code));
        fields.insert("amount".into(), json!(amount.to_string()));
        let endpoint = if has("payment_method_id") {
            "withdrawalsPaymentMethod"
        } else if has("coinbase_account_id") {
            "withdrawalsCoinbase"
        } else {
            fields.insert("crypto_address".into(), json!(address));
            "withdrawalsCrypto"
        };
        let request = RequestDescriptor::new().data(body_with_params(fields, params));
        let response = self.base.api.post("private", endpoint, request).await?;
        Ok(transaction(&response, code, amount, Some(address)))
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use xchange_core::ExchangeConfig;

    #[test]
    fn test_body_params_override_fields() {
        let mut fields = Map::new();
        fields.insert("currency".into(), json!("BTC"));
        let params = Params::from([("currency".to_string(), "ETH".to_string())]);
        let body = body_with_params(fields, Some(&params));
        assert_eq!(body["currency"], "ETH");
    }

    #[tokio::test]
    async fn test_deposit_requires_funding_source() {
        let gdax = Gdax::new(ExchangeConfig::default()).unwrap();
        let err = gdax.deposit("BTC", Decimal::ONE, None).await.unwrap_err();
        assert!(err.as_not_supported().is_some());
    }

    #[test]
    fn test_timeframes() {
        let gdax = Gdax::new(ExchangeConfig::default()).unwrap();
        assert_eq!(gdax.timeframe_id("1h").unwrap(), "3600");
        assert_eq!(gdax.timeframe_id("1y").unwrap(), "31536000");
    }
}
