//! Binance account operations: balance, orders and account trades.

use super::super::constants::time_in_force;
use super::super::{Binance, parser};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;
use xchange_core::endpoint::RequestDescriptor;
use xchange_core::parser_utils::{filter_by_since_limit, finish_trades};
use xchange_core::precision::truncate;
use xchange_core::signed_request::HttpMethod;
use xchange_core::types::{Balance, Market, Order, OrderSide, OrderStatus, OrderType, Trade};
use xchange_core::{Error, Params, Result};

impl Binance {
    /// Account balance; Binance reports both free and locked amounts.
    pub async fn fetch_balance(&self) -> Result<Balance> {
        let response = self
            .base
            .api
            .get("private", "account", RequestDescriptor::new())
            .await?;
        let raw = parser::parse_balance(&response, self.base.config.substitute_common_currency_codes)?;
        Ok(self.base.reconcile_balance(raw).await)
    }

    async fn parse_order_list(
        &self,
        response: &Value,
        market: &Market,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Order>> {
        let orders = response
            .as_array()
            .ok_or_else(|| Error::malformed("orders"))?
            .iter()
            .map(|row| parser::parse_order(row, Some(market)))
            .collect::<Result<Vec<_>>>()?;
        self.base.orders.extend(orders.iter().cloned()).await;
        Ok(filter_by_since_limit(orders, since, limit))
    }

    /// Places an order.
    ///
    /// The quantity is truncated to the market's amount precision; limit orders are sent
    /// good-till-canceled with the price rounded to the price precision.
    pub async fn create_order(
        &self,
        symbol: &str,
        order_type: OrderType,
        side: OrderSide,
        amount: Decimal,
        price: Option<Decimal>,
        params: Option<&Params>,
    ) -> Result<Order> {
        let market = self.loaded_market(symbol).await?;
        let quantity = match market.precision.amount {
            Some(places) => truncate(amount, places),
            None => amount,
        };
        let mut request = RequestDescriptor::new()
            .param("symbol", &market.id)
            .param("quantity", quantity)
            .param("type", order_type.as_str().to_uppercase())
            .param("side", side.as_str().to_uppercase());
        if order_type == OrderType::Limit {
            let price = price.ok_or_else(|| {
                Error::invalid_request("Binance limit orders require a price")
            })?;
            request = request
                .param("price", self.base.price_to_precision(symbol, price).await?)
                .param("timeInForce", time_in_force::GTC);
        }
        let response = self
            .base
            .api
            .post("private", "order", request.extend(params))
            .await?;

        let order = parser::parse_order(&response, Some(&market))?;
        debug!(id = %order.id, symbol = %order.symbol, "Binance order created");
        self.base.orders.insert(order.clone()).await;
        Ok(order)
    }

    /// Cancels an order; Binance needs the symbol to locate it.
    pub async fn cancel_order(
        &self,
        id: &str,
        symbol: Option<&str>,
        params: Option<&Params>,
    ) -> Result<Value> {
        let market = self.required_market(symbol, "cancel_order").await?;
        let request = RequestDescriptor::new()
            .param("symbol", &market.id)
            .param("orderId", id)
            .extend(params);
        let response = self
            .base
            .api
            .call("private", HttpMethod::Delete, "order", request)
            .await?;
        self.base.orders.mark_canceled(id).await;
        Ok(response)
    }

    /// One order by id.
    pub async fn fetch_order(&self, id: &str, symbol: Option<&str>) -> Result<Order> {
        let market = self.required_market(symbol, "fetch_order").await?;
        let request = RequestDescriptor::new()
            .param("symbol", &market.id)
            .param("orderId", id);
        let response = self.base.api.get("private", "order", request).await?;
        let order = parser::parse_order(&response, Some(&market))?;
        self.base.orders.insert(order.clone()).await;
        Ok(order)
    }

    /// Every order of one market, from `/allOrders`.
    pub async fn fetch_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Order>> {
        let market = self.required_market(symbol, "fetch_orders").await?;
        let request = RequestDescriptor::new()
            .param("symbol", &market.id)
            .optional_param("limit", limit);
        let response = self.base.api.get("private", "allOrders", request).await?;
        self.parse_order_list(&response, &market, since, limit).await
    }

    /// Open orders of one market.
    pub async fn fetch_open_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Order>> {
        let market = self.required_market(symbol, "fetch_open_orders").await?;
        let request = RequestDescriptor::new().param("symbol", &market.id);
        let response = self.base.api.get("private", "openOrders", request).await?;
        self.parse_order_list(&response, &market, since, limit).await
    }

    /// Closed orders of one market: `/allOrders` filtered on status.
    pub async fn fetch_closed_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Order>> {
        let orders = self.fetch_orders(symbol, since, None).await?;
        let mut closed: Vec<Order> = orders
            .into_iter()
            .filter(|o| o.status == OrderStatus::Closed)
            .collect();
        if let Some(limit) = limit {
            closed.truncate(limit);
        }
        Ok(closed)
    }

    /// Account trades of one market.
    pub async fn fetch_my_trades(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Trade>> {
        let market = self.required_market(symbol, "fetch_my_trades").await?;
        let request = RequestDescriptor::new()
            .param("symbol", &market.id)
            .optional_param("limit", limit);
        let response = self.base.api.get("private", "myTrades", request).await?;

        let substitute = self.base.config.substitute_common_currency_codes;
        let trades = response
            .as_array()
            .ok_or_else(|| Error::malformed("myTrades"))?
            .iter()
            .map(|row| parser::parse_trade(row, &market, substitute))
            .collect::<Result<Vec<_>>>()?;
        Ok(finish_trades(trades, since, limit))
    }
}
