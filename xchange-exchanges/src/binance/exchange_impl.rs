//! Exchange trait implementation for Binance
//!
//! Every method delegates to the inherent implementation in the `rest` modules.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use xchange_core::{
    BaseExchange, Exchange, Params, Result,
    types::{
        Balance, DepositAddress, Market, Ohlcv, Order, OrderBook, OrderSide, OrderType, Ticker,
        Trade, Transaction,
    },
};

use super::Binance;
use super::constants::TIMEFRAMES;

#[async_trait]
impl Exchange for Binance {
    fn base(&self) -> &BaseExchange {
        &self.base
    }

    fn timeframes(&self) -> &'static [(&'static str, &'static str)] {
        TIMEFRAMES
    }

    // ==================== Market Data (Public API) ====================

    async fn fetch_markets(&self) -> Result<Vec<Market>> {
        Binance::fetch_markets(self).await
    }

    async fn load_markets(&self, reload: bool) -> Result<Arc<HashMap<String, Arc<Market>>>> {
        self.base
            .load_markets_with_loader(reload, || async {
                Ok((Binance::fetch_markets(self).await?, None))
            })
            .await
    }

    async fn fetch_time(&self) -> Result<i64> {
        Binance::fetch_time(self).await
    }

    async fn fetch_ticker(&self, symbol: &str) -> Result<Ticker> {
        Binance::fetch_ticker(self, symbol).await
    }

    async fn fetch_tickers(&self, symbols: Option<&[String]>) -> Result<Vec<Ticker>> {
        Binance::fetch_tickers(self, symbols).await
    }

    async fn fetch_order_book(&self, symbol: &str, limit: Option<u32>) -> Result<OrderBook> {
        Binance::fetch_order_book(self, symbol, limit).await
    }

    async fn fetch_trades(
        &self,
        symbol: &str,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Trade>> {
        Binance::fetch_trades(self, symbol, since, limit).await
    }

    async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: &str,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Ohlcv>> {
        Binance::fetch_ohlcv(self, symbol, timeframe, since, limit).await
    }

    // ==================== Account ====================

    async fn fetch_balance(&self) -> Result<Balance> {
        Binance::fetch_balance(self).await
    }

    async fn fetch_my_trades(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Trade>> {
        Binance::fetch_my_trades(self, symbol, since, limit).await
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
        Binance::create_order(self, symbol, order_type, side, amount, price, params).await
    }

    async fn cancel_order(
        &self,
        id: &str,
        symbol: Option<&str>,
        params: Option<&Params>,
    ) -> Result<Value> {
        Binance::cancel_order(self, id, symbol, params).await
    }

    async fn fetch_order(&self, id: &str, symbol: Option<&str>) -> Result<Order> {
        Binance::fetch_order(self, id, symbol).await
    }

    async fn fetch_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Order>> {
        Binance::fetch_orders(self, symbol, since, limit).await
    }

    async fn fetch_open_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Order>> {
        Binance::fetch_open_orders(self, symbol, since, limit).await
    }

    async fn fetch_closed_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Order>> {
        Binance::fetch_closed_orders(self, symbol, since, limit).await
    }

    // ==================== Funding ====================

    async fn fetch_deposit_address(&self, code: &str) -> Result<DepositAddress> {
        Binance::fetch_deposit_address(self, code).await
    }

    async fn withdraw(
        &self,
        code: &str,
        amount: Decimal,
        address: &str,
        params: Option<&Params>,
    ) -> Result<Transaction> {
        Binance::withdraw(self, code, amount, address, params).await
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use xchange_core::ExchangeConfig;

    #[test]
    fn test_binance_exchange_trait_metadata() {
        let binance = Binance::new(ExchangeConfig::default()).unwrap();
        let exchange: &dyn Exchange = &binance;

        assert_eq!(exchange.id(), "binance");
        assert_eq!(exchange.name(), "Binance");
        assert_eq!(exchange.timeframe_id("1h").unwrap(), "1h");
        assert!(exchange.timeframe_id("7m").is_err());
    }

    #[test]
    fn test_binance_exchange_trait_object_safety() {
        let binance = Binance::new(ExchangeConfig::default()).unwrap();
        let exchange: Box<dyn Exchange> = Box::new(binance);
        assert_eq!(exchange.id(), "binance");
    }

    #[tokio::test]
    async fn test_deposit_is_not_supported() {
        let binance = Binance::new(ExchangeConfig::default()).unwrap();
        let err = binance
            .deposit("BTC", Decimal::ONE, None)
            .await
            .unwrap_err();
        assert_eq!(err.as_not_supported(), Some("deposit"));
    }

    #[tokio::test]
    async fn test_signed_call_without_credentials_fails_before_io() {
        let config = ExchangeConfig::builder()
            .url_override("private", "http://127.0.0.1:9")
            .build();
        let binance = Binance::new(config).unwrap();
        let err = Exchange::fetch_balance(&binance).await.unwrap_err();
        assert!(err.as_authentication().is_some());
    }
}
