//! # Unified Exchange Trait
//!
//! [`Exchange`] is the canonical async surface every adapter implements. Operations an
//! exchange does not offer keep the default body, which returns [`Error::NotSupported`].
//!
//! ```rust,no_run
//! use xchange_core::exchange::ArcExchange;
//!
//! async fn spread(exchange: ArcExchange, symbol: &str) -> xchange_core::Result<()> {
//!     exchange.load_markets(false).await?;
//!     let book = exchange.fetch_order_book(symbol, Some(5)).await?;
//!     println!("{}: {:?}", exchange.id(), book.spread());
//!     Ok(())
//! }
//! ```

use crate::base_exchange::BaseExchange;
use crate::error::{Error, Result};
use crate::types::{
    Balance, Currency, DepositAddress, Market, Ohlcv, Order, OrderBook, OrderSide, OrderType,
    Ticker, Trade, Transaction,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Extra exchange-specific request parameters.
pub type Params = HashMap<String, String>;

/// Canonical exchange interface.
#[async_trait]
pub trait Exchange: Send + Sync {
    /// Shared adapter state.
    fn base(&self) -> &BaseExchange;

    /// Lowercase identifier.
    fn id(&self) -> &str {
        &self.base().config.id
    }

    /// Display name.
    fn name(&self) -> &str {
        &self.base().config.name
    }

    /// Supported candle timeframes as `(canonical, exchange)` pairs.
    fn timeframes(&self) -> &'static [(&'static str, &'static str)] {
        &[]
    }

    /// Exchange interval for a canonical timeframe such as `1h`.
    fn timeframe_id(&self, timeframe: &str) -> Result<&'static str> {
        self.timeframes()
            .iter()
            .find(|(canonical, _)| *canonical == timeframe)
            .map(|(_, id)| *id)
            .ok_or_else(|| {
                Error::invalid_request(format!("{} has no {timeframe} timeframe", self.id()))
            })
    }

    /// Fetches raw market listings and parses them.
    async fn fetch_markets(&self) -> Result<Vec<Market>>;

    /// Explicit currency listing, for exchanges that publish one.
    async fn fetch_currencies(&self) -> Result<Vec<Currency>> {
        Err(Error::not_supported("fetch_currencies"))
    }

    /// Loads and caches the catalog; returns the cached one unless `reload`.
    async fn load_markets(&self, reload: bool) -> Result<Arc<HashMap<String, Arc<Market>>>>;

    /// Market by canonical symbol.
    async fn market(&self, symbol: &str) -> Result<Arc<Market>> {
        self.base().market(symbol).await
    }

    /// Exchange server time in milliseconds.
    async fn fetch_time(&self) -> Result<i64> {
        Err(Error::not_supported("fetch_time"))
    }

    async fn fetch_ticker(&self, _symbol: &str) -> Result<Ticker> {
        Err(Error::not_supported("fetch_ticker"))
    }

    /// Tickers, optionally restricted to `symbols`.
    async fn fetch_tickers(&self, _symbols: Option<&[String]>) -> Result<Vec<Ticker>> {
        Err(Error::not_supported("fetch_tickers"))
    }

    async fn fetch_order_book(&self, _symbol: &str, _limit: Option<u32>) -> Result<OrderBook> {
        Err(Error::not_supported("fetch_order_book"))
    }

    /// Public trades, newest first.
    async fn fetch_trades(
        &self,
        _symbol: &str,
        _since: Option<i64>,
        _limit: Option<usize>,
    ) -> Result<Vec<Trade>> {
        Err(Error::not_supported("fetch_trades"))
    }

    /// Candles in exchange order.
    async fn fetch_ohlcv(
        &self,
        _symbol: &str,
        _timeframe: &str,
        _since: Option<i64>,
        _limit: Option<usize>,
    ) -> Result<Vec<Ohlcv>> {
        Err(Error::not_supported("fetch_ohlcv"))
    }

    /// Reconciled balance.
    async fn fetch_balance(&self) -> Result<Balance> {
        Err(Error::not_supported("fetch_balance"))
    }

    async fn create_order(
        &self,
        _symbol: &str,
        _order_type: OrderType,
        _side: OrderSide,
        _amount: Decimal,
        _price: Option<Decimal>,
        _params: Option<&Params>,
    ) -> Result<Order> {
        Err(Error::not_supported("create_order"))
    }

    /// Cancels an order and returns the exchange acknowledgement.
    async fn cancel_order(
        &self,
        _id: &str,
        _symbol: Option<&str>,
        _params: Option<&Params>,
    ) -> Result<Value> {
        Err(Error::not_supported("cancel_order"))
    }

    async fn fetch_order(&self, _id: &str, _symbol: Option<&str>) -> Result<Order> {
        Err(Error::not_supported("fetch_order"))
    }

    async fn fetch_orders(
        &self,
        _symbol: Option<&str>,
        _since: Option<i64>,
        _limit: Option<usize>,
    ) -> Result<Vec<Order>> {
        Err(Error::not_supported("fetch_orders"))
    }

    async fn fetch_open_orders(
        &self,
        _symbol: Option<&str>,
        _since: Option<i64>,
        _limit: Option<usize>,
    ) -> Result<Vec<Order>> {
        Err(Error::not_supported("fetch_open_orders"))
    }

    async fn fetch_closed_orders(
        &self,
        _symbol: Option<&str>,
        _since: Option<i64>,
        _limit: Option<usize>,
    ) -> Result<Vec<Order>> {
        Err(Error::not_supported("fetch_closed_orders"))
    }

    async fn fetch_my_trades(
        &self,
        _symbol: Option<&str>,
        _since: Option<i64>,
        _limit: Option<usize>,
    ) -> Result<Vec<Trade>> {
        Err(Error::not_supported("fetch_my_trades"))
    }

    async fn fetch_deposit_address(&self, _code: &str) -> Result<DepositAddress> {
        Err(Error::not_supported("fetch_deposit_address"))
    }

    async fn deposit(
        &self,
        _code: &str,
        _amount: Decimal,
        _params: Option<&Params>,
    ) -> Result<Transaction> {
        Err(Error::not_supported("deposit"))
    }

    async fn withdraw(
        &self,
        _code: &str,
        _amount: Decimal,
        _address: &str,
        _params: Option<&Params>,
    ) -> Result<Transaction> {
        Err(Error::not_supported("withdraw"))
    }
}

/// Shared trait object.
pub type ArcExchange = Arc<dyn Exchange>;

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::base_exchange::{ExchangeConfig, ExchangeDescriptor};
    use crate::credentials::RequiredCredentials;
    use crate::endpoint::ApiCatalog;
    use crate::signed_request::{SigningContext, SigningStrategy};
    use crate::types::TradingFees;
    use reqwest::header::HeaderMap;
    use rust_decimal_macros::dec;

    static CATALOG: ApiCatalog = ApiCatalog {
        urls: &[],
        api: &[],
        signed: &[],
    };

    static DESCRIPTOR: ExchangeDescriptor = ExchangeDescriptor {
        id: "minimal",
        name: "Minimal",
        catalog: &CATALOG,
        required_credentials: RequiredCredentials::KEY_SECRET,
        fees: TradingFees::new(dec!(0), dec!(0)),
    };

    struct NoSigner;

    #[async_trait]
    impl SigningStrategy for NoSigner {
        async fn prepare_request(&self, _ctx: &mut SigningContext) -> Result<()> {
            Ok(())
        }

        fn add_auth_headers(&self, _headers: &mut HeaderMap, _ctx: &SigningContext) -> Result<()> {
            Ok(())
        }
    }

    struct Minimal {
        base: BaseExchange,
    }

    #[async_trait]
    impl Exchange for Minimal {
        fn base(&self) -> &BaseExchange {
            &self.base
        }

        async fn fetch_markets(&self) -> Result<Vec<Market>> {
            Ok(vec![Market::new("AB", "A", "B", "A", "B")])
        }

        async fn load_markets(&self, reload: bool) -> Result<Arc<HashMap<String, Arc<Market>>>> {
            self.base
                .load_markets_with_loader(reload, || async { Ok((self.fetch_markets().await?, None)) })
                .await
        }
    }

    fn minimal() -> ArcExchange {
        let base = BaseExchange::new(ExchangeConfig::default(), &DESCRIPTOR, Arc::new(NoSigner)).unwrap();
        Arc::new(Minimal { base })
    }

    #[tokio::test]
    async fn test_defaults_are_not_supported() {
        let ex = minimal();
        assert_eq!(ex.id(), "minimal");
        assert_eq!(ex.name(), "Minimal");
        let err = ex.fetch_ticker("A/B").await.unwrap_err();
        assert_eq!(err.as_not_supported(), Some("fetch_ticker"));
        assert!(ex.fetch_balance().await.is_err());
        assert!(ex.timeframes().is_empty());
        assert!(ex.timeframe_id("1h").is_err());
    }

    #[tokio::test]
    async fn test_market_delegates_to_base() {
        let ex = minimal();
        ex.load_markets(false).await.unwrap();
        assert_eq!(ex.market("A/B").await.unwrap().id, "AB");
    }

    #[test]
    fn test_arc_exchange_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<ArcExchange>();
    }
}
