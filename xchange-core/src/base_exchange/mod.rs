//! Base exchange implementation
//!
//! State and behaviour shared by every adapter:
//! - the compiled endpoint table and its [`ApiClient`]
//! - the market/currency catalog, loaded once and cached
//! - the order cache that feeds balance reconciliation
//! - fee and precision helpers driven by market metadata

mod config;
mod market_cache;

pub use config::{ExchangeConfig, ExchangeConfigBuilder};
pub use market_cache::{MarketCache, common_currency_code, derive_currencies};

use crate::credentials::{RequiredCredentials, check_required_credentials, validate_credential_set};
use crate::endpoint::{ApiCatalog, ApiClient, EndpointTable};
use crate::error::{Error, Result};
use crate::http_client::{HttpClient, HttpConfig};
use crate::order_store::OrderStore;
use crate::precision::{RoundingMode, to_places};
use crate::reconcile::{RawBalance, reconcile_balance};
use crate::signed_request::SigningStrategy;
use crate::transport::Transport;
use crate::types::{Balance, Currency, Fee, Market, OrderSide, TakerOrMaker, TradingFees};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

/// Static facts about one exchange.
#[derive(Debug)]
pub struct ExchangeDescriptor {
    /// Lowercase identifier, e.g. `binance`
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// REST catalog
    pub catalog: &'static ApiCatalog,
    /// Credentials needed by signed namespaces
    pub required_credentials: RequiredCredentials,
    /// Default trading fees
    pub fees: TradingFees,
}

/// Shared adapter state
#[derive(Debug)]
pub struct BaseExchange {
    /// Exchange configuration
    pub config: Arc<ExchangeConfig>,
    /// Static exchange facts
    pub descriptor: &'static ExchangeDescriptor,
    /// Endpoint dispatcher
    pub api: ApiClient,
    /// Thread-safe market data cache
    pub market_cache: Arc<RwLock<MarketCache>>,
    /// Mutex to serialize market loading operations
    pub market_loading_lock: Arc<Mutex<()>>,
    /// Orders seen by this adapter
    pub orders: OrderStore,
}

impl BaseExchange {
    /// Creates an adapter backed by the default HTTP client.
    pub fn new(
        config: ExchangeConfig,
        descriptor: &'static ExchangeDescriptor,
        signer: Arc<dyn SigningStrategy>,
    ) -> Result<Self> {
        let transport = HttpClient::new(HttpConfig::from(&config))?;
        Self::with_transport(config, descriptor, signer, Arc::new(transport))
    }

    /// Creates an adapter over any [`Transport`].
    pub fn with_transport(
        mut config: ExchangeConfig,
        descriptor: &'static ExchangeDescriptor,
        signer: Arc<dyn SigningStrategy>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        if config.id.is_empty() {
            config.id = descriptor.id.to_string();
        }
        if config.name.is_empty() {
            config.name = descriptor.name.to_string();
        }
        info!("Initializing exchange: {}", config.id);

        if config.timeout.is_zero() {
            return Err(Error::configuration("timeout cannot be zero"));
        }
        validate_credential_set(&config.id, &config, descriptor.required_credentials)?;

        let table = EndpointTable::compile(descriptor.catalog, &config)?;
        let config = Arc::new(config);
        let api = ApiClient::new(
            table,
            transport,
            signer,
            Arc::clone(&config),
            descriptor.required_credentials,
        );

        Ok(Self {
            config,
            descriptor,
            api,
            market_cache: Arc::new(RwLock::new(MarketCache::default())),
            market_loading_lock: Arc::new(Mutex::new(())),
            orders: OrderStore::new(),
        })
    }

    /// Exchange identifier.
    pub fn id(&self) -> &str {
        &self.config.id
    }

    /// Loads the catalog through `loader` unless it is cached.
    ///
    /// Concurrent callers are serialized, so only one of them runs the loader.
    pub async fn load_markets_with_loader<F, Fut>(
        &self,
        reload: bool,
        loader: F,
    ) -> Result<Arc<HashMap<String, Arc<Market>>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(Vec<Market>, Option<Vec<Currency>>)>>,
    {
        let _loading_guard = self.market_loading_lock.lock().await;

        {
            let cache = self.market_cache.read().await;
            if cache.is_loaded() && !reload {
                debug!(
                    "Returning cached markets for {} ({} markets)",
                    self.config.id,
                    cache.market_count()
                );
                return Ok(cache.markets());
            }
        }

        info!(
            "Loading markets for {} (reload: {})",
            self.config.id, reload
        );
        let (markets, currencies) = loader().await?;
        Ok(self.set_markets(markets, currencies).await)
    }

    /// Replaces the cached catalog.
    pub async fn set_markets(
        &self,
        markets: Vec<Market>,
        currencies: Option<Vec<Currency>>,
    ) -> Arc<HashMap<String, Arc<Market>>> {
        let mut cache = self.market_cache.write().await;
        cache.set_markets(markets, currencies, self.descriptor.fees, &self.config.id)
    }

    /// Whether the catalog has been loaded.
    pub async fn markets_loaded(&self) -> bool {
        self.market_cache.read().await.is_loaded()
    }

    /// Snapshot of the markets by symbol.
    pub async fn markets(&self) -> Result<Arc<HashMap<String, Arc<Market>>>> {
        let cache = self.market_cache.read().await;
        if !cache.is_loaded() {
            return Err(Error::market_not_loaded(self.config.id.clone()));
        }
        Ok(cache.markets())
    }

    /// Market by canonical symbol.
    pub async fn market(&self, symbol: &str) -> Result<Arc<Market>> {
        let cache = self.market_cache.read().await;
        if !cache.is_loaded() {
            return Err(Error::market_not_loaded(self.config.id.clone()));
        }
        cache
            .get_market(symbol)
            .ok_or_else(|| Error::bad_symbol(&self.config.id, symbol))
    }

    /// Market by exchange-specific id.
    pub async fn market_by_id(&self, id: &str) -> Result<Arc<Market>> {
        let cache = self.market_cache.read().await;
        if !cache.is_loaded() {
            return Err(Error::market_not_loaded(self.config.id.clone()));
        }
        cache
            .get_market_by_id(id)
            .ok_or_else(|| Error::market_not_found(format!("{} has no market id {id}", self.config.id)))
    }

    /// Market by id, or `None` when unknown or not loaded.
    pub async fn find_market_by_id(&self, id: &str) -> Option<Arc<Market>> {
        self.market_cache.read().await.get_market_by_id(id)
    }

    /// Currency by canonical code.
    pub async fn currency(&self, code: &str) -> Result<Arc<Currency>> {
        let cache = self.market_cache.read().await;
        cache
            .get_currency(code)
            .ok_or_else(|| Error::market_not_found(format!("{} has no currency {code}", self.config.id)))
    }

    /// Currency by exchange-specific id.
    pub async fn currency_by_id(&self, id: &str) -> Result<Arc<Currency>> {
        let cache = self.market_cache.read().await;
        cache
            .get_currency_by_id(id)
            .ok_or_else(|| Error::market_not_found(format!("{} has no currency id {id}", self.config.id)))
    }

    /// Sorted symbols.
    pub async fn symbols(&self) -> Vec<String> {
        self.market_cache.read().await.symbols.clone()
    }

    /// Sorted market ids.
    pub async fn ids(&self) -> Vec<String> {
        self.market_cache.read().await.ids.clone()
    }

    /// Sorted currency codes.
    pub async fn codes(&self) -> Vec<String> {
        self.market_cache.read().await.codes.clone()
    }

    /// Applies legacy code substitution when enabled.
    pub fn common_currency_code(&self, code: &str) -> String {
        common_currency_code(code, self.config.substitute_common_currency_codes)
    }

    /// Fails unless every required credential is configured.
    pub fn check_required_credentials(&self) -> Result<()> {
        check_required_credentials(
            &self.config.id,
            self.config.as_ref(),
            self.descriptor.required_credentials,
        )
    }

    /// Fee for a prospective order.
    ///
    /// Buys pay in the base currency (`amount * rate`), sells in the quote currency
    /// (`amount * rate * price`), rounded to the market's price precision.
    pub async fn calculate_fee(
        &self,
        symbol: &str,
        side: OrderSide,
        amount: Decimal,
        price: Decimal,
        taker_or_maker: TakerOrMaker,
    ) -> Result<Fee> {
        let market = self.market(symbol).await?;
        let rate = match taker_or_maker {
            TakerOrMaker::Taker => market.taker,
            TakerOrMaker::Maker => market.maker,
        }
        .unwrap_or_else(|| self.descriptor.fees.rate(taker_or_maker));

        let (currency, cost) = match side {
            OrderSide::Buy => (market.base.clone(), amount * rate),
            OrderSide::Sell => (market.quote.clone(), amount * rate * price),
        };
        let cost = match market.precision.price {
            Some(places) => to_places(cost, places, RoundingMode::Round),
            None => cost,
        };
        Ok(Fee::with_rate(currency, cost, rate))
    }

    /// Rounds an amount to the market's amount precision.
    pub async fn amount_to_precision(&self, symbol: &str, amount: Decimal) -> Result<Decimal> {
        let market = self.market(symbol).await?;
        Ok(round_opt(amount, market.precision.amount))
    }

    /// Rounds a price to the market's price precision.
    pub async fn price_to_precision(&self, symbol: &str, price: Decimal) -> Result<Decimal> {
        let market = self.market(symbol).await?;
        Ok(round_opt(price, market.precision.price))
    }

    /// Rounds a cost to the market's price precision.
    pub async fn cost_to_precision(&self, symbol: &str, cost: Decimal) -> Result<Decimal> {
        let market = self.market(symbol).await?;
        Ok(round_opt(cost, market.precision.price))
    }

    /// Rounds a fee to the market's price precision.
    pub async fn fee_to_precision(&self, symbol: &str, fee: Decimal) -> Result<Decimal> {
        let market = self.market(symbol).await?;
        Ok(round_opt(fee, market.precision.price))
    }

    /// Reconciles a raw balance against the cached orders.
    pub async fn reconcile_balance(&self, raw: RawBalance) -> Balance {
        let orders = self.orders.snapshot().await;
        let markets = self.market_cache.read().await.markets();
        reconcile_balance(raw, &orders, &markets)
    }
}

fn round_opt(value: Decimal, places: Option<u32>) -> Decimal {
    match places {
        Some(places) => to_places(value, places, RoundingMode::Round),
        None => value,
    }
}
