//! Market and currency catalog

use crate::types::{Currency, Market, TradingFees};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Loaded markets and currencies with their lookup indices.
#[derive(Debug, Clone, Default)]
pub struct MarketCache {
    /// Markets indexed by symbol (e.g., "ETH/BTC")
    pub markets: Arc<HashMap<String, Arc<Market>>>,
    /// Markets indexed by exchange-specific ID
    pub markets_by_id: HashMap<String, Arc<Market>>,
    /// Currencies indexed by code (e.g., "BTC")
    pub currencies: HashMap<String, Arc<Currency>>,
    /// Currencies indexed by exchange-specific ID
    pub currencies_by_id: HashMap<String, Arc<Currency>>,
    /// Sorted trading pair symbols
    pub symbols: Vec<String>,
    /// Sorted currency codes
    pub codes: Vec<String>,
    /// Sorted market IDs
    pub ids: Vec<String>,
    /// Whether markets have been loaded
    pub loaded: bool,
}

impl MarketCache {
    /// Replaces the catalog.
    ///
    /// Markets without maker/taker rates take them from `fees`. A market whose symbol or id
    /// repeats an earlier one is skipped. Currencies are derived from the markets; an
    /// explicit listing, when given, is merged on top and wins per code.
    pub fn set_markets(
        &mut self,
        markets: Vec<Market>,
        currencies: Option<Vec<Currency>>,
        fees: TradingFees,
        exchange_id: &str,
    ) -> Arc<HashMap<String, Arc<Market>>> {
        let mut by_symbol = HashMap::with_capacity(markets.len());
        let mut by_id = HashMap::with_capacity(markets.len());
        let mut kept = Vec::with_capacity(markets.len());
        for mut market in markets {
            if by_symbol.contains_key(&market.symbol) || by_id.contains_key(&market.id) {
                warn!(
                    exchange = exchange_id,
                    symbol = %market.symbol,
                    id = %market.id,
                    "Duplicate market skipped"
                );
                continue;
            }
            market.maker.get_or_insert(fees.maker);
            market.taker.get_or_insert(fees.taker);
            let market = Arc::new(market);
            by_symbol.insert(market.symbol.clone(), Arc::clone(&market));
            by_id.insert(market.id.clone(), Arc::clone(&market));
            kept.push(market);
        }
        let markets = kept;
        self.markets_by_id = by_id;

        self.symbols = by_symbol.keys().cloned().collect();
        self.symbols.sort();
        self.ids = self.markets_by_id.keys().cloned().collect();
        self.ids.sort();
        self.markets = Arc::new(by_symbol);

        let mut merged: HashMap<String, Arc<Currency>> = derive_currencies(&markets)
            .into_iter()
            .map(|c| (c.code.clone(), Arc::new(c)))
            .collect();
        if let Some(explicit) = currencies {
            for currency in explicit {
                merged.insert(currency.code.clone(), Arc::new(currency));
            }
        }

        self.currencies_by_id = merged
            .values()
            .map(|c| (c.id.clone(), Arc::clone(c)))
            .collect();
        self.codes = merged.keys().cloned().collect();
        self.codes.sort();
        self.currencies = merged;

        self.loaded = true;
        info!(
            "Loaded {} markets and {} currencies for {}",
            self.markets.len(),
            self.currencies.len(),
            exchange_id
        );

        Arc::clone(&self.markets)
    }

    /// Whether a catalog is present.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Shared handle to the markets by symbol.
    pub fn markets(&self) -> Arc<HashMap<String, Arc<Market>>> {
        Arc::clone(&self.markets)
    }

    /// Number of markets.
    pub fn market_count(&self) -> usize {
        self.markets.len()
    }

    pub fn get_market(&self, symbol: &str) -> Option<Arc<Market>> {
        self.markets.get(symbol).cloned()
    }

    pub fn get_market_by_id(&self, id: &str) -> Option<Arc<Market>> {
        self.markets_by_id.get(id).cloned()
    }

    pub fn get_currency(&self, code: &str) -> Option<Arc<Currency>> {
        self.currencies.get(code).cloned()
    }

    pub fn get_currency_by_id(&self, id: &str) -> Option<Arc<Currency>> {
        self.currencies_by_id.get(id).cloned()
    }
}

/// Derives one currency per code from the markets, sorted by code.
///
/// All base references are considered before quote references. Each code keeps the
/// highest precision seen; on a tie the first occurrence wins.
pub fn derive_currencies(markets: &[Arc<Market>]) -> Vec<Currency> {
    let bases = markets
        .iter()
        .map(|m| (&m.base_id, &m.base, m.base_currency_precision()));
    let quotes = markets
        .iter()
        .map(|m| (&m.quote_id, &m.quote, m.quote_currency_precision()));

    let mut best: HashMap<&str, (&str, u32)> = HashMap::new();
    for (id, code, precision) in bases.chain(quotes) {
        let id = if id.is_empty() { code } else { id };
        best.entry(code.as_str())
            .and_modify(|current| {
                if precision > current.1 {
                    *current = (id.as_str(), precision);
                }
            })
            .or_insert((id.as_str(), precision));
    }

    let mut currencies: Vec<Currency> = best
        .into_iter()
        .map(|(code, (id, precision))| Currency::derived(id, code, precision))
        .collect();
    currencies.sort_by(|a, b| a.code.cmp(&b.code));
    currencies
}

/// Maps legacy currency codes to their common names.
pub fn common_currency_code(code: &str, substitute: bool) -> String {
    if !substitute {
        return code.to_string();
    }
    match code {
        "XBT" => "BTC",
        "BCC" => "BCH",
        "DRK" => "DASH",
        other => other,
    }
    .to_string()
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn market(id: &str, base: &str, quote: &str, amount: u32, price: u32) -> Market {
        let mut m = Market::new(id, base, quote, base, quote);
        m.precision.amount = Some(amount);
        m.precision.price = Some(price);
        m
    }

    #[test]
    fn test_set_markets_builds_indices() {
        let mut cache = MarketCache::default();
        let markets = vec![market("LTCBTC", "LTC", "BTC", 2, 6), market("ETHBTC", "ETH", "BTC", 3, 6)];
        let loaded = cache.set_markets(
            markets,
            None,
            TradingFees::new(dec!(0.001), dec!(0.002)),
            "test",
        );

        assert!(cache.is_loaded());
        assert_eq!(loaded.len(), 2);
        assert_eq!(cache.symbols, vec!["ETH/BTC", "LTC/BTC"]);
        assert_eq!(cache.ids, vec!["ETHBTC", "LTCBTC"]);
        assert_eq!(cache.codes, vec!["BTC", "ETH", "LTC"]);
        assert_eq!(cache.get_market_by_id("ETHBTC").unwrap().symbol, "ETH/BTC");

        let eth = cache.get_market("ETH/BTC").unwrap();
        assert_eq!(eth.maker, Some(dec!(0.001)));
        assert_eq!(eth.taker, Some(dec!(0.002)));
    }

    #[test]
    fn test_duplicate_markets_keep_indices_consistent() {
        let mut cache = MarketCache::default();
        let markets = vec![
            market("BCCBTC", "BCH", "BTC", 3, 6),
            market("BCHBTC", "BCH", "BTC", 2, 5),
            market("BCCBTC", "BCC", "ETH", 2, 5),
            market("ETHBTC", "ETH", "BTC", 3, 6),
        ];
        let loaded = cache.set_markets(markets, None, TradingFees::new(dec!(0), dec!(0)), "test");

        assert_eq!(loaded.len(), 2);
        assert_eq!(cache.symbols, vec!["BCH/BTC", "ETH/BTC"]);
        assert_eq!(cache.ids, vec!["BCCBTC", "ETHBTC"]);
        assert_eq!(cache.markets_by_id.len(), cache.markets.len());
        assert_eq!(cache.get_market("BCH/BTC").unwrap().id, "BCCBTC");
        assert!(cache.get_market_by_id("BCHBTC").is_none());
        assert_eq!(cache.codes, vec!["BCH", "BTC", "ETH"]);
    }

    #[test]
    fn test_parser_fees_are_kept() {
        let mut cache = MarketCache::default();
        let mut m = market("ETHBTC", "ETH", "BTC", 3, 6);
        m.taker = Some(dec!(0.003));
        cache.set_markets(vec![m], None, TradingFees::new(dec!(0), dec!(0.0025)), "test");
        let eth = cache.get_market("ETH/BTC").unwrap();
        assert_eq!(eth.taker, Some(dec!(0.003)));
        assert_eq!(eth.maker, Some(dec!(0)));
    }

    #[test]
    fn test_derived_precision_is_max() {
        let markets: Vec<Arc<Market>> = vec![
            Arc::new(market("ETHBTC", "ETH", "BTC", 3, 6)),
            Arc::new(market("BTCUSDT", "BTC", "USDT", 6, 2)),
        ];
        let currencies = derive_currencies(&markets);
        let btc = currencies.iter().find(|c| c.code == "BTC").unwrap();
        assert_eq!(btc.precision, 6);
        let usdt = currencies.iter().find(|c| c.code == "USDT").unwrap();
        assert_eq!(usdt.precision, 2);
    }

    #[test]
    fn test_derived_tie_keeps_first_id() {
        let mut first = market("A", "XRB", "BTC", 4, 8);
        first.base_id = "xrb-first".to_string();
        let mut second = market("B", "XRB", "ETH", 4, 8);
        second.base_id = "xrb-second".to_string();
        let currencies = derive_currencies(&[Arc::new(first), Arc::new(second)]);
        let xrb = currencies.iter().find(|c| c.code == "XRB").unwrap();
        assert_eq!(xrb.id, "xrb-first");
    }

    #[test]
    fn test_explicit_currencies_win() {
        let mut cache = MarketCache::default();
        let mut kcs = Currency::derived("KCS", "KCS", 4);
        kcs.name = Some("KuCoin Shares".to_string());
        cache.set_markets(
            vec![market("KCS-BTC", "KCS", "BTC", 8, 8)],
            Some(vec![kcs]),
            TradingFees::default(),
            "kucoin",
        );
        let kcs = cache.get_currency("KCS").unwrap();
        assert_eq!(kcs.precision, 4);
        assert_eq!(kcs.name.as_deref(), Some("KuCoin Shares"));
        assert!(cache.get_currency("BTC").is_some());
        assert!(cache.get_currency_by_id("KCS").is_some());
    }

    #[test]
    fn test_common_currency_code() {
        assert_eq!(common_currency_code("XBT", true), "BTC");
        assert_eq!(common_currency_code("BCC", true), "BCH");
        assert_eq!(common_currency_code("DRK", true), "DASH");
        assert_eq!(common_currency_code("ETH", true), "ETH");
        assert_eq!(common_currency_code("XBT", false), "XBT");
    }

    proptest! {
        #[test]
        fn prop_symbols_are_base_slash_quote(
            pairs in proptest::collection::vec(("[A-Z]{2,5}", "[A-Z]{2,5}", 0u32..10, 0u32..10), 1..20)
        ) {
            let markets: Vec<Market> = pairs
                .iter()
                .map(|(b, q, a, p)| market(&format!("{b}{q}"), b, q, *a, *p))
                .collect();
            let mut cache = MarketCache::default();
            cache.set_markets(markets.clone(), None, TradingFees::default(), "prop");

            for m in cache.markets.values() {
                prop_assert_eq!(&m.symbol, &format!("{}/{}", m.base, m.quote));
            }
            let mut deduped = cache.symbols.clone();
            deduped.dedup();
            prop_assert_eq!(deduped.len(), cache.symbols.len());

            for currency in cache.currencies.values() {
                let expected = markets
                    .iter()
                    .flat_map(|m| {
                        let base = (m.base == currency.code).then(|| m.base_currency_precision());
                        let quote = (m.quote == currency.code).then(|| m.quote_currency_precision());
                        base.into_iter().chain(quote)
                    })
                    .max()
                    .unwrap();
                prop_assert_eq!(currency.precision, expected);
            }
        }
    }
}
