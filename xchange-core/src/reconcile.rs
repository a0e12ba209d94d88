//! Balance reconciliation against the local order cache.
//!
//! Exchanges that do not report a currency's `used` amount get it computed from the cached
//! open orders: remaining amounts of sells in the base currency and the cost of buys in the
//! quote currency. When the exchange also reports how many orders it has open, the cache is
//! only trusted if its own open count agrees.

use crate::types::{Balance, BalanceEntry, Market, Order, OrderSide, RawBalanceEntry};
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// A balance payload before reconciliation.
#[derive(Debug, Clone, Default)]
pub struct RawBalance {
    /// Per-currency figures, keyed by canonical code.
    pub entries: Vec<(String, RawBalanceEntry)>,
    /// Open-order count reported by the exchange.
    pub open_orders: Option<usize>,
    /// Raw response.
    pub info: Value,
}

impl RawBalance {
    pub fn new(info: Value) -> Self {
        Self {
            info,
            ..Self::default()
        }
    }

    /// Adds one currency.
    pub fn push(&mut self, code: impl Into<String>, entry: RawBalanceEntry) {
        self.entries.push((code.into(), entry));
    }
}

/// Amount of `currency` locked in open orders.
pub fn currency_used_on_open_orders(
    orders: &[Order],
    markets: &HashMap<String, Arc<Market>>,
    currency: &str,
) -> Decimal {
    orders
        .iter()
        .filter(|order| order.status.is_open())
        .filter_map(|order| {
            let Some(market) = markets.get(&order.symbol) else {
                debug!(symbol = %order.symbol, "Cached order has no market, skipping");
                return None;
            };
            match order.side {
                OrderSide::Sell if market.base == currency => Some(order.remaining),
                OrderSide::Buy if market.quote == currency => Some(
                    order
                        .cost
                        .unwrap_or_else(|| order.price.unwrap_or_default() * order.remaining),
                ),
                _ => None,
            }
        })
        .sum()
}

/// Turns a raw payload into a [`Balance`], filling missing `used` figures.
///
/// A reported `used` is trusted. Otherwise `used` comes from the cache, unless the exchange's
/// open order count disagrees with the cache, in which case it stays zero.
pub fn reconcile_balance(
    raw: RawBalance,
    orders: &[Order],
    markets: &HashMap<String, Arc<Market>>,
) -> Balance {
    let cached_open = orders.iter().filter(|o| o.status.is_open()).count();
    let cache_usable = match raw.open_orders {
        Some(reported) if reported != cached_open => {
            warn!(
                reported_open_orders = reported,
                cached_open_orders = cached_open,
                "Open order count mismatch, leaving unreported used balances at zero"
            );
            false
        }
        _ => true,
    };

    let mut balance = Balance::new();
    for (code, entry) in raw.entries {
        let used = match entry.used {
            Some(used) => used,
            None if cache_usable => currency_used_on_open_orders(orders, markets, &code),
            None => Decimal::ZERO,
        };
        balance.set(code, BalanceEntry::new(entry.free, used));
    }
    balance.info = raw.info;
    balance
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::types::OrderStatus;
    use rust_decimal_macros::dec;

    fn markets() -> HashMap<String, Arc<Market>> {
        let eth = Market::new("ETHBTC", "ETH", "BTC", "ETH", "BTC");
        HashMap::from([(eth.symbol.clone(), Arc::new(eth))])
    }

    fn sell(id: &str, amount: Decimal, filled: Decimal) -> Order {
        Order::new(id, "ETH/BTC", OrderSide::Sell, 0, amount, filled, OrderStatus::Open)
    }

    fn buy(id: &str, amount: Decimal, price: Decimal, cost: Option<Decimal>) -> Order {
        let mut order = Order::new(id, "ETH/BTC", OrderSide::Buy, 0, amount, dec!(0), OrderStatus::Open);
        order.price = Some(price);
        order.cost = cost;
        order
    }

    fn raw(code: &str, free: Decimal, open_orders: Option<usize>) -> RawBalance {
        let mut raw = RawBalance::default();
        raw.push(code, RawBalanceEntry::free_only(free));
        raw.open_orders = open_orders;
        raw
    }

    #[test]
    fn test_matching_count_uses_cache() {
        let orders = vec![sell("1", dec!(5), dec!(2))];
        let balance = reconcile_balance(raw("ETH", dec!(10), Some(1)), &orders, &markets());
        let eth = balance.get("ETH").unwrap();
        assert_eq!(eth.used, dec!(3));
        assert_eq!(eth.total, dec!(13));
        assert_eq!(balance.used["ETH"], dec!(3));
    }

    #[test]
    fn test_mismatched_count_leaves_used_zero() {
        let orders = vec![sell("1", dec!(5), dec!(2))];
        let balance = reconcile_balance(raw("ETH", dec!(10), Some(4)), &orders, &markets());
        let eth = balance.get("ETH").unwrap();
        assert_eq!(eth.used, dec!(0));
        assert_eq!(eth.total, dec!(10));
    }

    #[test]
    fn test_no_count_uses_cache() {
        let orders = vec![
            buy("1", dec!(2), dec!(0.05), None),
            buy("2", dec!(1), dec!(0.04), Some(dec!(0.041))),
        ];
        let balance = reconcile_balance(raw("BTC", dec!(1), None), &orders, &markets());
        assert_eq!(balance.get("BTC").unwrap().used, dec!(0.141));
    }

    #[test]
    fn test_reported_used_is_trusted() {
        let mut raw = RawBalance::default();
        raw.push("ETH", RawBalanceEntry::reported(dec!(1), dec!(0.5)));
        let orders = vec![sell("1", dec!(5), dec!(0))];
        let balance = reconcile_balance(raw, &orders, &markets());
        assert_eq!(balance.get("ETH").unwrap().used, dec!(0.5));
        assert_eq!(balance.get("ETH").unwrap().total, dec!(1.5));
    }

    #[test]
    fn test_every_unreported_used_goes_through_the_count_check() {
        let mut raw = raw("ETH", dec!(2), Some(3));
        raw.push("BTC", RawBalanceEntry::free_only(dec!(1)));
        let orders = vec![
            sell("1", dec!(5), dec!(0)),
            buy("2", dec!(1), dec!(0.04), None),
        ];
        let balance = reconcile_balance(raw, &orders, &markets());
        assert_eq!(balance.used["ETH"], dec!(0));
        assert_eq!(balance.used["BTC"], dec!(0));
        assert_eq!(balance.total["ETH"], dec!(2));
    }

    #[test]
    fn test_closed_and_unknown_orders_ignored() {
        let mut closed = sell("1", dec!(5), dec!(0));
        closed.status = OrderStatus::Closed;
        let mut orphan = sell("2", dec!(5), dec!(0));
        orphan.symbol = "XRP/BTC".to_string();
        let used = currency_used_on_open_orders(&[closed, orphan], &markets(), "ETH");
        assert_eq!(used, dec!(0));
    }
}
