//! Per-adapter order cache.
//!
//! Every order-fetching path inserts what it parsed; balance reconciliation reads a
//! snapshot. Entries are never evicted.

use crate::types::{Order, OrderStatus};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Orders keyed by id, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct OrderStore {
    orders: Arc<RwLock<HashMap<String, Order>>>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces one order.
    pub async fn insert(&self, order: Order) {
        self.orders.write().await.insert(order.id.clone(), order);
    }

    /// Inserts or replaces many orders under one lock.
    pub async fn extend(&self, orders: impl IntoIterator<Item = Order>) {
        let mut guard = self.orders.write().await;
        for order in orders {
            guard.insert(order.id.clone(), order);
        }
    }

    /// Marks a cached order canceled, returning whether it was cached.
    pub async fn mark_canceled(&self, id: &str) -> bool {
        match self.orders.write().await.get_mut(id) {
            Some(order) => {
                order.status = OrderStatus::Canceled;
                true
            }
            None => false,
        }
    }

    pub async fn get(&self, id: &str) -> Option<Order> {
        self.orders.read().await.get(id).cloned()
    }

    /// Consistent copy of every cached order.
    pub async fn snapshot(&self) -> Vec<Order> {
        self.orders.read().await.values().cloned().collect()
    }

    /// Number of cached orders with status open.
    pub async fn open_count(&self) -> usize {
        self.orders
            .read()
            .await
            .values()
            .filter(|o| o.status.is_open())
            .count()
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::types::OrderSide;
    use rust_decimal_macros::dec;

    fn order(id: &str, status: OrderStatus) -> Order {
        Order::new(id, "ETH/BTC", OrderSide::Sell, 1, dec!(2), dec!(0), status)
    }

    #[tokio::test]
    async fn test_insert_replaces_by_id() {
        let store = OrderStore::new();
        store.insert(order("1", OrderStatus::Open)).await;
        store.insert(order("1", OrderStatus::Closed)).await;
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("1").await.unwrap().status, OrderStatus::Closed);
    }

    #[tokio::test]
    async fn test_open_count() {
        let store = OrderStore::new();
        store
            .extend([
                order("1", OrderStatus::Open),
                order("2", OrderStatus::Canceled),
                order("3", OrderStatus::Open),
            ])
            .await;
        assert_eq!(store.open_count().await, 2);
        assert_eq!(store.snapshot().await.len(), 3);
    }

    #[tokio::test]
    async fn test_mark_canceled_releases_open_order() {
        let store = OrderStore::new();
        store.insert(order("1", OrderStatus::Open)).await;
        assert!(store.mark_canceled("1").await);
        assert!(!store.mark_canceled("2").await);
        assert_eq!(store.open_count().await, 0);
        assert_eq!(store.get("1").await.unwrap().status, OrderStatus::Canceled);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = OrderStore::new();
        let clone = store.clone();
        clone.insert(order("9", OrderStatus::Open)).await;
        assert!(!store.is_empty().await);
    }
}
