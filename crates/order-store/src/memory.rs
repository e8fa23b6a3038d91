use std::sync::Arc;

use async_trait::async_trait;
use common::OrderId;
use tokio::sync::RwLock;

use crate::{NewOrder, OrderRecord, Result, store::OrderStore};

/// In-memory order store implementation for testing.
///
/// Assigns sequential identifiers starting at 1 and provides the same
/// interface as the PostgreSQL implementation.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<Vec<OrderRecord>>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of records stored.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Clears all records.
    pub async fn clear(&self) {
        self.orders.write().await.clear();
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: NewOrder) -> Result<OrderId> {
        let mut store = self.orders.write().await;
        // Records are never deleted, so the next identifier is just len + 1.
        let id = OrderId::from_i64(store.len() as i64 + 1);
        store.push(OrderRecord::from_new(id, order));
        Ok(id)
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<OrderRecord>> {
        let store = self.orders.read().await;
        Ok(store
            .iter()
            .rev()
            .filter(|record| record.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DEFAULT_SERVICE_FEE, INITIAL_STATUS};
    use serde_json::json;

    fn order_for(user_id: &str, items: serde_json::Value) -> NewOrder {
        NewOrder {
            items: Some(items),
            status: INITIAL_STATUS.to_string(),
            handled_by: "OrderService-8001".to_string(),
            user_id: Some(user_id.to_string()),
            payment_method: None,
            subtotal: None,
            total: None,
            gst: None,
            service_fee: json!(DEFAULT_SERVICE_FEE),
            timestamp: None,
        }
    }

    #[tokio::test]
    async fn insert_assigns_distinct_increasing_ids() {
        let store = InMemoryOrderStore::new();

        let first = store.insert(order_for("u1", json!(["pizza"]))).await.unwrap();
        let second = store.insert(order_for("u1", json!(["pizza"]))).await.unwrap();

        assert_ne!(first, second);
        assert!(second > first);
        assert_eq!(store.order_count().await, 2);
    }

    #[tokio::test]
    async fn find_by_user_returns_newest_first() {
        let store = InMemoryOrderStore::new();

        store.insert(order_for("u1", json!(["a"]))).await.unwrap();
        store.insert(order_for("u1", json!(["b"]))).await.unwrap();
        store.insert(order_for("u2", json!(["c"]))).await.unwrap();

        let records = store.find_by_user("u1").await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].items, Some(json!(["b"])));
        assert_eq!(records[1].items, Some(json!(["a"])));
        assert!(records[0].id > records[1].id);
    }

    #[tokio::test]
    async fn find_by_unknown_user_returns_empty() {
        let store = InMemoryOrderStore::new();
        let records = store.find_by_user("nobody").await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn ping_succeeds() {
        let store = InMemoryOrderStore::new();
        assert!(store.ping().await.is_ok());
    }
}
