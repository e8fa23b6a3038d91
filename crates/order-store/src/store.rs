use async_trait::async_trait;
use common::OrderId;

use crate::{NewOrder, OrderRecord, Result};

/// Core trait for order store implementations.
///
/// The store owns identifier assignment and retention; this service only
/// inserts and reads. All implementations must be thread-safe (Send + Sync)
/// since one shared handle serves every concurrent request.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts a new order record.
    ///
    /// Returns the identifier assigned by the store. Every insert yields a
    /// fresh identifier; identical orders inserted twice produce two records.
    async fn insert(&self, order: NewOrder) -> Result<OrderId>;

    /// Retrieves all records for a user, most recently inserted first.
    ///
    /// A user with no orders yields an empty vector, not an error.
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<OrderRecord>>;

    /// Checks connectivity to the underlying store.
    async fn ping(&self) -> Result<()>;
}
