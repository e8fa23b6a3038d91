use async_trait::async_trait;
use common::OrderId;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use crate::{
    NewOrder, OrderRecord, Result,
    store::OrderStore,
};

/// PostgreSQL-backed order store.
#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Creates a store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a store with a lazily-established pool.
    ///
    /// No connection is attempted here, so an unreachable database does not
    /// abort process startup; individual operations fail instead.
    pub fn connect_lazy(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_lazy(database_url)?;
        Ok(Self { pool })
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_record(row: PgRow) -> Result<OrderRecord> {
        Ok(OrderRecord {
            id: OrderId::from_i64(row.try_get("id")?),
            items: row.try_get("items")?,
            status: row.try_get("status")?,
            handled_by: row.try_get("handled_by")?,
            user_id: row.try_get("user_id")?,
            payment_method: row.try_get("payment_method")?,
            subtotal: row.try_get("subtotal")?,
            total: row.try_get("total")?,
            gst: row.try_get("gst")?,
            service_fee: row.try_get("service_fee")?,
            timestamp: row.try_get("timestamp")?,
        })
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn insert(&self, order: NewOrder) -> Result<OrderId> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO orders
                (items, status, handled_by, user_id, payment_method,
                 subtotal, total, gst, service_fee, timestamp)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&order.items)
        .bind(&order.status)
        .bind(&order.handled_by)
        .bind(&order.user_id)
        .bind(&order.payment_method)
        .bind(&order.subtotal)
        .bind(&order.total)
        .bind(&order.gst)
        .bind(&order.service_fee)
        .bind(&order.timestamp)
        .fetch_one(&self.pool)
        .await?;

        let id = OrderId::from_i64(id);
        tracing::debug!(order_id = %id, "inserted order record");
        Ok(id)
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<OrderRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, items, status, handled_by, user_id, payment_method,
                   subtotal, total, gst, service_fee, timestamp
            FROM orders
            WHERE user_id = $1
            ORDER BY id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_record).collect()
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
