//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container for efficiency.
//! Run with:
//!
//! ```bash
//! cargo test -p order-store --test postgres_integration -- --test-threads=1
//! ```

use std::sync::Arc;

use order_store::{
    DEFAULT_SERVICE_FEE, INITIAL_STATUS, NewOrder, OrderStore, PostgresOrderStore,
};
use serde_json::json;
use sqlx::PgPool;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            // Create a temporary pool just for migrations
            let temp_pool = PgPool::connect(&connection_string).await.unwrap();

            sqlx::raw_sql(include_str!(
                "../../../migrations/001_create_orders_table.sql"
            ))
            .execute(&temp_pool)
            .await
            .unwrap();

            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a fresh store with its own pool and cleared tables
async fn get_test_store() -> PostgresOrderStore {
    let info = get_container_info().await;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    sqlx::query("TRUNCATE TABLE orders RESTART IDENTITY")
        .execute(&pool)
        .await
        .unwrap();

    PostgresOrderStore::new(pool)
}

fn sample_order(user_id: &str, items: serde_json::Value) -> NewOrder {
    NewOrder {
        items: Some(items),
        status: INITIAL_STATUS.to_string(),
        handled_by: "OrderService-8001".to_string(),
        user_id: Some(user_id.to_string()),
        payment_method: Some("card".to_string()),
        subtotal: Some(json!(100)),
        total: Some(json!(110)),
        gst: Some(json!(10)),
        service_fee: json!(DEFAULT_SERVICE_FEE),
        timestamp: Some(json!("2024-01-01T00:00:00Z")),
    }
}

#[tokio::test]
async fn insert_and_find_roundtrip() {
    let store = get_test_store().await;

    let id = store
        .insert(sample_order("u1", json!(["pizza"])))
        .await
        .unwrap();

    let records = store.find_by_user("u1").await.unwrap();
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.id, id);
    assert_eq!(record.items, Some(json!(["pizza"])));
    assert_eq!(record.status, "Pending");
    assert_eq!(record.handled_by, "OrderService-8001");
    assert_eq!(record.user_id.as_deref(), Some("u1"));
    assert_eq!(record.payment_method.as_deref(), Some("card"));
    assert_eq!(record.subtotal, Some(json!(100)));
    assert_eq!(record.total, Some(json!(110)));
    assert_eq!(record.gst, Some(json!(10)));
    assert_eq!(record.service_fee, json!(25));
    assert_eq!(record.timestamp, Some(json!("2024-01-01T00:00:00Z")));
}

#[tokio::test]
async fn identical_orders_get_distinct_ids() {
    let store = get_test_store().await;

    let order = sample_order("u1", json!(["pizza"]));
    let first = store.insert(order.clone()).await.unwrap();
    let second = store.insert(order).await.unwrap();

    assert_ne!(first, second);

    let records = store.find_by_user("u1").await.unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn find_by_user_orders_newest_first() {
    let store = get_test_store().await;

    store.insert(sample_order("u1", json!(["a"]))).await.unwrap();
    store.insert(sample_order("u1", json!(["b"]))).await.unwrap();
    store.insert(sample_order("u2", json!(["c"]))).await.unwrap();

    let records = store.find_by_user("u1").await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].items, Some(json!(["b"])));
    assert_eq!(records[1].items, Some(json!(["a"])));
    assert!(records[0].id > records[1].id);
}

#[tokio::test]
async fn find_by_unknown_user_returns_empty() {
    let store = get_test_store().await;

    let records = store.find_by_user("nobody").await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn null_fields_survive_roundtrip() {
    let store = get_test_store().await;

    let order = NewOrder {
        items: None,
        status: INITIAL_STATUS.to_string(),
        handled_by: "OrderService-8001".to_string(),
        user_id: Some("u1".to_string()),
        payment_method: None,
        subtotal: None,
        total: None,
        gst: None,
        service_fee: json!(DEFAULT_SERVICE_FEE),
        timestamp: None,
    };
    store.insert(order).await.unwrap();

    let records = store.find_by_user("u1").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].items, None);
    assert_eq!(records[0].payment_method, None);
    assert_eq!(records[0].subtotal, None);
    assert_eq!(records[0].service_fee, json!(25));
    assert_eq!(records[0].timestamp, None);
}

#[tokio::test]
async fn ping_succeeds_against_live_store() {
    let store = get_test_store().await;
    assert!(store.ping().await.is_ok());
}
