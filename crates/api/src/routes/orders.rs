//! Order creation and lookup endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use broker::{EventPublisher, OrderCreated};
use common::ServiceId;
use order_store::{DEFAULT_SERVICE_FEE, INITIAL_STATUS, NewOrder, OrderRecord, OrderStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: OrderStore> {
    pub store: S,
    pub publisher: Arc<dyn EventPublisher>,
    pub service_id: ServiceId,
}

// -- Request types --

/// Create-order payload.
///
/// Every field is optional; absent fields flow into the record as null
/// instead of failing the request. `items` and `timestamp` are opaque and
/// never validated.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateOrderRequest {
    pub items: Option<Value>,
    pub user_id: Option<String>,
    pub timestamp: Option<Value>,
    pub payment: Option<PaymentRequest>,
}

/// Nested payment object; all fields optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PaymentRequest {
    pub method: Option<String>,
    pub subtotal: Option<Value>,
    pub total: Option<Value>,
    pub gst: Option<Value>,
    #[serde(rename = "serviceFee")]
    pub service_fee: Option<Value>,
}

// -- Response types --

#[derive(Serialize)]
pub struct CreateOrderResponse {
    pub status: &'static str,
    #[serde(rename = "orderId")]
    pub order_id: String,
    #[serde(rename = "handledBy")]
    pub handled_by: String,
}

/// A stored order as returned by the user lookup, with the store-assigned
/// identifier rendered as a string. Field names match the stored document.
#[derive(Serialize)]
pub struct UserOrderResponse {
    pub id: String,
    pub items: Option<Value>,
    pub status: String,
    #[serde(rename = "handledBy")]
    pub handled_by: String,
    pub user_id: Option<String>,
    pub payment_method: Option<String>,
    pub subtotal: Option<Value>,
    pub total: Option<Value>,
    pub gst: Option<Value>,
    pub service_fee: Value,
    pub timestamp: Option<Value>,
}

impl From<OrderRecord> for UserOrderResponse {
    fn from(record: OrderRecord) -> Self {
        Self {
            id: record.id.to_string(),
            items: record.items,
            status: record.status,
            handled_by: record.handled_by,
            user_id: record.user_id,
            payment_method: record.payment_method,
            subtotal: record.subtotal,
            total: record.total,
            gst: record.gst,
            service_fee: record.service_fee,
            timestamp: record.timestamp,
        }
    }
}

// -- Handlers --

/// POST /orders — persist a new order and announce it.
#[tracing::instrument(skip(state, req))]
pub async fn create<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<CreateOrderResponse>), ApiError> {
    let payment = req.payment.unwrap_or_default();

    let order = NewOrder {
        items: req.items.clone(),
        status: INITIAL_STATUS.to_string(),
        handled_by: state.service_id.to_string(),
        user_id: req.user_id,
        payment_method: payment.method,
        subtotal: payment.subtotal,
        total: payment.total,
        gst: payment.gst,
        service_fee: payment
            .service_fee
            .unwrap_or_else(|| Value::from(DEFAULT_SERVICE_FEE)),
        timestamp: req.timestamp,
    };

    let order_id = state.store.insert(order).await?;
    metrics::counter!("orders_created_total").increment(1);
    tracing::info!(%order_id, "order saved");

    // The store write is already committed; announcing it is best-effort and
    // detached from the response path. A broker failure is logged and dropped,
    // never retried and never rolled back.
    let publisher = state.publisher.clone();
    let envelope = OrderCreated {
        order_id: order_id.to_string(),
        items: req.items,
        origin: state.service_id.to_string(),
    }
    .into_envelope();
    tokio::spawn(async move {
        match publisher.publish(&envelope).await {
            Ok(()) => {
                metrics::counter!("order_events_published_total").increment(1);
                tracing::debug!("published ORDER_CREATED event");
            }
            Err(err) => {
                metrics::counter!("order_events_publish_failures_total").increment(1);
                tracing::warn!(error = %err, "failed to publish ORDER_CREATED event");
            }
        }
    });

    let response = CreateOrderResponse {
        status: "created",
        order_id: order_id.to_string(),
        handled_by: state.service_id.to_string(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /orders/user/:user_id — all orders for a user, newest first.
#[tracing::instrument(skip(state))]
pub async fn list_for_user<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<UserOrderResponse>>, ApiError> {
    let records = state.store.find_by_user(&user_id).await?;

    Ok(Json(
        records.into_iter().map(UserOrderResponse::from).collect(),
    ))
}
