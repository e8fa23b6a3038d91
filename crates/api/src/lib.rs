//! HTTP API server for the order service.
//!
//! Accepts order submissions, persists them through the order store, and
//! announces each creation to the message broker, with structured logging
//! (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use broker::EventPublisher;
use common::ServiceId;
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::OrderStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: OrderStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check::<S>))
        .route("/orders", post(routes::orders::create::<S>))
        .route(
            "/orders/user/{user_id}",
            get(routes::orders::list_for_user::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the shared application state.
pub fn create_state<S: OrderStore>(
    store: S,
    publisher: Arc<dyn EventPublisher>,
    service_id: ServiceId,
) -> Arc<AppState<S>> {
    Arc::new(AppState {
        store,
        publisher,
        service_id,
    })
}
