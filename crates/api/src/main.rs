//! Order service entry point.

use std::sync::Arc;

use broker::HttpEventPublisher;
use order_store::{OrderStore, PostgresOrderStore};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use api::config::Config;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() {
    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let prometheus_builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let metrics_handle = prometheus_builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Load configuration (deployment scripts pass the port positionally)
    let config = Config::from_env().with_port_override(std::env::args().nth(1));
    let service_id = config.service_id();

    // 4. Open the order store handle. The pool connects lazily and the
    // connectivity check is diagnostic only: an unreachable store never stops
    // the process from serving, individual requests fail on their own.
    let store =
        PostgresOrderStore::connect_lazy(&config.database_url).expect("invalid DATABASE_URL");
    match store.ping().await {
        Ok(()) => {
            tracing::info!("connected to order store");
            if let Err(err) = store.run_migrations().await {
                tracing::error!(error = %err, "order store migration failed");
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "order store connection check failed, serving anyway");
        }
    }

    // 5. Build the broker publisher and application state
    let publisher =
        HttpEventPublisher::new(config.broker_url.clone()).expect("failed to build broker client");
    let state = api::create_state(store, Arc::new(publisher), service_id.clone());

    // 6. Build the application
    let app = api::create_app(state, metrics_handle);

    // 7. Start server
    let addr = config.addr();
    tracing::info!(%addr, service = %service_id, "starting order service");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
