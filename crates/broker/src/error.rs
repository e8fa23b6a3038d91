use thiserror::Error;

/// Errors that can occur when publishing to the broker.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// The outbound request failed or the broker answered with a
    /// non-success status.
    #[error("Broker request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The broker refused the event.
    #[error("Broker rejected event: {0}")]
    Rejected(String),
}

/// Result type for broker operations.
pub type Result<T> = std::result::Result<T, BrokerError>;
