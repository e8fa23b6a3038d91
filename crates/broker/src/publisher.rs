use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::envelope::Envelope;
use crate::error::{BrokerError, Result};

// A slow broker must never hold up the service, so the client carries its
// own short timeouts rather than inheriting reqwest defaults.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Trait for publishing event envelopes to the broker.
///
/// A publish is a single attempt: implementations must not retry, and the
/// caller decides whether a failure matters (for order creation it never
/// does).
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes one envelope.
    async fn publish(&self, envelope: &Envelope) -> Result<()>;
}

/// HTTP publisher posting envelopes to the broker endpoint.
#[derive(Debug, Clone)]
pub struct HttpEventPublisher {
    client: reqwest::Client,
    url: String,
}

impl HttpEventPublisher {
    /// Creates a publisher for the given broker URL.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Returns the broker endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl EventPublisher for HttpEventPublisher {
    async fn publish(&self, envelope: &Envelope) -> Result<()> {
        // The response body is not consumed; only success/failure matters.
        self.client
            .post(&self.url)
            .json(envelope)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct InMemoryBrokerState {
    published: Vec<Envelope>,
    fail_on_publish: bool,
}

/// In-memory publisher for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBroker {
    state: Arc<RwLock<InMemoryBrokerState>>,
}

impl InMemoryBroker {
    /// Creates a new in-memory broker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the broker to fail on subsequent publish calls.
    pub fn set_fail_on_publish(&self, fail: bool) {
        self.state.write().unwrap().fail_on_publish = fail;
    }

    /// Returns the number of envelopes published so far.
    pub fn published_count(&self) -> usize {
        self.state.read().unwrap().published.len()
    }

    /// Returns a copy of every envelope published so far.
    pub fn published(&self) -> Vec<Envelope> {
        self.state.read().unwrap().published.clone()
    }
}

#[async_trait]
impl EventPublisher for InMemoryBroker {
    async fn publish(&self, envelope: &Envelope) -> Result<()> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_publish {
            return Err(BrokerError::Rejected("broker unavailable".to_string()));
        }

        state.published.push(envelope.clone());
        Ok(())
    }
}
