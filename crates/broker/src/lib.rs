//! Notification adapter for the message broker.
//!
//! The broker is an opaque HTTP endpoint accepting topic-tagged event
//! envelopes; who consumes an event is not this service's concern. Publishing
//! is strictly best-effort: one attempt, bounded by the client's own timeout,
//! no retry and no delivery guarantee.

pub mod envelope;
pub mod error;
pub mod publisher;

pub use envelope::{Envelope, ORDER_CREATED_TOPIC, OrderCreated};
pub use error::{BrokerError, Result};
pub use publisher::{EventPublisher, HttpEventPublisher, InMemoryBroker};
