use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Topic tag announcing a newly created order.
pub const ORDER_CREATED_TOPIC: &str = "ORDER_CREATED";

/// Wire envelope accepted by the broker: a topic plus an opaque payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub topic: String,
    pub data: Value,
}

/// Payload of an `ORDER_CREATED` event.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCreated {
    /// Store-assigned identifier, rendered as a string.
    pub order_id: String,
    /// The ordered items, passed through verbatim (possibly null).
    pub items: Option<Value>,
    /// Handling-service identifier of the instance that created the order.
    pub origin: String,
}

impl OrderCreated {
    /// Wraps the payload in an `ORDER_CREATED` envelope.
    pub fn into_envelope(self) -> Envelope {
        Envelope {
            topic: ORDER_CREATED_TOPIC.to_string(),
            data: json!({
                "orderId": self.order_id,
                "items": self.items,
                "origin": self.origin,
            }),
        }
    }
}
