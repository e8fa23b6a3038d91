use serde::{Deserialize, Serialize};

/// Store-assigned identifier of an order record.
///
/// Wraps the row identifier issued by the store on insert. The service never
/// mints these itself; they only come back from a successful insert, and they
/// increase in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i64);

impl OrderId {
    /// Creates an order ID from a raw row identifier.
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying row identifier.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<OrderId> for i64 {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

/// Label identifying which process instance handled a request.
///
/// Derived from the listening port, e.g. `OrderService-8001`. Included in
/// stored records, responses, and outbound event envelopes so downstream
/// services can tell instances apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(String);

impl ServiceId {
    /// Derives the service identifier from a listening port.
    pub fn from_port(port: u16) -> Self {
        Self(format!("OrderService-{port}"))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_from_i64_preserves_value() {
        let id = OrderId::from_i64(42);
        assert_eq!(id.as_i64(), 42);
    }

    #[test]
    fn order_id_displays_as_decimal_string() {
        let id = OrderId::from_i64(7);
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn order_id_serialization_roundtrip() {
        let id = OrderId::from_i64(123);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "123");
        let deserialized: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn service_id_derived_from_port() {
        let service = ServiceId::from_port(8001);
        assert_eq!(service.as_str(), "OrderService-8001");
        assert_eq!(service.to_string(), "OrderService-8001");
    }
}
