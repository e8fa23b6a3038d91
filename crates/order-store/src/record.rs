use common::OrderId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status label assigned to every freshly created order.
///
/// This service never transitions it; status changes, if any, happen in
/// other services.
pub const INITIAL_STATUS: &str = "Pending";

/// Service fee applied when the payment object carries none.
pub const DEFAULT_SERVICE_FEE: i64 = 25;

/// An order record as shaped by the create operation, before the store has
/// assigned it an identifier.
///
/// The payload fields are deliberately loose: `items`, the payment amounts,
/// and `timestamp` are caller-supplied JSON stored verbatim, never parsed or
/// coerced. Absent fields persist as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub items: Option<Value>,
    pub status: String,
    pub handled_by: String,
    pub user_id: Option<String>,
    pub payment_method: Option<String>,
    pub subtotal: Option<Value>,
    pub total: Option<Value>,
    pub gst: Option<Value>,
    pub service_fee: Value,
    pub timestamp: Option<Value>,
}

/// A persisted order record, including its store-assigned identifier.
///
/// Immutable from this service's perspective: records are only ever inserted
/// and read back, never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub items: Option<Value>,
    pub status: String,
    pub handled_by: String,
    pub user_id: Option<String>,
    pub payment_method: Option<String>,
    pub subtotal: Option<Value>,
    pub total: Option<Value>,
    pub gst: Option<Value>,
    pub service_fee: Value,
    pub timestamp: Option<Value>,
}

impl OrderRecord {
    /// Attaches a store-assigned identifier to a new order.
    pub fn from_new(id: OrderId, order: NewOrder) -> Self {
        Self {
            id,
            items: order.items,
            status: order.status,
            handled_by: order.handled_by,
            user_id: order.user_id,
            payment_method: order.payment_method,
            subtotal: order.subtotal,
            total: order.total,
            gst: order.gst,
            service_fee: order.service_fee,
            timestamp: order.timestamp,
        }
    }
}
