//! Shared identifier types used across the order service crates.

pub mod types;

pub use types::{OrderId, ServiceId};
