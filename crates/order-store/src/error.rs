//! Order store error types.

use common::OrderId;
use thiserror::Error;

/// Errors from order persistence.
#[derive(Debug, Error)]
pub enum OrderStoreError {
    /// No order exists with this ID.
    #[error("order {0} not found")]
    NotFound(OrderId),

    /// An order with this ID already exists.
    #[error("order {0} already exists")]
    Duplicate(OrderId),

    /// The store is unavailable (also produced by the in-memory failure
    /// knob in tests).
    #[error("order store unavailable: {0}")]
    Unavailable(String),

    /// Database error from the Postgres backend.
    #[error("order database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored row could not be (de)serialized.
    #[error("order serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
