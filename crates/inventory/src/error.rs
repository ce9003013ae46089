//! Inventory error types.

use common::ProductId;
use thiserror::Error;

/// Errors from inventory operations.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// A line asked for more than is available; nothing was reserved.
    #[error("insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: ProductId,
        requested: u32,
        available: u32,
    },

    /// Database error from the Postgres backend.
    #[error("inventory database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for inventory results.
pub type Result<T> = std::result::Result<T, InventoryError>;
