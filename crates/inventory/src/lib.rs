//! Inventory reservation manager.
//!
//! Reservations are all-or-nothing across a set of lines: either every line
//! has sufficient available quantity and all of them are held under one
//! token, or nothing is mutated. `reserved <= on_hand` holds at all times,
//! including under concurrent reservation attempts for the same product.
//! Releasing a token is idempotent compensation: it restores exactly the
//! quantities that token held, and a second release is a no-op.

pub mod error;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use common::{ProductId, ReservationToken};
use serde::{Deserialize, Serialize};

pub use error::InventoryError;
pub use memory::InMemoryInventory;
pub use postgres::PostgresInventory;

/// Stock bookkeeping for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    /// The product this record tracks.
    pub product: ProductId,
    /// Total quantity on hand.
    pub on_hand: u32,
    /// Quantity currently held by reservations. Never exceeds `on_hand`.
    pub reserved: u32,
}

impl InventoryRecord {
    /// Quantity still available for reservation.
    pub fn available(&self) -> u32 {
        self.on_hand.saturating_sub(self.reserved)
    }
}

/// One line of a reservation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationLine {
    /// The product to hold.
    pub product: ProductId,
    /// Quantity to hold.
    pub quantity: u32,
}

/// Inventory operations used by order creation.
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Atomically reserves every line, or nothing.
    ///
    /// Fails with [`InventoryError::InsufficientStock`] naming the first
    /// product that cannot be covered, leaving all records untouched.
    async fn reserve_all(
        &self,
        lines: &[ReservationLine],
    ) -> Result<ReservationToken, InventoryError>;

    /// Releases the hold identified by `token`.
    ///
    /// Restores exactly the quantities that token reserved. Safe to call on
    /// an unknown or already-released token.
    async fn release(&self, token: &ReservationToken) -> Result<(), InventoryError>;

    /// Returns the record for a product, if one exists.
    async fn stock_level(
        &self,
        product: &ProductId,
    ) -> Result<Option<InventoryRecord>, InventoryError>;

    /// Sets the on-hand quantity for a product, creating the record if
    /// needed. Existing reservations are preserved; on-hand never drops
    /// below the currently reserved quantity.
    async fn set_stock(&self, product: &ProductId, on_hand: u32) -> Result<(), InventoryError>;
}

/// Folds request lines into one quantity per product.
///
/// A request may legitimately name the same product twice; availability must
/// be checked against the combined quantity. The result is ordered by product
/// so multi-row backends touch rows in a fixed order.
pub(crate) fn merge_lines(
    lines: &[ReservationLine],
) -> std::collections::BTreeMap<ProductId, u32> {
    let mut merged = std::collections::BTreeMap::new();
    for line in lines {
        *merged.entry(line.product.clone()).or_insert(0) += line.quantity;
    }
    merged
}
