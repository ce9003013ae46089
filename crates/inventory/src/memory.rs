//! In-memory inventory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{ProductId, ReservationToken};

use crate::{
    InventoryError, InventoryRecord, InventoryService, ReservationLine, merge_lines,
};

#[derive(Debug, Default)]
struct InMemoryInventoryState {
    records: HashMap<ProductId, InventoryRecord>,
    reservations: HashMap<ReservationToken, Vec<ReservationLine>>,
}

/// In-memory inventory for tests and local runs.
///
/// A single write lock covers every reservation attempt, so concurrent
/// requests for the same product serialize and the check-then-apply is
/// atomic across the whole line set.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventory {
    state: Arc<RwLock<InMemoryInventoryState>>,
}

impl InMemoryInventory {
    /// Creates a new empty in-memory inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of outstanding reservations.
    pub fn reservation_count(&self) -> usize {
        self.state.read().unwrap().reservations.len()
    }
}

#[async_trait]
impl InventoryService for InMemoryInventory {
    async fn reserve_all(
        &self,
        lines: &[ReservationLine],
    ) -> Result<ReservationToken, InventoryError> {
        let merged = merge_lines(lines);
        let mut state = self.state.write().unwrap();

        // Check every line before mutating any record.
        for (product, quantity) in &merged {
            let available = state
                .records
                .get(product)
                .map(InventoryRecord::available)
                .unwrap_or(0);
            if available < *quantity {
                return Err(InventoryError::InsufficientStock {
                    product: product.clone(),
                    requested: *quantity,
                    available,
                });
            }
        }

        for (product, quantity) in &merged {
            if let Some(record) = state.records.get_mut(product) {
                record.reserved += quantity;
            }
        }

        let token = ReservationToken::new();
        let held = merged
            .into_iter()
            .map(|(product, quantity)| ReservationLine { product, quantity })
            .collect();
        state.reservations.insert(token, held);

        Ok(token)
    }

    async fn release(&self, token: &ReservationToken) -> Result<(), InventoryError> {
        let mut state = self.state.write().unwrap();

        // An unknown token means the hold was already released.
        let Some(held) = state.reservations.remove(token) else {
            return Ok(());
        };

        for line in held {
            if let Some(record) = state.records.get_mut(&line.product) {
                record.reserved = record.reserved.saturating_sub(line.quantity);
            }
        }
        Ok(())
    }

    async fn stock_level(
        &self,
        product: &ProductId,
    ) -> Result<Option<InventoryRecord>, InventoryError> {
        Ok(self.state.read().unwrap().records.get(product).cloned())
    }

    async fn set_stock(&self, product: &ProductId, on_hand: u32) -> Result<(), InventoryError> {
        let mut state = self.state.write().unwrap();
        state
            .records
            .entry(product.clone())
            // `reserved <= on_hand` must survive a downward adjustment.
            .and_modify(|r| r.on_hand = on_hand.max(r.reserved))
            .or_insert_with(|| InventoryRecord {
                product: product.clone(),
                on_hand,
                reserved: 0,
            });
        Ok(())
    }
}
