//! In-memory order store for tests and local runs.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{OrderId, UserId};
use domain::{Order, OrderStatus};

use crate::{OrderStore, OrderStoreError};

#[derive(Debug, Default)]
struct InMemoryOrderState {
    orders: HashMap<OrderId, Order>,
    fail_on_insert: bool,
}

/// In-memory order store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderStore {
    state: Arc<RwLock<InMemoryOrderState>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail inserts, for exercising compensation.
    pub fn set_fail_on_insert(&self, fail: bool) {
        self.state.write().unwrap().fail_on_insert = fail;
    }

    /// Returns the number of stored orders.
    pub fn order_count(&self) -> usize {
        self.state.read().unwrap().orders.len()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: &Order) -> Result<(), OrderStoreError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_insert {
            return Err(OrderStoreError::Unavailable(
                "injected insert failure".to_string(),
            ));
        }
        if state.orders.contains_key(&order.id) {
            return Err(OrderStoreError::Duplicate(order.id));
        }

        state.orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>, OrderStoreError> {
        Ok(self.state.read().unwrap().orders.get(&id).cloned())
    }

    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Order>, OrderStoreError> {
        let state = self.state.read().unwrap();
        let mut orders: Vec<Order> = state
            .orders
            .values()
            .filter(|o| &o.user_id == user)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), OrderStoreError> {
        let mut state = self.state.write().unwrap();
        let order = state
            .orders
            .get_mut(&id)
            .ok_or(OrderStoreError::NotFound(id))?;
        order.status = status;
        Ok(())
    }
}
