//! Order persistence.
//!
//! The order store owns the order aggregate after creation. Order creation
//! only ever inserts; status transitions belong to later lifecycle stages
//! and go through [`OrderStore::update_status`].

pub mod error;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use common::{OrderId, UserId};
use domain::{Order, OrderStatus};

pub use error::OrderStoreError;
pub use memory::InMemoryOrderStore;
pub use postgres::PostgresOrderStore;

/// Persistence operations for orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts a new order. The insert is a single atomic write.
    async fn insert(&self, order: &Order) -> Result<(), OrderStoreError>;

    /// Loads an order by ID.
    async fn get(&self, id: OrderId) -> Result<Option<Order>, OrderStoreError>;

    /// Lists a user's orders, newest first.
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Order>, OrderStoreError>;

    /// Transitions an order to a new status.
    async fn update_status(&self, id: OrderId, status: OrderStatus)
    -> Result<(), OrderStoreError>;
}
