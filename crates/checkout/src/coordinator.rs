//! The order creation coordinator.

use std::time::Duration;

use cart_client::CartClient;
use common::UserId;
use domain::{Order, ShippingAddress, assemble_order};
use inventory::{InventoryService, ReservationLine};
use order_store::OrderStore;

use crate::error::CheckoutError;
use crate::guard::ReservationGuard;

/// Default deadline for the cart fetch. Callers observe an unavailability
/// result within roughly this window no matter how long the cart service
/// stalls.
pub const DEFAULT_FETCH_BUDGET: Duration = Duration::from_secs(5);

/// Drives one order creation attempt end to end.
///
/// Stages run in a fixed order: address validation (pure local, before any
/// remote call), bounded cart fetch, assembly, all-or-nothing inventory
/// reservation, order insert, then a fire-and-forget cart clear. Each stage
/// short-circuits to one [`CheckoutError`] kind; the coordinator is one-shot
/// per invocation and never retries a stage.
pub struct CheckoutCoordinator<C, I, O> {
    cart: C,
    inventory: I,
    orders: O,
    fetch_budget: Duration,
}

impl<C, I, O> CheckoutCoordinator<C, I, O>
where
    C: CartClient + Clone + Send + Sync + 'static,
    I: InventoryService + Clone + Send + Sync + 'static,
    O: OrderStore,
{
    /// Creates a coordinator with the default fetch budget.
    pub fn new(cart: C, inventory: I, orders: O) -> Self {
        Self {
            cart,
            inventory,
            orders,
            fetch_budget: DEFAULT_FETCH_BUDGET,
        }
    }

    /// Overrides the cart fetch deadline.
    pub fn with_fetch_budget(mut self, budget: Duration) -> Self {
        self.fetch_budget = budget;
        self
    }

    /// Creates an order from the user's cart, shipping to `shipping_address`.
    ///
    /// On success the returned order has been persisted with status PENDING
    /// and its cart has been handed off for asynchronous clearing; clear
    /// failures are logged and never affect the result.
    #[tracing::instrument(skip(self, shipping_address), fields(user = %user))]
    pub async fn place_order(
        &self,
        user: UserId,
        shipping_address: ShippingAddress,
    ) -> Result<Order, CheckoutError> {
        metrics::counter!("checkout_attempts_total").increment(1);
        let start = std::time::Instant::now();

        let result = self.run(user, shipping_address).await;

        metrics::histogram!("checkout_duration_seconds").record(start.elapsed().as_secs_f64());
        match &result {
            Ok(order) => {
                metrics::counter!("checkout_orders_created_total").increment(1);
                tracing::info!(order_id = %order.id, total = %order.total_price, "order created");
            }
            Err(e) => {
                metrics::counter!("checkout_failures_total").increment(1);
                tracing::warn!(error = %e, "checkout failed");
            }
        }
        result
    }

    async fn run(
        &self,
        user: UserId,
        shipping_address: ShippingAddress,
    ) -> Result<Order, CheckoutError> {
        // Address problems are caller defects; reject them before spending
        // a remote call.
        shipping_address
            .validate()
            .map_err(CheckoutError::InvalidAddress)?;

        let cart = match tokio::time::timeout(self.fetch_budget, self.cart.fetch_cart(&user)).await
        {
            Ok(fetched) => fetched?,
            Err(_) => {
                return Err(CheckoutError::CartServiceUnavailable(
                    "cart fetch exceeded deadline".to_string(),
                ));
            }
        };

        let order = assemble_order(&cart, shipping_address)?;

        let lines: Vec<ReservationLine> = order
            .items
            .iter()
            .map(|item| ReservationLine {
                product: item.product.clone(),
                quantity: item.quantity,
            })
            .collect();
        let token = self.inventory.reserve_all(&lines).await?;

        // The hold is settled only once the insert lands; every other exit
        // from this scope releases it.
        let guard = ReservationGuard::new(self.inventory.clone(), token);
        if let Err(e) = self.orders.insert(&order).await {
            guard.release().await;
            return Err(CheckoutError::PersistenceError(e.to_string()));
        }
        guard.settle();

        // The consumed cart is cleared off the response path; the order
        // stands regardless of the outcome.
        let cart_client = self.cart.clone();
        let clear_user = user.clone();
        tokio::spawn(async move {
            if let Err(e) = cart_client.clear_cart(&clear_user).await {
                tracing::warn!(user = %clear_user, error = %e, "cart clear failed after order creation");
            }
        });

        Ok(order)
    }
}
