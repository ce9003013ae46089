//! Reservation hold guard.

use common::ReservationToken;
use inventory::InventoryService;

/// Holds a reservation token until it is settled or released.
///
/// A reservation without a corresponding persisted order is a leak the
/// orchestrator must never leave behind, including when the request future
/// is cancelled between reserve and persist. The token is considered
/// settled only once persistence succeeds; any other way this guard goes
/// away releases the hold.
pub(crate) struct ReservationGuard<I>
where
    I: InventoryService + Clone + Send + Sync + 'static,
{
    inventory: I,
    token: Option<ReservationToken>,
}

impl<I> ReservationGuard<I>
where
    I: InventoryService + Clone + Send + Sync + 'static,
{
    pub(crate) fn new(inventory: I, token: ReservationToken) -> Self {
        Self {
            inventory,
            token: Some(token),
        }
    }

    /// Marks the hold as backed by a persisted order; no release will occur.
    pub(crate) fn settle(mut self) {
        self.token = None;
    }

    /// Releases the hold now, awaiting the compensation.
    pub(crate) async fn release(mut self) {
        if let Some(token) = self.token.take() {
            if let Err(e) = self.inventory.release(&token).await {
                tracing::error!(%token, error = %e, "failed to release reservation");
            }
        }
    }
}

impl<I> Drop for ReservationGuard<I>
where
    I: InventoryService + Clone + Send + Sync + 'static,
{
    fn drop(&mut self) {
        // Cancellation fallback. Drop cannot await, so the release is
        // spawned onto the runtime.
        if let Some(token) = self.token.take() {
            let inventory = self.inventory.clone();
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(async move {
                        if let Err(e) = inventory.release(&token).await {
                            tracing::error!(%token, error = %e, "failed to release reservation");
                        }
                    });
                }
                Err(_) => {
                    tracing::error!(%token, "reservation leaked: no runtime available for release");
                }
            }
        }
    }
}
