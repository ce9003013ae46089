//! In-memory cart client for tests and local runs.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use common::UserId;
use domain::Cart;

use crate::{CartClient, CartClientError};

/// Failure to inject on the next fetch calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    /// Behave as a deadline expiry.
    Timeout,
    /// Behave as a transport-level failure.
    Transport,
}

#[derive(Debug, Default)]
struct InMemoryCartState {
    carts: HashMap<UserId, Cart>,
    response_delay: Option<Duration>,
    fetch_failure: Option<FetchFailure>,
    fail_on_clear: bool,
    fetch_calls: u32,
    clear_calls: u32,
}

/// In-memory cart client.
///
/// Stores carts per user and supports injecting delays and failures so the
/// orchestrator's timeout and unavailability paths can be exercised without a
/// network.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCartClient {
    state: Arc<RwLock<InMemoryCartState>>,
}

impl InMemoryCartClient {
    /// Creates a new empty in-memory cart client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a cart, keyed by its owning user.
    pub fn put_cart(&self, cart: Cart) {
        let mut state = self.state.write().unwrap();
        state.carts.insert(cart.user_id.clone(), cart);
    }

    /// Delays every fetch response by `delay`.
    pub fn set_response_delay(&self, delay: Option<Duration>) {
        self.state.write().unwrap().response_delay = delay;
    }

    /// Makes subsequent fetches fail with the given failure.
    pub fn set_fetch_failure(&self, failure: Option<FetchFailure>) {
        self.state.write().unwrap().fetch_failure = failure;
    }

    /// Makes subsequent clears fail with a transport error.
    pub fn set_fail_on_clear(&self, fail: bool) {
        self.state.write().unwrap().fail_on_clear = fail;
    }

    /// Returns true if a cart is stored for the user.
    pub fn has_cart(&self, user: &UserId) -> bool {
        self.state.read().unwrap().carts.contains_key(user)
    }

    /// Number of fetch attempts observed.
    pub fn fetch_count(&self) -> u32 {
        self.state.read().unwrap().fetch_calls
    }

    /// Number of clear attempts observed.
    pub fn clear_count(&self) -> u32 {
        self.state.read().unwrap().clear_calls
    }
}

#[async_trait]
impl CartClient for InMemoryCartClient {
    async fn fetch_cart(&self, user: &UserId) -> Result<Cart, CartClientError> {
        // Compute the outcome under the lock, then sleep outside it.
        let (delay, outcome) = {
            let mut state = self.state.write().unwrap();
            state.fetch_calls += 1;

            let outcome = match state.fetch_failure {
                Some(FetchFailure::Timeout) => Err(CartClientError::Timeout),
                Some(FetchFailure::Transport) => Err(CartClientError::Transport(
                    "injected transport failure".to_string(),
                )),
                None => state
                    .carts
                    .get(user)
                    .cloned()
                    .ok_or_else(|| CartClientError::NotFound(user.clone())),
            };
            (state.response_delay, outcome)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        outcome
    }

    async fn clear_cart(&self, user: &UserId) -> Result<(), CartClientError> {
        let mut state = self.state.write().unwrap();
        state.clear_calls += 1;

        if state.fail_on_clear {
            return Err(CartClientError::Transport(
                "injected clear failure".to_string(),
            ));
        }
        state.carts.remove(user);
        Ok(())
    }
}
