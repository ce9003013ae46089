//! Client for the externally-owned cart service.
//!
//! Exposes a bounded-time fetch of a user's cart and a best-effort delete.
//! Transport outcomes are translated into typed results: a 404 is
//! [`CartClientError::NotFound`], a deadline expiry is
//! [`CartClientError::Timeout`], and any other non-2xx or connection failure
//! is [`CartClientError::Transport`]. The client never retries; the
//! orchestrator decides whether a failure is surfaced or swallowed.

pub mod error;
pub mod http;
pub mod memory;

use async_trait::async_trait;
use common::UserId;
use domain::Cart;

pub use error::CartClientError;
pub use http::HttpCartClient;
pub use memory::{FetchFailure, InMemoryCartClient};

/// Operations against the remote cart service.
#[async_trait]
pub trait CartClient: Send + Sync {
    /// Fetches the cart for a user under the client's deadline.
    async fn fetch_cart(&self, user: &UserId) -> Result<Cart, CartClientError>;

    /// Deletes the cart for a user. At most one attempt; callers log and
    /// swallow failures.
    async fn clear_cart(&self, user: &UserId) -> Result<(), CartClientError>;
}
