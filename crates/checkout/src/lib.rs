//! Order creation orchestration.
//!
//! Turns a user's remotely-held cart into a durable order. One invocation
//! drives validate → fetch → assemble → reserve → persist → clear, with
//! every failure mode mapped to a single discriminated [`CheckoutError`]
//! kind and compensation of the inventory hold when persistence fails after
//! a successful reservation. No stage is retried; the one retryable
//! condition (cart service unavailable) is surfaced to the caller instead.

pub mod coordinator;
pub mod error;
mod guard;

pub use coordinator::{CheckoutCoordinator, DEFAULT_FETCH_BUDGET};
pub use error::CheckoutError;
