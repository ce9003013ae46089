//! Cart client error types.

use common::UserId;
use thiserror::Error;

/// Errors from the cart service, one variant per distinct outcome.
///
/// `NotFound` and `Timeout` must never be conflated: the former maps to a
/// caller-visible 404, the latter to a retryable 503.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartClientError {
    /// The cart service responded 404 for this user.
    #[error("cart for user {0} not found")]
    NotFound(UserId),

    /// The request exceeded the client's deadline.
    #[error("cart service request timed out")]
    Timeout,

    /// Connection failure or an unexpected status (treated as unavailable).
    #[error("cart service unavailable: {0}")]
    Transport(String),
}
