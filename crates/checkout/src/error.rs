//! Checkout error taxonomy.

use cart_client::CartClientError;
use common::{ProductId, UserId};
use domain::{AddressError, AssembleError, Currency};
use inventory::InventoryError;
use order_store::OrderStoreError;
use thiserror::Error;

/// Every way order creation can fail, one variant per outcome the boundary
/// layer must distinguish.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// The cart service has no cart for this user.
    #[error("cart for user {0} not found")]
    CartNotFound(UserId),

    /// The cart service timed out or failed at the transport level.
    /// Retryable by the caller; never retried here.
    #[error("cart service unavailable: {0}")]
    CartServiceUnavailable(String),

    /// The fetched cart has no items.
    #[error("cart is empty")]
    EmptyCart,

    /// The caller-supplied shipping address failed validation.
    #[error("invalid shipping address: {0}")]
    InvalidAddress(AddressError),

    /// The fetched cart mixes currencies; the upstream payload is malformed.
    #[error("cart line currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch { expected: Currency, found: Currency },

    /// Cart amounts overflow the representable total; the upstream payload
    /// is malformed.
    #[error("order total out of range")]
    TotalOutOfRange,

    /// Some line could not be covered by available stock. Nothing was
    /// reserved.
    #[error("insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: ProductId,
        requested: u32,
        available: u32,
    },

    /// The order could not be persisted. The inventory hold taken for it
    /// has been released.
    #[error("failed to persist order: {0}")]
    PersistenceError(String),
}

impl From<CartClientError> for CheckoutError {
    fn from(err: CartClientError) -> Self {
        match err {
            CartClientError::NotFound(user) => CheckoutError::CartNotFound(user),
            CartClientError::Timeout => {
                CheckoutError::CartServiceUnavailable("request timed out".to_string())
            }
            CartClientError::Transport(msg) => CheckoutError::CartServiceUnavailable(msg),
        }
    }
}

impl From<AssembleError> for CheckoutError {
    fn from(err: AssembleError) -> Self {
        match err {
            AssembleError::EmptyCart => CheckoutError::EmptyCart,
            AssembleError::InvalidAddress(e) => CheckoutError::InvalidAddress(e),
            AssembleError::CurrencyMismatch { expected, found } => {
                CheckoutError::CurrencyMismatch { expected, found }
            }
            AssembleError::TotalOutOfRange => CheckoutError::TotalOutOfRange,
        }
    }
}

impl From<InventoryError> for CheckoutError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::InsufficientStock {
                product,
                requested,
                available,
            } => CheckoutError::InsufficientStock {
                product,
                requested,
                available,
            },
            InventoryError::Database(e) => CheckoutError::PersistenceError(e.to_string()),
        }
    }
}

impl From<OrderStoreError> for CheckoutError {
    fn from(err: OrderStoreError) -> Self {
        CheckoutError::PersistenceError(err.to_string())
    }
}
