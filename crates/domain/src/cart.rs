//! Read model for the externally-owned shopping cart.
//!
//! Carts belong to the cart service; this crate only ever deserializes them
//! from its wire format and reads them. They are fetched fresh per request
//! and never cached.

use common::{ProductId, UserId};
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// One product line in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// The product being purchased.
    pub product: ProductId,
    /// Quantity selected, at least 1 in a well-formed cart.
    pub quantity: u32,
    /// Price-at-selection snapshot taken by the cart service.
    pub unit_price: Money,
}

/// A user's cart as returned by the cart service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Cart identifier, opaque to this service.
    pub id: String,
    /// The owning user.
    pub user_id: UserId,
    /// Ordered line items.
    pub items: Vec<CartLine>,
    /// Aggregate total as computed by the cart service, when present.
    /// The assembler recomputes the order total from the lines regardless.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Money>,
}

impl Cart {
    /// Returns true if the cart has no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
