//! Builds an order draft from a fetched cart.

use chrono::Utc;
use common::OrderId;
use thiserror::Error;

use crate::address::{AddressError, ShippingAddress};
use crate::cart::Cart;
use crate::money::{Currency, Money};
use crate::order::{Order, OrderLine, OrderStatus};

/// Reasons a cart cannot be assembled into an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    /// The cart has no line items. An input defect, distinct from the cart
    /// not existing at all.
    #[error("cart is empty")]
    EmptyCart,

    /// The shipping address failed validation.
    #[error("invalid shipping address: {0}")]
    InvalidAddress(#[from] AddressError),

    /// Cart lines carry differing currencies. Not expected from a
    /// well-behaved cart service, but a total must never be misreported.
    #[error("cart line currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch { expected: Currency, found: Currency },

    /// A line total or the aggregate overflows the representable amount
    /// range. Like a mixed-currency cart, an upstream payload defect that
    /// must never produce a wrong total.
    #[error("order total out of range")]
    TotalOutOfRange,
}

/// Maps cart lines into order lines and computes the aggregate total.
///
/// Quantities and unit prices are copied verbatim from the cart; the total is
/// Σ(unit price × quantity) over all lines, required to be uniform in
/// currency. The returned draft has status [`OrderStatus::Pending`] and a
/// fresh ID, and has not been persisted.
pub fn assemble_order(cart: &Cart, shipping_address: ShippingAddress) -> Result<Order, AssembleError> {
    shipping_address.validate()?;

    if cart.items.is_empty() {
        return Err(AssembleError::EmptyCart);
    }

    let currency = cart.items[0].unit_price.currency().clone();
    let mut total = Money::zero(currency.clone());
    let mut items = Vec::with_capacity(cart.items.len());

    for line in &cart.items {
        if !total.same_currency(&line.unit_price) {
            return Err(AssembleError::CurrencyMismatch {
                expected: currency.clone(),
                found: line.unit_price.currency().clone(),
            });
        }
        let line_total = line
            .unit_price
            .try_multiply(line.quantity)
            .ok_or(AssembleError::TotalOutOfRange)?;
        total = total
            .try_add(&line_total)
            .ok_or(AssembleError::TotalOutOfRange)?;
        items.push(OrderLine {
            product: line.product.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price.clone(),
        });
    }

    Ok(Order {
        id: OrderId::new(),
        user_id: cart.user_id.clone(),
        items,
        total_price: total,
        shipping_address,
        status: OrderStatus::Pending,
        created_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartLine;
    use common::{ProductId, UserId};

    fn address() -> ShippingAddress {
        ShippingAddress::new("1 Main St", "Springfield", "IL", "62704", "US")
    }

    fn cart_with(items: Vec<CartLine>) -> Cart {
        Cart {
            id: "cart-1".to_string(),
            user_id: UserId::new("user-1"),
            items,
            total_price: None,
        }
    }

    fn line(product: &str, quantity: u32, amount: i64, currency: &str) -> CartLine {
        CartLine {
            product: ProductId::new(product),
            quantity,
            unit_price: Money::new(amount, currency),
        }
    }

    #[test]
    fn computes_total_over_lines() {
        let cart = cart_with(vec![
            line("SKU-001", 2, 100, "USD"),
            line("SKU-002", 1, 250, "USD"),
        ]);

        let order = assemble_order(&cart, address()).unwrap();
        assert_eq!(order.total_price.amount(), 450);
        assert_eq!(order.total_price.currency().as_str(), "USD");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 2);
    }

    #[test]
    fn single_line_example() {
        // product P, quantity 2, unit price 100 USD => total 200
        let cart = cart_with(vec![line("P", 2, 100, "USD")]);
        let order = assemble_order(&cart, address()).unwrap();
        assert_eq!(order.total_price.amount(), 200);
        assert_eq!(order.items[0].quantity, 2);
    }

    #[test]
    fn copies_prices_verbatim() {
        let cart = cart_with(vec![line("SKU-001", 3, 999, "USD")]);
        let order = assemble_order(&cart, address()).unwrap();
        assert_eq!(order.items[0].unit_price, Money::new(999, "USD"));
        assert_eq!(order.items[0].product.as_str(), "SKU-001");
    }

    #[test]
    fn empty_cart_is_rejected() {
        let cart = cart_with(vec![]);
        assert_eq!(
            assemble_order(&cart, address()),
            Err(AssembleError::EmptyCart)
        );
    }

    #[test]
    fn invalid_address_is_rejected() {
        let cart = cart_with(vec![line("SKU-001", 1, 100, "USD")]);
        let mut addr = address();
        addr.country = String::new();
        assert_eq!(
            assemble_order(&cart, addr),
            Err(AssembleError::InvalidAddress(AddressError::MissingField(
                "country"
            )))
        );
    }

    #[test]
    fn mixed_currencies_fail_fast() {
        let cart = cart_with(vec![
            line("SKU-001", 1, 100, "USD"),
            line("SKU-002", 1, 100, "EUR"),
        ]);
        let err = assemble_order(&cart, address()).unwrap_err();
        assert!(matches!(err, AssembleError::CurrencyMismatch { .. }));
    }

    #[test]
    fn overflowing_line_amount_is_rejected() {
        let cart = cart_with(vec![line("SKU-001", 2, i64::MAX, "USD")]);
        assert_eq!(
            assemble_order(&cart, address()),
            Err(AssembleError::TotalOutOfRange)
        );
    }

    #[test]
    fn overflowing_aggregate_is_rejected() {
        // Each line fits on its own; the sum does not.
        let cart = cart_with(vec![
            line("SKU-001", 1, i64::MAX, "USD"),
            line("SKU-002", 1, 1, "USD"),
        ]);
        assert_eq!(
            assemble_order(&cart, address()),
            Err(AssembleError::TotalOutOfRange)
        );
    }

    #[test]
    fn carries_user_and_address() {
        let cart = cart_with(vec![line("SKU-001", 1, 100, "USD")]);
        let order = assemble_order(&cart, address()).unwrap();
        assert_eq!(order.user_id.as_str(), "user-1");
        assert_eq!(order.shipping_address, address());
    }
}
