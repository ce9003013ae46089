//! Order domain model for the checkout service.
//!
//! Holds the value objects shared across the workspace (money, addresses,
//! order lines), the read model for the externally-owned cart, and the
//! assembler that turns a fetched cart into an order draft.

pub mod address;
pub mod assembler;
pub mod cart;
pub mod money;
pub mod order;

pub use address::{AddressError, ShippingAddress};
pub use assembler::{AssembleError, assemble_order};
pub use cart::{Cart, CartLine};
pub use money::{Currency, Money};
pub use order::{Order, OrderLine, OrderStatus};
