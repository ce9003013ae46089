//! Shared identifier types for the checkout service.

pub mod ids;

pub use ids::{OrderId, ProductId, ReservationToken, UserId};
