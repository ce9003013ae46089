//! Shipping addresses.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shipping address validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// A required field is absent or blank.
    #[error("missing or blank address field: {0}")]
    MissingField(&'static str),
}

/// Destination address captured on the order.
///
/// The postal code is canonically `postal_code` and serializes as `zip`;
/// `pincode` is accepted as an input alias so callers from either naming
/// convention produce the same stored address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "zip", alias = "pincode")]
    pub postal_code: String,
    pub country: String,
}

impl ShippingAddress {
    /// Creates an address from its five fields.
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        postal_code: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            state: state.into(),
            postal_code: postal_code.into(),
            country: country.into(),
        }
    }

    /// Validates that every field is a non-empty string.
    pub fn validate(&self) -> Result<(), AddressError> {
        let fields = [
            ("street", &self.street),
            ("city", &self.city),
            ("state", &self.state),
            ("zip", &self.postal_code),
            ("country", &self.country),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(AddressError::MissingField(name));
            }
        }
        Ok(())
    }
}
