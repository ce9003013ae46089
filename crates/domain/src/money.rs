//! Money values with an explicit currency.

use serde::{Deserialize, Serialize};

/// ISO 4217 currency code, carried as an opaque string.
///
/// Conversion between currencies is out of scope; the code only ever
/// participates in equality checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Creates a currency from a code such as `"USD"`.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the currency code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Currency {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A monetary amount in minor units (cents) paired with its currency.
///
/// Amounts are integers to avoid floating point issues. Arithmetic never
/// crosses currencies: [`Money::try_add`] refuses mismatched operands.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Amount in minor units (e.g. 1000 = $10.00).
    amount: i64,
    currency: Currency,
}

impl Money {
    /// Creates a money value from an amount in minor units.
    pub fn new(amount: i64, currency: impl Into<Currency>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    /// Returns zero in the given currency.
    pub fn zero(currency: impl Into<Currency>) -> Self {
        Self::new(0, currency)
    }

    /// Returns the amount in minor units.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns the currency.
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Returns true if both values carry the same currency.
    pub fn same_currency(&self, other: &Money) -> bool {
        self.currency == other.currency
    }

    /// Multiplies by a quantity, keeping the currency.
    ///
    /// Returns `None` when the product overflows the amount range.
    pub fn try_multiply(&self, quantity: u32) -> Option<Money> {
        let amount = self.amount.checked_mul(i64::from(quantity))?;
        Some(Money {
            amount,
            currency: self.currency.clone(),
        })
    }

    /// Adds another amount of the same currency.
    ///
    /// Returns `None` when the currencies differ or the sum overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if !self.same_currency(other) {
            return None;
        }
        let amount = self.amount.checked_add(other.amount)?;
        Some(Money {
            amount,
            currency: self.currency.clone(),
        })
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_multiply_keeps_currency() {
        let price = Money::new(100, "USD");
        let total = price.try_multiply(3).unwrap();
        assert_eq!(total.amount(), 300);
        assert_eq!(total.currency().as_str(), "USD");
    }

    #[test]
    fn try_multiply_overflow_returns_none() {
        let price = Money::new(i64::MAX, "USD");
        assert_eq!(price.try_multiply(2), None);
    }

    #[test]
    fn try_add_same_currency() {
        let a = Money::new(100, "USD");
        let b = Money::new(250, "USD");
        assert_eq!(a.try_add(&b), Some(Money::new(350, "USD")));
    }

    #[test]
    fn try_add_rejects_mixed_currencies() {
        let a = Money::new(100, "USD");
        let b = Money::new(100, "EUR");
        assert_eq!(a.try_add(&b), None);
    }

    #[test]
    fn try_add_overflow_returns_none() {
        let a = Money::new(i64::MAX, "USD");
        let b = Money::new(1, "USD");
        assert_eq!(a.try_add(&b), None);
    }

    #[test]
    fn zero_has_zero_amount() {
        let z = Money::zero("USD");
        assert_eq!(z.amount(), 0);
    }

    #[test]
    fn serialization_roundtrip() {
        let m = Money::new(1999, "EUR");
        let json = serde_json::to_string(&m).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }

    #[test]
    fn serializes_amount_and_currency_fields() {
        let m = Money::new(200, "USD");
        let json: serde_json::Value = serde_json::to_value(&m).unwrap();
        assert_eq!(json["amount"], 200);
        assert_eq!(json["currency"], "USD");
    }
}
