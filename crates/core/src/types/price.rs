//! Type-safe price representation using decimal arithmetic.
//!
//! The backend stores prices as plain JSON numbers in the store currency, so
//! [`Price`] serialises as a number and deserialises from either a number or
//! a numeric string.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Currency symbol shown in front of every amount.
pub const CURRENCY_SYMBOL: &str = "$";

/// Flat delivery fee added to every non-empty order.
pub const DELIVERY_FEE: Price = Price(Decimal::from_parts(10, 0, 0, false, 0));

/// Errors that can occur when constructing a [`Price`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PriceError {
    /// Prices cannot be negative.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative amount in the store currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units. Non-positive quantities cost nothing.
    #[must_use]
    pub fn times(self, quantity: i64) -> Self {
        if quantity <= 0 {
            return Self::ZERO;
        }
        Self(self.0 * Decimal::from(quantity))
    }

    /// Whether the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CURRENCY_SYMBOL}{:.2}", self.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_price_rejected() {
        assert!(matches!(
            Price::new(Decimal::new(-1, 0)),
            Err(PriceError::Negative(_))
        ));
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_times_ignores_non_positive_quantities() {
        let price = Price::from_units(10);
        assert_eq!(price.times(2), Price::from_units(20));
        assert_eq!(price.times(0), Price::ZERO);
        assert_eq!(price.times(-3), Price::ZERO);
    }

    #[test]
    fn test_deserialize_accepts_integers_and_fractions() {
        let whole: Price = serde_json::from_str("100").unwrap();
        assert_eq!(whole, Price::from_units(100));

        let fractional: Price = serde_json::from_str("12.5").unwrap();
        assert_eq!(fractional.amount(), Decimal::new(125, 1));

        assert!(serde_json::from_str::<Price>("-4").is_err());
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_value(Price::from_units(20)).unwrap();
        assert_eq!(json.as_f64(), Some(20.0));
    }

    #[test]
    fn test_display_and_delivery_fee() {
        assert_eq!(DELIVERY_FEE, Price::from_units(10));
        assert_eq!(DELIVERY_FEE.to_string(), "$10.00");
    }
}
