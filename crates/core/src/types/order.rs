//! Order records and shipping addresses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Email, EmailError, OrderId, OrderStatus, PaymentMethod, Price, Product, Size, UserId};

/// Error returned when an address cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address field `{0}` is required")]
    Missing(&'static str),
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Shipping address captured at checkout.
///
/// Addresses on stored orders are read as the backend returns them; only
/// [`Address::validate`] enforces the checkout rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub country: String,
    pub phone: String,
}

impl Address {
    /// Check that every field is filled in and the email is well formed.
    ///
    /// # Errors
    ///
    /// Returns the first blank field's wire name, or the email parse error.
    pub fn validate(&self) -> Result<(), AddressError> {
        let fields = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("street", &self.street),
            ("city", &self.city),
            ("state", &self.state),
            ("zipcode", &self.zipcode),
            ("country", &self.country),
            ("phone", &self.phone),
        ];
        if let Some(&(name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(AddressError::Missing(name));
        }
        Email::parse(&self.email)?;
        Ok(())
    }
}

/// A purchased line: the product as it was at checkout plus size and quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: i64,
    pub size: Size,
}

impl OrderItem {
    /// Price of the line at checkout time.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// A persisted order.
///
/// Created once at checkout; afterwards only `status` and `payment` change,
/// and only through the payment callback or the admin console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub amount: Price,
    pub address: Address,
    #[serde(default)]
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub payment: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
}
