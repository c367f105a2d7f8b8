//! Status enums for orders.
//!
//! Both enums travel as free-text labels. The admin console owns the status
//! field and may write labels this client has never seen, so every enum keeps
//! an `Other` variant that round-trips the original text.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Order fulfillment status.
///
/// Known labels progress forward only:
/// `Order Placed` → `Packing` → `Shipped` → `Out for delivery` → `Delivered`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    OrderPlaced,
    Packing,
    Shipped,
    OutForDelivery,
    Delivered,
    /// A label set by the admin console that this client does not know.
    Other(String),
}

impl OrderStatus {
    /// Wire label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::OrderPlaced => "Order Placed",
            Self::Packing => "Packing",
            Self::Shipped => "Shipped",
            Self::OutForDelivery => "Out for delivery",
            Self::Delivered => "Delivered",
            Self::Other(label) => label,
        }
    }

    /// Number of known fulfillment stages.
    pub const STAGES: u8 = 5;

    /// Position in the fulfillment pipeline, `None` for unknown labels.
    #[must_use]
    pub const fn stage(&self) -> Option<u8> {
        match self {
            Self::OrderPlaced => Some(0),
            Self::Packing => Some(1),
            Self::Shipped => Some(2),
            Self::OutForDelivery => Some(3),
            Self::Delivered => Some(4),
            Self::Other(_) => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for OrderStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Order Placed" => Self::OrderPlaced,
            "Packing" => Self::Packing,
            "Shipped" => Self::Shipped,
            "Out for delivery" => Self::OutForDelivery,
            "Delivered" => Self::Delivered,
            _ => Self::Other(label),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(label) => label,
            known => known.label().to_owned(),
        }
    }
}

/// How an order is paid for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    /// Cash on delivery: the order is final as soon as it is placed.
    Cod,
    /// Hosted Stripe checkout, confirmed through the verification callback.
    Stripe,
    /// Razorpay checkout (browser SDK only).
    Razorpay,
    /// A method recorded by another client.
    Other(String),
}

impl PaymentMethod {
    /// Wire label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Cod => "COD",
            Self::Stripe => "Stripe",
            Self::Razorpay => "Razorpay",
            Self::Other(label) => label,
        }
    }

    /// Whether payment completes outside the client and needs verification.
    #[must_use]
    pub const fn is_asynchronous(&self) -> bool {
        matches!(self, Self::Stripe | Self::Razorpay)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for PaymentMethod {
    fn from(label: String) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "cod" => Self::Cod,
            "stripe" => Self::Stripe,
            "razorpay" => Self::Razorpay,
            _ => Self::Other(label),
        }
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Other(label) => label,
            known => known.label().to_owned(),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from(s.to_owned()) {
            Self::Other(label) => Err(format!("unknown payment method: {label}")),
            known => Ok(known),
        }
    }
}
