//! Wire types for the shop backend's JSON API.
//!
//! Every response is an object carrying `success` and, on failure, usually a
//! `message`. [`Envelope`] captures that shape once; the payload types below
//! are flattened into it and default their fields so that a failed response
//! (which omits the payload) still decodes.

use serde::{Deserialize, Serialize};
use url::Url;

use shopfront_core::{Address, CartState, Order, OrderId, OrderItem, Price, Product, ProductId, Size};

use crate::error::{Result, StoreError};

/// Standard `{ success, message?, ...payload }` response.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, turning `success: false` into a server error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Server` with the backend's message.
    pub fn into_data(self) -> Result<T> {
        if self.success {
            Ok(self.data)
        } else {
            Err(StoreError::server(self.message))
        }
    }
}

/// Response without a payload.
#[derive(Debug, Default, Deserialize)]
pub struct Ack {}

/// Credential exchange response.
#[derive(Debug, Default, Deserialize)]
pub struct TokenPayload {
    #[serde(default)]
    pub token: Option<String>,
}

/// `GET /api/product/list` response.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListPayload {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// `POST /api/cart/get` response.
#[derive(Debug, Default, Deserialize)]
pub struct CartPayload {
    #[serde(default, rename = "cartData")]
    pub cart_data: CartState,
}

/// `POST /api/order/userorders` response.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersPayload {
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// `POST /api/order/stripe` response.
#[derive(Debug, Default, Deserialize)]
pub struct StripeSessionPayload {
    #[serde(default)]
    pub session_url: Option<Url>,
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartAddRequest<'a> {
    pub item_id: &'a ProductId,
    pub size: &'a Size,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartUpdateRequest<'a> {
    pub item_id: &'a ProductId,
    pub size: &'a Size,
    pub quantity: i64,
}

/// Body shared by every order placement endpoint.
#[derive(Debug, Serialize)]
pub struct PlaceOrderRequest<'a> {
    pub address: &'a Address,
    pub items: &'a [OrderItem],
    pub amount: Price,
}

/// Payment verification body. `success` is forwarded verbatim from the
/// provider's redirect (`"true"` / `"false"`).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest<'a> {
    pub success: &'a str,
    pub order_id: &'a OrderId,
}

/// Empty JSON object body (`{}`).
#[derive(Debug, Serialize)]
pub struct EmptyBody {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_envelope_without_payload_decodes() {
        let envelope: Envelope<ProductListPayload> =
            serde_json::from_str(r#"{"success":false,"message":"db offline"}"#).unwrap();
        let err = envelope.into_data().unwrap_err();
        assert_eq!(err.user_message(), "db offline");
    }

    #[test]
    fn test_cart_payload_is_taken_verbatim() {
        let envelope: Envelope<CartPayload> = serde_json::from_str(
            r#"{"success":true,"cartData":{"p1":{"M":2,"L":0},"p2":{"S":1}}}"#,
        )
        .unwrap();
        let cart = envelope.into_data().unwrap().cart_data;
        assert_eq!(
            serde_json::to_value(&cart).unwrap(),
            serde_json::json!({"p1":{"L":0,"M":2},"p2":{"S":1}})
        );
    }

    #[test]
    fn test_request_field_names() {
        let item_id = ProductId::new("p1");
        let size = Size::parse("M").unwrap();
        let body = serde_json::to_value(CartUpdateRequest {
            item_id: &item_id,
            size: &size,
            quantity: 0,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"itemId":"p1","size":"M","quantity":0}));

        let order_id = OrderId::new("o1");
        let body = serde_json::to_value(VerifyRequest {
            success: "true",
            order_id: &order_id,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"success":"true","orderId":"o1"}));
    }
}
