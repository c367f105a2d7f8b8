//! Order placement and payment verification.
//!
//! ```text
//! place_order(COD)     -> order stored, cart cleared          -> Route::Orders
//! place_order(Stripe)  -> order stored, payment pending       -> Route::External(checkout page)
//! verify_payment(true) -> payment recorded, cart cleared      -> Route::Orders
//! verify_payment(false)-> nothing changes locally             -> Route::Cart
//! ```
//!
//! Status transitions after that (packing, shipping, delivery) belong to the
//! admin console; this client only reads them.

use tracing::{info, instrument, warn};
use url::Url;

use shopfront_core::{Address, OrderId, OrderItem, PaymentMethod};

use crate::error::{StoreError, add_breadcrumb};
use crate::notify::Notification;
use crate::route::Route;
use crate::session::Session;

/// Query parameters the payment provider appends when redirecting back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentCallback {
    /// Outcome flag, forwarded verbatim (`"true"` on success).
    pub success: String,
    pub order_id: OrderId,
}

impl PaymentCallback {
    #[must_use]
    pub fn new(success: bool, order_id: OrderId) -> Self {
        Self {
            success: success.to_string(),
            order_id,
        }
    }

    /// Parse `?success=..&orderId=..` from a redirect URL. A missing
    /// `success` flag counts as a failed payment.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if `orderId` is missing or empty.
    pub fn from_url(url: &Url) -> Result<Self, StoreError> {
        let mut success = None;
        let mut order_id = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "success" => success = Some(value.into_owned()),
                "orderId" => order_id = Some(value.into_owned()),
                _ => {}
            }
        }

        let order_id = order_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| StoreError::Validation("Missing order id in payment callback".into()))?;

        Ok(Self {
            success: success.unwrap_or_else(|| "false".to_string()),
            order_id: OrderId::new(order_id),
        })
    }
}

impl Session {
    /// Snapshot the cart as order items using catalog data.
    ///
    /// Lines whose product is not in the loaded catalog cannot be
    /// snapshotted and are left out.
    #[must_use]
    pub fn order_items(&self) -> Vec<OrderItem> {
        self.cart
            .lines()
            .filter_map(|line| {
                let Some(product) = self.catalog.find(&line.product_id) else {
                    warn!(product_id = %line.product_id, "Skipping cart line missing from catalog");
                    return None;
                };
                Some(OrderItem {
                    product: product.clone(),
                    quantity: line.quantity,
                    size: line.size,
                })
            })
            .collect()
    }

    /// Turn the cart into an order.
    ///
    /// Returns where to go next, or `None` if the order could not be placed
    /// (the reason is queued as a notification).
    #[instrument(skip(self, address), fields(method = %method))]
    pub async fn place_order(&mut self, address: &Address, method: &PaymentMethod) -> Option<Route> {
        match self.try_place_order(address, method).await {
            Ok(route) => Some(route),
            Err(err) => {
                self.fail("place_order", &err);
                None
            }
        }
    }

    async fn try_place_order(
        &mut self,
        address: &Address,
        method: &PaymentMethod,
    ) -> Result<Route, StoreError> {
        let token = self
            .token
            .clone()
            .ok_or_else(|| StoreError::Validation("Login to place an order".into()))?;
        address.validate()?;

        let items = self.order_items();
        if items.is_empty() {
            return Err(StoreError::Validation("Your cart is empty".into()));
        }
        let amount = self.cart_totals().total;
        add_breadcrumb("checkout", "Placing order", &[("method", method.label())]);

        let route = match method {
            PaymentMethod::Cod => {
                self.api
                    .place_cod_order(&token, address, &items, amount)
                    .await?;
                info!(items = items.len(), amount = %amount, "Order placed");
                self.notify(Notification::success("Order placed"));
                Route::Orders
            }
            PaymentMethod::Stripe => {
                let checkout = self
                    .api
                    .place_stripe_order(&token, address, &items, amount)
                    .await?;
                info!(items = items.len(), amount = %amount, "Awaiting Stripe payment");
                Route::External(checkout)
            }
            PaymentMethod::Razorpay | PaymentMethod::Other(_) => {
                return Err(StoreError::Validation(format!(
                    "{method} payments are not supported by this client"
                )));
            }
        };

        // Asynchronous payments keep the cart until they are verified.
        if !method.is_asynchronous() {
            self.clear_cart();
        }
        Ok(route)
    }

    /// Confirm an asynchronous payment after the provider redirects back.
    ///
    /// Without a token nothing is sent and `None` is returned; call again
    /// once logged in. Transport failures are notified and not retried.
    #[instrument(skip(self), fields(order_id = %callback.order_id))]
    pub async fn verify_payment(&mut self, callback: &PaymentCallback) -> Option<Route> {
        let token = self.token.clone()?;
        let verified = self
            .api
            .verify_stripe(&token, &callback.success, &callback.order_id)
            .await;

        match verified {
            Ok(true) => {
                info!("Payment verified");
                self.clear_cart();
                Some(Route::Orders)
            }
            Ok(false) => {
                info!("Payment not completed");
                Some(Route::Cart)
            }
            Err(err) => {
                self.fail("verify_payment", &err);
                None
            }
        }
    }
}
