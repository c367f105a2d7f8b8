//! Order history as a flat, per-item list.

use chrono::{DateTime, Utc};
use tracing::instrument;

use shopfront_core::{Order, OrderItem, OrderStatus, PaymentMethod};

use crate::session::Session;

/// One purchased item annotated with its order's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderHistoryEntry {
    pub item: OrderItem,
    pub status: OrderStatus,
    pub payment: bool,
    pub payment_method: PaymentMethod,
    pub date: DateTime<Utc>,
}

/// Flatten orders into items, most recent first.
///
/// The backend returns orders oldest first, so the flattened list is
/// reversed as a whole.
#[must_use]
pub fn flatten_orders(orders: Vec<Order>) -> Vec<OrderHistoryEntry> {
    let mut entries: Vec<OrderHistoryEntry> = orders
        .into_iter()
        .flat_map(|order| {
            let Order {
                items,
                status,
                payment,
                payment_method,
                date,
                ..
            } = order;
            items.into_iter().map(move |item| OrderHistoryEntry {
                item,
                status: status.clone(),
                payment,
                payment_method: payment_method.clone(),
                date,
            })
        })
        .collect();
    entries.reverse();
    entries
}

impl Session {
    /// The signed-in user's purchased items, most recent first.
    ///
    /// Guests get an empty list without a request; failures are notified and
    /// also yield an empty list.
    #[instrument(skip(self))]
    pub async fn order_history(&mut self) -> Vec<OrderHistoryEntry> {
        let Some(token) = self.token.as_ref() else {
            return Vec::new();
        };
        let fetched = self.api.user_orders(token).await;
        match fetched {
            Ok(orders) => flatten_orders(orders),
            Err(err) => {
                self.fail("user_orders", &err);
                Vec::new()
            }
        }
    }
}
