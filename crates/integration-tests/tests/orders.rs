//! Order history against a fake backend.

#![allow(clippy::unwrap_used)]

use serde_json::{Value, json};
use shopfront_core::{OrderStatus, PaymentMethod};
use shopfront_integration_tests::{TOKEN, TestShop, ok, product};
use wiremock::Mock;
use wiremock::matchers::{header, method, path};

fn order(id: &str, date: i64, status: &str, method: &str, paid: bool, items: Vec<Value>) -> Value {
    json!({
        "_id": id,
        "userId": "u1",
        "items": items,
        "amount": 60,
        "address": {
            "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com",
            "street": "12 Analytical Row", "city": "London", "state": "Greater London",
            "zipcode": "N1 9GU", "country": "UK", "phone": "+44 20 7946 0000"
        },
        "status": status,
        "paymentMethod": method,
        "payment": paid,
        "date": date,
    })
}

fn item(id: &str, name: &str, quantity: i64) -> Value {
    let mut value = product(id, name, 25, &["M"]);
    value["quantity"] = json!(quantity);
    value["size"] = json!("M");
    value
}

#[tokio::test]
async fn test_history_is_flattened_most_recent_first() {
    let shop = TestShop::start().await;
    Mock::given(method("POST"))
        .and(path("/api/order/userorders"))
        .and(header("token", TOKEN))
        .respond_with(ok(json!({
            "orders": [
                order("o1", 1_700_000_000_000, "Delivered", "COD", true,
                      vec![item("a", "Tee", 1), item("b", "Cap", 2)]),
                order("o2", 1_710_000_000_000, "Shipped", "Stripe", true,
                      vec![item("c", "Hoodie", 1), item("d", "Socks", 3)]),
            ]
        })))
        .expect(1)
        .mount(&shop.server)
        .await;

    let mut session = shop.signed_in(json!({})).await;
    let history = session.order_history().await;

    let names: Vec<&str> = history.iter().map(|e| e.item.product.name.as_str()).collect();
    assert_eq!(names, ["Socks", "Hoodie", "Cap", "Tee"]);
    assert_eq!(history[0].status, OrderStatus::Shipped);
    assert_eq!(history[0].payment_method, PaymentMethod::Stripe);
    assert_eq!(history[0].item.quantity, 3);
    assert_eq!(history[3].status, OrderStatus::Delivered);
    assert_eq!(history[3].date.timestamp_millis(), 1_700_000_000_000);
}

#[tokio::test]
async fn test_guest_history_makes_no_request() {
    let shop = TestShop::start().await;

    let mut session = shop.guest();
    assert!(session.order_history().await.is_empty());
    assert!(shop.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_status_is_kept() {
    let shop = TestShop::start().await;
    Mock::given(method("POST"))
        .and(path("/api/order/userorders"))
        .respond_with(ok(json!({
            "orders": [order("o1", 1_700_000_000_000, "Returned", "COD", false, vec![item("a", "Tee", 1)])]
        })))
        .mount(&shop.server)
        .await;

    let mut session = shop.signed_in(json!({})).await;
    let history = session.order_history().await;

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, OrderStatus::Other("Returned".into()));
    assert!(!history[0].payment);
}

#[tokio::test]
async fn test_stored_address_is_not_revalidated() {
    let shop = TestShop::start().await;
    let mut malformed = order("o2", 1_710_000_000_000, "Packing", "COD", false, vec![item("b", "Cap", 1)]);
    malformed["address"]["email"] = json!("");
    Mock::given(method("POST"))
        .and(path("/api/order/userorders"))
        .respond_with(ok(json!({
            "orders": [
                order("o1", 1_700_000_000_000, "Delivered", "COD", true, vec![item("a", "Tee", 1)]),
                malformed,
            ]
        })))
        .mount(&shop.server)
        .await;

    let mut session = shop.signed_in(json!({})).await;
    let history = session.order_history().await;

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].status, OrderStatus::Packing);
    assert!(session.notifications().is_empty());
}
