//! Cart mirroring and reconciliation against a fake backend.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use secrecy::SecretString;
use serde_json::json;
use shopfront_core::{ProductId, Size};
use shopfront_integration_tests::{TOKEN, TestShop, ok, rejected};
use shopfront_storefront::{MemoryTokenStore, Notification, Session, TokenStore};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn medium() -> Size {
    Size::parse("M").unwrap()
}

#[tokio::test]
async fn test_restore_replaces_cart_with_server_copy() {
    let shop = TestShop::start().await;
    let server_cart = json!({ "p1": { "M": 2, "L": 0 }, "p2": { "S": 1 } });

    let session = shop.signed_in(server_cart.clone()).await;

    assert!(session.is_authenticated());
    assert_eq!(serde_json::to_value(session.cart()).unwrap(), server_cart);
    assert_eq!(session.cart_count(), 3);
    assert!(session.notifications().is_empty());
}

#[tokio::test]
async fn test_add_is_mirrored_with_token_header() {
    let shop = TestShop::start().await;
    Mock::given(method("POST"))
        .and(path("/api/cart/add"))
        .and(header("token", TOKEN))
        .and(body_json(json!({ "itemId": "p1", "size": "M" })))
        .respond_with(ok(json!({ "message": "Added To Cart" })))
        .expect(2)
        .mount(&shop.server)
        .await;

    let mut session = shop.signed_in(json!({})).await;
    assert!(session.add_to_cart(&ProductId::new("p1"), Some("M")).await);
    assert!(session.add_to_cart(&ProductId::new("p1"), Some("M")).await);

    assert_eq!(session.cart().quantity(&ProductId::new("p1"), &medium()), 2);
    assert!(session.notifications().is_empty());
}

#[tokio::test]
async fn test_failed_mirror_keeps_local_change() {
    let shop = TestShop::start().await;
    Mock::given(method("POST"))
        .and(path("/api/cart/add"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&shop.server)
        .await;

    let mut session = shop.signed_in(json!({})).await;
    assert!(session.add_to_cart(&ProductId::new("p1"), Some("M")).await);

    assert_eq!(session.cart_count(), 1);
    assert_eq!(
        session.drain_notifications(),
        vec![Notification::error("Something went wrong")]
    );
    // No retry.
    assert_eq!(shop.requests_to("/api/cart/add").await.len(), 1);
}

#[tokio::test]
async fn test_missing_size_makes_no_request() {
    let shop = TestShop::start().await;
    Mock::given(method("POST"))
        .and(path("/api/cart/add"))
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&shop.server)
        .await;

    let mut session = shop.signed_in(json!({})).await;
    assert!(!session.add_to_cart(&ProductId::new("p1"), None).await);
    assert!(session.cart().is_empty());
    assert_eq!(
        session.drain_notifications(),
        vec![Notification::error("Select Product Size")]
    );
}

#[tokio::test]
async fn test_update_mirrors_absolute_quantity() {
    let shop = TestShop::start().await;
    Mock::given(method("POST"))
        .and(path("/api/cart/update"))
        .and(header("token", TOKEN))
        .and(body_json(json!({ "itemId": "p1", "size": "M", "quantity": 0 })))
        .respond_with(ok(json!({ "message": "Cart Updated" })))
        .expect(1)
        .mount(&shop.server)
        .await;

    let mut session = shop.signed_in(json!({ "p1": { "M": 3 } })).await;
    assert!(session.remove_from_cart(&ProductId::new("p1"), &medium()).await);

    assert_eq!(session.cart_count(), 0);
    assert!(session.cart_lines().is_empty());
    // The zeroed entry stays in the map.
    assert!(session.cart().contains(&ProductId::new("p1")));
}

#[tokio::test]
async fn test_guest_cart_never_calls_backend() {
    let shop = TestShop::start().await;

    let mut session = shop.guest();
    assert!(session.add_to_cart(&ProductId::new("p1"), Some("L")).await);
    let large = Size::parse("L").unwrap();
    assert!(session.update_quantity(&ProductId::new("p1"), &large, 4).await);

    assert_eq!(session.cart_count(), 4);
    assert!(shop.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_overwrites_guest_cart() {
    let shop = TestShop::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/login"))
        .and(body_json(json!({ "email": "ada@example.com", "password": "hunter22" })))
        .respond_with(ok(json!({ "token": TOKEN })))
        .mount(&shop.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/cart/get"))
        .and(header("token", TOKEN))
        .respond_with(ok(json!({ "cartData": { "p9": { "XL": 1 } } })))
        .mount(&shop.server)
        .await;

    let tokens = Arc::new(MemoryTokenStore::new());
    let mut session = Session::new(shop.api(), tokens.clone());
    session.add_to_cart(&ProductId::new("p1"), Some("M")).await;

    let password = SecretString::from("hunter22");
    assert!(session.login("ada@example.com", &password).await);

    assert!(!session.cart().contains(&ProductId::new("p1")));
    assert!(session.cart().contains(&ProductId::new("p9")));
    assert!(tokens.load().ok().flatten().is_some());
}

#[tokio::test]
async fn test_rejected_login_keeps_guest_state() {
    let shop = TestShop::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/login"))
        .respond_with(rejected("Invalid credentials"))
        .mount(&shop.server)
        .await;

    let mut session = shop.guest();
    let password = SecretString::from("wrong");
    assert!(!session.login("ada@example.com", &password).await);
    assert!(!session.is_authenticated());
    assert_eq!(
        session.drain_notifications(),
        vec![Notification::error("Invalid credentials")]
    );
}

#[tokio::test]
async fn test_logout_forgets_saved_token() {
    let shop = TestShop::start().await;
    let tokens = Arc::new(MemoryTokenStore::with_token(TOKEN));
    let mut session = shop.signed_in_with(tokens.clone(), json!({ "p1": { "M": 1 } })).await;

    session.logout();

    assert!(!session.is_authenticated());
    assert!(session.cart().is_empty());
    assert!(tokens.load().ok().flatten().is_none());
}

#[tokio::test]
async fn test_restore_keeps_whitespace_size_keys_apart() {
    let shop = TestShop::start().await;
    let server_cart = json!({ "p1": { "M ": 1, " M": 2 } });

    let session = shop.signed_in(server_cart.clone()).await;

    assert_eq!(serde_json::to_value(session.cart()).unwrap(), server_cart);
    assert_eq!(session.cart_count(), 3);
    assert_eq!(session.cart_lines().len(), 2);
}

#[tokio::test]
async fn test_restore_accepts_empty_size_key() {
    let shop = TestShop::start().await;
    let server_cart = json!({ "p1": { "M": 2, "": 1 } });

    let session = shop.signed_in(server_cart.clone()).await;

    assert!(session.is_authenticated());
    assert_eq!(serde_json::to_value(session.cart()).unwrap(), server_cart);
    assert_eq!(session.cart_count(), 3);
    assert!(session.notifications().is_empty());
}

#[tokio::test]
async fn test_failed_update_keeps_local_quantity() {
    let shop = TestShop::start().await;
    Mock::given(method("POST"))
        .and(path("/api/cart/update"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&shop.server)
        .await;

    let mut session = shop.signed_in(json!({ "p1": { "M": 3 } })).await;
    assert!(session.update_quantity(&ProductId::new("p1"), &medium(), 1).await);

    assert_eq!(session.cart().quantity(&ProductId::new("p1"), &medium()), 1);
    assert_eq!(
        session.drain_notifications(),
        vec![Notification::error("Something went wrong")]
    );
}

async fn restore_against(shop: &TestShop, response: ResponseTemplate) -> Session {
    Mock::given(method("POST"))
        .and(path("/api/cart/get"))
        .and(header("token", TOKEN))
        .respond_with(response)
        .expect(1)
        .mount(&shop.server)
        .await;
    let tokens = Arc::new(MemoryTokenStore::with_token(TOKEN));
    Session::restore(shop.api(), tokens).await
}

#[tokio::test]
async fn test_restore_survives_cart_fetch_failure() {
    let shop = TestShop::start().await;

    let mut session = restore_against(&shop, ResponseTemplate::new(500)).await;

    assert!(session.is_authenticated());
    assert!(session.cart().is_empty());
    assert_eq!(
        session.drain_notifications(),
        vec![Notification::error("Something went wrong")]
    );
}

#[tokio::test]
async fn test_restore_survives_rejected_cart_fetch() {
    let shop = TestShop::start().await;

    let mut session = restore_against(&shop, rejected("Session expired")).await;

    assert!(session.is_authenticated());
    assert!(session.cart().is_empty());
    assert_eq!(
        session.drain_notifications(),
        vec![Notification::error("Session expired")]
    );
}
