//! Product listing against a fake backend.

use serde_json::json;
use shopfront_core::ProductId;
use shopfront_integration_tests::{TestShop, ok, product, rejected};
use shopfront_storefront::Notification;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_product_list_is_cached() {
    let shop = TestShop::start().await;
    Mock::given(method("GET"))
        .and(path("/api/product/list"))
        .respond_with(ok(json!({ "products": [product("p1", "Tee", 20, &["M"])] })))
        .expect(1)
        .mount(&shop.server)
        .await;

    let mut session = shop.guest();
    assert!(session.load_products().await);
    assert!(session.load_products().await);
    assert_eq!(session.catalog().products().len(), 1);
    assert!(session.catalog().find(&ProductId::new("p1")).is_some());
}

#[tokio::test]
async fn test_refresh_bypasses_cache() {
    let shop = TestShop::start().await;
    Mock::given(method("GET"))
        .and(path("/api/product/list"))
        .respond_with(ok(json!({ "products": [] })))
        .expect(2)
        .mount(&shop.server)
        .await;

    let mut session = shop.guest();
    assert!(session.load_products().await);
    assert!(session.refresh_products().await);
}

#[tokio::test]
async fn test_rejected_listing_shows_server_message() {
    let shop = TestShop::start().await;
    Mock::given(method("GET"))
        .and(path("/api/product/list"))
        .respond_with(rejected("Catalog is being rebuilt"))
        .mount(&shop.server)
        .await;

    let mut session = shop.guest();
    assert!(!session.load_products().await);
    assert!(!session.catalog().is_loaded());
    assert_eq!(
        session.drain_notifications(),
        vec![Notification::error("Catalog is being rebuilt")]
    );
}

#[tokio::test]
async fn test_transport_failure_shows_generic_message() {
    let shop = TestShop::start().await;
    Mock::given(method("GET"))
        .and(path("/api/product/list"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&shop.server)
        .await;

    let mut session = shop.guest();
    assert!(!session.load_products().await);
    assert_eq!(
        session.drain_notifications(),
        vec![Notification::error("Something went wrong")]
    );
}
