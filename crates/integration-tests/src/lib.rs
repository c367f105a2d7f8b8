//! Integration tests for the Shopfront storefront client.
//!
//! Each test starts a [`wiremock`] server standing in for the shop backend
//! and drives a real [`Session`] against it.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog` - Product listing and caching
//! - `cart_sync` - Cart mirroring and server reconciliation
//! - `checkout` - Order placement and payment verification
//! - `orders` - Order history

use std::sync::Arc;

use serde_json::{Value, json};
use shopfront_core::Address;
use shopfront_storefront::{ApiClient, MemoryTokenStore, Session, StorefrontConfig, TokenStore};
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token the fake backend accepts.
pub const TOKEN: &str = "test-token";

/// A fake backend plus helpers for building sessions against it.
pub struct TestShop {
    pub server: MockServer,
}

impl TestShop {
    /// Start a fresh fake backend.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// API client pointed at the fake backend.
    ///
    /// # Panics
    ///
    /// Panics if the mock server URI is not a valid URL.
    #[allow(clippy::unwrap_used)]
    #[must_use]
    pub fn api(&self) -> ApiClient {
        let config = StorefrontConfig::for_backend(Url::parse(&self.server.uri()).unwrap());
        ApiClient::new(&config).unwrap()
    }

    /// A guest session with an empty cart.
    #[must_use]
    pub fn guest(&self) -> Session {
        Session::new(self.api(), Arc::new(MemoryTokenStore::new()))
    }

    /// A session resumed from a saved [`TOKEN`] whose server cart is `cart`.
    pub async fn signed_in(&self, cart: Value) -> Session {
        self.signed_in_with(Arc::new(MemoryTokenStore::with_token(TOKEN)), cart)
            .await
    }

    /// Like [`Self::signed_in`] with a caller-provided token store.
    pub async fn signed_in_with(&self, tokens: Arc<dyn TokenStore>, cart: Value) -> Session {
        Mock::given(method("POST"))
            .and(path("/api/cart/get"))
            .and(header("token", TOKEN))
            .respond_with(ok(json!({ "cartData": cart })))
            .mount(&self.server)
            .await;
        Session::restore(self.api(), tokens).await
    }

    /// Serve `products` from the product list endpoint.
    pub async fn serve_products(&self, products: Value) {
        Mock::given(method("GET"))
            .and(path("/api/product/list"))
            .respond_with(ok(json!({ "products": products })))
            .mount(&self.server)
            .await;
    }

    /// Requests received so far to `endpoint`.
    ///
    /// # Panics
    ///
    /// Panics if request recording is disabled.
    #[allow(clippy::unwrap_used)]
    pub async fn requests_to(&self, endpoint: &str) -> Vec<wiremock::Request> {
        self.server
            .received_requests()
            .await
            .unwrap()
            .into_iter()
            .filter(|request| request.url.path() == endpoint)
            .collect()
    }
}

/// `200 { success: true, ...payload }`.
#[must_use]
pub fn ok(payload: Value) -> ResponseTemplate {
    let mut body = json!({ "success": true });
    if let (Some(body), Value::Object(fields)) = (body.as_object_mut(), payload) {
        body.extend(fields);
    }
    ResponseTemplate::new(200).set_body_json(body)
}

/// `200 { success: false, message }`.
#[must_use]
pub fn rejected(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": false, "message": message }))
}

/// Catalog entry as the backend serves it.
#[must_use]
pub fn product(id: &str, name: &str, price: u32, sizes: &[&str]) -> Value {
    json!({
        "_id": id,
        "name": name,
        "description": format!("{name} description"),
        "price": price,
        "image": [format!("https://img.shop.test/{id}.png")],
        "category": "Men",
        "subCategory": "Topwear",
        "sizes": sizes,
        "bestseller": false,
        "date": 1_716_000_000_000_i64,
    })
}

/// A complete delivery address.
#[must_use]
pub fn address() -> Address {
    Address {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@example.com".into(),
        street: "12 Analytical Row".into(),
        city: "London".into(),
        state: "Greater London".into(),
        zipcode: "N1 9GU".into(),
        country: "UK".into(),
        phone: "+44 20 7946 0000".into(),
    }
}
