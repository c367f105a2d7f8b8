//! HTTP client for the shop backend.
//!
//! # Endpoints
//!
//! ```text
//! POST /api/user/register        - Register, returns token
//! POST /api/user/login           - Customer login, returns token
//! POST /api/user/admin           - Admin login, returns token
//! GET  /api/product/list         - Catalog listing (cached 5 minutes)
//! POST /api/cart/add             - Mirror one increment       (token)
//! POST /api/cart/update          - Mirror an absolute quantity (token)
//! POST /api/cart/get             - Authoritative cart          (token)
//! POST /api/order/place          - Cash-on-delivery order      (token)
//! POST /api/order/stripe         - Stripe checkout session     (token)
//! POST /api/order/verifyStripe   - Confirm Stripe payment      (token)
//! POST /api/order/userorders     - Order history               (token)
//! ```
//!
//! Authenticated calls carry the opaque session token in a `token` header.
//! Non-2xx statuses and undecodable bodies are transport errors; a decoded
//! `success: false` is a server error.

pub mod types;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};
use url::Url;

use shopfront_core::{Address, CartState, Order, OrderId, OrderItem, Price, Product, ProductId, Size};

use crate::config::StorefrontConfig;
use crate::error::{Result, StoreError};

use types::{
    Ack, CartAddRequest, CartPayload, CartUpdateRequest, EmptyBody, Envelope, LoginRequest,
    OrdersPayload, PlaceOrderRequest, ProductListPayload, RegisterRequest, StripeSessionPayload,
    TokenPayload, VerifyRequest,
};

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "token";

const PRODUCT_LIST_KEY: &str = "products:list";
const CATALOG_TTL: Duration = Duration::from_secs(300);

mod paths {
    pub const REGISTER: &str = "api/user/register";
    pub const LOGIN: &str = "api/user/login";
    pub const ADMIN_LOGIN: &str = "api/user/admin";
    pub const PRODUCT_LIST: &str = "api/product/list";
    pub const CART_ADD: &str = "api/cart/add";
    pub const CART_UPDATE: &str = "api/cart/update";
    pub const CART_GET: &str = "api/cart/get";
    pub const ORDER_PLACE: &str = "api/order/place";
    pub const ORDER_STRIPE: &str = "api/order/stripe";
    pub const ORDER_VERIFY_STRIPE: &str = "api/order/verifyStripe";
    pub const USER_ORDERS: &str = "api/order/userorders";
}

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the shop backend.
///
/// Cheap to clone; clones share the HTTP connection pool and catalog cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    catalog: Cache<&'static str, Arc<Vec<Product>>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Network` if the HTTP client cannot be built.
    pub fn new(config: &StorefrontConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let catalog = Cache::builder()
            .max_capacity(1)
            .time_to_live(CATALOG_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.backend_url.clone(),
                catalog,
            }),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.inner
            .base_url
            .join(path)
            .map_err(|e| {
                error!(path, error = %e, "Cannot build backend endpoint");
                StoreError::server(None)
            })
    }

    /// Send a request and decode the standard envelope.
    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.send().await?.error_for_status()?;
        let envelope: Envelope<T> = response.json().await?;
        envelope.into_data()
    }

    async fn post<B, T>(&self, path: &str, token: Option<&SecretString>, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.inner.client.post(self.endpoint(path)?).json(body);
        if let Some(token) = token {
            request = request.header(TOKEN_HEADER, token.expose_secret());
        }
        self.send(request).await
    }

    // =========================================================================
    // Credential exchange
    // =========================================================================

    /// Register a customer account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<SecretString> {
        let body = RegisterRequest {
            name,
            email,
            password: password.expose_secret(),
        };
        let payload: TokenPayload = self.post(paths::REGISTER, None, &body).await?;
        into_token(payload)
    }

    /// Log a customer in.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the credentials are rejected.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<SecretString> {
        self.credential_exchange(paths::LOGIN, email, password).await
    }

    /// Log an administrator in.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the credentials are rejected.
    #[instrument(skip(self, password))]
    pub async fn admin_login(&self, email: &str, password: &SecretString) -> Result<SecretString> {
        self.credential_exchange(paths::ADMIN_LOGIN, email, password)
            .await
    }

    async fn credential_exchange(
        &self,
        path: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<SecretString> {
        let body = LoginRequest {
            email,
            password: password.expose_secret(),
        };
        let payload: TokenPayload = self.post(path, None, &body).await?;
        into_token(payload)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// List all products. Served from cache for five minutes after a fetch.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Arc<Vec<Product>>> {
        if let Some(products) = self.inner.catalog.get(PRODUCT_LIST_KEY).await {
            debug!("Cache hit for product list");
            return Ok(products);
        }

        let request = self.inner.client.get(self.endpoint(paths::PRODUCT_LIST)?);
        let payload: ProductListPayload = self.send(request).await?;
        let products = Arc::new(payload.products);

        self.inner
            .catalog
            .insert(PRODUCT_LIST_KEY, Arc::clone(&products))
            .await;

        Ok(products)
    }

    /// Drop the cached product list so the next listing refetches.
    pub async fn invalidate_catalog(&self) {
        self.inner.catalog.invalidate(PRODUCT_LIST_KEY).await;
    }

    // =========================================================================
    // Cart mirror
    // =========================================================================

    /// Mirror a single increment of `[item][size]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self, token), fields(item_id = %item_id, size = %size))]
    pub async fn cart_add(&self, token: &SecretString, item_id: &ProductId, size: &Size) -> Result<()> {
        let body = CartAddRequest { item_id, size };
        let _: Ack = self.post(paths::CART_ADD, Some(token), &body).await?;
        Ok(())
    }

    /// Mirror an absolute quantity for `[item][size]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self, token), fields(item_id = %item_id, size = %size))]
    pub async fn cart_update(
        &self,
        token: &SecretString,
        item_id: &ProductId,
        size: &Size,
        quantity: i64,
    ) -> Result<()> {
        let body = CartUpdateRequest {
            item_id,
            size,
            quantity,
        };
        let _: Ack = self.post(paths::CART_UPDATE, Some(token), &body).await?;
        Ok(())
    }

    /// Fetch the server's authoritative cart for the token's user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self, token))]
    pub async fn cart_get(&self, token: &SecretString) -> Result<CartState> {
        let payload: CartPayload = self.post(paths::CART_GET, Some(token), &EmptyBody {}).await?;
        Ok(payload.cart_data)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Place a cash-on-delivery order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self, token, address, items), fields(items = items.len(), amount = %amount))]
    pub async fn place_cod_order(
        &self,
        token: &SecretString,
        address: &Address,
        items: &[OrderItem],
        amount: Price,
    ) -> Result<()> {
        let body = PlaceOrderRequest {
            address,
            items,
            amount,
        };
        let _: Ack = self.post(paths::ORDER_PLACE, Some(token), &body).await?;
        Ok(())
    }

    /// Create a Stripe-paid order and return the hosted checkout URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend reports failure, or
    /// the response carries no session URL.
    #[instrument(skip(self, token, address, items), fields(items = items.len(), amount = %amount))]
    pub async fn place_stripe_order(
        &self,
        token: &SecretString,
        address: &Address,
        items: &[OrderItem],
        amount: Price,
    ) -> Result<Url> {
        let body = PlaceOrderRequest {
            address,
            items,
            amount,
        };
        let payload: StripeSessionPayload =
            self.post(paths::ORDER_STRIPE, Some(token), &body).await?;
        payload
            .session_url
            .ok_or_else(|| StoreError::server(Some("Payment session unavailable".to_string())))
    }

    /// Report a Stripe payment outcome for `order_id`. Returns the backend's
    /// `success` flag; a declined payment is `Ok(false)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Network` if the request fails.
    #[instrument(skip(self, token), fields(order_id = %order_id))]
    pub async fn verify_stripe(
        &self,
        token: &SecretString,
        success: &str,
        order_id: &OrderId,
    ) -> Result<bool> {
        let body = VerifyRequest { success, order_id };
        match self
            .post::<_, Ack>(paths::ORDER_VERIFY_STRIPE, Some(token), &body)
            .await
        {
            Ok(Ack {}) => Ok(true),
            Err(StoreError::Server(message)) => {
                debug!(message = %message, "Payment not verified");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Fetch every order of the token's user, oldest first as stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self, token))]
    pub async fn user_orders(&self, token: &SecretString) -> Result<Vec<Order>> {
        let payload: OrdersPayload = self
            .post(paths::USER_ORDERS, Some(token), &EmptyBody {})
            .await?;
        Ok(payload.orders)
    }
}

fn into_token(payload: TokenPayload) -> Result<SecretString> {
    payload
        .token
        .filter(|token| !token.is_empty())
        .map(SecretString::from)
        .ok_or_else(|| StoreError::server(Some("No session token in response".to_string())))
}
