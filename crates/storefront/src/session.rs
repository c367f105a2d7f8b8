//! The shopper's session: token, cart state, loaded catalog and pending
//! notifications, owned in one place and passed by `&mut` to whatever needs
//! it.
//!
//! Local cart state is the source of truth while the session lives. Every
//! mutation is applied locally first and then mirrored to the backend when a
//! token is present; a failed mirror is reported but never rolled back. The
//! only reconciliation is the wholesale overwrite from the server cart at
//! login or restore time.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{info, instrument, warn};

use shopfront_core::{CartLine, CartState, DELIVERY_FEE, Price, ProductId, Size};

use crate::api::ApiClient;
use crate::catalog::Catalog;
use crate::error::{StoreError, add_breadcrumb};
use crate::notify::{Notification, Notifications};
use crate::route::Route;
use crate::token::TokenStore;

/// Cart summary shown next to the checkout button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    pub subtotal: Price,
    pub delivery_fee: Price,
    /// Subtotal plus delivery, or zero for an empty cart.
    pub total: Price,
}

/// Whose credentials the session token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    Admin,
}

/// A storefront session.
pub struct Session {
    pub(crate) api: ApiClient,
    tokens: Arc<dyn TokenStore>,
    pub(crate) token: Option<SecretString>,
    role: Role,
    pub(crate) cart: CartState,
    pub(crate) catalog: Catalog,
    notifications: Notifications,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.token.is_some())
            .field("role", &self.role)
            .field("cart", &self.cart)
            .field("products", &self.catalog.products().len())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Start a guest session with an empty cart.
    #[must_use]
    pub fn new(api: ApiClient, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            api,
            tokens,
            token: None,
            role: Role::Customer,
            cart: CartState::new(),
            catalog: Catalog::default(),
            notifications: Notifications::default(),
        }
    }

    /// Start a session, resuming a previously saved token if there is one.
    ///
    /// With a saved token the cart is replaced by the server's cart for that
    /// user. Failures leave a guest-like session with an empty cart and a
    /// notification.
    #[instrument(skip_all)]
    pub async fn restore(api: ApiClient, tokens: Arc<dyn TokenStore>) -> Self {
        let mut session = Self::new(api, tokens);
        match session.tokens.load() {
            Ok(Some(token)) => {
                info!("Resuming saved session");
                session.token = Some(token);
                session.sync_cart_from_server().await;
            }
            Ok(None) => {}
            Err(err) => warn!(error = %err, "Could not read saved session token"),
        }
        session
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub const fn cart(&self) -> &CartState {
        &self.cart
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Take all pending notifications, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    /// Pending notifications without consuming them.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        self.notifications.pending()
    }

    pub(crate) fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Report `err` and queue it for the shopper.
    pub(crate) fn fail(&mut self, operation: &str, err: &StoreError) {
        err.report(operation);
        self.notifications.push(Notification::from(err));
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Log a customer in and adopt the server's cart.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &SecretString) -> bool {
        match self.api.login(email, password).await {
            Ok(token) => {
                self.begin(token, Role::Customer);
                self.sync_cart_from_server().await;
                true
            }
            Err(err) => {
                self.fail("login", &err);
                false
            }
        }
    }

    /// Register a customer account and start a session for it.
    #[instrument(skip(self, password))]
    pub async fn register(&mut self, name: &str, email: &str, password: &SecretString) -> bool {
        match self.api.register(name, email, password).await {
            Ok(token) => {
                self.begin(token, Role::Customer);
                self.sync_cart_from_server().await;
                true
            }
            Err(err) => {
                self.fail("register", &err);
                false
            }
        }
    }

    /// Log an administrator in. Admin sessions carry no cart.
    #[instrument(skip(self, password))]
    pub async fn admin_login(&mut self, email: &str, password: &SecretString) -> bool {
        match self.api.admin_login(email, password).await {
            Ok(token) => {
                self.begin(token, Role::Admin);
                self.cart.clear();
                true
            }
            Err(err) => {
                self.fail("admin_login", &err);
                false
            }
        }
    }

    fn begin(&mut self, token: SecretString, role: Role) {
        if let Err(err) = self.tokens.save(&token) {
            // The session still works; it just won't survive a restart.
            warn!(error = %err, "Could not persist session token");
        }
        self.token = Some(token);
        self.role = role;
    }

    /// End the session: forget the token and empty the cart.
    pub fn logout(&mut self) -> Route {
        if let Err(err) = self.tokens.clear() {
            warn!(error = %err, "Could not remove saved session token");
        }
        self.token = None;
        self.role = Role::Customer;
        self.cart.clear();
        Route::Login
    }

    /// Replace the local cart with the server's copy. No-op without a token.
    pub async fn sync_cart_from_server(&mut self) {
        let Some(token) = self.token.as_ref() else {
            return;
        };
        let fetched = self.api.cart_get(token).await;
        match fetched {
            Ok(cart) => self.cart = cart,
            Err(err) => self.fail("cart_get", &err),
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Load the product list into the session. Returns whether a catalog is
    /// available afterwards.
    pub async fn load_products(&mut self) -> bool {
        match self.api.list_products().await {
            Ok(products) => {
                self.catalog = Catalog::new(products);
                true
            }
            Err(err) => {
                self.fail("list_products", &err);
                false
            }
        }
    }

    /// Drop the cached product list and load it again.
    pub async fn refresh_products(&mut self) -> bool {
        self.api.invalidate_catalog().await;
        self.load_products().await
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of `product_id` in `size`.
    ///
    /// Without a size nothing changes, nothing is sent, and the shopper is
    /// asked to pick one. Returns whether the cart changed.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_to_cart(&mut self, product_id: &ProductId, size: Option<&str>) -> bool {
        let size = match Size::from_selection(size) {
            Ok(size) => size,
            Err(err) => {
                self.fail("add_to_cart", &StoreError::from(err));
                return false;
            }
        };

        self.cart.add_one(product_id, size.clone());
        add_breadcrumb(
            "cart",
            "Added to cart",
            &[("product_id", product_id.as_str()), ("size", size.as_str())],
        );

        let mirrored = match self.token.as_ref() {
            Some(token) => self.api.cart_add(token, product_id, &size).await,
            None => Ok(()),
        };
        if let Err(err) = mirrored {
            self.fail("cart_add", &err);
        }
        true
    }

    /// Overwrite the quantity of `[product_id][size]`; zero removes the line.
    ///
    /// The product must already be in the cart. Returns whether the cart
    /// changed.
    #[instrument(skip(self), fields(product_id = %product_id, size = %size))]
    pub async fn update_quantity(
        &mut self,
        product_id: &ProductId,
        size: &Size,
        quantity: u32,
    ) -> bool {
        let quantity = i64::from(quantity);
        if let Err(err) = self.cart.set_quantity(product_id, size.clone(), quantity) {
            self.fail("update_quantity", &StoreError::from(err));
            return false;
        }

        let mirrored = match self.token.as_ref() {
            Some(token) => self.api.cart_update(token, product_id, size, quantity).await,
            None => Ok(()),
        };
        if let Err(err) = mirrored {
            self.fail("cart_update", &err);
        }
        true
    }

    /// Remove a cart line (sets its quantity to zero).
    pub async fn remove_from_cart(&mut self, product_id: &ProductId, size: &Size) -> bool {
        self.update_quantity(product_id, size, 0).await
    }

    /// Total number of units in the cart.
    #[must_use]
    pub fn cart_count(&self) -> u64 {
        self.cart.count()
    }

    /// Value of the cart at catalog prices.
    ///
    /// Lines whose product is not in the loaded catalog are left out and
    /// logged; the rest of the cart is still priced.
    #[must_use]
    pub fn cart_amount(&self) -> Price {
        let amount = self.cart.amount(|id| self.catalog.price_of(id));
        if !amount.unpriced.is_empty() {
            warn!(
                unpriced = ?amount.unpriced,
                catalog_loaded = self.catalog.is_loaded(),
                "Cart contains products missing from the catalog"
            );
        }
        amount.total
    }

    /// Subtotal, delivery fee and grand total.
    #[must_use]
    pub fn cart_totals(&self) -> CartTotals {
        let subtotal = self.cart_amount();
        let total = if subtotal.is_zero() {
            Price::ZERO
        } else {
            subtotal + DELIVERY_FEE
        };
        CartTotals {
            subtotal,
            delivery_fee: DELIVERY_FEE,
            total,
        }
    }

    /// Cart lines with a positive quantity.
    #[must_use]
    pub fn cart_lines(&self) -> Vec<CartLine> {
        self.cart.lines().collect()
    }

    /// Replace the cart wholesale (used after checkout).
    pub(crate) fn clear_cart(&mut self) {
        self.cart.clear();
    }
}
