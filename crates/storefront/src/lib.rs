//! Shopfront storefront client.
//!
//! Everything a shopper-facing front end needs on top of the backend API:
//! catalog browsing, a locally owned cart mirrored to the server, checkout
//! with COD or hosted Stripe payment, and order history. All state lives in
//! a [`Session`]; failures surface as [`Notification`]s rather than errors.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod history;
pub mod notify;
pub mod route;
pub mod session;
pub mod token;

pub use api::ApiClient;
pub use catalog::{Catalog, ProductFilter, SortOrder};
pub use checkout::PaymentCallback;
pub use config::StorefrontConfig;
pub use error::{Result, StoreError};
pub use history::OrderHistoryEntry;
pub use notify::{Level, Notification};
pub use route::Route;
pub use session::{CartTotals, Role, Session};
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};
