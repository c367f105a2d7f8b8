//! Shopfront Core - Shared types library.
//!
//! This crate provides the domain types used across all Shopfront components:
//! - `storefront` - Session, cart container, checkout and order history client
//! - `cli` - Command-line front end for the storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure cart arithmetic - no I/O, no
//! HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Identifiers, prices, sizes, products, cart state, orders and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
