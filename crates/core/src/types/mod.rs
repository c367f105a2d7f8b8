//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod email;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod size;
pub mod status;

pub use cart::{CartAmount, CartError, CartLine, CartState};
pub use email::{Email, EmailError};
pub use id::*;
pub use order::{Address, AddressError, Order, OrderItem};
pub use price::{CURRENCY_SYMBOL, DELIVERY_FEE, Price, PriceError};
pub use product::Product;
pub use size::{Size, SizeError};
pub use status::*;
