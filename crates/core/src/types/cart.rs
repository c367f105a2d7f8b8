//! Cart state: desired purchase quantities per product and size.
//!
//! The cart is a plain nested mapping `product -> size -> quantity`, stored by
//! the backend verbatim as `cartData`. Only positive quantities count; zero is
//! how the storefront records a removed line, and anything non-positive that
//! arrives from the server is treated as absent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Price, ProductId, Size};

/// Errors raised by cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// `set_quantity` was called for a product that has no cart entry.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),
}

/// One displayable cart line (positive quantity only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub size: Size,
    pub quantity: i64,
}

/// Result of pricing a cart against a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartAmount {
    /// Sum of `price * quantity` over every priced line.
    pub total: Price,
    /// Products with positive quantities that had no price available.
    pub unpriced: Vec<ProductId>,
}

/// Client-held cart state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartState(BTreeMap<ProductId, BTreeMap<Size, i64>>);

impl CartState {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Increment the quantity at `[product][size]` by one, creating entries as
    /// needed. Returns the new quantity.
    pub fn add_one(&mut self, product_id: &ProductId, size: Size) -> i64 {
        let quantity = self
            .0
            .entry(product_id.clone())
            .or_default()
            .entry(size)
            .or_insert(0);
        // Plain increment, same as the server applies to its copy.
        *quantity = quantity.saturating_add(1);
        *quantity
    }

    /// Overwrite the quantity at `[product][size]`. Zero marks the line removed.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotInCart` if the product has no entry at all.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        size: Size,
        quantity: i64,
    ) -> Result<(), CartError> {
        let sizes = self
            .0
            .get_mut(product_id)
            .ok_or_else(|| CartError::NotInCart(product_id.clone()))?;
        sizes.insert(size, quantity);
        Ok(())
    }

    /// Stored quantity at `[product][size]`, zero if absent.
    #[must_use]
    pub fn quantity(&self, product_id: &ProductId, size: &Size) -> i64 {
        self.0
            .get(product_id)
            .and_then(|sizes| sizes.get(size))
            .copied()
            .unwrap_or(0)
    }

    /// Whether the product has an entry (even with zero quantities).
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.0.contains_key(product_id)
    }

    /// Sum of all positive quantities.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lines()
            .map(|line| line.quantity.unsigned_abs())
            .sum()
    }

    /// Whether there is nothing to buy.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines().next().is_none()
    }

    /// Iterate the lines with a positive quantity, ordered by product then size.
    pub fn lines(&self) -> impl Iterator<Item = CartLine> + '_ {
        self.0.iter().flat_map(|(product_id, sizes)| {
            sizes
                .iter()
                .filter(|(_, quantity)| **quantity > 0)
                .map(move |(size, quantity)| CartLine {
                    product_id: product_id.clone(),
                    size: size.clone(),
                    quantity: *quantity,
                })
        })
    }

    /// Price the cart. `price_of` looks a product up in the loaded catalog;
    /// lines whose product cannot be priced are left out of the total and
    /// reported in [`CartAmount::unpriced`].
    pub fn amount<F>(&self, mut price_of: F) -> CartAmount
    where
        F: FnMut(&ProductId) -> Option<Price>,
    {
        let mut amount = CartAmount::default();
        for (product_id, sizes) in &self.0 {
            let quantity: i64 = sizes.values().filter(|q| **q > 0).sum();
            if quantity == 0 {
                continue;
            }
            match price_of(product_id) {
                Some(price) => amount.total = amount.total + price.times(quantity),
                None => amount.unpriced.push(product_id.clone()),
            }
        }
        amount
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pid(id: &str) -> ProductId {
        ProductId::new(id)
    }

    fn size(label: &str) -> Size {
        Size::parse(label).unwrap()
    }

    #[test]
    fn test_add_one_twice_counts_two() {
        let mut cart = CartState::new();
        cart.add_one(&pid("p1"), size("M"));
        let quantity = cart.add_one(&pid("p1"), size("M"));
        assert_eq!(quantity, 2);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_count_equals_number_of_adds() {
        let mut cart = CartState::new();
        let adds = [("p1", "S"), ("p2", "M"), ("p1", "S"), ("p1", "L"), ("p3", "XL")];
        for (id, label) in adds {
            cart.add_one(&pid(id), size(label));
        }
        assert_eq!(cart.count(), adds.len() as u64);
    }

    #[test]
    fn test_zero_quantity_excluded_from_count() {
        let mut cart = CartState::new();
        cart.add_one(&pid("p1"), size("M"));
        cart.add_one(&pid("p1"), size("L"));
        cart.set_quantity(&pid("p1"), size("M"), 0).unwrap();

        assert_eq!(cart.count(), 1);
        assert_eq!(cart.lines().count(), 1);
        assert!(cart.contains(&pid("p1")));
    }

    #[test]
    fn test_set_quantity_requires_existing_product() {
        let mut cart = CartState::new();
        assert_eq!(
            cart.set_quantity(&pid("ghost"), size("M"), 3),
            Err(CartError::NotInCart(pid("ghost")))
        );
        assert_eq!(cart, CartState::new());
    }

    #[test]
    fn test_set_quantity_may_create_new_size() {
        let mut cart = CartState::new();
        cart.add_one(&pid("p1"), size("M"));
        cart.set_quantity(&pid("p1"), size("L"), 4).unwrap();
        assert_eq!(cart.quantity(&pid("p1"), &size("L")), 4);
        assert_eq!(cart.count(), 5);
    }

    #[test]
    fn test_negative_entries_ignored() {
        let json = serde_json::json!({ "p1": { "M": -2, "L": 3 }, "p2": { "S": 0 } });
        let cart: CartState = serde_json::from_value(json).unwrap();
        assert_eq!(cart.count(), 3);
        assert!(!cart.is_empty());

        let mut cart = cart;
        assert_eq!(cart.add_one(&pid("p1"), size("M")), -1);
        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn test_amount_uses_catalog_price() {
        let mut cart = CartState::new();
        cart.add_one(&pid("p1"), size("M"));
        cart.add_one(&pid("p1"), size("M"));

        let amount = cart.amount(|_| Some(Price::from_units(10)));
        assert_eq!(amount.total, Price::from_units(20));
        assert!(amount.unpriced.is_empty());
    }

    #[test]
    fn test_amount_skips_unpriced_products() {
        let mut cart = CartState::new();
        cart.add_one(&pid("p1"), size("M"));
        cart.add_one(&pid("gone"), size("S"));

        let amount = cart.amount(|id| (id.as_str() == "p1").then(|| Price::from_units(7)));
        assert_eq!(amount.total, Price::from_units(7));
        assert_eq!(amount.unpriced, vec![pid("gone")]);
    }

    #[test]
    fn test_amount_independent_of_add_order() {
        let prices = |id: &ProductId| match id.as_str() {
            "a" => Some(Price::from_units(3)),
            "b" => Some(Price::from_units(11)),
            _ => None,
        };
        let mut forward = CartState::new();
        let mut backward = CartState::new();
        let adds = [("a", "S"), ("b", "M"), ("a", "S"), ("b", "L")];
        for (id, label) in adds {
            forward.add_one(&pid(id), size(label));
        }
        for (id, label) in adds.iter().rev() {
            backward.add_one(&pid(id), size(label));
        }
        assert_eq!(forward.amount(prices), backward.amount(prices));
        assert_eq!(forward.amount(prices).total, Price::from_units(28));
    }

    #[test]
    fn test_serializes_as_nested_object() {
        let mut cart = CartState::new();
        cart.add_one(&pid("p1"), size("M"));
        assert_eq!(
            serde_json::to_value(&cart).unwrap(),
            serde_json::json!({ "p1": { "M": 1 } })
        );
    }
}
