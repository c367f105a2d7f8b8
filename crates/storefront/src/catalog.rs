//! The loaded product catalog and collection browsing.

use std::collections::BTreeSet;
use std::sync::Arc;

use shopfront_core::{Price, Product, ProductId};

/// Ordering of a filtered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Catalog order as served by the backend.
    #[default]
    Relevant,
    /// Cheapest first.
    LowHigh,
    /// Most expensive first.
    HighLow,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relevant" => Ok(Self::Relevant),
            "low-high" => Ok(Self::LowHigh),
            "high-low" => Ok(Self::HighLow),
            _ => Err(format!("unknown sort order: {s} (relevant, low-high, high-low)")),
        }
    }
}

/// Collection page filter. Empty sets match everything.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring of the product name.
    pub search: Option<String>,
    pub categories: BTreeSet<String>,
    pub sub_categories: BTreeSet<String>,
    pub sort: SortOrder,
}

impl ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        let search_ok = self.search.as_deref().map(str::trim).is_none_or(|needle| {
            needle.is_empty() || product.name.to_lowercase().contains(&needle.to_lowercase())
        });
        search_ok
            && (self.categories.is_empty() || self.categories.contains(&product.category))
            && (self.sub_categories.is_empty()
                || self.sub_categories.contains(&product.sub_category))
    }
}

/// Products as last loaded from the catalog store.
///
/// Empty until the first successful load; lookups against an empty catalog
/// simply find nothing.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
}

impl Catalog {
    #[must_use]
    pub const fn new(products: Arc<Vec<Product>>) -> Self {
        Self { products }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        !self.products.is_empty()
    }

    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    #[must_use]
    pub fn price_of(&self, id: &ProductId) -> Option<Price> {
        self.find(id).map(|product| product.price)
    }

    /// Products matching `filter`, in the filter's sort order.
    #[must_use]
    pub fn browse(&self, filter: &ProductFilter) -> Vec<&Product> {
        let mut matched: Vec<&Product> = self
            .products
            .iter()
            .filter(|product| filter.matches(product))
            .collect();
        match filter.sort {
            SortOrder::Relevant => {}
            SortOrder::LowHigh => matched.sort_by_key(|product| product.price),
            SortOrder::HighLow => matched.sort_by_key(|product| std::cmp::Reverse(product.price)),
        }
        matched
    }

    /// Up to `limit` products flagged as bestsellers.
    #[must_use]
    pub fn bestsellers(&self, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.bestseller)
            .take(limit)
            .collect()
    }

    /// The first `limit` products in catalog order.
    #[must_use]
    pub fn latest(&self, limit: usize) -> Vec<&Product> {
        self.products.iter().take(limit).collect()
    }

    /// Up to `limit` other products sharing the category and sub-category.
    #[must_use]
    pub fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|other| {
                other.id != product.id
                    && other.category == product.category
                    && other.sub_category == product.sub_category
            })
            .take(limit)
            .collect()
    }
}
