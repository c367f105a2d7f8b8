//! Catalog product type.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId, Size};

/// A product as listed by the catalog store.
///
/// Read-only from the client's point of view. Field names follow the
/// backend's document layout; optional fields default when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Image URLs, first one is the primary image.
    #[serde(default)]
    pub image: Vec<String>,
    /// Top-level category (e.g. "Men").
    #[serde(default)]
    pub category: String,
    /// Sub-category (e.g. "Topwear").
    #[serde(default)]
    pub sub_category: String,
    /// Size variants on offer.
    #[serde(default)]
    pub sizes: Vec<Size>,
    /// Whether the product is featured as a bestseller.
    #[serde(default)]
    pub bestseller: bool,
    /// Creation time, milliseconds since the Unix epoch.
    #[serde(default)]
    pub date: i64,
}

impl Product {
    /// Primary image URL, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.image.first().map(String::as_str)
    }
}
