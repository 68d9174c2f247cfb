//! Catalog book records.

use serde::{Deserialize, Serialize};

use super::id::BookId;
use super::price::Price;

/// A purchasable book.
///
/// Books come from static catalog data and are never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: Price,
    pub genre: Vec<String>,
    /// Path to the cover image, relative to the static root.
    pub image: String,
    /// Average review rating, 0.0 to 5.0.
    pub rating: f32,
    pub reviews: u32,
    pub in_stock: bool,
    pub featured: bool,
}
