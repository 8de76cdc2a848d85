//! Product Model

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::inventory::{Inventory, InventorySubmission};

/// Product lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ProductStatus {
    #[default]
    Draft,
    Active,
    Archived,
}

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    /// Unique across all products
    pub name: String,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub has_variants: bool,
    pub status: ProductStatus,
    /// Owning user
    pub user_id: i64,
    /// Unix millis, written once on first persist
    pub created_at: i64,
    /// Unix millis, refreshed on every update
    pub last_update: Option<i64>,

    // -- Relations (populated by application code, skipped by FromRow) --

    /// Categories this product belongs to (product_category edges)
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Owned variants
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub inventory: Vec<Inventory>,
}

impl Product {
    /// IDs of the categories this product belongs to
    pub fn category_ids(&self) -> Vec<i64> {
        self.categories.iter().map(|c| c.id).collect()
    }

    /// Find an owned variant by id
    pub fn variant(&self, id: i64) -> Option<&Inventory> {
        self.inventory.iter().find(|v| v.id == id)
    }
}

/// Submitted product aggregate (add / update payload)
///
/// Scalar fields are copied onto the target unconditionally; callers must
/// send the full current value of fields they do not intend to change.
/// `created_at` is the only field where `None` means "no value supplied".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductSubmission {
    pub name: String,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    #[serde(default)]
    pub has_variants: bool,
    #[serde(default)]
    pub status: ProductStatus,
    pub user_id: i64,
    pub created_at: Option<i64>,
    /// Category memberships (replace semantics on update)
    #[serde(default)]
    pub category_ids: Vec<i64>,
    /// Variants (upsert semantics on update)
    #[serde(default)]
    pub inventory: Vec<InventorySubmission>,
}
