//! Inventory Model
//!
//! A purchasable variant of a product. Owned exclusively by its product.

use serde::{Deserialize, Serialize};

use super::model_type::{ModelType, ModelTypeRef};

/// Inventory (variant) entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Inventory {
    pub id: i64,
    pub product_id: i64,
    /// Units in stock, never negative
    pub quantity: i32,
    pub price: f64,
    pub description: Option<String>,
    pub color: Option<String>,
    pub selected_model: Option<String>,

    // -- Relations (populated by application code, skipped by FromRow) --

    /// Model type tags (inventory_model_type edges)
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub model_types: Vec<ModelType>,
}

impl Inventory {
    /// Model type names, sorted
    pub fn model_type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.model_types.iter().map(|m| m.name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

/// Submitted variant
///
/// `id = None` (or an id the product does not own) asks for a new variant.
/// `quantity = 0` on a known id withdraws that variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventorySubmission {
    pub id: Option<i64>,
    pub quantity: i32,
    #[serde(default)]
    pub price: f64,
    pub description: Option<String>,
    pub color: Option<String>,
    pub selected_model: Option<String>,
    #[serde(default)]
    pub model_types: Vec<ModelTypeRef>,
}

impl InventorySubmission {
    /// New variant with the given quantity and price
    pub fn new(quantity: i32, price: f64) -> Self {
        Self {
            quantity,
            price,
            ..Default::default()
        }
    }

    /// Variant referring to an existing id
    pub fn existing(id: i64, quantity: i32, price: f64) -> Self {
        Self {
            id: Some(id),
            quantity,
            price,
            ..Default::default()
        }
    }

    pub fn with_model_types<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.model_types = names.into_iter().map(ModelTypeRef::named).collect();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}
