//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity
///
/// Membership lives in the product_category junction table and is read
/// through the catalog, never stored on the category row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    /// Unique across all categories
    pub name: String,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
}
