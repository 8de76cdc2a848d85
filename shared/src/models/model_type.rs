//! Model Type Model

use serde::{Deserialize, Serialize};

/// Model type tag, shared by many variants
///
/// `name` is the natural key: at most one row per name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ModelType {
    pub id: i64,
    pub name: String,
    /// Free-form grouping, e.g. "size" or "device"
    pub kind: Option<String>,
}

/// Model type reference inside a submitted variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelTypeRef {
    pub name: String,
    #[serde(default)]
    pub kind: Option<String>,
}

impl ModelTypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
        }
    }
}
