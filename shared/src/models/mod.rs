//! Data models
//!
//! Shared between catalog-server and its callers.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflake ids (SQLite INTEGER PRIMARY KEY).

pub mod category;
pub mod inventory;
pub mod media;
pub mod model_type;
pub mod product;

// Re-exports
pub use category::*;
pub use inventory::*;
pub use media::*;
pub use model_type::*;
pub use product::*;
