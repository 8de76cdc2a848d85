//! Unified error handling
//!
//! The catalog server reports failures with the structured [`AppError`]
//! from `shared::error`. Repository errors convert into it at the service
//! boundary (see `db::repository::RepoError`).
//!
//! # Error codes
//!
//! | Range | Category | Example |
//! |-------|----------|---------|
//! | E0xxx | General | E0003 not found |
//! | E6xxx | Catalog | E6102 category still has products |
//! | E9xxx | System | E9002 database error |
//!
//! ```ignore
//! Err(AppError::not_found(format!("Product {id}")))
//! ```

pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
