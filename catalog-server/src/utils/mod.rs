//! Utilities - logging and error re-exports
//!
//! - [`AppError`] - application error type (from shared::error)
//! - [`logger`] - tracing subscriber setup

pub mod error;
pub mod logger;

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
