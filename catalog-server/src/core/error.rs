use thiserror::Error;

use crate::utils::AppError;

/// Startup and lifecycle errors of the catalog server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to prepare {path}: {source}")]
    WorkDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Database unavailable: {0}")]
    Database(#[source] AppError),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ServerError>;
