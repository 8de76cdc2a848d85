//! Repository Module
//!
//! Free async functions over a `&mut SqliteConnection`, one module per
//! table. Callers pass either a pooled connection or `&mut *tx` so that a
//! multi-table write commits atomically.

pub mod category;
pub mod inventory;
pub mod model_type;
pub mod product;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
///
/// Every variant except `Database` carries the [`ErrorCode`] it surfaces
/// with; store-level errors get the generic code, catalog rules their own.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {1}")]
    NotFound(ErrorCode, String),

    #[error("Duplicate: {1}")]
    Duplicate(ErrorCode, String),

    #[error("Conflict: {1}")]
    Conflict(ErrorCode, String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {1}")]
    Validation(ErrorCode, String),
}

impl RepoError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RepoError::NotFound(code, _)
            | RepoError::Duplicate(code, _)
            | RepoError::Conflict(code, _)
            | RepoError::Validation(code, _) => *code,
            RepoError::Database(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepoError::Duplicate(ErrorCode::AlreadyExists, db_err.message().to_string())
            }
            sqlx::Error::RowNotFound => RepoError::NotFound(ErrorCode::NotFound, err.to_string()),
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::NotFound(code, msg)
            | RepoError::Duplicate(code, msg)
            | RepoError::Conflict(code, msg)
            | RepoError::Validation(code, msg) => AppError::with_message(code, msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::db::DbService;
    use sqlx::SqlitePool;

    pub async fn pool() -> SqlitePool {
        DbService::in_memory().await.unwrap().pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::http::StatusCode;

    #[test]
    fn test_repo_error_maps_to_app_error_status() {
        let cases = [
            (RepoError::NotFound(ErrorCode::NotFound, "p".into()), StatusCode::NOT_FOUND),
            (RepoError::Duplicate(ErrorCode::AlreadyExists, "p".into()), StatusCode::CONFLICT),
            (RepoError::Conflict(ErrorCode::Conflict, "c".into()), StatusCode::CONFLICT),
            (RepoError::Validation(ErrorCode::ValidationFailed, "v".into()), StatusCode::BAD_REQUEST),
            (
                RepoError::Database("d".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).http_status(), status);
        }
    }

    #[test]
    fn test_domain_code_survives_conversion() {
        let err = RepoError::Conflict(ErrorCode::CategoryHasProducts, "Category 7 in use".into());
        assert_eq!(err.code(), ErrorCode::CategoryHasProducts);

        let app = AppError::from(err);
        assert_eq!(app.code, ErrorCode::CategoryHasProducts);
        assert_eq!(app.message, "Category 7 in use");
        assert_eq!(app.http_status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_unique_violation_becomes_duplicate() {
        let pool = test_support::pool().await;
        sqlx::query("INSERT INTO category (id, name) VALUES (1, 'Shoes')")
            .execute(&pool)
            .await
            .unwrap();
        let err: RepoError = sqlx::query("INSERT INTO category (id, name) VALUES (2, 'Shoes')")
            .execute(&pool)
            .await
            .unwrap_err()
            .into();
        assert!(matches!(err, RepoError::Duplicate(ErrorCode::AlreadyExists, _)));
    }
}
