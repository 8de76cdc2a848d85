//! Reference Resolver
//!
//! Turns model-type names into persisted rows, creating them on first use.
//! Uniqueness is enforced by `model_type.name UNIQUE`; a lost insert race
//! falls back to the row the other writer created.

use shared::error::ErrorCode;
use shared::models::{ModelType, ModelTypeRef};
use shared::util::snowflake_id;
use sqlx::SqliteConnection;

use crate::db::repository::{RepoError, RepoResult, model_type};

/// Existing row for `candidate.name`, or a new one built from the candidate
pub async fn resolve_model_type(
    conn: &mut SqliteConnection,
    candidate: &ModelTypeRef,
) -> RepoResult<ModelType> {
    if candidate.name.trim().is_empty() {
        return Err(RepoError::Validation(
            ErrorCode::ModelTypeInvalidName,
            "Model type name cannot be empty".into(),
        ));
    }

    if let Some(existing) = model_type::find_by_name(conn, &candidate.name).await? {
        return Ok(existing);
    }

    let created = model_type::insert_if_absent(
        conn,
        snowflake_id(),
        &candidate.name,
        candidate.kind.as_deref(),
    )
    .await?;
    if created {
        tracing::debug!(name = %candidate.name, "Model type created");
    }

    model_type::find_by_name(conn, &candidate.name)
        .await?
        .ok_or_else(|| {
            RepoError::Database(format!("Model type '{}' vanished after insert", candidate.name))
        })
}

/// Resolve every candidate; names that map to the same row appear once
pub async fn resolve_model_types(
    conn: &mut SqliteConnection,
    candidates: &[ModelTypeRef],
) -> RepoResult<Vec<ModelType>> {
    let mut resolved: Vec<ModelType> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let model = resolve_model_type(conn, candidate).await?;
        if !resolved.iter().any(|m| m.id == model.id) {
            resolved.push(model);
        }
    }
    Ok(resolved)
}
