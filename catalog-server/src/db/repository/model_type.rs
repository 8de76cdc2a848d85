//! Model Type Repository
//!
//! Model types are shared tags keyed by name. Rows are only ever inserted;
//! nothing here deletes one.

use super::RepoResult;
use shared::models::ModelType;
use sqlx::SqliteConnection;

pub async fn find_all(conn: &mut SqliteConnection) -> RepoResult<Vec<ModelType>> {
    let rows = sqlx::query_as::<_, ModelType>("SELECT id, name, kind FROM model_type ORDER BY name")
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows)
}

pub async fn find_by_name(conn: &mut SqliteConnection, name: &str) -> RepoResult<Option<ModelType>> {
    let row = sqlx::query_as::<_, ModelType>("SELECT id, name, kind FROM model_type WHERE name = ?")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

/// Insert unless the name is already taken. Returns whether a row was added.
pub async fn insert_if_absent(
    conn: &mut SqliteConnection,
    id: i64,
    name: &str,
    kind: Option<&str>,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "INSERT INTO model_type (id, name, kind) VALUES (?, ?, ?) ON CONFLICT(name) DO NOTHING",
    )
    .bind(id)
    .bind(name)
    .bind(kind)
    .execute(&mut *conn)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn find_by_inventory(
    conn: &mut SqliteConnection,
    inventory_id: i64,
) -> RepoResult<Vec<ModelType>> {
    let rows = sqlx::query_as::<_, ModelType>(
        "SELECT m.id, m.name, m.kind FROM model_type m \
         JOIN inventory_model_type e ON e.model_type_id = m.id \
         WHERE e.inventory_id = ? ORDER BY m.name",
    )
    .bind(inventory_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

pub async fn link(
    conn: &mut SqliteConnection,
    inventory_id: i64,
    model_type_id: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "INSERT INTO inventory_model_type (inventory_id, model_type_id) VALUES (?, ?) \
         ON CONFLICT DO NOTHING",
    )
    .bind(inventory_id)
    .bind(model_type_id)
    .execute(&mut *conn)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn unlink_all(conn: &mut SqliteConnection, inventory_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM inventory_model_type WHERE inventory_id = ?")
        .bind(inventory_id)
        .execute(&mut *conn)
        .await?;
    Ok(rows.rows_affected())
}
