//! Category Repository
//!
//! Category rows plus the `product_category` edge table.

use super::RepoResult;
use shared::models::Category;
use sqlx::SqliteConnection;

pub async fn find_all(conn: &mut SqliteConnection) -> RepoResult<Vec<Category>> {
    let rows = sqlx::query_as::<_, Category>("SELECT id, name FROM category ORDER BY name")
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Category>> {
    let row = sqlx::query_as::<_, Category>("SELECT id, name FROM category WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

pub async fn find_by_name(conn: &mut SqliteConnection, name: &str) -> RepoResult<Option<Category>> {
    let row = sqlx::query_as::<_, Category>("SELECT id, name FROM category WHERE name = ?")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

pub async fn insert(conn: &mut SqliteConnection, category: &Category) -> RepoResult<()> {
    sqlx::query("INSERT INTO category (id, name) VALUES (?, ?)")
        .bind(category.id)
        .bind(&category.name)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM category WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}

// ── product_category edges ─────────────────────────────────────────

pub async fn find_by_product(
    conn: &mut SqliteConnection,
    product_id: i64,
) -> RepoResult<Vec<Category>> {
    let rows = sqlx::query_as::<_, Category>(
        "SELECT c.id, c.name FROM category c \
         JOIN product_category e ON e.category_id = c.id \
         WHERE e.product_id = ? ORDER BY c.name",
    )
    .bind(product_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

pub async fn product_ids_in_category(
    conn: &mut SqliteConnection,
    category_id: i64,
) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar(
        "SELECT product_id FROM product_category WHERE category_id = ? ORDER BY product_id",
    )
    .bind(category_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(ids)
}

pub async fn count_products(conn: &mut SqliteConnection, category_id: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM product_category WHERE category_id = ?")
        .bind(category_id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}

/// Returns false when the edge already existed.
pub async fn bind(
    conn: &mut SqliteConnection,
    product_id: i64,
    category_id: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "INSERT INTO product_category (product_id, category_id) VALUES (?, ?) ON CONFLICT DO NOTHING",
    )
    .bind(product_id)
    .bind(category_id)
    .execute(&mut *conn)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn unbind_all(conn: &mut SqliteConnection, product_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM product_category WHERE product_id = ?")
        .bind(product_id)
        .execute(&mut *conn)
        .await?;
    Ok(rows.rows_affected())
}
