//! Product Repository
//!
//! Scalar product rows only. Categories and variants are loaded from their
//! own tables by the catalog service.

use super::RepoResult;
use shared::models::Product;
use sqlx::SqliteConnection;

const COLUMNS: &str = "id, name, short_description, long_description, has_variants, status, user_id, created_at, last_update";

pub async fn find_all(conn: &mut SqliteConnection) -> RepoResult<Vec<Product>> {
    let sql = format!("SELECT {COLUMNS} FROM product ORDER BY created_at, id");
    let products = sqlx::query_as::<_, Product>(&sql)
        .fetch_all(&mut *conn)
        .await?;
    Ok(products)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("SELECT {COLUMNS} FROM product WHERE id = ?");
    let product = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(product)
}

pub async fn find_by_name(conn: &mut SqliteConnection, name: &str) -> RepoResult<Option<Product>> {
    let sql = format!("SELECT {COLUMNS} FROM product WHERE name = ? LIMIT 1");
    let product = sqlx::query_as::<_, Product>(&sql)
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(product)
}

pub async fn find_by_user(conn: &mut SqliteConnection, user_id: i64) -> RepoResult<Vec<Product>> {
    let sql = format!("SELECT {COLUMNS} FROM product WHERE user_id = ? ORDER BY created_at, id");
    let products = sqlx::query_as::<_, Product>(&sql)
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;
    Ok(products)
}

pub async fn insert(conn: &mut SqliteConnection, product: &Product) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO product (id, name, short_description, long_description, has_variants, status, user_id, created_at, last_update) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(product.id)
    .bind(&product.name)
    .bind(&product.short_description)
    .bind(&product.long_description)
    .bind(product.has_variants)
    .bind(product.status)
    .bind(product.user_id)
    .bind(product.created_at)
    .bind(product.last_update)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Overwrite every mutable column. `created_at` is never touched.
pub async fn update(conn: &mut SqliteConnection, product: &Product) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE product SET name = ?, short_description = ?, long_description = ?, has_variants = ?, \
         status = ?, user_id = ?, last_update = ? WHERE id = ?",
    )
    .bind(&product.name)
    .bind(&product.short_description)
    .bind(&product.long_description)
    .bind(product.has_variants)
    .bind(product.status)
    .bind(product.user_id)
    .bind(product.last_update)
    .bind(product.id)
    .execute(&mut *conn)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Owned variants and edge rows go with it (ON DELETE CASCADE).
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM product WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::RepoError;
    use crate::db::repository::test_support::pool;
    use shared::models::ProductStatus;

    fn product(id: i64, name: &str, user_id: i64) -> Product {
        Product {
            id,
            name: name.into(),
            short_description: Some("short".into()),
            long_description: None,
            has_variants: true,
            status: ProductStatus::Active,
            user_id,
            created_at: 1_000,
            last_update: None,
            categories: vec![],
            inventory: vec![],
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        insert(&mut conn, &product(1, "Widget", 7)).await.unwrap();

        let found = find_by_id(&mut conn, 1).await.unwrap().unwrap();
        assert_eq!(found.name, "Widget");
        assert_eq!(found.status, ProductStatus::Active);
        assert!(found.has_variants);
        assert_eq!(found.created_at, 1_000);

        assert!(find_by_name(&mut conn, "Widget").await.unwrap().is_some());
        assert!(find_by_id(&mut conn, 2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        insert(&mut conn, &product(1, "Widget", 7)).await.unwrap();
        let err = insert(&mut conn, &product(2, "Widget", 7)).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(..)));
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        insert(&mut conn, &product(1, "Widget", 7)).await.unwrap();

        let mut changed = product(1, "Gadget", 8);
        changed.created_at = 99_999;
        changed.last_update = Some(2_000);
        changed.status = ProductStatus::Archived;
        assert!(update(&mut conn, &changed).await.unwrap());

        let found = find_by_id(&mut conn, 1).await.unwrap().unwrap();
        assert_eq!(found.name, "Gadget");
        assert_eq!(found.user_id, 8);
        assert_eq!(found.status, ProductStatus::Archived);
        assert_eq!(found.created_at, 1_000);
        assert_eq!(found.last_update, Some(2_000));

        assert!(!update(&mut conn, &product(42, "Nope", 1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_by_user_and_delete() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        insert(&mut conn, &product(1, "A", 7)).await.unwrap();
        insert(&mut conn, &product(2, "B", 7)).await.unwrap();
        insert(&mut conn, &product(3, "C", 9)).await.unwrap();

        let owned = find_by_user(&mut conn, 7).await.unwrap();
        assert_eq!(owned.len(), 2);

        assert!(delete(&mut conn, 1).await.unwrap());
        assert!(!delete(&mut conn, 1).await.unwrap());
        assert_eq!(find_all(&mut conn).await.unwrap().len(), 2);
    }
}
