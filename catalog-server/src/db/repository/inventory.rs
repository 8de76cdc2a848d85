//! Inventory Repository

use super::RepoResult;
use shared::models::Inventory;
use sqlx::SqliteConnection;

pub async fn find_by_product(
    conn: &mut SqliteConnection,
    product_id: i64,
) -> RepoResult<Vec<Inventory>> {
    let variants = sqlx::query_as::<_, Inventory>(
        "SELECT id, product_id, quantity, price, description, color, selected_model \
         FROM inventory WHERE product_id = ? ORDER BY id",
    )
    .bind(product_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(variants)
}

pub async fn count_by_product(conn: &mut SqliteConnection, product_id: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM inventory WHERE product_id = ?")
        .bind(product_id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}

pub async fn insert(conn: &mut SqliteConnection, variant: &Inventory) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO inventory (id, product_id, quantity, price, description, color, selected_model) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(variant.id)
    .bind(variant.product_id)
    .bind(variant.quantity)
    .bind(variant.price)
    .bind(&variant.description)
    .bind(&variant.color)
    .bind(&variant.selected_model)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Overwrite the variant's scalar fields in place. Ownership never moves.
pub async fn update(conn: &mut SqliteConnection, variant: &Inventory) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE inventory SET quantity = ?, price = ?, description = ?, color = ?, selected_model = ? \
         WHERE id = ? AND product_id = ?",
    )
    .bind(variant.quantity)
    .bind(variant.price)
    .bind(&variant.description)
    .bind(&variant.color)
    .bind(&variant.selected_model)
    .bind(variant.id)
    .bind(variant.product_id)
    .execute(&mut *conn)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM inventory WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::product;
    use crate::db::repository::test_support::pool;
    use shared::models::{Product, ProductStatus};

    async fn seed_product(conn: &mut SqliteConnection, id: i64) {
        let p = Product {
            id,
            name: format!("Product {id}"),
            short_description: None,
            long_description: None,
            has_variants: true,
            status: ProductStatus::Draft,
            user_id: 1,
            created_at: 0,
            last_update: None,
            categories: vec![],
            inventory: vec![],
        };
        product::insert(conn, &p).await.unwrap();
    }

    fn variant(id: i64, product_id: i64, quantity: i32) -> Inventory {
        Inventory {
            id,
            product_id,
            quantity,
            price: 9.5,
            description: None,
            color: Some("red".into()),
            selected_model: None,
            model_types: vec![],
        }
    }

    #[tokio::test]
    async fn test_insert_update_delete() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        seed_product(&mut conn, 1).await;

        insert(&mut conn, &variant(10, 1, 5)).await.unwrap();
        insert(&mut conn, &variant(11, 1, 2)).await.unwrap();

        let mut v = variant(10, 1, 8);
        v.color = Some("blue".into());
        assert!(update(&mut conn, &v).await.unwrap());

        let rows = find_by_product(&mut conn, 1).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].quantity, 8);
        assert_eq!(rows[0].color.as_deref(), Some("blue"));

        assert!(delete(&mut conn, 11).await.unwrap());
        assert_eq!(count_by_product(&mut conn, 1).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_ignores_foreign_variant() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        seed_product(&mut conn, 1).await;
        seed_product(&mut conn, 2).await;
        insert(&mut conn, &variant(10, 1, 5)).await.unwrap();

        assert!(!update(&mut conn, &variant(10, 2, 1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_product_delete_cascades_to_variants() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        seed_product(&mut conn, 1).await;
        insert(&mut conn, &variant(10, 1, 5)).await.unwrap();

        product::delete(&mut conn, 1).await.unwrap();
        assert_eq!(count_by_product(&mut conn, 1).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_negative_quantity_rejected_by_store() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        seed_product(&mut conn, 1).await;
        assert!(insert(&mut conn, &variant(10, 1, -1)).await.is_err());
    }
}
