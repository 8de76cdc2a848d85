//! Category Binder
//!
//! Product/category membership lives in one edge table, so binding a
//! product to a category updates both sides at once. Unknown category ids
//! are skipped, never created.

use sqlx::SqliteConnection;

use crate::db::repository::{RepoResult, category};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindOutcome {
    /// Category ids the product is now a member of, in submission order
    pub bound: Vec<i64>,
    /// Submitted ids with no matching category
    pub skipped: Vec<i64>,
}

/// Add `product_id` to each existing category in `category_ids`
pub async fn bind(
    conn: &mut SqliteConnection,
    product_id: i64,
    category_ids: &[i64],
) -> RepoResult<BindOutcome> {
    let mut outcome = BindOutcome::default();

    for &category_id in category_ids {
        if outcome.bound.contains(&category_id) || outcome.skipped.contains(&category_id) {
            continue;
        }
        if category::find_by_id(conn, category_id).await?.is_none() {
            tracing::warn!(product_id, category_id, "Category not found, skipping binding");
            outcome.skipped.push(category_id);
            continue;
        }
        category::bind(conn, product_id, category_id).await?;
        outcome.bound.push(category_id);
    }

    Ok(outcome)
}

/// Replace the product's memberships with `category_ids`
pub async fn rebind(
    conn: &mut SqliteConnection,
    product_id: i64,
    category_ids: &[i64],
) -> RepoResult<BindOutcome> {
    let removed = category::unbind_all(conn, product_id).await?;
    tracing::debug!(product_id, removed, "Cleared category memberships");
    bind(conn, product_id, category_ids).await
}
