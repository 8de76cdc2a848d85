//! Deletion Coordinator
//!
//! Product deletion cascades to owned variants in the store and then purges
//! the product's media folder. Category deletion is refused while any
//! product still references the category.

use shared::error::ErrorCode;
use shared::message::ChangeType;

use super::{CATEGORY_RESOURCE, CatalogService, PRODUCT_RESOURCE};
use crate::db::repository::{RepoError, RepoResult, category, product};

impl CatalogService {
    /// Delete a product and everything it owns
    ///
    /// Returns `false` if the product did not exist; nothing is purged then.
    pub async fn delete_product(&self, id: i64) -> RepoResult<bool> {
        let mut tx = self.begin_write().await?;
        if !product::delete(&mut *tx, id).await? {
            tracing::debug!(product_id = id, "Product not found, nothing to delete");
            return Ok(false);
        }
        tx.commit().await?;

        tracing::info!(product_id = id, "Product deleted");

        self.purge_product_media(id).await;
        self.publish(PRODUCT_RESOURCE, ChangeType::Delete, id, None::<&()>)
            .await;
        Ok(true)
    }

    /// Delete a category no product refers to
    ///
    /// Returns `false` if the category did not exist, or
    /// [`RepoError::Conflict`] while it still has member products.
    pub async fn delete_category(&self, id: i64) -> RepoResult<bool> {
        let mut tx = self.begin_write().await?;
        if category::find_by_id(&mut *tx, id).await?.is_none() {
            return Ok(false);
        }

        let members = category::count_products(&mut *tx, id).await?;
        if members > 0 {
            tracing::warn!(category_id = id, members, "Refusing to delete referenced category");
            return Err(RepoError::Conflict(
                ErrorCode::CategoryHasProducts,
                format!("Category {id} is still referenced by {members} product(s)"),
            ));
        }

        category::delete(&mut *tx, id).await?;
        tx.commit().await?;

        tracing::info!(category_id = id, "Category deleted");
        self.publish(CATEGORY_RESOURCE, ChangeType::Delete, id, None::<&()>)
            .await;
        Ok(true)
    }
}
