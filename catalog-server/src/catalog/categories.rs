//! Explicit category management
//!
//! Categories are never created implicitly by product writes; they come
//! from here.

use shared::error::ErrorCode;
use shared::message::ChangeType;
use shared::models::{Category, CategoryCreate};
use shared::util::snowflake_id;

use super::{CATEGORY_RESOURCE, CatalogService, PRODUCT_RESOURCE, hydrate};
use crate::db::repository::{RepoError, RepoResult, category, product};

impl CatalogService {
    /// Create a category; names are unique
    pub async fn create_category(&self, data: CategoryCreate) -> RepoResult<Category> {
        let name = data.name.trim();
        if name.is_empty() {
            return Err(RepoError::Validation(
                ErrorCode::ValidationFailed,
                "Category name cannot be empty".into(),
            ));
        }

        let created = Category {
            id: snowflake_id(),
            name: name.to_string(),
        };

        let mut conn = self.pool.acquire().await?;
        category::insert(&mut conn, &created).await.map_err(|e| match e {
            RepoError::Duplicate(..) => RepoError::Duplicate(
                ErrorCode::CategoryNameExists,
                format!("Category '{}' already exists", created.name),
            ),
            other => other,
        })?;
        drop(conn);

        tracing::info!(category_id = created.id, name = %created.name, "Category created");
        self.publish(CATEGORY_RESOURCE, ChangeType::Insert, created.id, Some(&created))
            .await;
        Ok(created)
    }

    /// Bind one product to one category
    ///
    /// Unlike the lenient bulk binding on product writes, both sides must
    /// exist. Binding twice is a no-op. A new membership is announced as an
    /// `Update` of the product.
    pub async fn add_product_to_category(
        &self,
        category_id: i64,
        product_id: i64,
    ) -> RepoResult<Category> {
        let mut tx = self.begin_write().await?;
        let target = category::find_by_id(&mut *tx, category_id)
            .await?
            .ok_or_else(|| {
                RepoError::NotFound(
                    ErrorCode::CategoryNotFound,
                    format!("Category {category_id} not found"),
                )
            })?;
        let member = product::find_by_id(&mut *tx, product_id)
            .await?
            .ok_or_else(|| {
                RepoError::NotFound(
                    ErrorCode::ProductNotFound,
                    format!("Product {product_id} not found"),
                )
            })?;

        if !category::bind(&mut *tx, product_id, category_id).await? {
            tx.commit().await?;
            return Ok(target);
        }
        let member = hydrate(&mut *tx, member).await?;
        tx.commit().await?;

        tracing::info!(category_id, product_id, "Product added to category");
        self.publish(PRODUCT_RESOURCE, ChangeType::Update, product_id, Some(&member))
            .await;
        Ok(target)
    }
}
