//! Catalog reconciliation engine
//!
//! Merges submitted product aggregates (product + variants + model types +
//! category memberships) into the store and handles deletions.
//!
//! # Modules
//!
//! - [`resolver`] - model type lookup-or-create by name
//! - [`differ`] - variant create/update/delete plan (pure)
//! - [`binder`] - product/category membership
//! - [`synchronizer`] - add/update of a product aggregate
//! - [`deletion`] - product and category deletion
//! - [`categories`] - explicit category management
//!
//! Every write runs in one transaction. Media purges and change events go
//! out after commit and never undo it.

pub mod binder;
pub mod categories;
pub mod deletion;
pub mod differ;
pub mod resolver;
pub mod synchronizer;

use std::sync::Arc;

use serde::Serialize;
use shared::error::AppError;
use shared::message::ChangeType;
use shared::models::{Category, ImageKind, Inventory, ModelType, Product};
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};

use crate::db::repository::{RepoResult, category, inventory, model_type, product};
use crate::message::ChangeNotifier;
use crate::services::media::MediaStore;

pub use binder::BindOutcome;
pub use differ::{InventoryPlan, VariantDraft, VariantUpdate};

/// Live-update resource names
pub const PRODUCT_RESOURCE: &str = "product";
pub const CATEGORY_RESOURCE: &str = "category";

/// Catalog service - entry point for all catalog reads and writes
///
/// Cheap to clone; shares the pool and collaborators.
#[derive(Clone)]
pub struct CatalogService {
    pool: SqlitePool,
    media: Arc<dyn MediaStore>,
    notifier: Arc<dyn ChangeNotifier>,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService").finish_non_exhaustive()
    }
}

impl CatalogService {
    pub fn new(
        pool: SqlitePool,
        media: Arc<dyn MediaStore>,
        notifier: Arc<dyn ChangeNotifier>,
    ) -> Self {
        Self {
            pool,
            media,
            notifier,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Write transaction holding the SQLite write lock from `BEGIN`
    ///
    /// Concurrent writers queue on `busy_timeout`. A deferred transaction
    /// that reads first fails with `SQLITE_BUSY` once another writer commits.
    pub(crate) async fn begin_write(&self) -> RepoResult<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin_with("BEGIN IMMEDIATE").await?)
    }

    // ── Reads ──────────────────────────────────────────────────────

    /// All products with categories and variants populated
    pub async fn list_products(&self) -> RepoResult<Vec<Product>> {
        let mut conn = self.pool.acquire().await?;
        let products = product::find_all(&mut conn).await?;
        hydrate_all(&mut conn, products).await
    }

    pub async fn get_product(&self, id: i64) -> RepoResult<Option<Product>> {
        let mut conn = self.pool.acquire().await?;
        match product::find_by_id(&mut conn, id).await? {
            Some(p) => Ok(Some(hydrate(&mut conn, p).await?)),
            None => Ok(None),
        }
    }

    pub async fn find_products_by_user(&self, user_id: i64) -> RepoResult<Vec<Product>> {
        let mut conn = self.pool.acquire().await?;
        let products = product::find_by_user(&mut conn, user_id).await?;
        hydrate_all(&mut conn, products).await
    }

    /// All model types, ordered by name
    pub async fn list_model_types(&self) -> RepoResult<Vec<ModelType>> {
        let mut conn = self.pool.acquire().await?;
        model_type::find_all(&mut conn).await
    }

    /// All categories, ordered by name
    pub async fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut conn = self.pool.acquire().await?;
        category::find_all(&mut conn).await
    }

    /// Products that are members of a category
    pub async fn products_in_category(&self, category_id: i64) -> RepoResult<Vec<Product>> {
        let mut conn = self.pool.acquire().await?;
        let ids = category::product_ids_in_category(&mut conn, category_id).await?;
        let mut products = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(p) = product::find_by_id(&mut conn, id).await? {
                products.push(p);
            }
        }
        hydrate_all(&mut conn, products).await
    }

    // ── Side effects (after commit) ────────────────────────────────

    /// Purge every image folder of each removed variant. Failures are logged.
    async fn purge_variant_media(&self, product_id: i64, removed: &[Inventory]) {
        for variant in removed {
            for kind in ImageKind::ALL {
                if let Err(e) = self
                    .media
                    .purge_variant_folder(product_id, variant.id, kind)
                    .await
                {
                    let err = AppError::from(e);
                    tracing::warn!(
                        product_id,
                        variant_id = variant.id,
                        kind = %kind,
                        code = %err.code,
                        error = %err,
                        "Failed to purge variant media"
                    );
                }
            }
        }
    }

    async fn purge_product_media(&self, product_id: i64) {
        if let Err(e) = self.media.purge_product_folder(product_id).await {
            let err = AppError::from(e);
            tracing::warn!(product_id, code = %err.code, error = %err, "Failed to purge product media");
        }
    }

    /// Announce a committed change. Failures are logged.
    async fn publish<T: Serialize>(
        &self,
        resource: &'static str,
        change_type: ChangeType,
        id: i64,
        data: Option<&T>,
    ) {
        let data = match data.map(serde_json::to_value).transpose() {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(resource, id, error = %e, "Failed to encode change data");
                None
            }
        };

        if let Err(e) = self
            .notifier
            .notify(resource, change_type, &id.to_string(), data)
            .await
        {
            tracing::warn!(resource, id, change = %change_type, error = %e, "Failed to publish catalog change");
        }
    }
}

// ── Hydration ──────────────────────────────────────────────────────

/// Fill a product's category and variant projections from the store
pub(crate) async fn hydrate(conn: &mut SqliteConnection, mut p: Product) -> RepoResult<Product> {
    p.categories = category::find_by_product(conn, p.id).await?;
    p.inventory = load_variants(conn, p.id).await?;
    Ok(p)
}

async fn hydrate_all(conn: &mut SqliteConnection, products: Vec<Product>) -> RepoResult<Vec<Product>> {
    let mut out = Vec::with_capacity(products.len());
    for p in products {
        out.push(hydrate(conn, p).await?);
    }
    Ok(out)
}

async fn load_variants(conn: &mut SqliteConnection, product_id: i64) -> RepoResult<Vec<Inventory>> {
    let mut variants = inventory::find_by_product(conn, product_id).await?;
    for v in &mut variants {
        v.model_types = model_type::find_by_inventory(conn, v.id).await?;
    }
    Ok(variants)
}
