//! Catalog Synchronizer
//!
//! Add and update of a whole product aggregate. Category memberships are
//! replaced on update; variants are upserted (see [`differ`]).

use shared::error::ErrorCode;
use shared::message::ChangeType;
use shared::models::{Product, ProductSubmission};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqliteConnection;

use super::differ::{self, InventoryPlan, VariantDraft};
use super::{CatalogService, PRODUCT_RESOURCE, binder, hydrate, resolver};
use crate::db::repository::{RepoError, RepoResult, inventory, model_type, product};

impl CatalogService {
    /// Persist a new product with its categories and variants
    pub async fn add_product(&self, submission: ProductSubmission) -> RepoResult<Product> {
        validate_product(&submission)?;
        let plan = differ::plan(&[], &submission.inventory)?;

        let mut created = Product {
            id: snowflake_id(),
            name: submission.name,
            short_description: submission.short_description,
            long_description: submission.long_description,
            has_variants: submission.has_variants,
            status: submission.status,
            user_id: submission.user_id,
            created_at: submission.created_at.unwrap_or_else(now_millis),
            last_update: None,
            categories: Vec::new(),
            inventory: Vec::new(),
        };

        let mut tx = self.begin_write().await?;
        product::insert(&mut *tx, &created)
            .await
            .map_err(|e| name_taken(e, &created.name))?;
        let outcome = binder::bind(&mut *tx, created.id, &submission.category_ids).await?;
        apply_plan(&mut *tx, created.id, &plan).await?;
        created = hydrate(&mut *tx, created).await?;
        tx.commit().await?;

        tracing::info!(
            product_id = created.id,
            name = %created.name,
            variants = created.inventory.len(),
            categories = outcome.bound.len(),
            skipped_categories = outcome.skipped.len(),
            "Product created"
        );

        self.publish(PRODUCT_RESOURCE, ChangeType::Insert, created.id, Some(&created))
            .await;
        Ok(created)
    }

    /// Merge a submission into an existing product
    ///
    /// Scalar fields are overwritten unconditionally; `created_at` is kept.
    /// Categories become exactly the submitted (existing) ids. Variants are
    /// upserted; a zero quantity on a known variant deletes it and purges its
    /// media after commit.
    pub async fn update_product(&self, id: i64, submission: ProductSubmission) -> RepoResult<Product> {
        validate_product(&submission)?;
        differ::validate(&submission.inventory)?;

        let mut tx = self.begin_write().await?;
        let mut target = product::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| {
                RepoError::NotFound(ErrorCode::ProductNotFound, format!("Product {id} not found"))
            })?;

        target.name = submission.name;
        target.short_description = submission.short_description;
        target.long_description = submission.long_description;
        target.has_variants = submission.has_variants;
        target.status = submission.status;
        target.user_id = submission.user_id;
        target.last_update = Some(now_millis());

        let outcome = binder::rebind(&mut *tx, id, &submission.category_ids).await?;

        let existing = inventory::find_by_product(&mut *tx, id).await?;
        let plan = differ::plan(&existing, &submission.inventory)?;
        tracing::debug!(
            product_id = id,
            keep = plan.keep.len(),
            create = plan.create.len(),
            delete = plan.delete.len(),
            "Inventory plan"
        );
        apply_plan(&mut *tx, id, &plan).await?;

        product::update(&mut *tx, &target)
            .await
            .map_err(|e| name_taken(e, &target.name))?;
        let updated = hydrate(&mut *tx, target).await?;
        tx.commit().await?;

        tracing::info!(
            product_id = id,
            variants = updated.inventory.len(),
            removed_variants = plan.delete.len(),
            categories = outcome.bound.len(),
            skipped_categories = outcome.skipped.len(),
            "Product updated"
        );

        self.purge_variant_media(id, &plan.delete).await;
        self.publish(PRODUCT_RESOURCE, ChangeType::Update, id, Some(&updated))
            .await;
        Ok(updated)
    }
}

fn validate_product(submission: &ProductSubmission) -> RepoResult<()> {
    if submission.name.trim().is_empty() {
        return Err(RepoError::Validation(
            ErrorCode::ValidationFailed,
            "Product name cannot be empty".into(),
        ));
    }
    Ok(())
}

/// Product name is the only unique column a product row write can hit
fn name_taken(err: RepoError, name: &str) -> RepoError {
    match err {
        RepoError::Duplicate(..) => RepoError::Duplicate(
            ErrorCode::ProductNameExists,
            format!("Product '{name}' already exists"),
        ),
        other => other,
    }
}

/// Deletions first, then in-place updates, then creations
async fn apply_plan(
    conn: &mut SqliteConnection,
    product_id: i64,
    plan: &InventoryPlan,
) -> RepoResult<()> {
    for gone in &plan.delete {
        inventory::delete(conn, gone.id).await?;
    }

    for update in &plan.keep {
        let row = update.fields.to_inventory(update.id, product_id);
        if !inventory::update(conn, &row).await? {
            return Err(RepoError::NotFound(
                ErrorCode::InventoryNotFound,
                format!("Variant {} not found", update.id),
            ));
        }
        model_type::unlink_all(conn, update.id).await?;
        link_model_types(conn, update.id, &update.fields).await?;
    }

    for draft in &plan.create {
        let row = draft.to_inventory(snowflake_id(), product_id);
        inventory::insert(conn, &row).await?;
        link_model_types(conn, row.id, draft).await?;
    }

    Ok(())
}

async fn link_model_types(
    conn: &mut SqliteConnection,
    inventory_id: i64,
    draft: &VariantDraft,
) -> RepoResult<()> {
    let models = resolver::resolve_model_types(conn, &draft.model_types).await?;
    for model in &models {
        model_type::link(conn, inventory_id, model.id).await?;
    }
    Ok(())
}
