//! Inventory Differ
//!
//! Computes what has to happen to a product's persisted variants given the
//! variants a caller submitted. Pure: no store access, model types stay as
//! names until the plan is applied.
//!
//! | submitted id          | quantity | outcome                    |
//! |-----------------------|----------|----------------------------|
//! | matches existing      | 0        | delete (+ media purge)     |
//! | matches existing      | > 0      | update in place            |
//! | none / unknown        | > 0      | create                     |
//! | none / unknown        | 0        | discarded                  |
//!
//! Existing variants that are not mentioned stay untouched. Inventory
//! updates upsert what is visible; they never replace the whole set.

use std::collections::HashSet;

use shared::models::{Inventory, InventorySubmission, ModelTypeRef};

use shared::error::ErrorCode;

use crate::db::repository::{RepoError, RepoResult};

/// Field values for a variant, as submitted
#[derive(Debug, Clone, PartialEq)]
pub struct VariantDraft {
    pub quantity: i32,
    pub price: f64,
    pub description: Option<String>,
    pub color: Option<String>,
    pub selected_model: Option<String>,
    pub model_types: Vec<ModelTypeRef>,
}

impl From<&InventorySubmission> for VariantDraft {
    fn from(sub: &InventorySubmission) -> Self {
        Self {
            quantity: sub.quantity,
            price: sub.price,
            description: sub.description.clone(),
            color: sub.color.clone(),
            selected_model: sub.selected_model.clone(),
            model_types: sub.model_types.clone(),
        }
    }
}

impl VariantDraft {
    /// Row for this draft under the given identity
    pub fn to_inventory(&self, id: i64, product_id: i64) -> Inventory {
        Inventory {
            id,
            product_id,
            quantity: self.quantity,
            price: self.price,
            description: self.description.clone(),
            color: self.color.clone(),
            selected_model: self.selected_model.clone(),
            model_types: Vec::new(),
        }
    }
}

/// An existing variant overwritten with submitted fields
#[derive(Debug, Clone, PartialEq)]
pub struct VariantUpdate {
    pub id: i64,
    pub fields: VariantDraft,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryPlan {
    pub keep: Vec<VariantUpdate>,
    pub create: Vec<VariantDraft>,
    pub delete: Vec<Inventory>,
}

impl InventoryPlan {
    pub fn is_empty(&self) -> bool {
        self.keep.is_empty() && self.create.is_empty() && self.delete.is_empty()
    }

    pub fn deleted_ids(&self) -> Vec<i64> {
        self.delete.iter().map(|v| v.id).collect()
    }
}

/// Reject submissions that can never be applied
pub fn validate(incoming: &[InventorySubmission]) -> RepoResult<()> {
    for sub in incoming {
        if sub.quantity < 0 {
            return Err(RepoError::Validation(
                ErrorCode::InventoryInvalidQuantity,
                format!("Variant quantity cannot be negative: {}", sub.quantity),
            ));
        }
        if sub.model_types.iter().any(|m| m.name.trim().is_empty()) {
            return Err(RepoError::Validation(
                ErrorCode::ModelTypeInvalidName,
                "Model type name cannot be empty".into(),
            ));
        }
    }
    Ok(())
}

/// Diff `incoming` against `existing`
///
/// If one existing id is submitted more than once the first occurrence wins.
pub fn plan(existing: &[Inventory], incoming: &[InventorySubmission]) -> RepoResult<InventoryPlan> {
    validate(incoming)?;

    let mut plan = InventoryPlan::default();
    let mut seen = HashSet::new();

    for sub in incoming {
        let matched = sub
            .id
            .and_then(|id| existing.iter().find(|v| v.id == id));

        match matched {
            Some(current) => {
                if !seen.insert(current.id) {
                    tracing::warn!(
                        variant_id = current.id,
                        "Variant submitted more than once, keeping first occurrence"
                    );
                    continue;
                }
                if sub.quantity == 0 {
                    plan.delete.push(current.clone());
                } else {
                    plan.keep.push(VariantUpdate {
                        id: current.id,
                        fields: VariantDraft::from(sub),
                    });
                }
            }
            None if sub.quantity > 0 => plan.create.push(VariantDraft::from(sub)),
            None => {
                tracing::debug!(submitted_id = ?sub.id, "Discarding new variant with zero quantity");
            }
        }
    }

    Ok(plan)
}
