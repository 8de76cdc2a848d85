//! Live-update message bus
//!
//! Catalog changes are announced after commit through a [`ChangeNotifier`].
//! The in-process [`MessageBus`] is the production implementation; anything
//! subscribed to it receives a [`BusMessage`] carrying a [`ChangePayload`].

pub mod bus;

use async_trait::async_trait;
use serde_json::Value;

pub use bus::MessageBus;
pub use shared::message::{BusMessage, ChangePayload, ChangeType, EventType};

use crate::utils::AppError;

/// Pub/sub sink for catalog change events
///
/// Emission is fire-and-forget from the catalog's point of view: callers
/// log a returned error and carry on.
#[async_trait]
pub trait ChangeNotifier: Send + Sync {
    async fn notify(
        &self,
        resource: &str,
        change_type: ChangeType,
        id: &str,
        data: Option<Value>,
    ) -> Result<(), AppError>;
}
