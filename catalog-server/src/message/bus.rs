//! Message bus core
//!
//! ```text
//! CatalogService ──▶ notify() ──▶ server_tx ──▶ subscribers
//!                                   (broadcast)
//! ```
//!
//! Every notification bumps the per-resource version kept in
//! [`ResourceVersions`], so subscribers can detect gaps.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use shared::message::{BusMessage, ChangePayload, ChangeType};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use super::ChangeNotifier;
use crate::core::state::ResourceVersions;
use crate::utils::AppError;

/// Default capacity of the broadcast channel
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Message bus - routes catalog change events to subscribers
#[derive(Debug, Clone)]
pub struct MessageBus {
    /// Server to subscriber broadcast channel
    server_tx: broadcast::Sender<BusMessage>,
    /// Per-resource version counters
    versions: Arc<ResourceVersions>,
    /// Shutdown signal
    shutdown_token: CancellationToken,
}

impl MessageBus {
    /// Create a bus with the default channel capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY, Arc::new(ResourceVersions::new()))
    }

    /// Create a bus with an explicit capacity and shared version counters
    pub fn with_capacity(capacity: usize, versions: Arc<ResourceVersions>) -> Self {
        let (server_tx, _) = broadcast::channel(capacity.max(1));
        Self {
            server_tx,
            versions,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Publish a message to all subscribers
    pub async fn publish(&self, msg: BusMessage) -> Result<(), AppError> {
        self.server_tx
            .send(msg)
            .map_err(|e| AppError::internal(e.to_string()))?;
        Ok(())
    }

    /// Subscribe to catalog change broadcasts
    pub fn subscribe(&self) -> broadcast::Receiver<BusMessage> {
        self.server_tx.subscribe()
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.server_tx.receiver_count()
    }

    pub fn versions(&self) -> &Arc<ResourceVersions> {
        &self.versions
    }

    /// Shutdown token (for background listeners)
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown_token
    }

    /// Stop all listeners attached to this bus
    pub fn shutdown(&self) {
        tracing::info!("Shutting down message bus");
        self.shutdown_token.cancel();
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChangeNotifier for MessageBus {
    async fn notify(
        &self,
        resource: &str,
        change_type: ChangeType,
        id: &str,
        data: Option<Value>,
    ) -> Result<(), AppError> {
        let version = self.versions.increment(resource);
        let payload = ChangePayload::new(resource, version, change_type, id, data);

        // Nobody listening is not an error; the version still advances.
        if self.server_tx.receiver_count() == 0 {
            tracing::debug!(resource, id, version, "No subscribers for change event");
            return Ok(());
        }

        let msg = BusMessage::sync(&payload)
            .map_err(|e| AppError::internal(format!("Failed to encode change event: {e}")))?;
        self.publish(msg).await
    }
}
