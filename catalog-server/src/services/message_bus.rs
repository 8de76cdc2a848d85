use crate::core::Config;
use crate::core::state::ResourceVersions;
use crate::core::tasks::{BackgroundTasks, TaskKind};
use crate::message::{ChangePayload, EventType, MessageBus};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

/// Message bus service
///
/// Wraps [`MessageBus`] and owns:
/// - bus construction from config
/// - the background listener that logs catalog change events
#[derive(Clone, Debug)]
pub struct MessageBusService {
    bus: Arc<MessageBus>,
}

impl MessageBusService {
    pub fn new(config: &Config, versions: Arc<ResourceVersions>) -> Self {
        Self {
            bus: Arc::new(MessageBus::with_capacity(
                config.message_channel_capacity,
                versions,
            )),
        }
    }

    pub fn bus(&self) -> &Arc<MessageBus> {
        &self.bus
    }

    /// Register the change-event listener
    ///
    /// Stops on the task manager's shutdown token or when the bus shuts down.
    pub fn start_background_tasks(&self, tasks: &mut BackgroundTasks) {
        let mut rx = self.bus.subscribe();
        let shutdown = tasks.shutdown_token();
        let bus_shutdown = self.bus.shutdown_token().clone();

        tasks.spawn("catalog_change_listener", TaskKind::Listener, async move {
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = bus_shutdown.cancelled() => break,
                    received = rx.recv() => match received {
                        Ok(msg) if msg.event_type == EventType::Sync => {
                            match msg.parse_payload::<ChangePayload>() {
                                Ok(change) => tracing::info!(
                                    resource = %change.resource,
                                    change = %change.change_type,
                                    id = %change.id,
                                    version = change.version,
                                    "Catalog change"
                                ),
                                Err(e) => tracing::warn!(error = %e, "Malformed change event"),
                            }
                        }
                        Ok(msg) => tracing::debug!(event = %msg.event_type, "Bus message"),
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "Change listener lagged behind");
                        }
                        Err(RecvError::Closed) => break,
                    },
                }
            }
            tracing::debug!("Change listener stopped");
        });
    }
}
