//! Message bus message types
//!
//! Shared between catalog-server and live-update consumers, used for
//! in-process broadcast of catalog changes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use uuid::Uuid;

pub mod payload;
pub use payload::*;

/// Message bus event type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// System notification
    Notification = 1,
    /// Data change signal
    Sync = 4,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Notification => write!(f, "notification"),
            EventType::Sync => write!(f, "sync"),
        }
    }
}

/// Message bus envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusMessage {
    pub request_id: Uuid,
    pub event_type: EventType,
    pub payload: Vec<u8>,
}

impl BusMessage {
    pub fn new(event_type: EventType, payload: Vec<u8>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            event_type,
            payload,
        }
    }

    /// Build a change signal
    pub fn sync(payload: &ChangePayload) -> Result<Self, serde_json::Error> {
        Ok(Self::new(EventType::Sync, serde_json::to_vec(payload)?))
    }

    /// Decode the payload into a concrete type
    pub fn parse_payload<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_message_payload() {
        let payload = ChangePayload::new(
            "product",
            1,
            ChangeType::Insert,
            "42",
            Some(serde_json::json!({"name": "Widget"})),
        );
        let msg = BusMessage::sync(&payload).unwrap();
        assert_eq!(msg.event_type, EventType::Sync);

        let parsed: ChangePayload = msg.parse_payload().unwrap();
        assert_eq!(parsed, payload);
    }

    #[test]
    fn test_request_ids_are_unique() {
        let a = BusMessage::new(EventType::Notification, vec![]);
        let b = BusMessage::new(EventType::Notification, vec![]);
        assert_ne!(a.request_id, b.request_id);
    }
}
