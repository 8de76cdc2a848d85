use serde::{Deserialize, Serialize};
use std::fmt;

// ==================== Change Type ====================

/// Kind of change carried by a live-update event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    Insert,
    Update,
    Delete,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => write!(f, "INSERT"),
            Self::Update => write!(f, "UPDATE"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

// ==================== Change Payload ====================

/// Live-update payload (server -> subscribers)
///
/// Consumers compare `version` against the last one they saw per resource
/// and refetch when they notice a gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangePayload {
    /// Resource type, e.g. "product" or "category"
    pub resource: String,
    /// Per-resource version, strictly increasing
    pub version: u64,
    pub change_type: ChangeType,
    /// Entity id
    pub id: String,
    /// Entity snapshot (None for deletions)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ChangePayload {
    pub fn new(
        resource: impl Into<String>,
        version: u64,
        change_type: ChangeType,
        id: impl Into<String>,
        data: Option<serde_json::Value>,
    ) -> Self {
        Self {
            resource: resource.into(),
            version,
            change_type,
            id: id.into(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deleted_payload_omits_data() {
        let payload = ChangePayload::new("product", 3, ChangeType::Delete, "17", None);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["change_type"], "DELETE");
        assert!(json.get("data").is_none());
    }
}
