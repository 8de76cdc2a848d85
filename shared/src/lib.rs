//! Shared types for the catalog
//!
//! Domain models, error codes and bus message types used by the
//! catalog server and anything that talks to it.

pub mod error;
pub mod message;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

// Message bus re-exports (for convenient access)
pub use message::{BusMessage, ChangePayload, ChangeType, EventType};
