//! Service layer - collaborators the catalog engine talks to
//!
//! - [`media`] - media folder cleanup ([`MediaStore`], [`FsMediaStore`])
//! - [`MessageBusService`] - live-update bus and its listener task

pub mod media;
pub mod message_bus;

pub use media::{FsMediaStore, MediaError, MediaStore};
pub use message_bus::MessageBusService;
