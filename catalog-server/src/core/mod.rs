//! Core - configuration, server state and background tasks
//!
//! - [`Config`] - server configuration
//! - [`ServerState`] - shared handles to every service
//! - [`BackgroundTasks`] - task lifecycle
//! - [`ServerError`] - startup errors

pub mod config;
pub mod error;
pub mod state;
pub mod tasks;

pub use config::Config;
pub use error::{Result, ServerError};
pub use state::{ResourceVersions, ServerState};
pub use tasks::{BackgroundTasks, TaskKind};
