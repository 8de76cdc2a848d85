//! Catalog Server - product catalog reconciliation engine
//!
//! Takes submitted product aggregates (product + variants + model types +
//! category memberships) and merges them into SQLite without losing data,
//! without duplicating reference rows, and with media cleanup for removed
//! variants.
//!
//! # Module layout
//!
//! ```text
//! catalog-server/src/
//! ├── core/          # config, state, background tasks, errors
//! ├── catalog/       # reconciliation engine
//! ├── db/            # SQLite pool, migrations, repositories
//! ├── services/      # media store, message bus service
//! ├── message/       # live-update bus
//! └── utils/         # logging, error re-exports
//! ```

pub mod catalog;
pub mod core;
pub mod db;
pub mod message;
pub mod services;
pub mod utils;

// Re-export public types
pub use catalog::CatalogService;
pub use core::{BackgroundTasks, Config, ServerError, ServerState};
pub use db::DbService;
pub use db::repository::{RepoError, RepoResult};
pub use message::{BusMessage, ChangeNotifier, EventType, MessageBus};
pub use services::{FsMediaStore, MediaStore};
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   ______      __        __
  / ____/___ _/ /_____ _/ /___  ____ _
 / /   / __ `/ __/ __ `/ / __ \/ __ `/
/ /___/ /_/ / /_/ /_/ / / /_/ / /_/ /
\____/\__,_/\__/\__,_/_/\____/\__, /
                             /____/
    "#
    );
}
