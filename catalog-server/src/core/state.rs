use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;

use crate::catalog::CatalogService;
use crate::core::tasks::BackgroundTasks;
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::message::MessageBus;
use crate::services::{FsMediaStore, MessageBusService};

/// Per-resource version counters for live-update events
///
/// Each change event on a resource bumps its version, so consumers can
/// tell whether they missed one.
#[derive(Debug)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// Bump and return the resource's version (first call returns 1)
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Current version, 0 if the resource never changed
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

impl Default for ResourceVersions {
    fn default() -> Self {
        Self::new()
    }
}

/// Server state - shared handles to every service
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Config | configuration (immutable) |
/// | db | DbService | SQLite pool |
/// | catalog | CatalogService | reconciliation engine |
/// | message_bus | MessageBusService | live-update bus |
/// | resource_versions | Arc<ResourceVersions> | change event versions |
///
/// Cloning is shallow.
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub catalog: CatalogService,
    pub message_bus: MessageBusService,
    pub resource_versions: Arc<ResourceVersions>,
}

impl ServerState {
    /// Wire up services around an already opened database
    pub fn new(config: Config, db: DbService) -> Self {
        let resource_versions = Arc::new(ResourceVersions::new());
        let message_bus = MessageBusService::new(&config, resource_versions.clone());
        let media = Arc::new(FsMediaStore::new(&config.images_dir));
        let catalog = CatalogService::new(db.pool.clone(), media, message_bus.bus().clone());

        Self {
            config,
            db,
            catalog,
            message_bus,
            resource_versions,
        }
    }

    /// Initialize server state
    ///
    /// 1. work directory and images directory
    /// 2. database (DATABASE_PATH, migrations applied)
    /// 3. services
    pub async fn initialize(config: &Config) -> Result<Self> {
        if config.message_channel_capacity == 0 {
            return Err(ServerError::Config(
                "MESSAGE_CHANNEL_CAPACITY must be greater than 0".into(),
            ));
        }

        ensure_dir(Path::new(&config.work_dir)).await?;
        ensure_dir(Path::new(&config.images_dir)).await?;
        if let Some(parent) = Path::new(&config.database_path).parent() {
            ensure_dir(parent).await?;
        }

        let db = DbService::new(&config.database_path, config.db_max_connections)
            .await
            .map_err(ServerError::Database)?;

        tracing::info!(
            database = %config.database_path,
            images = %config.images_dir,
            environment = %config.environment,
            "Server state initialized"
        );
        Ok(Self::new(config.clone(), db))
    }

    /// Register background tasks
    pub fn start_background_tasks(&self, tasks: &mut BackgroundTasks) {
        self.message_bus.start_background_tasks(tasks);
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    pub fn message_bus(&self) -> &Arc<MessageBus> {
        self.message_bus.bus()
    }

    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }
}

async fn ensure_dir(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|source| ServerError::WorkDir {
            path: path.display().to_string(),
            source,
        })
}
