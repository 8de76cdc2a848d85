use std::path::PathBuf;

/// Catalog server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/catalog | working directory |
/// | DATABASE_PATH | {WORK_DIR}/catalog.db | SQLite file |
/// | IMAGES_DIR | {WORK_DIR}/images | media root |
/// | LOG_LEVEL | info | tracing level |
/// | LOG_DIR | (unset) | enables daily log files |
/// | ENVIRONMENT | development | development / staging / production |
/// | MESSAGE_CHANNEL_CAPACITY | 1024 | broadcast channel capacity |
/// | DB_MAX_CONNECTIONS | 5 | SQLite pool size |
///
/// ```ignore
/// WORK_DIR=/data/catalog LOG_LEVEL=debug cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database and images
    pub work_dir: String,
    pub database_path: String,
    pub images_dir: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// development | staging | production
    pub environment: String,
    pub message_channel_capacity: usize,
    pub db_max_connections: u32,
}

impl Config {
    /// Load configuration from environment variables, with defaults
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/catalog".into());
        Self::build(work_dir)
    }

    /// Environment configuration rooted at a different working directory
    ///
    /// Paths derived from the working directory follow it unless they are
    /// set explicitly. Mostly used by tests.
    pub fn with_overrides(work_dir: impl Into<String>) -> Self {
        Self::build(work_dir.into())
    }

    fn build(work_dir: String) -> Self {
        let root = PathBuf::from(&work_dir);
        Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| root.join("catalog.db").to_string_lossy().into_owned()),
            images_dir: std::env::var("IMAGES_DIR")
                .unwrap_or_else(|_| root.join("images").to_string_lossy().into_owned()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            message_channel_capacity: std::env::var("MESSAGE_CHANNEL_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1024),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            work_dir,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_follow_work_dir() {
        let config = Config::with_overrides("/tmp/catalog-test");
        if std::env::var("DATABASE_PATH").is_err() {
            assert_eq!(config.database_path, "/tmp/catalog-test/catalog.db");
        }
        if std::env::var("IMAGES_DIR").is_err() {
            assert_eq!(config.images_dir, "/tmp/catalog-test/images");
        }
        assert_eq!(config.work_dir, "/tmp/catalog-test");
        assert!(config.message_channel_capacity > 0);
    }
}
