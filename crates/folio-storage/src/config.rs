//! Backend selection.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::backup::DEFAULT_BACKUP_DIR;
use crate::database::PostgresStore;
use crate::filesystem::{DEFAULT_DATA_FILE, FileStore};
use crate::traits::ContentStore;

/// Storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON content file. Used as the store when no database is configured,
    /// and as the seed for an empty database row otherwise.
    pub data_file: PathBuf,

    /// PostgreSQL connection URL. A non-blank value selects the database
    /// backend.
    pub database_url: Option<String>,

    /// Force TLS on or off for the database connection.
    pub database_ssl: Option<bool>,

    /// Directory for backup and pre-restore files.
    pub backup_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            database_url: None,
            database_ssl: None,
            backup_dir: PathBuf::from(DEFAULT_BACKUP_DIR),
        }
    }
}

impl StoreConfig {
    /// The trimmed database URL, if one is set.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Whether the database backend will be used.
    pub fn uses_database(&self) -> bool {
        self.database_url().is_some()
    }
}

/// Parse a `DATABASE_SSL`-style flag.
///
/// Blank means "not set". `1`, `true` and `yes` (any case) mean on; any other
/// value means off.
pub fn parse_ssl_flag(value: &str) -> Option<bool> {
    let clean = value.trim().to_ascii_lowercase();
    if clean.is_empty() {
        return None;
    }
    Some(matches!(clean.as_str(), "1" | "true" | "yes"))
}

/// Open the store selected by `config`.
///
/// Must be called from within a Tokio runtime when a database is configured.
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn ContentStore>> {
    match config.database_url() {
        Some(url) => {
            let store = PostgresStore::connect_lazy(url, config.database_ssl)?
                .with_seed(FileStore::new(&config.data_file));
            log::info!("Using postgres content store");
            Ok(Arc::new(store))
        }
        None => {
            log::info!("Using file content store at {}", config.data_file.display());
            Ok(Arc::new(FileStore::new(&config.data_file)))
        }
    }
}
