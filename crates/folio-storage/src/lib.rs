//! # folio-storage
//!
//! Storage backends for the single Folio content document.
//!
//! This crate provides:
//! - [`ContentStore`]: the async store abstraction with merge-on-write
//! - [`FileStore`]: a pretty-printed JSON file (the default)
//! - [`PostgresStore`]: one JSONB row in `portfolio_content`
//! - [`MemoryStore`]: in-process storage for tests
//! - [`backup`]: backup files and restore with a pre-restore safety copy
//! - [`open_store`]: picks a backend from [`StoreConfig`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod backup;
pub mod config;
pub mod database;
pub mod error;
pub mod filesystem;
pub mod memory;
pub mod traits;

pub use backup::{
    BackupDocument, RestoreReport, find_latest_backup, read_backup_content, restore, write_backup,
};
pub use config::{StoreConfig, open_store, parse_ssl_flag};
pub use database::PostgresStore;
pub use error::{Error, Result};
pub use filesystem::FileStore;
pub use memory::MemoryStore;
pub use traits::{ContentStore, NoGuard, OverwriteGuard, Snapshot};
