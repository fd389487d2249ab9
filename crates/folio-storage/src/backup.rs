//! Backup files and restore.
//!
//! A backup is a JSON envelope around the raw stored document:
//!
//! ```json
//! {
//!   "schema": "portfolio-content-backup-v1",
//!   "exportedAt": "2025-01-01T00:00:00Z",
//!   "source": "portfolio_content",
//!   "rowId": 1,
//!   "updatedAt": null,
//!   "content": { "...": "..." }
//! }
//! ```
//!
//! Restoring always writes a `pre-restore-<stamp>.json` backup of the current
//! content first, under the store's write lock. If that backup cannot be
//! written, the content is not touched.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_core::Document;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::traits::{ContentStore, OverwriteGuard};
use crate::{Error, Result};

/// Schema tag written into every backup file.
pub const BACKUP_SCHEMA: &str = "portfolio-content-backup-v1";

/// Source tag written into every backup file.
pub const BACKUP_SOURCE: &str = "portfolio_content";

/// Default directory for backup files, relative to the working directory.
pub const DEFAULT_BACKUP_DIR: &str = "backups";

const BACKUP_PREFIX: &str = "content-backup-";
const PRE_RESTORE_PREFIX: &str = "pre-restore-";

/// On-disk backup envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    /// Always [`BACKUP_SCHEMA`].
    pub schema: String,
    /// When the backup was taken.
    pub exported_at: DateTime<Utc>,
    /// Always [`BACKUP_SOURCE`].
    pub source: String,
    /// Row the content came from.
    pub row_id: i64,
    /// Last write time of the content, if known.
    pub updated_at: Option<DateTime<Utc>>,
    /// The raw stored document.
    pub content: Document,
}

impl BackupDocument {
    /// Wrap `content` taken at `exported_at`.
    pub fn new(
        content: Document,
        exported_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            schema: BACKUP_SCHEMA.to_string(),
            exported_at,
            source: BACKUP_SOURCE.to_string(),
            row_id: 1,
            updated_at,
            content,
        }
    }
}

/// Paths involved in a completed restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreReport {
    /// File the content was restored from.
    pub source: PathBuf,
    /// Backup of the content that was overwritten.
    pub pre_restore: PathBuf,
}

/// Filename-safe UTC timestamp, e.g. `20250102-030405Z`.
pub fn stamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d-%H%M%SZ").to_string()
}

async fn write_document(path: &Path, document: &BackupDocument) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let text = serde_json::to_string_pretty(document)?;
    tokio::fs::write(path, text).await?;
    Ok(())
}

/// Write a backup of the store's current content.
///
/// Goes to `out` when given, otherwise to
/// `<dir>/content-backup-<stamp>.json`. Returns the path written.
pub async fn write_backup(
    store: &dyn ContentStore,
    out: Option<&Path>,
    dir: &Path,
) -> Result<PathBuf> {
    let snapshot = store.snapshot().await?;
    let now = Utc::now();
    let path = match out {
        Some(path) => path.to_path_buf(),
        None => dir.join(format!("{BACKUP_PREFIX}{}.json", stamp(now))),
    };

    let document = BackupDocument::new(snapshot.content, now, snapshot.updated_at);
    write_document(&path, &document).await?;
    log::info!("Backup written: {}", path.display());
    Ok(path)
}

/// Find the newest `content-backup-*.json` in `dir`.
///
/// Names sort chronologically, so the lexicographically last one wins. A
/// missing directory yields `None`.
pub async fn find_latest_backup(dir: &Path) -> Result<Option<PathBuf>> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut latest: Option<String> = None;
    while let Some(entry) = entries.next_entry().await? {
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !name.starts_with(BACKUP_PREFIX) || !name.ends_with(".json") {
            continue;
        }
        if latest.as_ref().is_none_or(|current| name > *current) {
            latest = Some(name);
        }
    }
    Ok(latest.map(|name| dir.join(name)))
}

/// Read the content to restore from a backup file.
///
/// The file must hold a JSON object. Its `content` field is used when that is
/// an object; otherwise the whole file is taken as the content.
pub async fn read_backup_content(path: &Path) -> Result<Document> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::not_found(path));
        }
        Err(e) => return Err(e.into()),
    };
    let Value::Object(mut parsed) = serde_json::from_str::<Value>(&text)? else {
        return Err(Error::backup("Backup file must contain a JSON object."));
    };
    match parsed.remove("content") {
        Some(Value::Object(content)) => Ok(content),
        Some(other) => {
            parsed.insert("content".to_string(), other);
            Ok(parsed)
        }
        None => Ok(parsed),
    }
}

/// Writes the pre-restore backup from inside the store's lock.
struct PreRestoreBackup {
    path: PathBuf,
    exported_at: DateTime<Utc>,
}

#[async_trait]
impl OverwriteGuard for PreRestoreBackup {
    async fn before_overwrite(&self, current: &Document) -> Result<()> {
        let document = BackupDocument::new(current.clone(), self.exported_at, None);
        write_document(&self.path, &document)
            .await
            .map_err(|e| Error::backup(format!("Could not write pre-restore backup: {e}")))
    }
}

/// Restore the store's content from `source`.
///
/// The current content is saved to `<dir>/pre-restore-<stamp>.json` before
/// anything is overwritten.
pub async fn restore(store: &dyn ContentStore, source: &Path, dir: &Path) -> Result<RestoreReport> {
    let content = read_backup_content(source).await?;
    let now = Utc::now();
    let guard = PreRestoreBackup {
        path: dir.join(format!("{PRE_RESTORE_PREFIX}{}.json", stamp(now))),
        exported_at: now,
    };

    store.replace(content, &guard).await?;
    log::info!(
        "Restored content from {} (pre-restore backup: {})",
        source.display(),
        guard.path.display()
    );

    Ok(RestoreReport {
        source: source.to_path_buf(),
        pre_restore: guard.path,
    })
}
