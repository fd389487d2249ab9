//! JSON-file content store.
//!
//! The whole document lives in one pretty-printed JSON file. A file that is
//! missing, blank, unparsable, or not a JSON object reads as an empty
//! document. Writes go through a sibling temp file and a rename, so readers
//! never see a half-written file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_core::{Document, merge};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::Result;
use crate::traits::{ContentStore, OverwriteGuard, Snapshot};

/// Default location of the content file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "server-data/content.json";

/// Content store backed by a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStore {
    /// Create a store for the given file. Nothing is touched on disk until
    /// the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the content file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_raw(&self) -> Result<Document> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => return Err(e.into()),
        };
        if bytes.trim_ascii().is_empty() {
            return Ok(Document::new());
        }
        // Invalid UTF-8 surfaces as a parse error and is handled like bad JSON.
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => {
                log::warn!(
                    "Content file {} is not a JSON object; treating as empty",
                    self.path.display()
                );
                Ok(Document::new())
            }
            Err(e) => {
                log::warn!(
                    "Content file {} is not valid JSON ({e}); treating as empty",
                    self.path.display()
                );
                Ok(Document::new())
            }
        }
    }

    async fn write_raw(&self, document: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let text = serde_json::to_string_pretty(document)?;

        let mut tmp_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        tokio::fs::write(&tmp_path, text).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        log::debug!("Wrote content file {}", self.path.display());
        Ok(())
    }

    async fn modified_at(&self) -> Option<DateTime<Utc>> {
        let meta = tokio::fs::metadata(&self.path).await.ok()?;
        meta.modified().ok().map(DateTime::<Utc>::from)
    }
}

#[async_trait]
impl ContentStore for FileStore {
    async fn read(&self) -> Result<Document> {
        self.read_raw().await
    }

    async fn write(&self, patch: Document) -> Result<Document> {
        let _guard = self.lock.lock().await;
        let next = merge(self.read_raw().await?, patch);
        self.write_raw(&next).await?;
        Ok(next)
    }

    async fn snapshot(&self) -> Result<Snapshot> {
        let content = self.read_raw().await?;
        Ok(Snapshot {
            content,
            updated_at: self.modified_at().await,
        })
    }

    async fn replace(&self, next: Document, guard: &dyn OverwriteGuard) -> Result<()> {
        let _lock = self.lock.lock().await;
        let current = self.read_raw().await?;
        guard.before_overwrite(&current).await?;
        self.write_raw(&next).await
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}
