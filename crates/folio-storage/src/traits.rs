//! The content store abstraction.
//!
//! Every backend holds exactly one document. Writes are read-modify-write
//! merges serialized by the backend, so two concurrent saves of different
//! sections both survive.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_core::{Document, PortfolioContent, normalize_stored, sanitize_patch};
use serde_json::Value;

use crate::Result;

/// The stored document together with its last-modified time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Raw stored document.
    pub content: Document,

    /// When the document was last written, if the backend knows.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Hook run with the current document right before it is overwritten.
///
/// If the guard fails, the store must leave the content untouched.
#[async_trait]
pub trait OverwriteGuard: Send + Sync {
    /// Inspect (typically: back up) the document about to be replaced.
    async fn before_overwrite(&self, current: &Document) -> Result<()>;
}

/// Single-row content store.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Read the raw stored document. Returns an empty document when nothing
    /// has been stored yet.
    async fn read(&self) -> Result<Document>;

    /// Shallow-merge an already sanitized patch into the stored document and
    /// return the merged result.
    async fn write(&self, patch: Document) -> Result<Document>;

    /// Read the document and its last-modified time.
    async fn snapshot(&self) -> Result<Snapshot>;

    /// Replace the whole document. `guard` sees the current document under the
    /// same lock as the overwrite.
    async fn replace(&self, next: Document, guard: &dyn OverwriteGuard) -> Result<()>;

    /// Short backend name for logs and diagnostics.
    fn backend(&self) -> &'static str;

    /// Read and normalize the stored content.
    async fn load(&self) -> Result<PortfolioContent> {
        let raw = self.read().await?;
        Ok(normalize_stored(&raw))
    }

    /// Sanitize an untrusted patch, merge it, and return the normalized result.
    async fn save(&self, input: &Value) -> Result<PortfolioContent> {
        let patch = sanitize_patch(input)?;
        let merged = self.write(patch).await?;
        Ok(normalize_stored(&merged))
    }
}

/// Guard that allows every overwrite.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGuard;

#[async_trait]
impl OverwriteGuard for NoGuard {
    async fn before_overwrite(&self, _current: &Document) -> Result<()> {
        Ok(())
    }
}
