//! In-memory content store for tests and throwaway runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_core::{Document, merge};
use tokio::sync::Mutex;

use crate::Result;
use crate::traits::{ContentStore, OverwriteGuard, Snapshot};

/// Content store that keeps the document in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    content: Document,
    updated_at: Option<DateTime<Utc>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a document.
    pub fn with_content(content: Document) -> Self {
        Self {
            state: Mutex::new(State {
                content,
                updated_at: Some(Utc::now()),
            }),
        }
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn read(&self) -> Result<Document> {
        Ok(self.state.lock().await.content.clone())
    }

    async fn write(&self, patch: Document) -> Result<Document> {
        let mut state = self.state.lock().await;
        let next = merge(std::mem::take(&mut state.content), patch);
        state.content = next.clone();
        state.updated_at = Some(Utc::now());
        Ok(next)
    }

    async fn snapshot(&self) -> Result<Snapshot> {
        let state = self.state.lock().await;
        Ok(Snapshot {
            content: state.content.clone(),
            updated_at: state.updated_at,
        })
    }

    async fn replace(&self, next: Document, guard: &dyn OverwriteGuard) -> Result<()> {
        let mut state = self.state.lock().await;
        guard.before_overwrite(&state.content).await?;
        state.content = next;
        state.updated_at = Some(Utc::now());
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::traits::NoGuard;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        folio_core::document_from_stored(value)
    }

    struct FailingGuard;

    #[async_trait]
    impl OverwriteGuard for FailingGuard {
        async fn before_overwrite(&self, _current: &Document) -> Result<()> {
            Err(Error::backup("disk full"))
        }
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = MemoryStore::new();
        assert!(store.read().await.unwrap().is_empty());
        assert!(store.snapshot().await.unwrap().updated_at.is_none());
        assert_eq!(store.backend(), "memory");
    }

    #[tokio::test]
    async fn test_write_merges_shallowly() {
        let store = MemoryStore::with_content(doc(json!({
            "heroRoles": ["A"],
            "legacy": {"kept": true}
        })));
        let merged = store
            .write(doc(json!({"heroRoles": ["B"], "projects": []})))
            .await
            .unwrap();
        assert_eq!(merged["heroRoles"], json!(["B"]));
        assert_eq!(merged["legacy"], json!({"kept": true}));
        assert_eq!(store.read().await.unwrap(), merged);
    }

    #[tokio::test]
    async fn test_save_sanitizes_and_normalizes() {
        let store = MemoryStore::new();
        let content = store
            .save(&json!({"heroRoles": " A , ,B ", "bogus": 1}))
            .await
            .unwrap();
        assert_eq!(content.hero_roles.unwrap().0, vec!["A", "B"]);
        assert!(!store.read().await.unwrap().contains_key("bogus"));
    }

    #[tokio::test]
    async fn test_save_rejects_bad_resume_without_writing() {
        let store = MemoryStore::new();
        let err = store
            .save(&json!({"resumeDataUrl": "data:text/plain;base64,AA"}))
            .await
            .unwrap_err();
        assert!(err.is_client_error());
        assert!(store.read().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_runs_guard_first() {
        let store = MemoryStore::with_content(doc(json!({"heroRoles": ["old"]})));

        assert!(store
            .replace(doc(json!({"heroRoles": ["new"]})), &FailingGuard)
            .await
            .is_err());
        assert_eq!(store.read().await.unwrap()["heroRoles"], json!(["old"]));

        store
            .replace(doc(json!({"heroRoles": ["new"]})), &NoGuard)
            .await
            .unwrap();
        assert_eq!(store.read().await.unwrap()["heroRoles"], json!(["new"]));
    }
}
