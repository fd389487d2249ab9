//! Command handlers.

use std::path::{Path, PathBuf};

use folio_api::AppState;
use folio_storage::{RestoreReport, find_latest_backup, open_store};
use tracing::info;

use crate::config::FolioConfig;
use crate::{Error, Result};

/// Run the API server until shutdown.
pub async fn serve(config: &FolioConfig) -> Result<()> {
    let addr = config.socket_addr()?;
    let store = open_store(&config.storage)?;
    let state = AppState::new(store, config.admin_auth(), config.server.production);
    folio_api::serve(state, addr).await?;
    Ok(())
}

/// Write a backup and return its path.
pub async fn backup(config: &FolioConfig, out: Option<&Path>) -> Result<PathBuf> {
    let store = open_store(&config.storage)?;
    info!(backend = store.backend(), "Backing up content");
    let path = folio_storage::write_backup(store.as_ref(), out, &config.storage.backup_dir).await?;
    Ok(path)
}

/// Restore from `file`, or from the newest backup when no file is given.
pub async fn restore(config: &FolioConfig, file: Option<&Path>) -> Result<RestoreReport> {
    let source = match file {
        Some(path) => path.to_path_buf(),
        None => find_latest_backup(&config.storage.backup_dir)
            .await?
            .ok_or(Error::NoBackup)?,
    };

    let store = open_store(&config.storage)?;
    info!(backend = store.backend(), source = %source.display(), "Restoring content");
    let report =
        folio_storage::restore(store.as_ref(), &source, &config.storage.backup_dir).await?;
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn file_config(dir: &TempDir) -> FolioConfig {
        let mut config = FolioConfig::default();
        config.storage.data_file = dir.path().join("content.json");
        config.storage.backup_dir = dir.path().join("backups");
        config
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_backup_then_restore_latest() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir);
        std::fs::write(&config.storage.data_file, r#"{"heroRoles":["first"]}"#).unwrap();

        let backup_path = backup(&config, None).await.unwrap();
        assert!(backup_path.starts_with(&config.storage.backup_dir));
        let written = read_json(&backup_path);
        assert_eq!(written["schema"], "portfolio-content-backup-v1");
        assert_eq!(written["content"]["heroRoles"], json!(["first"]));

        std::fs::write(&config.storage.data_file, r#"{"heroRoles":["second"]}"#).unwrap();

        let report = restore(&config, None).await.unwrap();
        assert_eq!(report.source, backup_path);
        assert_eq!(
            read_json(&report.pre_restore)["content"]["heroRoles"],
            json!(["second"])
        );
        assert_eq!(
            read_json(&config.storage.data_file)["heroRoles"],
            json!(["first"])
        );
    }

    #[tokio::test]
    async fn test_restore_without_backups() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir);
        assert!(matches!(restore(&config, None).await, Err(Error::NoBackup)));
    }

    #[tokio::test]
    async fn test_restore_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir);
        let err = restore(&config, Some(&dir.path().join("gone.json")))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Storage(folio_storage::Error::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_backup_explicit_out() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir);
        let out = dir.path().join("elsewhere/snap.json");
        let path = backup(&config, Some(&out)).await.unwrap();
        assert_eq!(path, out);
        assert_eq!(read_json(&out)["content"], json!({}));
    }
}
