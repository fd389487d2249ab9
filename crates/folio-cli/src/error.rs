//! Error types for folio-cli

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for folio-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in folio-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Config file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Restore was requested but there is nothing to restore from
    #[error("No backup file found. Pass a file path or create a backup first.")]
    NoBackup,

    /// Error from folio-storage
    #[error(transparent)]
    Storage(#[from] folio_storage::Error),

    /// Error from folio-api
    #[error(transparent)]
    Api(#[from] folio_api::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }
}
