//! Error types for folio-storage

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for folio-storage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in folio-storage
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from folio-core (normalization or validation)
    #[error(transparent)]
    Core(#[from] folio_core::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A backend was requested without the settings it needs
    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// Backup file is malformed or could not be written
    #[error("Backup error: {message}")]
    Backup {
        /// Error message
        message: String,
    },

    /// A file that must exist does not
    #[error("Not found: {}", path.display())]
    NotFound {
        /// Missing path
        path: PathBuf,
    },
}

impl Error {
    /// Create a backup error
    pub fn backup<S: Into<String>>(message: S) -> Self {
        Self::Backup {
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found<P: Into<PathBuf>>(path: P) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Whether this error was caused by the caller's input rather than the
    /// storage backend.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::Core(e) => e.is_client_error(),
            _ => false,
        }
    }
}
