//! Error types for folio-core.

/// Errors raised while shaping portfolio content.
///
/// All variants are marked `#[non_exhaustive]` so new failure kinds can be
/// added without breaking downstream matches.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A user-supplied value was rejected.
    #[error("{message}")]
    Validation {
        /// Content key that failed validation, if known
        field: Option<String>,
        /// Human-readable explanation, safe to show to the editor
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` alias for folio-core operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error tied to a content key.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Whether the error was caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_is_bare_message() {
        let err = Error::validation("Resume must be a PDF data URL.");
        assert_eq!(err.to_string(), "Resume must be a PDF data URL.");
    }

    #[test]
    fn test_validation_field() {
        let err = Error::validation_field("resumeDataUrl", "too large");
        let Error::Validation { field, message } = err else {
            unreachable!("Expected Validation error variant");
        };
        assert_eq!(field.as_deref(), Some("resumeDataUrl"));
        assert_eq!(message, "too large");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(Error::validation("bad").is_client_error());
        let io = std::io::Error::other("disk");
        assert!(!Error::from(io).is_client_error());
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let err: Error = serde_err.into();
        assert!(err.to_string().starts_with("Serialization error"));
    }

    #[test]
    fn test_error_implements_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
