//! Error types for folio-api

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

/// Result type alias for folio-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running the server
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Binding or serving failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error returned by a handler, rendered as `{ "ok": false, "message": ... }`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Input was rejected; the message is shown to the editor
    #[error("{0}")]
    BadRequest(String),

    /// Wrong passcode
    #[error("Invalid passcode.")]
    InvalidPasscode,

    /// Admin secrets are missing
    #[error("{}", folio_auth::CONFIG_MESSAGE)]
    NotConfigured,

    /// Route exists but not for this method
    #[error("Method not allowed.")]
    MethodNotAllowed,

    /// Something failed on our side; details are logged, not returned
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidPasscode => StatusCode::UNAUTHORIZED,
            Self::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "ok": false, "message": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
