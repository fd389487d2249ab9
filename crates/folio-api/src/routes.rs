//! Request handlers.

use axum::{Extension, Json};
use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use http::header::{CONTENT_TYPE, SET_COOKIE};
use http::{HeaderMap, HeaderValue, StatusCode};
use serde_json::{Value, json};

use folio_auth::{
    AdminSession, clear_session_cookie, session_cookie, token_from_headers, wants_secure_cookie,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Parse a request body leniently: empty or invalid JSON becomes `{}`.
pub fn lenient_json(body: &[u8]) -> Value {
    if body.is_empty() {
        return json!({});
    }
    serde_json::from_slice(body).unwrap_or_else(|_| json!({}))
}

fn with_cookie(cookie: String, body: Value) -> Result<Response, ApiError> {
    let cookie = HeaderValue::from_str(&cookie)
        .map_err(|_| ApiError::Internal("Could not create admin session."))?;
    Ok(([(SET_COOKIE, cookie)], Json(body)).into_response())
}

/// `/api/admin/session`: report whether the request carries a valid session.
pub async fn session_status(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if !state.auth.is_configured() {
        let body = json!({
            "ok": false,
            "authenticated": false,
            "message": folio_auth::CONFIG_MESSAGE,
        });
        return (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response();
    }

    let token = token_from_headers(&headers);
    let authenticated = state.auth.is_authenticated(token.as_deref());
    Json(json!({ "ok": true, "authenticated": authenticated })).into_response()
}

/// `POST /api/admin/login`: exchange the passcode for a session.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    if !state.auth.is_configured() {
        return Err(ApiError::NotConfigured);
    }

    let body = lenient_json(&body);
    let passcode = body.get("passcode").and_then(Value::as_str).unwrap_or("");
    if !state.auth.check_passcode(passcode) {
        tracing::warn!("Rejected admin login attempt");
        return Err(ApiError::InvalidPasscode);
    }

    let token = state.auth.issue().map_err(|e| {
        tracing::error!(error = %e, "Could not sign admin session");
        ApiError::Internal("Could not create admin session.")
    })?;

    let secure = wants_secure_cookie(&headers, state.production);
    tracing::info!("Admin logged in");
    with_cookie(
        session_cookie(&token, secure),
        json!({ "ok": true, "authenticated": true, "sessionToken": token }),
    )
}

/// `POST /api/admin/logout`: clear the session cookie.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, ApiError> {
    let secure = wants_secure_cookie(&headers, state.production);
    with_cookie(
        clear_session_cookie(secure),
        json!({ "ok": true, "authenticated": false }),
    )
}

/// `GET /api/content`: the normalized content.
pub async fn get_content(State(state): State<AppState>) -> Result<Response, ApiError> {
    let content = state.store.load().await.map_err(|e| {
        tracing::error!(error = %e, backend = state.store.backend(), "Could not load content");
        ApiError::Internal("Could not load content.")
    })?;
    Ok(Json(json!({ "ok": true, "content": content })).into_response())
}

/// `POST /api/content`: merge a patch into the stored content.
///
/// Mounted behind the admin auth layer.
pub async fn save_content(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let patch = lenient_json(&body);
    match state.store.save(&patch).await {
        Ok(content) => {
            tracing::info!(
                backend = state.store.backend(),
                session_expires_at = session.expires_at,
                "Content saved"
            );
            Ok(Json(json!({ "ok": true, "content": content })).into_response())
        }
        Err(e) if e.is_client_error() => Err(ApiError::BadRequest(e.to_string())),
        Err(e) => {
            tracing::error!(error = %e, backend = state.store.backend(), "Could not save content");
            Err(ApiError::Internal("Could not save content."))
        }
    }
}

/// Fallback for known routes hit with the wrong method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Fallback for unknown routes.
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        "Not found",
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_json() {
        assert_eq!(lenient_json(b""), json!({}));
        assert_eq!(lenient_json(b"{not json"), json!({}));
        assert_eq!(lenient_json(br#"{"a":1}"#), json!({"a": 1}));
        assert_eq!(lenient_json(b"[1]"), json!([1]));
    }
}
