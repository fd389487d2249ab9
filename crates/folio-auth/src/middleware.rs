//! Tower middleware guarding admin-only routes.
//!
//! `AuthLayer` and `AuthService` wrap any inner service with session-token
//! validation. Generic over [`TokenValidator`] so tests can plug in a fake.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::Json;
use axum::body::Body;
use axum::response::{IntoResponse, Response};
use http::{Request, StatusCode};
use serde_json::json;
use tower::{Layer, Service};

use crate::cookie::token_from_headers;
use crate::{AuthError, CONFIG_MESSAGE, TokenValidator};

/// Message returned for a missing, expired, or forged session.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized admin session.";

/// Tower `Layer` that wraps services with admin session checks.
pub struct AuthLayer<V: TokenValidator> {
    validator: Arc<V>,
}

impl<V: TokenValidator> AuthLayer<V> {
    /// Create a new auth layer with the given validator.
    pub fn new(validator: Arc<V>) -> Self {
        Self { validator }
    }
}

impl<V: TokenValidator> Clone for AuthLayer<V> {
    fn clone(&self) -> Self {
        Self {
            validator: self.validator.clone(),
        }
    }
}

impl<V: TokenValidator, S> Layer<S> for AuthLayer<V> {
    type Service = AuthService<V, S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            validator: self.validator.clone(),
        }
    }
}

/// Tower `Service` that validates the session before forwarding requests.
///
/// On success, inserts [`AdminSession`](crate::AdminSession) into request
/// extensions where it's available to downstream handlers.
pub struct AuthService<V: TokenValidator, S> {
    inner: S,
    validator: Arc<V>,
}

impl<V: TokenValidator, S: Clone> Clone for AuthService<V, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            validator: self.validator.clone(),
        }
    }
}

impl<V, S> Service<Request<Body>> for AuthService<V, S>
where
    V: TokenValidator,
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let validator = self.validator.clone();

        Box::pin(async move {
            if !validator.is_configured() {
                return Ok(rejection(&AuthError::NotConfigured));
            }

            let Some(token) = token_from_headers(req.headers()) else {
                return Ok(rejection(&AuthError::MissingToken));
            };

            match validator.validate(&token) {
                Ok(session) => {
                    req.extensions_mut().insert(session);
                    let resp = inner
                        .call(req)
                        .await
                        .unwrap_or_else(|infallible| match infallible {});
                    Ok(resp.into_response())
                }
                Err(auth_err) => {
                    log::warn!("Admin session rejected: {auth_err}");
                    Ok(rejection(&auth_err))
                }
            }
        })
    }
}

/// Build the JSON rejection for an auth failure.
///
/// Client errors map to 401. Misconfiguration maps to 503 with setup
/// instructions, and anything else to 500.
pub fn rejection(err: &AuthError) -> Response {
    let (status, message) = match err {
        AuthError::NotConfigured => (StatusCode::SERVICE_UNAVAILABLE, CONFIG_MESSAGE),
        e if e.is_client_error() => (StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Could not verify admin session.",
        ),
    };
    (status, Json(json!({ "ok": false, "message": message }))).into_response()
}
