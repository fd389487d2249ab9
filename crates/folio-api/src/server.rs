//! Router assembly and server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::handler::Handler;
use axum::routing::{any, get, post};
use http::HeaderValue;
use http::header::CACHE_CONTROL;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use folio_auth::AuthLayer;

use crate::Result;
use crate::routes;
use crate::state::AppState;

/// Largest accepted request body. Leaves room for an 8 MB resume data URL
/// plus the rest of a full content save.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the API router.
pub fn router(state: AppState) -> Router {
    let auth = AuthLayer::new(Arc::clone(&state.auth));

    Router::new()
        .route("/api/admin/session", any(routes::session_status))
        .route(
            "/api/admin/login",
            post(routes::login).fallback(routes::method_not_allowed),
        )
        .route(
            "/api/admin/logout",
            post(routes::logout).fallback(routes::method_not_allowed),
        )
        .route(
            "/api/content",
            // `get` also answers HEAD unless HEAD has its own handler.
            get(routes::get_content)
                .head(routes::method_not_allowed)
                .post(routes::save_content.layer(auth))
                .fallback(routes::method_not_allowed),
        )
        .fallback(routes::not_found)
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C or SIGTERM.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    info!(backend = state.store.backend(), "Starting server...");
    if !state.auth.is_configured() {
        tracing::warn!("ADMIN_PIN or ADMIN_SESSION_SECRET is not set; admin editing is disabled");
    }

    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    info!("Server running on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
