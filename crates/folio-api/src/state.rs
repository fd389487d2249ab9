//! Shared handler state.

use std::sync::Arc;

use folio_auth::AdminAuth;
use folio_storage::ContentStore;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Where content is read from and saved to.
    pub store: Arc<dyn ContentStore>,
    /// Passcode and session signer.
    pub auth: Arc<AdminAuth>,
    /// Production deployments always mark cookies `Secure`.
    pub production: bool,
}

impl AppState {
    /// Create state for the given store and credentials.
    pub fn new(store: Arc<dyn ContentStore>, auth: AdminAuth, production: bool) -> Self {
        Self {
            store,
            auth: Arc::new(auth),
            production,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.backend())
            .field("auth", &self.auth)
            .field("production", &self.production)
            .finish()
    }
}
