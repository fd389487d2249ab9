//! Authenticated admin session.

/// A verified admin session, extracted from a valid token.
///
/// Stored in HTTP request extensions by the auth middleware. Handlers behind
/// the layer read it with axum's `Extension` extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminSession {
    /// Expiry as seconds since the Unix epoch.
    pub expires_at: u64,
}
