//! Admin authentication for Folio.
//!
//! The site has exactly one editor, the owner, who proves who they are with a
//! passcode and receives a signed, expiring session token. Provides:
//! - [`AdminAuth`]: the owner's passcode and session secret
//! - [`compare_secret`]: constant-time passcode check
//! - [`SessionSigner`]: HS256 session token issue/verify
//! - [`cookie`]: `Set-Cookie` builders and token extraction from headers
//! - [`AuthLayer`] / [`AuthService`]: Tower middleware parameterised over [`TokenValidator`]
//! - [`AuthError`]: auth-specific error types

mod admin;
pub mod cookie;
mod error;
mod middleware;
mod secret;
mod session;
mod token;

pub use admin::AdminAuth;
pub use cookie::{
    ADMIN_COOKIE_NAME, SESSION_HEADER, clear_session_cookie, parse_cookie_header, session_cookie,
    token_from_headers, wants_secure_cookie,
};
pub use error::AuthError;
pub use middleware::{AuthLayer, AuthService, UNAUTHORIZED_MESSAGE, rejection};
pub use secret::compare_secret;
pub use session::AdminSession;
pub use token::{ADMIN_ROLE, SESSION_TTL, SessionClaims, SessionSigner};

/// Shown whenever an admin endpoint is hit before secrets are configured.
pub const CONFIG_MESSAGE: &str =
    "Set ADMIN_PIN and ADMIN_SESSION_SECRET in .env.local (dev) or your hosting environment.";

/// Trait for validating session tokens.
///
/// The middleware calls `validate()` with the extracted token and stores the
/// resulting session in the request on success.
pub trait TokenValidator: Send + Sync + 'static {
    /// Whether the validator has the secrets it needs. Unconfigured
    /// validators cause the middleware to answer 503.
    fn is_configured(&self) -> bool;

    /// Validate a token and return the admin session.
    fn validate(&self, token: &str) -> Result<AdminSession, AuthError>;
}
