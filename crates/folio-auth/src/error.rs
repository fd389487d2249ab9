//! Auth-specific error types.

/// Errors that can occur while authenticating the site owner.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No session token in the header, bearer credentials, or cookie.
    #[error("missing session token")]
    MissingToken,

    /// The server has no admin passcode or session secret configured.
    #[error("admin secrets are not configured")]
    NotConfigured,

    /// Token is not a well-formed signed token.
    #[error("invalid token format: {0}")]
    InvalidFormat(String),

    /// Signature verification failed.
    #[error("invalid token signature: {0}")]
    InvalidSignature(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,

    /// Token was signed correctly but does not carry the admin role.
    #[error("invalid role: '{0}'")]
    InvalidRole(String),

    /// The token could not be signed.
    #[error("failed to sign session token: {0}")]
    Signing(String),
}

impl AuthError {
    /// Whether this error should result in a 401 (vs. a 5xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken
                | AuthError::InvalidFormat(_)
                | AuthError::InvalidSignature(_)
                | AuthError::Expired
                | AuthError::InvalidRole(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let e = AuthError::MissingToken;
        assert_eq!(e.to_string(), "missing session token");
    }

    #[test]
    fn test_auth_error_invalid_role_display() {
        let e = AuthError::InvalidRole("viewer".to_string());
        assert_eq!(e.to_string(), "invalid role: 'viewer'");
    }

    #[test]
    fn test_is_client_error() {
        assert!(AuthError::MissingToken.is_client_error());
        assert!(AuthError::Expired.is_client_error());
        // Misconfiguration and signing failures are server-side problems
        assert!(!AuthError::NotConfigured.is_client_error());
        assert!(!AuthError::Signing("key".into()).is_client_error());
    }
}
