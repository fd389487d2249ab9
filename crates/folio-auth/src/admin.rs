//! The owner's credentials: passcode plus session signer.

use std::fmt;
use std::sync::Arc;

use crate::secret::compare_secret;
use crate::token::SessionSigner;
use crate::{AdminSession, AuthError, TokenValidator};

/// Passcode and session secret for the single admin.
///
/// Admin features are available only when both are non-empty.
#[derive(Clone)]
pub struct AdminAuth {
    pin: Arc<str>,
    signer: SessionSigner,
}

impl AdminAuth {
    /// Create from the configured passcode and session secret.
    ///
    /// Both are used exactly as given. Whitespace in the secret changes the
    /// signing key.
    pub fn new(pin: impl Into<String>, session_secret: impl Into<String>) -> Self {
        Self {
            pin: Arc::from(pin.into()),
            signer: SessionSigner::new(session_secret),
        }
    }

    /// Replace the session signer (e.g. to change the TTL).
    pub fn with_signer(mut self, signer: SessionSigner) -> Self {
        self.signer = signer;
        self
    }

    /// Whether both the passcode and the session secret are set.
    pub fn is_configured(&self) -> bool {
        !self.pin.is_empty() && self.signer.is_configured()
    }

    /// Check a submitted passcode. Surrounding whitespace is ignored.
    pub fn check_passcode(&self, input: &str) -> bool {
        compare_secret(input.trim(), &self.pin)
    }

    /// Issue a new session token.
    pub fn issue(&self) -> Result<String, AuthError> {
        if !self.is_configured() {
            return Err(AuthError::NotConfigured);
        }
        self.signer.issue()
    }

    /// Whether `token` is a valid, unexpired admin session.
    pub fn is_authenticated(&self, token: Option<&str>) -> bool {
        token.is_some_and(|t| self.validate(t).is_ok())
    }

    /// The underlying signer.
    pub fn signer(&self) -> &SessionSigner {
        &self.signer
    }
}

impl TokenValidator for AdminAuth {
    fn is_configured(&self) -> bool {
        AdminAuth::is_configured(self)
    }

    fn validate(&self, token: &str) -> Result<AdminSession, AuthError> {
        if !self.is_configured() {
            return Err(AuthError::NotConfigured);
        }
        self.signer.verify(token)
    }
}

impl fmt::Debug for AdminAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminAuth")
            .field("pin_set", &!self.pin.is_empty())
            .field("signer", &self.signer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_requires_both() {
        assert!(AdminAuth::new("1234", "secret").is_configured());
        assert!(!AdminAuth::new("", "secret").is_configured());
        assert!(!AdminAuth::new("1234", "").is_configured());
        assert!(AdminAuth::new("1234", "  ").is_configured());
    }

    #[test]
    fn test_secrets_are_not_trimmed() {
        let padded = AdminAuth::new("1234", " secret ");
        let plain = AdminAuth::new("1234", "secret");
        let token = padded.issue().unwrap();
        assert!(padded.is_authenticated(Some(&token)));
        assert!(!plain.is_authenticated(Some(&token)));

        // Submitted passcodes are trimmed, the stored one is not.
        let spaced_pin = AdminAuth::new(" 1234 ", "secret");
        assert!(!spaced_pin.check_passcode(" 1234 "));
    }

    #[test]
    fn test_check_passcode() {
        let auth = AdminAuth::new("1234", "secret");
        assert!(auth.check_passcode("1234"));
        assert!(auth.check_passcode("  1234\n"));
        assert!(!auth.check_passcode("12345"));
        assert!(!auth.check_passcode(""));
    }

    #[test]
    fn test_issue_and_authenticate() {
        let auth = AdminAuth::new("1234", "secret");
        let token = auth.issue().unwrap();
        assert!(auth.is_authenticated(Some(&token)));
        assert!(!auth.is_authenticated(Some("garbage")));
        assert!(!auth.is_authenticated(None));
    }

    #[test]
    fn test_missing_pin_disables_tokens() {
        let token = AdminAuth::new("1234", "secret").issue().unwrap();
        let auth = AdminAuth::new("", "secret");
        assert!(matches!(auth.issue(), Err(AuthError::NotConfigured)));
        assert!(matches!(
            auth.validate(&token),
            Err(AuthError::NotConfigured)
        ));
    }

    #[test]
    fn test_debug_hides_pin() {
        let debug = format!("{:?}", AdminAuth::new("98765", "s3cr3t"));
        assert!(!debug.contains("98765"));
        assert!(!debug.contains("s3cr3t"));
    }
}
