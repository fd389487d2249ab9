//! Signed admin session tokens.
//!
//! Tokens are compact HS256 JWTs carrying `{ "role": "admin", "exp": <unix> }`.
//! There is no server-side session table: a token is valid until it expires
//! or the session secret changes.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{AdminSession, AuthError};

/// The only role this site issues.
pub const ADMIN_ROLE: &str = "admin";

/// Lifetime of an admin session (12 hours).
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 12);

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Role granted by the token; always [`ADMIN_ROLE`] for tokens we issue.
    pub role: String,
    /// Expiry as seconds since the Unix epoch.
    pub exp: u64,
}

/// Issues and verifies session tokens with a shared HMAC secret.
///
/// Cheap to clone. An empty secret leaves the signer unconfigured: it will
/// neither issue nor accept tokens.
#[derive(Clone)]
pub struct SessionSigner {
    secret: Arc<str>,
    ttl: Duration,
}

impl SessionSigner {
    /// Create a signer for the given secret with the default TTL.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Arc::from(secret.into()),
            ttl: SESSION_TTL,
        }
    }

    /// Override the session lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Whether a non-empty secret is available.
    pub fn is_configured(&self) -> bool {
        !self.secret.is_empty()
    }

    /// Issue a fresh admin token expiring one TTL from now.
    pub fn issue(&self) -> Result<String, AuthError> {
        self.issue_at(now_epoch())
    }

    /// Verify a token and return the session it describes.
    pub fn verify(&self, token: &str) -> Result<AdminSession, AuthError> {
        self.verify_at(token, now_epoch())
    }

    fn issue_at(&self, now: u64) -> Result<String, AuthError> {
        if !self.is_configured() {
            return Err(AuthError::NotConfigured);
        }
        let claims = SessionClaims {
            role: ADMIN_ROLE.to_string(),
            exp: now + self.ttl.as_secs(),
        };
        let key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::new(Algorithm::HS256), &claims, &key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    fn verify_at(&self, token: &str, now: u64) -> Result<AdminSession, AuthError> {
        if !self.is_configured() {
            return Err(AuthError::NotConfigured);
        }

        // Expiry is checked below against `now` with no leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let key = DecodingKey::from_secret(self.secret.as_bytes());
        let claims = decode::<SessionClaims>(token, &key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    AuthError::InvalidSignature(e.to_string())
                }
                _ => AuthError::InvalidFormat(e.to_string()),
            })?
            .claims;

        if claims.role != ADMIN_ROLE {
            return Err(AuthError::InvalidRole(claims.role));
        }
        if claims.exp <= now {
            return Err(AuthError::Expired);
        }

        Ok(AdminSession {
            expires_at: claims.exp,
        })
    }
}

impl fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSigner")
            .field("configured", &self.is_configured())
            .field("ttl", &self.ttl)
            .finish()
    }
}

fn now_epoch() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-session-secret";

    fn sign_claims(claims: &SessionClaims, secret: &str) -> String {
        let key = EncodingKey::from_secret(secret.as_bytes());
        encode(&Header::new(Algorithm::HS256), claims, &key).unwrap()
    }

    #[test]
    fn test_issue_and_verify() {
        let signer = SessionSigner::new(SECRET);
        let token = signer.issue().unwrap();
        assert_eq!(token.split('.').count(), 3);

        let session = signer.verify(&token).unwrap();
        assert!(session.expires_at > now_epoch());
    }

    #[test]
    fn test_expiry_is_twelve_hours() {
        let signer = SessionSigner::new(SECRET);
        let token = signer.issue_at(1_000).unwrap();
        let session = signer.verify_at(&token, 1_001).unwrap();
        assert_eq!(session.expires_at, 1_000 + 43_200);
    }

    #[test]
    fn test_verify_expired() {
        let signer = SessionSigner::new(SECRET);
        let token = signer.issue_at(1_000).unwrap();
        let exp = 1_000 + SESSION_TTL.as_secs();
        assert!(matches!(
            signer.verify_at(&token, exp),
            Err(AuthError::Expired)
        ));
        assert!(signer.verify_at(&token, exp - 1).is_ok());
    }

    #[test]
    fn test_verify_wrong_secret() {
        let token = SessionSigner::new("other-secret").issue().unwrap();
        let result = SessionSigner::new(SECRET).verify(&token);
        assert!(matches!(result, Err(AuthError::InvalidSignature(_))));
    }

    #[test]
    fn test_verify_wrong_role() {
        let token = sign_claims(
            &SessionClaims {
                role: "viewer".to_string(),
                exp: now_epoch() + 60,
            },
            SECRET,
        );
        let result = SessionSigner::new(SECRET).verify(&token);
        assert!(matches!(result, Err(AuthError::InvalidRole(ref r)) if r == "viewer"));
    }

    #[test]
    fn test_verify_malformed() {
        let signer = SessionSigner::new(SECRET);
        assert!(matches!(
            signer.verify("not-a-token"),
            Err(AuthError::InvalidFormat(_))
        ));
        assert!(signer.verify("a.b").is_err());
        assert!(signer.verify("").is_err());
    }

    #[test]
    fn test_verify_tampered_payload() {
        let signer = SessionSigner::new(SECRET);
        let token = signer.issue().unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        let forged = format!("{}.{}x.{}", parts[0], parts[1], parts[2]);
        assert!(signer.verify(&forged).is_err());
    }

    #[test]
    fn test_unconfigured_signer() {
        let signer = SessionSigner::new("");
        assert!(!signer.is_configured());
        assert!(matches!(signer.issue(), Err(AuthError::NotConfigured)));

        let token = SessionSigner::new(SECRET).issue().unwrap();
        assert!(matches!(
            signer.verify(&token),
            Err(AuthError::NotConfigured)
        ));
    }

    #[test]
    fn test_custom_ttl() {
        let signer = SessionSigner::new(SECRET).with_ttl(Duration::from_secs(60));
        let token = signer.issue_at(500).unwrap();
        assert!(signer.verify_at(&token, 559).is_ok());
        assert!(signer.verify_at(&token, 560).is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", SessionSigner::new(SECRET));
        assert!(!debug.contains(SECRET));
        assert!(debug.contains("configured: true"));
    }
}
