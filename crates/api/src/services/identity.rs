//! Signed session tokens.
//!
//! The session artifact is a compact HS256 JWT carrying the token payload
//! (`accessToken`, `id`) plus `iat`/`exp`. Verifying it is stateless, so the
//! session can be re-derived on every request without a session store.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use backoffice_core::{Session, TokenPayload};

use crate::config::SessionConfig;

/// Errors minting a token.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Sign(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(flatten)]
    payload: TokenPayload,
    iat: i64,
    exp: i64,
}

/// Keys for issuing and verifying session tokens.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("keys", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenKeys {
    /// Build keys from raw secret bytes.
    #[must_use]
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Build keys from the session configuration.
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.secret.expose_secret().as_bytes(), config.ttl)
    }

    /// Sign a token payload.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Sign` if the token cannot be encoded.
    pub fn issue(&self, payload: &TokenPayload) -> Result<String, TokenError> {
        self.issue_at(payload, Utc::now().timestamp())
    }

    fn issue_at(&self, payload: &TokenPayload, issued_at: i64) -> Result<String, TokenError> {
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            payload: payload.clone(),
            iat: issued_at,
            exp: issued_at.saturating_add(ttl),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Verify a token and recover its payload.
    ///
    /// Malformed, tampered and expired tokens all yield `None`.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<TokenPayload> {
        match decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256)) {
            Ok(data) => Some(data.claims.payload),
            Err(e) => {
                debug!(error = %e, "Rejected session token");
                None
            }
        }
    }

    /// The session carried by `token`, or the anonymous session.
    #[must_use]
    pub fn session(&self, token: Option<&str>) -> Session {
        token
            .and_then(|t| self.verify(t))
            .map_or_else(Session::anonymous, |payload| Session::from_token(&payload))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use backoffice_core::{PrincipalId, ProviderAccount, ProviderProfile};

    use super::*;

    const SECRET: &[u8] = b"k8Jd92mXq7LpR4vNz1WcY6tBh3GsE0aF";

    fn keys() -> TokenKeys {
        TokenKeys::new(SECRET, Duration::from_secs(3600))
    }

    fn payload() -> TokenPayload {
        TokenPayload {
            access_token: Some("gho_abc".to_owned()),
            id: PrincipalId::parse("583231"),
        }
    }

    #[test]
    fn test_issue_then_verify() {
        let keys = keys();
        let token = keys.issue(&payload()).unwrap();
        assert_eq!(keys.verify(&token), Some(payload()));
    }

    #[test]
    fn test_session_is_repeatable() {
        let keys = keys();
        let token = keys.issue(&payload()).unwrap();
        let first = keys.session(Some(&token));
        let second = keys.session(Some(&token));
        assert_eq!(first, second);
        assert_eq!(first.principal().map(PrincipalId::as_str), Some("583231"));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = keys().issue(&payload()).unwrap();
        let other = TokenKeys::new(b"a-completely-different-signing-key", Duration::from_secs(60));
        assert!(other.verify(&token).is_none());
        assert!(!other.session(Some(&token)).is_authenticated());
    }

    #[test]
    fn test_expired_token_rejected() {
        let keys = keys();
        let token = keys
            .issue_at(&payload(), Utc::now().timestamp() - 7 * 3600)
            .unwrap();
        assert!(keys.verify(&token).is_none());
    }

    #[test]
    fn test_garbage_token_is_anonymous() {
        assert_eq!(keys().session(Some("not.a.jwt")), Session::anonymous());
        assert_eq!(keys().session(None), Session::anonymous());
    }

    #[test]
    fn test_token_without_id_is_unauthenticated() {
        let keys = keys();
        let payload = TokenPayload::from_exchange(
            Some(&ProviderAccount {
                provider: Some("github".to_owned()),
                access_token: Some("gho_abc".to_owned()),
            }),
            Some(&ProviderProfile { id: None }),
        );
        let token = keys.issue(&payload).unwrap();
        let session = keys.session(Some(&token));
        assert!(session.user_id.is_none());
        assert!(!session.is_authenticated());
    }
}
