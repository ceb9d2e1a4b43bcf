//! Principal identity derived from an external identity provider.
//!
//! The provider handshake itself happens elsewhere; this module only turns
//! its result (an account and a profile) into a token payload, and a token
//! payload into a request-scoped [`Session`]. Both steps are pure functions,
//! so a session can be re-derived on every request without server state.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable identifier of an authenticated principal.
///
/// This is the identity provider's subject identifier coerced to a string.
/// Store ownership is recorded against it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(String);

impl PrincipalId {
    /// Build a principal ID, returning `None` for blank input.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    /// Returns the principal ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PrincipalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for PrincipalId {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for PrincipalId {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for PrincipalId {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

/// The account half of a provider exchange.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderAccount {
    /// Provider name (e.g. `github`).
    #[serde(default)]
    pub provider: Option<String>,
    /// Access token issued by the provider.
    #[serde(default, alias = "access_token")]
    pub access_token: Option<String>,
}

/// The profile half of a provider exchange.
///
/// Providers disagree on the JSON type of the subject id (GitHub sends a
/// number), so it is kept as a raw value until coerced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderProfile {
    /// Provider subject identifier, number or string.
    #[serde(default)]
    pub id: Option<Value>,
}

impl ProviderProfile {
    /// Coerce the subject id to a [`PrincipalId`].
    ///
    /// Numbers and non-blank strings are usable; anything else is not.
    #[must_use]
    pub fn principal_id(&self) -> Option<PrincipalId> {
        match self.id.as_ref()? {
            Value::String(s) => PrincipalId::parse(s),
            Value::Number(n) => PrincipalId::parse(&n.to_string()),
            _ => None,
        }
    }
}

/// Claims carried inside the signed session artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPayload {
    /// Provider access token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Principal identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PrincipalId>,
}

impl TokenPayload {
    /// Derive a token payload from a provider exchange.
    ///
    /// The payload is only populated when both the account and the profile
    /// are present; a missing or unusable profile id leaves `id` empty.
    #[must_use]
    pub fn from_exchange(
        account: Option<&ProviderAccount>,
        profile: Option<&ProviderProfile>,
    ) -> Self {
        match (account, profile) {
            (Some(account), Some(profile)) => Self {
                access_token: account
                    .access_token
                    .as_deref()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(ToOwned::to_owned),
                id: profile.principal_id(),
            },
            _ => Self::default(),
        }
    }
}

/// A request-scoped session.
///
/// A session without `user_id` is unauthenticated. It never means
/// "authenticated principal that owns nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Provider access token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// The authenticated principal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<PrincipalId>,
}

impl Session {
    /// The anonymous session.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            access_token: None,
            user_id: None,
        }
    }

    /// Re-derive a session from a token payload.
    ///
    /// Both claims are copied only when both are present.
    #[must_use]
    pub fn from_token(payload: &TokenPayload) -> Self {
        match (&payload.access_token, &payload.id) {
            (Some(token), Some(id)) => Self {
                access_token: Some(token.clone()),
                user_id: Some(id.clone()),
            },
            _ => Self::anonymous(),
        }
    }

    /// The principal, if this session is authenticated.
    #[must_use]
    pub const fn principal(&self) -> Option<&PrincipalId> {
        self.user_id.as_ref()
    }

    /// Returns true if the session carries a principal.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn account(token: &str) -> ProviderAccount {
        ProviderAccount {
            provider: Some("github".to_owned()),
            access_token: Some(token.to_owned()),
        }
    }

    #[test]
    fn test_numeric_profile_id_is_coerced_to_string() {
        let profile = ProviderProfile {
            id: Some(json!(583231)),
        };
        let payload = TokenPayload::from_exchange(Some(&account("gho_abc")), Some(&profile));
        assert_eq!(payload.id.unwrap().as_str(), "583231");
        assert_eq!(payload.access_token.as_deref(), Some("gho_abc"));
    }

    #[test]
    fn test_string_profile_id_is_kept() {
        let profile = ProviderProfile {
            id: Some(json!("u-42")),
        };
        let payload = TokenPayload::from_exchange(Some(&account("t")), Some(&profile));
        assert_eq!(payload.id, PrincipalId::parse("u-42"));
    }

    #[test]
    fn test_missing_profile_id_leaves_payload_without_id() {
        let profile = ProviderProfile { id: None };
        let payload = TokenPayload::from_exchange(Some(&account("t")), Some(&profile));
        assert!(payload.id.is_none());

        let session = Session::from_token(&payload);
        assert!(session.user_id.is_none());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_unusable_profile_ids() {
        for id in [json!(""), json!("   "), json!(null), json!(true), json!({})] {
            let profile = ProviderProfile { id: Some(id) };
            assert!(profile.principal_id().is_none());
        }
    }

    #[test]
    fn test_missing_account_or_profile_yields_empty_payload() {
        let profile = ProviderProfile { id: Some(json!(1)) };
        assert_eq!(
            TokenPayload::from_exchange(None, Some(&profile)),
            TokenPayload::default()
        );
        assert_eq!(
            TokenPayload::from_exchange(Some(&account("t")), None),
            TokenPayload::default()
        );
    }

    #[test]
    fn test_session_requires_both_claims() {
        let only_id = TokenPayload {
            access_token: None,
            id: PrincipalId::parse("u1"),
        };
        assert_eq!(Session::from_token(&only_id), Session::anonymous());

        let full = TokenPayload {
            access_token: Some("t".to_owned()),
            id: PrincipalId::parse("u1"),
        };
        let session = Session::from_token(&full);
        assert_eq!(session.principal().unwrap().as_str(), "u1");
    }

    #[test]
    fn test_session_derivation_is_repeatable() {
        let payload = TokenPayload {
            access_token: Some("t".to_owned()),
            id: PrincipalId::parse("u1"),
        };
        assert_eq!(Session::from_token(&payload), Session::from_token(&payload));
    }

    #[test]
    fn test_session_serializes_camel_case() {
        let session = Session {
            access_token: Some("t".to_owned()),
            user_id: PrincipalId::parse("u1"),
        };
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value, json!({"accessToken": "t", "userId": "u1"}));
        assert_eq!(serde_json::to_value(Session::anonymous()).unwrap(), json!({}));
    }
}
