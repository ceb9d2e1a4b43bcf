//! Session token commands.
//!
//! Signs the same token the identity provider exchange would produce, using
//! `BACKOFFICE_SESSION_SECRET`. Useful for operators and local testing.

use thiserror::Error;

use backoffice_api::config::{self, ConfigError};
use backoffice_api::services::{TokenError, TokenKeys};
use backoffice_core::{ProviderAccount, ProviderProfile, TokenPayload};

/// Errors that can occur while issuing a token.
#[derive(Debug, Error)]
pub enum IssueError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Profile id must not be blank")]
    BlankProfileId,

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Build the token payload for a provider account/profile pair.
fn payload(profile_id: &str, access_token: &str, provider: &str) -> TokenPayload {
    let account = ProviderAccount {
        provider: Some(provider.to_owned()),
        access_token: Some(access_token.to_owned()),
    };
    let profile = ProviderProfile {
        id: Some(serde_json::Value::String(profile_id.to_owned())),
    };
    TokenPayload::from_exchange(Some(&account), Some(&profile))
}

/// Sign a session token.
///
/// # Errors
///
/// Returns `IssueError` if the session secret is missing or weak, the
/// profile id is blank, or signing fails.
pub fn issue(profile_id: &str, access_token: &str, provider: &str) -> Result<String, IssueError> {
    let payload = payload(profile_id, access_token, provider);
    if payload.id.is_none() {
        return Err(IssueError::BlankProfileId);
    }

    let session = config::session_from_env()?;
    let keys = TokenKeys::from_config(&session);
    let token = keys.issue(&payload)?;

    tracing::info!(principal = %profile_id.trim(), "Issued session token");
    Ok(token)
}
