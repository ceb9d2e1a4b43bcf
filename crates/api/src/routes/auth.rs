//! Session endpoint.

use axum::{Json, Router, routing::get};

use backoffice_core::Session;

use crate::{middleware::CurrentSession, state::AppState};

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new().route("/auth/session", get(session))
}

/// The caller's session.
///
/// An unauthenticated caller gets `{}`.
async fn session(CurrentSession(session): CurrentSession) -> Json<Session> {
    Json(session)
}
