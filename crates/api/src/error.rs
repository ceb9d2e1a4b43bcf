//! Unified error handling for the API.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use backoffice_core::{EntityKind, ReferenceEdge};

use crate::db::RepositoryError;
use crate::models::ValidationError;

/// Application-level error type for every handler.
#[derive(Debug, Error)]
pub enum AppError {
    /// Payload failed its field rules.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// No principal could be resolved from the request.
    #[error("Not authenticated")]
    Unauthenticated,

    /// The principal does not own the targeted store.
    #[error("Forbidden")]
    Forbidden,

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(EntityKind),

    /// A delete was refused because the row is still referenced.
    #[error("Cannot delete {}: {}", .edge.target, .edge.describe())]
    IntegrityBlocked { edge: ReferenceEdge },

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(ValidationError::Invalid {
            field: "body",
            reason: rejection.body_text(),
        })
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(ValidationError::Invalid {
            field: "path",
            reason: rejection.body_text(),
        })
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(ValidationError::Invalid {
            field: "query",
            reason: rejection.body_text(),
        })
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    blocked_by: Option<EntityKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
}

impl AppError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Unauthenticated => "unauthenticated",
            Self::Forbidden => "forbidden",
            Self::NotFound(_) => "not_found",
            Self::IntegrityBlocked { .. } => "integrity_blocked",
            Self::Database(_) | Self::Internal(_) => "internal_error",
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::IntegrityBlocked { .. } => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "API request error"
            );
        }

        let (blocked_by, hint) = match &self {
            Self::IntegrityBlocked { edge } => (Some(edge.dependent), Some(edge.hint())),
            _ => (None, None),
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        let body = ErrorBody {
            error: self.code(),
            message,
            blocked_by,
            hint,
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Set the Sentry user context from the request principal.
pub fn set_sentry_user(principal: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(principal.to_owned()),
            ..Default::default()
        }));
    });
}
