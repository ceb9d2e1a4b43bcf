//! Extractors whose rejections use the API's JSON error body.

use std::convert::Infallible;

use axum::extract::{FromRequest, FromRequestParts, Request};

use backoffice_core::Session;

use crate::error::AppError;
use crate::services::require_principal;

/// `axum::Json` with `AppError` rejections.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` with `AppError` rejections.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// `axum::extract::Query` with `AppError` rejections.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// A JSON body whose rejection is held back until the caller is known.
///
/// Write handlers take this instead of [`ApiJson`] so an anonymous caller
/// gets `401` even when the body is missing or malformed.
#[derive(Debug)]
pub struct JsonBody<T>(Result<T, AppError>);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    ApiJson<T>: FromRequest<S, Rejection = AppError>,
    S: Send + Sync,
    T: Send,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = ApiJson::<T>::from_request(req, state).await;
        Ok(Self(body.map(|ApiJson(payload)| payload)))
    }
}

impl<T> JsonBody<T> {
    /// The decoded body, once `session` is known to carry a principal.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` without a principal, otherwise the body's
    /// own rejection if it failed to decode.
    pub fn authenticated(self, session: &Session) -> Result<T, AppError> {
        require_principal(session)?;
        self.0
    }
}
