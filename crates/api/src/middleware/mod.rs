//! HTTP middleware and extractors.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Security headers
//!
//! Authentication is not a layer: handlers take a [`CurrentSession`] and
//! the services decide what a missing principal means.

pub mod auth;
pub mod security_headers;

pub use auth::{CurrentSession, SESSION_COOKIE, session_token};
pub use security_headers::security_headers_middleware;
