//! Integration tests for the back-office API.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot` over
//! an in-memory catalog, so no database or server is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p backoffice-integration-tests
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let app = TestApp::new();
//! let token = app.token("u1");
//! let (status, body) = app.post("/api/stores", Some(&token), json!({"name": "Main"})).await;
//! assert_eq!(status, StatusCode::OK);
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use backoffice_api::{
    db::MemoryCatalog,
    services::TokenKeys,
    state::AppState,
};
use backoffice_core::{ProviderAccount, ProviderProfile, TokenPayload};

const TEST_SECRET: &[u8] = b"integration-test-secret-at-least-32-bytes";

/// An in-process application with its signing keys.
pub struct TestApp {
    router: Router,
    keys: TokenKeys,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Build the app over an empty in-memory catalog.
    #[must_use]
    pub fn new() -> Self {
        let keys = TokenKeys::new(TEST_SECRET, Duration::from_secs(3600));
        let state = AppState::new(Arc::new(MemoryCatalog::new()), keys.clone());
        Self {
            router: backoffice_api::app(state),
            keys,
        }
    }

    /// Sign a token for the given provider subject.
    #[must_use]
    pub fn token(&self, user: &str) -> String {
        let account = ProviderAccount {
            provider: Some("github".to_owned()),
            access_token: Some(format!("gho_{user}")),
        };
        let profile = ProviderProfile {
            id: Some(Value::String(user.to_owned())),
        };
        self.keys
            .issue(&TokenPayload::from_exchange(Some(&account), Some(&profile)))
            .unwrap()
    }

    /// Sign a token whose payload has an access token but no principal.
    #[must_use]
    pub fn token_without_id(&self) -> String {
        self.keys
            .issue(&TokenPayload {
                access_token: Some("gho_orphan".to_owned()),
                id: None,
            })
            .unwrap()
    }

    /// Send a request and return the status and JSON body.
    ///
    /// An empty body decodes as `Value::Null` and a non-JSON body as a
    /// string.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, token, None).await
    }

    /// Create a store owned by `token`'s principal and return its id.
    pub async fn create_store(&self, token: &str, name: &str) -> String {
        let (status, body) = self
            .post("/api/stores", Some(token), serde_json::json!({ "name": name }))
            .await;
        assert_eq!(status, StatusCode::OK, "create store: {body}");
        id_of(&body)
    }

    /// Create a resource under a store and return its id.
    pub async fn create(&self, token: &str, store: &str, resource: &str, body: Value) -> String {
        let uri = format!("/api/{store}/{resource}");
        let (status, body) = self.post(&uri, Some(token), body).await;
        assert_eq!(status, StatusCode::OK, "create {resource}: {body}");
        id_of(&body)
    }
}

/// The `id` field of a JSON entity.
#[must_use]
pub fn id_of(body: &Value) -> String {
    body["id"].as_str().unwrap().to_owned()
}
