//! Store handlers.
//!
//! Rename and delete are conditional on ownership and report how many rows
//! they touched; a non-owner gets `{"count": 0}` rather than `403`.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use backoffice_core::StoreId;

use super::extract::{ApiPath, JsonBody};
use crate::{
    error::AppError,
    middleware::CurrentSession,
    models::{Store, StorePayload},
    state::AppState,
};

/// Build the stores router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stores", get(list_stores).post(create_store))
        .route(
            "/stores/{store_id}",
            get(show_store).patch(rename_store).delete(delete_store),
        )
}

/// Rows affected by a conditional store command.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: u64,
}

async fn create_store(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    body: JsonBody<StorePayload>,
) -> Result<Json<Store>, AppError> {
    let payload = body.authenticated(&session)?;
    state
        .catalog()
        .create_store(&session, payload)
        .await
        .map(Json)
}

async fn list_stores(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<Vec<Store>>, AppError> {
    state.catalog().list_stores(&session).await.map(Json)
}

async fn show_store(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    ApiPath(store_id): ApiPath<StoreId>,
) -> Result<Json<Store>, AppError> {
    state.catalog().get_store(&session, store_id).await.map(Json)
}

async fn rename_store(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    ApiPath(store_id): ApiPath<StoreId>,
    body: JsonBody<StorePayload>,
) -> Result<Json<CountResponse>, AppError> {
    let payload = body.authenticated(&session)?;
    let count = state
        .catalog()
        .rename_store(&session, store_id, payload)
        .await?;
    Ok(Json(CountResponse { count }))
}

async fn delete_store(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    ApiPath(store_id): ApiPath<StoreId>,
) -> Result<Json<CountResponse>, AppError> {
    let count = state.catalog().delete_store(&session, store_id).await?;
    Ok(Json(CountResponse { count }))
}
