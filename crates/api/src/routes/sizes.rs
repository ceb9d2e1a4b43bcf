//! Size handlers.

use axum::{Json, Router, extract::State, routing::get};

use backoffice_core::{SizeId, StoreId};

use super::extract::{ApiPath, JsonBody};
use crate::{
    error::AppError,
    middleware::CurrentSession,
    models::{Size, SizePayload},
    state::AppState,
};

/// Build the sizes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{store_id}/sizes", get(list_sizes).post(create_size))
        .route(
            "/{store_id}/sizes/{size_id}",
            get(show_size).patch(update_size).delete(delete_size),
        )
}

async fn list_sizes(
    State(state): State<AppState>,
    ApiPath(store_id): ApiPath<StoreId>,
) -> Result<Json<Vec<Size>>, AppError> {
    state.catalog().list_sizes(store_id).await.map(Json)
}

async fn show_size(
    State(state): State<AppState>,
    ApiPath((store_id, id)): ApiPath<(StoreId, SizeId)>,
) -> Result<Json<Size>, AppError> {
    state.catalog().get_size(store_id, id).await.map(Json)
}

async fn create_size(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    ApiPath(store_id): ApiPath<StoreId>,
    body: JsonBody<SizePayload>,
) -> Result<Json<Size>, AppError> {
    let payload = body.authenticated(&session)?;
    state
        .catalog()
        .create_size(&session, store_id, payload)
        .await
        .map(Json)
}

async fn update_size(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    ApiPath((store_id, id)): ApiPath<(StoreId, SizeId)>,
    body: JsonBody<SizePayload>,
) -> Result<Json<Size>, AppError> {
    let payload = body.authenticated(&session)?;
    state
        .catalog()
        .update_size(&session, store_id, id, payload)
        .await
        .map(Json)
}

async fn delete_size(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    ApiPath((store_id, id)): ApiPath<(StoreId, SizeId)>,
) -> Result<Json<Size>, AppError> {
    state
        .catalog()
        .delete_size(&session, store_id, id)
        .await
        .map(Json)
}
