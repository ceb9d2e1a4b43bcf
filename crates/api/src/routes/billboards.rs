//! Billboard handlers.
//!
//! A billboard cannot be deleted while any category shows it.

use axum::{Json, Router, extract::State, routing::get};

use backoffice_core::{BillboardId, StoreId};

use super::extract::{ApiPath, JsonBody};
use crate::{
    error::AppError,
    middleware::CurrentSession,
    models::{Billboard, BillboardPayload},
    state::AppState,
};

/// Build the billboards router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{store_id}/billboards", get(list_billboards).post(create_billboard))
        .route(
            "/{store_id}/billboards/{billboard_id}",
            get(show_billboard).patch(update_billboard).delete(delete_billboard),
        )
}

async fn list_billboards(
    State(state): State<AppState>,
    ApiPath(store_id): ApiPath<StoreId>,
) -> Result<Json<Vec<Billboard>>, AppError> {
    state.catalog().list_billboards(store_id).await.map(Json)
}

async fn show_billboard(
    State(state): State<AppState>,
    ApiPath((store_id, id)): ApiPath<(StoreId, BillboardId)>,
) -> Result<Json<Billboard>, AppError> {
    state.catalog().get_billboard(store_id, id).await.map(Json)
}

async fn create_billboard(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    ApiPath(store_id): ApiPath<StoreId>,
    body: JsonBody<BillboardPayload>,
) -> Result<Json<Billboard>, AppError> {
    let payload = body.authenticated(&session)?;
    state
        .catalog()
        .create_billboard(&session, store_id, payload)
        .await
        .map(Json)
}

async fn update_billboard(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    ApiPath((store_id, id)): ApiPath<(StoreId, BillboardId)>,
    body: JsonBody<BillboardPayload>,
) -> Result<Json<Billboard>, AppError> {
    let payload = body.authenticated(&session)?;
    state
        .catalog()
        .update_billboard(&session, store_id, id, payload)
        .await
        .map(Json)
}

async fn delete_billboard(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    ApiPath((store_id, id)): ApiPath<(StoreId, BillboardId)>,
) -> Result<Json<Billboard>, AppError> {
    state
        .catalog()
        .delete_billboard(&session, store_id, id)
        .await
        .map(Json)
}
