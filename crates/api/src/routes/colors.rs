//! Color handlers.

use axum::{Json, Router, extract::State, routing::get};

use backoffice_core::{ColorId, StoreId};

use super::extract::{ApiPath, JsonBody};
use crate::{
    error::AppError,
    middleware::CurrentSession,
    models::{Color, ColorPayload},
    state::AppState,
};

/// Build the colors router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{store_id}/colors", get(list_colors).post(create_color))
        .route(
            "/{store_id}/colors/{color_id}",
            get(show_color).patch(update_color).delete(delete_color),
        )
}

async fn list_colors(
    State(state): State<AppState>,
    ApiPath(store_id): ApiPath<StoreId>,
) -> Result<Json<Vec<Color>>, AppError> {
    state.catalog().list_colors(store_id).await.map(Json)
}

async fn show_color(
    State(state): State<AppState>,
    ApiPath((store_id, id)): ApiPath<(StoreId, ColorId)>,
) -> Result<Json<Color>, AppError> {
    state.catalog().get_color(store_id, id).await.map(Json)
}

async fn create_color(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    ApiPath(store_id): ApiPath<StoreId>,
    body: JsonBody<ColorPayload>,
) -> Result<Json<Color>, AppError> {
    let payload = body.authenticated(&session)?;
    state
        .catalog()
        .create_color(&session, store_id, payload)
        .await
        .map(Json)
}

async fn update_color(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    ApiPath((store_id, id)): ApiPath<(StoreId, ColorId)>,
    body: JsonBody<ColorPayload>,
) -> Result<Json<Color>, AppError> {
    let payload = body.authenticated(&session)?;
    state
        .catalog()
        .update_color(&session, store_id, id, payload)
        .await
        .map(Json)
}

async fn delete_color(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    ApiPath((store_id, id)): ApiPath<(StoreId, ColorId)>,
) -> Result<Json<Color>, AppError> {
    state
        .catalog()
        .delete_color(&session, store_id, id)
        .await
        .map(Json)
}
