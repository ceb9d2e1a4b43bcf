//! Category handlers.
//!
//! `billboardId` must name a billboard of the same store.

use axum::{Json, Router, extract::State, routing::get};

use backoffice_core::{CategoryId, StoreId};

use super::extract::{ApiPath, JsonBody};
use crate::{
    error::AppError,
    middleware::CurrentSession,
    models::{Category, CategoryPayload},
    state::AppState,
};

/// Build the categories router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{store_id}/categories", get(list_categories).post(create_category))
        .route(
            "/{store_id}/categories/{category_id}",
            get(show_category).patch(update_category).delete(delete_category),
        )
}

async fn list_categories(
    State(state): State<AppState>,
    ApiPath(store_id): ApiPath<StoreId>,
) -> Result<Json<Vec<Category>>, AppError> {
    state.catalog().list_categories(store_id).await.map(Json)
}

async fn show_category(
    State(state): State<AppState>,
    ApiPath((store_id, id)): ApiPath<(StoreId, CategoryId)>,
) -> Result<Json<Category>, AppError> {
    state.catalog().get_category(store_id, id).await.map(Json)
}

async fn create_category(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    ApiPath(store_id): ApiPath<StoreId>,
    body: JsonBody<CategoryPayload>,
) -> Result<Json<Category>, AppError> {
    let payload = body.authenticated(&session)?;
    state
        .catalog()
        .create_category(&session, store_id, payload)
        .await
        .map(Json)
}

async fn update_category(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    ApiPath((store_id, id)): ApiPath<(StoreId, CategoryId)>,
    body: JsonBody<CategoryPayload>,
) -> Result<Json<Category>, AppError> {
    let payload = body.authenticated(&session)?;
    state
        .catalog()
        .update_category(&session, store_id, id, payload)
        .await
        .map(Json)
}

async fn delete_category(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    ApiPath((store_id, id)): ApiPath<(StoreId, CategoryId)>,
) -> Result<Json<Category>, AppError> {
    state
        .catalog()
        .delete_category(&session, store_id, id)
        .await
        .map(Json)
}
