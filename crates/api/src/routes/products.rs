//! Product handlers.
//!
//! The public listing hides archived products and accepts `categoryId`,
//! `colorId`, `sizeId` and `isFeatured` filters. Reading a single product
//! returns it with its images whether archived or not.

use axum::{Json, Router, extract::State, routing::get};

use backoffice_core::{ProductId, StoreId};

use super::extract::{ApiPath, ApiQuery, JsonBody};
use crate::{
    error::AppError,
    middleware::CurrentSession,
    models::{Product, ProductFilter, ProductPayload},
    state::AppState,
};

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{store_id}/products", get(list_products).post(create_product))
        .route(
            "/{store_id}/products/{product_id}",
            get(show_product).patch(update_product).delete(delete_product),
        )
}

async fn list_products(
    State(state): State<AppState>,
    ApiPath(store_id): ApiPath<StoreId>,
    ApiQuery(filter): ApiQuery<ProductFilter>,
) -> Result<Json<Vec<Product>>, AppError> {
    state
        .catalog()
        .list_products(store_id, &filter)
        .await
        .map(Json)
}

async fn show_product(
    State(state): State<AppState>,
    ApiPath((store_id, id)): ApiPath<(StoreId, ProductId)>,
) -> Result<Json<Product>, AppError> {
    state.catalog().get_product(store_id, id).await.map(Json)
}

async fn create_product(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    ApiPath(store_id): ApiPath<StoreId>,
    body: JsonBody<ProductPayload>,
) -> Result<Json<Product>, AppError> {
    let payload = body.authenticated(&session)?;
    state
        .catalog()
        .create_product(&session, store_id, payload)
        .await
        .map(Json)
}

/// Replace a product, including its whole image set.
async fn update_product(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    ApiPath((store_id, id)): ApiPath<(StoreId, ProductId)>,
    body: JsonBody<ProductPayload>,
) -> Result<Json<Product>, AppError> {
    let payload = body.authenticated(&session)?;
    state
        .catalog()
        .update_product(&session, store_id, id, payload)
        .await
        .map(Json)
}

async fn delete_product(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    ApiPath((store_id, id)): ApiPath<(StoreId, ProductId)>,
) -> Result<Json<Product>, AppError> {
    state
        .catalog()
        .delete_product(&session, store_id, id)
        .await
        .map(Json)
}
