//! Catalog persistence.
//!
//! # Schema: `catalog`
//!
//! - `store` - Tenant roots, keyed by owner
//! - `billboard`, `category`, `color`, `size`, `product` - Store-scoped rows
//! - `image` - Product images (deleted with their product)
//!
//! Every reference between rows is `ON DELETE RESTRICT` except
//! `image.product_id`, which cascades.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p backoffice-cli -- migrate
//! ```
//!
//! # Implementations
//!
//! - [`PgCatalog`] - `PostgreSQL` via sqlx
//! - [`MemoryCatalog`] - process-local tables, used by tests and local demos

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use uuid::Uuid;

use backoffice_core::{
    BillboardId, CategoryId, ColorId, PrincipalId, ProductId, ReferenceEdge, SizeId, StoreId,
};

use crate::models::{
    Billboard, BillboardInput, Category, CategoryInput, Color, ColorInput, Product, ProductFilter,
    ProductInput, Size, SizeInput, Store, StoreInput,
};

pub use memory::MemoryCatalog;
pub use postgres::PgCatalog;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique name).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A foreign-key constraint refused the write. Holds the constraint name.
    #[error("foreign key violation: {0}")]
    ForeignKey(String),
}

/// Persistence seam for a tenant's catalog.
///
/// Store commands are conditional on `(id, owner)` and report the number of
/// rows they touched. Scoped commands are conditional on `(id, store_id)`
/// and return the affected row, or `None` when nothing matched.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;

    // -------------------------------------------------------------------------
    // Stores
    // -------------------------------------------------------------------------

    async fn create_store(
        &self,
        owner: &PrincipalId,
        input: &StoreInput,
    ) -> Result<Store, RepositoryError>;

    /// The store with `id`, if it exists and is owned by `owner`.
    async fn find_owned_store(
        &self,
        id: StoreId,
        owner: &PrincipalId,
    ) -> Result<Option<Store>, RepositoryError>;

    /// Stores owned by `owner`, oldest first.
    async fn list_owned_stores(&self, owner: &PrincipalId) -> Result<Vec<Store>, RepositoryError>;

    async fn rename_store(
        &self,
        id: StoreId,
        owner: &PrincipalId,
        input: &StoreInput,
    ) -> Result<u64, RepositoryError>;

    async fn delete_store(&self, id: StoreId, owner: &PrincipalId) -> Result<u64, RepositoryError>;

    /// Number of `edge.dependent` rows referencing `target` through `edge`.
    async fn count_dependents(
        &self,
        edge: &ReferenceEdge,
        target: Uuid,
    ) -> Result<u64, RepositoryError>;

    // -------------------------------------------------------------------------
    // Billboards
    // -------------------------------------------------------------------------

    async fn list_billboards(&self, store_id: StoreId) -> Result<Vec<Billboard>, RepositoryError>;

    async fn get_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
    ) -> Result<Option<Billboard>, RepositoryError>;

    async fn insert_billboard(
        &self,
        store_id: StoreId,
        input: &BillboardInput,
    ) -> Result<Billboard, RepositoryError>;

    async fn update_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
        input: &BillboardInput,
    ) -> Result<Option<Billboard>, RepositoryError>;

    async fn delete_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
    ) -> Result<Option<Billboard>, RepositoryError>;

    // -------------------------------------------------------------------------
    // Categories
    // -------------------------------------------------------------------------

    async fn list_categories(&self, store_id: StoreId) -> Result<Vec<Category>, RepositoryError>;

    async fn get_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<Option<Category>, RepositoryError>;

    async fn insert_category(
        &self,
        store_id: StoreId,
        input: &CategoryInput,
    ) -> Result<Category, RepositoryError>;

    async fn update_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
        input: &CategoryInput,
    ) -> Result<Option<Category>, RepositoryError>;

    async fn delete_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<Option<Category>, RepositoryError>;

    // -------------------------------------------------------------------------
    // Colors
    // -------------------------------------------------------------------------

    async fn list_colors(&self, store_id: StoreId) -> Result<Vec<Color>, RepositoryError>;

    async fn get_color(
        &self,
        store_id: StoreId,
        id: ColorId,
    ) -> Result<Option<Color>, RepositoryError>;

    async fn insert_color(
        &self,
        store_id: StoreId,
        input: &ColorInput,
    ) -> Result<Color, RepositoryError>;

    async fn update_color(
        &self,
        store_id: StoreId,
        id: ColorId,
        input: &ColorInput,
    ) -> Result<Option<Color>, RepositoryError>;

    async fn delete_color(
        &self,
        store_id: StoreId,
        id: ColorId,
    ) -> Result<Option<Color>, RepositoryError>;

    // -------------------------------------------------------------------------
    // Sizes
    // -------------------------------------------------------------------------

    async fn list_sizes(&self, store_id: StoreId) -> Result<Vec<Size>, RepositoryError>;

    async fn get_size(&self, store_id: StoreId, id: SizeId)
    -> Result<Option<Size>, RepositoryError>;

    async fn insert_size(
        &self,
        store_id: StoreId,
        input: &SizeInput,
    ) -> Result<Size, RepositoryError>;

    async fn update_size(
        &self,
        store_id: StoreId,
        id: SizeId,
        input: &SizeInput,
    ) -> Result<Option<Size>, RepositoryError>;

    async fn delete_size(
        &self,
        store_id: StoreId,
        id: SizeId,
    ) -> Result<Option<Size>, RepositoryError>;

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// Products of a store passing `filter`, newest first, with images.
    async fn list_products(
        &self,
        store_id: StoreId,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, RepositoryError>;

    async fn get_product(
        &self,
        store_id: StoreId,
        id: ProductId,
    ) -> Result<Option<Product>, RepositoryError>;

    async fn insert_product(
        &self,
        store_id: StoreId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError>;

    /// Replace a product's fields and its whole image set.
    async fn update_product(
        &self,
        store_id: StoreId,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Option<Product>, RepositoryError>;

    /// Delete a product together with its images.
    async fn delete_product(
        &self,
        store_id: StoreId,
        id: ProductId,
    ) -> Result<Option<Product>, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
