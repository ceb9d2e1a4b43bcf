//! `PostgreSQL` catalog.
//!
//! Queries are checked at runtime (`query_as::<_, Row>`) so the crate builds
//! without a live database. Rows are read into internal row types and then
//! converted into domain types, which re-validates anything the database
//! stores as plain text.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use uuid::Uuid;

use backoffice_core::{
    BillboardId, CategoryId, ColorId, HexColor, ImageId, Price, PrincipalId, ProductId,
    ReferenceEdge, SizeId, StoreId,
};

use super::{Catalog, RepositoryError};
use crate::models::{
    Billboard, BillboardInput, Category, CategoryInput, Color, ColorInput, Image, Product,
    ProductFilter, ProductInput, Size, SizeInput, Store, StoreInput,
};

/// Re-classify constraint violations reported by `PostgreSQL`.
fn classify(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_foreign_key_violation() {
            return RepositoryError::ForeignKey(db.constraint().unwrap_or_default().to_owned());
        }
        if db.is_unique_violation() {
            return RepositoryError::Conflict(db.message().to_owned());
        }
    }
    RepositoryError::Database(err)
}

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    id: Uuid,
    name: String,
    owner_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<StoreRow> for Store {
    type Error = RepositoryError;

    fn try_from(row: StoreRow) -> Result<Self, Self::Error> {
        let owner_id = PrincipalId::parse(&row.owner_id).ok_or_else(|| {
            RepositoryError::DataCorruption(format!("blank owner on store {}", row.id))
        })?;

        Ok(Self {
            id: StoreId::new(row.id),
            name: row.name,
            owner_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BillboardRow {
    id: Uuid,
    store_id: Uuid,
    label: String,
    image_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BillboardRow> for Billboard {
    fn from(row: BillboardRow) -> Self {
        Self {
            id: BillboardId::new(row.id),
            store_id: StoreId::new(row.store_id),
            label: row.label,
            image_url: row.image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    store_id: Uuid,
    name: String,
    billboard_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            store_id: StoreId::new(row.store_id),
            name: row.name,
            billboard_id: BillboardId::new(row.billboard_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ColorRow {
    id: Uuid,
    store_id: Uuid,
    name: String,
    value: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ColorRow> for Color {
    type Error = RepositoryError;

    fn try_from(row: ColorRow) -> Result<Self, Self::Error> {
        let value = HexColor::parse(&row.value).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid color value in database: {e}"))
        })?;

        Ok(Self {
            id: ColorId::new(row.id),
            store_id: StoreId::new(row.store_id),
            name: row.name,
            value,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SizeRow {
    id: Uuid,
    store_id: Uuid,
    name: String,
    value: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SizeRow> for Size {
    fn from(row: SizeRow) -> Self {
        Self {
            id: SizeId::new(row.id),
            store_id: StoreId::new(row.store_id),
            name: row.name,
            value: row.value,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ImageRow {
    id: Uuid,
    product_id: Uuid,
    url: String,
    created_at: DateTime<Utc>,
}

impl From<ImageRow> for Image {
    fn from(row: ImageRow) -> Self {
        Self {
            id: ImageId::new(row.id),
            product_id: ProductId::new(row.product_id),
            url: row.url,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    store_id: Uuid,
    name: String,
    price: Decimal,
    category_id: Uuid,
    color_id: Uuid,
    size_id: Uuid,
    is_featured: bool,
    is_archived: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self, images: Vec<Image>) -> Result<Product, RepositoryError> {
        let price = Price::new(self.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok(Product {
            id: ProductId::new(self.id),
            store_id: StoreId::new(self.store_id),
            name: self.name,
            price,
            category_id: CategoryId::new(self.category_id),
            color_id: ColorId::new(self.color_id),
            size_id: SizeId::new(self.size_id),
            is_featured: self.is_featured,
            is_archived: self.is_archived,
            images,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const PRODUCT_COLUMNS: &str = "id, store_id, name, price, category_id, color_id, size_id, \
                               is_featured, is_archived, created_at, updated_at";

/// Images of the given products, grouped by product, oldest first.
async fn load_images<'c>(
    executor: impl PgExecutor<'c>,
    product_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<Image>>, RepositoryError> {
    let rows = sqlx::query_as::<_, ImageRow>(
        r"
        SELECT id, product_id, url, created_at
        FROM catalog.image
        WHERE product_id = ANY($1)
        ORDER BY created_at, id
        ",
    )
    .bind(product_ids)
    .fetch_all(executor)
    .await?;

    let mut grouped: HashMap<Uuid, Vec<Image>> = HashMap::new();
    for row in rows {
        grouped.entry(row.product_id).or_default().push(row.into());
    }
    Ok(grouped)
}

async fn insert_images(
    tx: &mut Transaction<'_, Postgres>,
    product_id: Uuid,
    urls: &[String],
) -> Result<Vec<Image>, RepositoryError> {
    let mut images = Vec::with_capacity(urls.len());
    for url in urls {
        let row = sqlx::query_as::<_, ImageRow>(
            r"
            INSERT INTO catalog.image (product_id, url)
            VALUES ($1, $2)
            RETURNING id, product_id, url, created_at
            ",
        )
        .bind(product_id)
        .bind(url)
        .fetch_one(&mut **tx)
        .await
        .map_err(classify)?;
        images.push(row.into());
    }
    Ok(images)
}

// =============================================================================
// Catalog
// =============================================================================

/// Catalog backed by `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    /// Create a catalog over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Catalog for PgCatalog {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Stores
    // -------------------------------------------------------------------------

    async fn create_store(
        &self,
        owner: &PrincipalId,
        input: &StoreInput,
    ) -> Result<Store, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            INSERT INTO catalog.store (name, owner_id)
            VALUES ($1, $2)
            RETURNING id, name, owner_id, created_at, updated_at
            ",
        )
        .bind(&input.name)
        .bind(owner.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;

        row.try_into()
    }

    async fn find_owned_store(
        &self,
        id: StoreId,
        owner: &PrincipalId,
    ) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, name, owner_id, created_at, updated_at
            FROM catalog.store
            WHERE id = $1 AND owner_id = $2
            ",
        )
        .bind(id.as_uuid())
        .bind(owner.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list_owned_stores(&self, owner: &PrincipalId) -> Result<Vec<Store>, RepositoryError> {
        let rows = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, name, owner_id, created_at, updated_at
            FROM catalog.store
            WHERE owner_id = $1
            ORDER BY created_at
            ",
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn rename_store(
        &self,
        id: StoreId,
        owner: &PrincipalId,
        input: &StoreInput,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE catalog.store
            SET name = $1, updated_at = now()
            WHERE id = $2 AND owner_id = $3
            ",
        )
        .bind(&input.name)
        .bind(id.as_uuid())
        .bind(owner.as_str())
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        Ok(result.rows_affected())
    }

    async fn delete_store(&self, id: StoreId, owner: &PrincipalId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM catalog.store WHERE id = $1 AND owner_id = $2")
            .bind(id.as_uuid())
            .bind(owner.as_str())
            .execute(&self.pool)
            .await
            .map_err(classify)?;

        Ok(result.rows_affected())
    }

    async fn count_dependents(
        &self,
        edge: &ReferenceEdge,
        target: Uuid,
    ) -> Result<u64, RepositoryError> {
        // Table and column names come from the static entity graph.
        let sql = format!(
            "SELECT COUNT(*) FROM catalog.{} WHERE {}_id = $1",
            edge.dependent.as_str(),
            edge.target.as_str()
        );
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(target)
            .fetch_one(&self.pool)
            .await?;

        u64::try_from(count)
            .map_err(|_| RepositoryError::DataCorruption(format!("negative count: {count}")))
    }

    // -------------------------------------------------------------------------
    // Billboards
    // -------------------------------------------------------------------------

    async fn list_billboards(&self, store_id: StoreId) -> Result<Vec<Billboard>, RepositoryError> {
        let rows = sqlx::query_as::<_, BillboardRow>(
            r"
            SELECT id, store_id, label, image_url, created_at, updated_at
            FROM catalog.billboard
            WHERE store_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(store_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
    ) -> Result<Option<Billboard>, RepositoryError> {
        let row = sqlx::query_as::<_, BillboardRow>(
            r"
            SELECT id, store_id, label, image_url, created_at, updated_at
            FROM catalog.billboard
            WHERE id = $1 AND store_id = $2
            ",
        )
        .bind(id.as_uuid())
        .bind(store_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn insert_billboard(
        &self,
        store_id: StoreId,
        input: &BillboardInput,
    ) -> Result<Billboard, RepositoryError> {
        let row = sqlx::query_as::<_, BillboardRow>(
            r"
            INSERT INTO catalog.billboard (store_id, label, image_url)
            VALUES ($1, $2, $3)
            RETURNING id, store_id, label, image_url, created_at, updated_at
            ",
        )
        .bind(store_id.as_uuid())
        .bind(&input.label)
        .bind(&input.image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;

        Ok(row.into())
    }

    async fn update_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
        input: &BillboardInput,
    ) -> Result<Option<Billboard>, RepositoryError> {
        let row = sqlx::query_as::<_, BillboardRow>(
            r"
            UPDATE catalog.billboard
            SET label = $1, image_url = $2, updated_at = now()
            WHERE id = $3 AND store_id = $4
            RETURNING id, store_id, label, image_url, created_at, updated_at
            ",
        )
        .bind(&input.label)
        .bind(&input.image_url)
        .bind(id.as_uuid())
        .bind(store_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        Ok(row.map(Into::into))
    }

    async fn delete_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
    ) -> Result<Option<Billboard>, RepositoryError> {
        let row = sqlx::query_as::<_, BillboardRow>(
            r"
            DELETE FROM catalog.billboard
            WHERE id = $1 AND store_id = $2
            RETURNING id, store_id, label, image_url, created_at, updated_at
            ",
        )
        .bind(id.as_uuid())
        .bind(store_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        Ok(row.map(Into::into))
    }

    // -------------------------------------------------------------------------
    // Categories
    // -------------------------------------------------------------------------

    async fn list_categories(&self, store_id: StoreId) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r"
            SELECT id, store_id, name, billboard_id, created_at, updated_at
            FROM catalog.category
            WHERE store_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(store_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            SELECT id, store_id, name, billboard_id, created_at, updated_at
            FROM catalog.category
            WHERE id = $1 AND store_id = $2
            ",
        )
        .bind(id.as_uuid())
        .bind(store_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn insert_category(
        &self,
        store_id: StoreId,
        input: &CategoryInput,
    ) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            INSERT INTO catalog.category (store_id, name, billboard_id)
            VALUES ($1, $2, $3)
            RETURNING id, store_id, name, billboard_id, created_at, updated_at
            ",
        )
        .bind(store_id.as_uuid())
        .bind(&input.name)
        .bind(input.billboard_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;

        Ok(row.into())
    }

    async fn update_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
        input: &CategoryInput,
    ) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            UPDATE catalog.category
            SET name = $1, billboard_id = $2, updated_at = now()
            WHERE id = $3 AND store_id = $4
            RETURNING id, store_id, name, billboard_id, created_at, updated_at
            ",
        )
        .bind(&input.name)
        .bind(input.billboard_id.as_uuid())
        .bind(id.as_uuid())
        .bind(store_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        Ok(row.map(Into::into))
    }

    async fn delete_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            DELETE FROM catalog.category
            WHERE id = $1 AND store_id = $2
            RETURNING id, store_id, name, billboard_id, created_at, updated_at
            ",
        )
        .bind(id.as_uuid())
        .bind(store_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        Ok(row.map(Into::into))
    }

    // -------------------------------------------------------------------------
    // Colors
    // -------------------------------------------------------------------------

    async fn list_colors(&self, store_id: StoreId) -> Result<Vec<Color>, RepositoryError> {
        let rows = sqlx::query_as::<_, ColorRow>(
            r"
            SELECT id, store_id, name, value, created_at, updated_at
            FROM catalog.color
            WHERE store_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(store_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn get_color(
        &self,
        store_id: StoreId,
        id: ColorId,
    ) -> Result<Option<Color>, RepositoryError> {
        let row = sqlx::query_as::<_, ColorRow>(
            r"
            SELECT id, store_id, name, value, created_at, updated_at
            FROM catalog.color
            WHERE id = $1 AND store_id = $2
            ",
        )
        .bind(id.as_uuid())
        .bind(store_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn insert_color(
        &self,
        store_id: StoreId,
        input: &ColorInput,
    ) -> Result<Color, RepositoryError> {
        let row = sqlx::query_as::<_, ColorRow>(
            r"
            INSERT INTO catalog.color (store_id, name, value)
            VALUES ($1, $2, $3)
            RETURNING id, store_id, name, value, created_at, updated_at
            ",
        )
        .bind(store_id.as_uuid())
        .bind(&input.name)
        .bind(input.value.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;

        row.try_into()
    }

    async fn update_color(
        &self,
        store_id: StoreId,
        id: ColorId,
        input: &ColorInput,
    ) -> Result<Option<Color>, RepositoryError> {
        let row = sqlx::query_as::<_, ColorRow>(
            r"
            UPDATE catalog.color
            SET name = $1, value = $2, updated_at = now()
            WHERE id = $3 AND store_id = $4
            RETURNING id, store_id, name, value, created_at, updated_at
            ",
        )
        .bind(&input.name)
        .bind(input.value.as_str())
        .bind(id.as_uuid())
        .bind(store_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        row.map(TryInto::try_into).transpose()
    }

    async fn delete_color(
        &self,
        store_id: StoreId,
        id: ColorId,
    ) -> Result<Option<Color>, RepositoryError> {
        let row = sqlx::query_as::<_, ColorRow>(
            r"
            DELETE FROM catalog.color
            WHERE id = $1 AND store_id = $2
            RETURNING id, store_id, name, value, created_at, updated_at
            ",
        )
        .bind(id.as_uuid())
        .bind(store_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        row.map(TryInto::try_into).transpose()
    }

    // -------------------------------------------------------------------------
    // Sizes
    // -------------------------------------------------------------------------

    async fn list_sizes(&self, store_id: StoreId) -> Result<Vec<Size>, RepositoryError> {
        let rows = sqlx::query_as::<_, SizeRow>(
            r"
            SELECT id, store_id, name, value, created_at, updated_at
            FROM catalog.size
            WHERE store_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(store_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_size(
        &self,
        store_id: StoreId,
        id: SizeId,
    ) -> Result<Option<Size>, RepositoryError> {
        let row = sqlx::query_as::<_, SizeRow>(
            r"
            SELECT id, store_id, name, value, created_at, updated_at
            FROM catalog.size
            WHERE id = $1 AND store_id = $2
            ",
        )
        .bind(id.as_uuid())
        .bind(store_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn insert_size(
        &self,
        store_id: StoreId,
        input: &SizeInput,
    ) -> Result<Size, RepositoryError> {
        let row = sqlx::query_as::<_, SizeRow>(
            r"
            INSERT INTO catalog.size (store_id, name, value)
            VALUES ($1, $2, $3)
            RETURNING id, store_id, name, value, created_at, updated_at
            ",
        )
        .bind(store_id.as_uuid())
        .bind(&input.name)
        .bind(&input.value)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;

        Ok(row.into())
    }

    async fn update_size(
        &self,
        store_id: StoreId,
        id: SizeId,
        input: &SizeInput,
    ) -> Result<Option<Size>, RepositoryError> {
        let row = sqlx::query_as::<_, SizeRow>(
            r"
            UPDATE catalog.size
            SET name = $1, value = $2, updated_at = now()
            WHERE id = $3 AND store_id = $4
            RETURNING id, store_id, name, value, created_at, updated_at
            ",
        )
        .bind(&input.name)
        .bind(&input.value)
        .bind(id.as_uuid())
        .bind(store_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        Ok(row.map(Into::into))
    }

    async fn delete_size(
        &self,
        store_id: StoreId,
        id: SizeId,
    ) -> Result<Option<Size>, RepositoryError> {
        let row = sqlx::query_as::<_, SizeRow>(
            r"
            DELETE FROM catalog.size
            WHERE id = $1 AND store_id = $2
            RETURNING id, store_id, name, value, created_at, updated_at
            ",
        )
        .bind(id.as_uuid())
        .bind(store_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        Ok(row.map(Into::into))
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    async fn list_products(
        &self,
        store_id: StoreId,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM catalog.product
            WHERE store_id = $1
              AND NOT is_archived
              AND ($2::uuid IS NULL OR category_id = $2)
              AND ($3::uuid IS NULL OR color_id = $3)
              AND ($4::uuid IS NULL OR size_id = $4)
              AND ($5::boolean IS NULL OR is_featured = $5)
            ORDER BY created_at DESC
            "
        );
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(store_id.as_uuid())
            .bind(filter.category_id.map(|id| id.as_uuid()))
            .bind(filter.color_id.map(|id| id.as_uuid()))
            .bind(filter.size_id.map(|id| id.as_uuid()))
            .bind(filter.is_featured)
            .fetch_all(&self.pool)
            .await?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut images = load_images(&self.pool, &ids).await?;

        rows.into_iter()
            .map(|row| {
                let own = images.remove(&row.id).unwrap_or_default();
                row.into_product(own)
            })
            .collect()
    }

    async fn get_product(
        &self,
        store_id: StoreId,
        id: ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM catalog.product WHERE id = $1 AND store_id = $2"
        );
        let Some(row) = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id.as_uuid())
            .bind(store_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let mut images = load_images(&self.pool, &[row.id]).await?;
        let own = images.remove(&row.id).unwrap_or_default();
        row.into_product(own).map(Some)
    }

    async fn insert_product(
        &self,
        store_id: StoreId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            r"
            INSERT INTO catalog.product
                (store_id, name, price, category_id, color_id, size_id, is_featured, is_archived)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PRODUCT_COLUMNS}
            "
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(store_id.as_uuid())
            .bind(&input.name)
            .bind(input.price.amount())
            .bind(input.category_id.as_uuid())
            .bind(input.color_id.as_uuid())
            .bind(input.size_id.as_uuid())
            .bind(input.is_featured)
            .bind(input.is_archived)
            .fetch_one(&mut *tx)
            .await
            .map_err(classify)?;

        let images = insert_images(&mut tx, row.id, &input.image_urls).await?;
        tx.commit().await?;

        row.into_product(images)
    }

    async fn update_product(
        &self,
        store_id: StoreId,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            r"
            UPDATE catalog.product
            SET name = $1, price = $2, category_id = $3, color_id = $4, size_id = $5,
                is_featured = $6, is_archived = $7, updated_at = now()
            WHERE id = $8 AND store_id = $9
            RETURNING {PRODUCT_COLUMNS}
            "
        );
        let Some(row) = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&input.name)
            .bind(input.price.amount())
            .bind(input.category_id.as_uuid())
            .bind(input.color_id.as_uuid())
            .bind(input.size_id.as_uuid())
            .bind(input.is_featured)
            .bind(input.is_archived)
            .bind(id.as_uuid())
            .bind(store_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(classify)?
        else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM catalog.image WHERE product_id = $1")
            .bind(row.id)
            .execute(&mut *tx)
            .await?;
        let images = insert_images(&mut tx, row.id, &input.image_urls).await?;
        tx.commit().await?;

        row.into_product(images).map(Some)
    }

    async fn delete_product(
        &self,
        store_id: StoreId,
        id: ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let mut images = load_images(&mut *tx, &[id.as_uuid()]).await?;
        let sql = format!(
            "DELETE FROM catalog.product WHERE id = $1 AND store_id = $2 RETURNING {PRODUCT_COLUMNS}"
        );
        let Some(row) = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id.as_uuid())
            .bind(store_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(classify)?
        else {
            return Ok(None);
        };
        tx.commit().await?;

        let own = images.remove(&row.id).unwrap_or_default();
        row.into_product(own).map(Some)
    }
}
