//! Resource mutation pipeline.
//!
//! Every write runs the same steps: resolve the principal, validate the
//! payload, authorize against the path's store, check that reference fields
//! point into that same store, then apply. The store id written to a row is
//! always the one from the path. Reads of store-scoped collections are public.

use std::sync::Arc;

use tracing::{info, instrument};

use backoffice_core::{
    BillboardId, CategoryId, ColorId, EntityKind, ProductId, Session, SizeId, StoreId,
};

use super::guard::{authorize, require_principal};
use super::integrity::{delete_error, ensure_deletable, write_error};
use crate::db::Catalog;
use crate::error::AppError;
use crate::models::{
    Billboard, BillboardPayload, Category, CategoryInput, CategoryPayload, Color, ColorPayload,
    Product, ProductFilter, ProductInput, ProductPayload, Size, SizePayload, Store, StorePayload,
    ValidationError,
};

fn missing_reference(field: &'static str, kind: EntityKind) -> AppError {
    AppError::Validation(ValidationError::Invalid {
        field,
        reason: format!("no such {kind} in this store"),
    })
}

/// Catalog operations on behalf of a session.
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn Catalog>,
}

impl CatalogService {
    /// Create a new catalog service.
    #[must_use]
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }

    /// The underlying catalog.
    #[must_use]
    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    async fn guard(&self, session: &Session, store_id: StoreId) -> Result<Store, AppError> {
        authorize(self.catalog(), session, store_id)
            .await?
            .into_store()
    }

    async fn check_category_refs(
        &self,
        store_id: StoreId,
        input: &CategoryInput,
    ) -> Result<(), AppError> {
        if self
            .catalog
            .get_billboard(store_id, input.billboard_id)
            .await?
            .is_none()
        {
            return Err(missing_reference("billboardId", EntityKind::Billboard));
        }
        Ok(())
    }

    async fn check_product_refs(
        &self,
        store_id: StoreId,
        input: &ProductInput,
    ) -> Result<(), AppError> {
        if self
            .catalog
            .get_category(store_id, input.category_id)
            .await?
            .is_none()
        {
            return Err(missing_reference("categoryId", EntityKind::Category));
        }
        if self
            .catalog
            .get_color(store_id, input.color_id)
            .await?
            .is_none()
        {
            return Err(missing_reference("colorId", EntityKind::Color));
        }
        if self
            .catalog
            .get_size(store_id, input.size_id)
            .await?
            .is_none()
        {
            return Err(missing_reference("sizeId", EntityKind::Size));
        }
        Ok(())
    }

    // =========================================================================
    // Stores
    // =========================================================================

    /// Create a store owned by the session's principal.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` without a principal, `Validation` for a
    /// missing name, or `Database` on storage failure.
    #[instrument(skip(self, session, payload))]
    pub async fn create_store(
        &self,
        session: &Session,
        payload: StorePayload,
    ) -> Result<Store, AppError> {
        let owner = require_principal(session)?;
        let input = payload.validate()?;
        let store = self.catalog.create_store(owner, &input).await?;
        info!(store_id = %store.id, owner = %owner, "Created store");
        Ok(store)
    }

    /// Stores owned by the session's principal.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` without a principal.
    #[instrument(skip(self, session))]
    pub async fn list_stores(&self, session: &Session) -> Result<Vec<Store>, AppError> {
        let owner = require_principal(session)?;
        Ok(self.catalog.list_owned_stores(owner).await?)
    }

    /// A store owned by the session's principal.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the store is missing or owned by someone else.
    #[instrument(skip(self, session), fields(store_id = %store_id))]
    pub async fn get_store(&self, session: &Session, store_id: StoreId) -> Result<Store, AppError> {
        let owner = require_principal(session)?;
        self.catalog
            .find_owned_store(store_id, owner)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Store))
    }

    /// Rename a store. Conditional on ownership: a non-owner affects zero rows.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` without a principal or `Validation` for a
    /// missing name.
    #[instrument(skip(self, session, payload), fields(store_id = %store_id))]
    pub async fn rename_store(
        &self,
        session: &Session,
        store_id: StoreId,
        payload: StorePayload,
    ) -> Result<u64, AppError> {
        let owner = require_principal(session)?;
        let input = payload.validate()?;
        let count = self.catalog.rename_store(store_id, owner, &input).await?;
        info!(count, "Renamed store");
        Ok(count)
    }

    /// Delete a store. Conditional on ownership: a non-owner affects zero rows.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` without a principal, or `IntegrityBlocked`
    /// when the owned store still has child rows.
    #[instrument(skip(self, session), fields(store_id = %store_id))]
    pub async fn delete_store(&self, session: &Session, store_id: StoreId) -> Result<u64, AppError> {
        let owner = require_principal(session)?;
        if self
            .catalog
            .find_owned_store(store_id, owner)
            .await?
            .is_some()
        {
            ensure_deletable(self.catalog(), EntityKind::Store, store_id.as_uuid()).await?;
        }
        let count = self
            .catalog
            .delete_store(store_id, owner)
            .await
            .map_err(delete_error)?;
        info!(count, "Deleted store");
        Ok(count)
    }

    // =========================================================================
    // Billboards
    // =========================================================================

    /// # Errors
    ///
    /// Returns `Database` on storage failure.
    pub async fn list_billboards(&self, store_id: StoreId) -> Result<Vec<Billboard>, AppError> {
        Ok(self.catalog.list_billboards(store_id).await?)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the billboard is not in this store.
    pub async fn get_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
    ) -> Result<Billboard, AppError> {
        self.catalog
            .get_billboard(store_id, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Billboard))
    }

    /// # Errors
    ///
    /// Returns `Unauthenticated`, `Validation`, or `Forbidden` as the
    /// pipeline rejects the request.
    #[instrument(skip(self, session, payload), fields(store_id = %store_id))]
    pub async fn create_billboard(
        &self,
        session: &Session,
        store_id: StoreId,
        payload: BillboardPayload,
    ) -> Result<Billboard, AppError> {
        require_principal(session)?;
        let input = payload.validate()?;
        self.guard(session, store_id).await?;
        let billboard = self
            .catalog
            .insert_billboard(store_id, &input)
            .await
            .map_err(write_error)?;
        info!(billboard_id = %billboard.id, "Created billboard");
        Ok(billboard)
    }

    /// # Errors
    ///
    /// As for create, plus `NotFound` when no row matched.
    #[instrument(skip(self, session, payload), fields(store_id = %store_id, billboard_id = %id))]
    pub async fn update_billboard(
        &self,
        session: &Session,
        store_id: StoreId,
        id: BillboardId,
        payload: BillboardPayload,
    ) -> Result<Billboard, AppError> {
        require_principal(session)?;
        let input = payload.validate()?;
        self.guard(session, store_id).await?;
        self.catalog
            .update_billboard(store_id, id, &input)
            .await
            .map_err(write_error)?
            .ok_or(AppError::NotFound(EntityKind::Billboard))
    }

    /// # Errors
    ///
    /// Returns `IntegrityBlocked` while categories reference the billboard.
    #[instrument(skip(self, session), fields(store_id = %store_id, billboard_id = %id))]
    pub async fn delete_billboard(
        &self,
        session: &Session,
        store_id: StoreId,
        id: BillboardId,
    ) -> Result<Billboard, AppError> {
        self.guard(session, store_id).await?;
        self.get_billboard(store_id, id).await?;
        ensure_deletable(self.catalog(), EntityKind::Billboard, id.as_uuid()).await?;
        let billboard = self
            .catalog
            .delete_billboard(store_id, id)
            .await
            .map_err(delete_error)?
            .ok_or(AppError::NotFound(EntityKind::Billboard))?;
        info!("Deleted billboard");
        Ok(billboard)
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// # Errors
    ///
    /// Returns `Database` on storage failure.
    pub async fn list_categories(&self, store_id: StoreId) -> Result<Vec<Category>, AppError> {
        Ok(self.catalog.list_categories(store_id).await?)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the category is not in this store.
    pub async fn get_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<Category, AppError> {
        self.catalog
            .get_category(store_id, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Category))
    }

    /// # Errors
    ///
    /// Returns `Validation` when `billboardId` is not a billboard of this store.
    #[instrument(skip(self, session, payload), fields(store_id = %store_id))]
    pub async fn create_category(
        &self,
        session: &Session,
        store_id: StoreId,
        payload: CategoryPayload,
    ) -> Result<Category, AppError> {
        require_principal(session)?;
        let input = payload.validate()?;
        self.guard(session, store_id).await?;
        self.check_category_refs(store_id, &input).await?;
        let category = self
            .catalog
            .insert_category(store_id, &input)
            .await
            .map_err(write_error)?;
        info!(category_id = %category.id, "Created category");
        Ok(category)
    }

    /// # Errors
    ///
    /// As for create, plus `NotFound` when no row matched.
    #[instrument(skip(self, session, payload), fields(store_id = %store_id, category_id = %id))]
    pub async fn update_category(
        &self,
        session: &Session,
        store_id: StoreId,
        id: CategoryId,
        payload: CategoryPayload,
    ) -> Result<Category, AppError> {
        require_principal(session)?;
        let input = payload.validate()?;
        self.guard(session, store_id).await?;
        self.check_category_refs(store_id, &input).await?;
        self.catalog
            .update_category(store_id, id, &input)
            .await
            .map_err(write_error)?
            .ok_or(AppError::NotFound(EntityKind::Category))
    }

    /// # Errors
    ///
    /// Returns `IntegrityBlocked` while products reference the category.
    #[instrument(skip(self, session), fields(store_id = %store_id, category_id = %id))]
    pub async fn delete_category(
        &self,
        session: &Session,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<Category, AppError> {
        self.guard(session, store_id).await?;
        self.get_category(store_id, id).await?;
        ensure_deletable(self.catalog(), EntityKind::Category, id.as_uuid()).await?;
        let category = self
            .catalog
            .delete_category(store_id, id)
            .await
            .map_err(delete_error)?
            .ok_or(AppError::NotFound(EntityKind::Category))?;
        info!("Deleted category");
        Ok(category)
    }

    // =========================================================================
    // Colors
    // =========================================================================

    /// # Errors
    ///
    /// Returns `Database` on storage failure.
    pub async fn list_colors(&self, store_id: StoreId) -> Result<Vec<Color>, AppError> {
        Ok(self.catalog.list_colors(store_id).await?)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the color is not in this store.
    pub async fn get_color(&self, store_id: StoreId, id: ColorId) -> Result<Color, AppError> {
        self.catalog
            .get_color(store_id, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Color))
    }

    /// # Errors
    ///
    /// Returns `Validation` when `value` is not a hex color.
    #[instrument(skip(self, session, payload), fields(store_id = %store_id))]
    pub async fn create_color(
        &self,
        session: &Session,
        store_id: StoreId,
        payload: ColorPayload,
    ) -> Result<Color, AppError> {
        require_principal(session)?;
        let input = payload.validate()?;
        self.guard(session, store_id).await?;
        let color = self
            .catalog
            .insert_color(store_id, &input)
            .await
            .map_err(write_error)?;
        info!(color_id = %color.id, "Created color");
        Ok(color)
    }

    /// # Errors
    ///
    /// As for create, plus `NotFound` when no row matched.
    #[instrument(skip(self, session, payload), fields(store_id = %store_id, color_id = %id))]
    pub async fn update_color(
        &self,
        session: &Session,
        store_id: StoreId,
        id: ColorId,
        payload: ColorPayload,
    ) -> Result<Color, AppError> {
        require_principal(session)?;
        let input = payload.validate()?;
        self.guard(session, store_id).await?;
        self.catalog
            .update_color(store_id, id, &input)
            .await
            .map_err(write_error)?
            .ok_or(AppError::NotFound(EntityKind::Color))
    }

    /// # Errors
    ///
    /// Returns `IntegrityBlocked` while products use the color.
    #[instrument(skip(self, session), fields(store_id = %store_id, color_id = %id))]
    pub async fn delete_color(
        &self,
        session: &Session,
        store_id: StoreId,
        id: ColorId,
    ) -> Result<Color, AppError> {
        self.guard(session, store_id).await?;
        self.get_color(store_id, id).await?;
        ensure_deletable(self.catalog(), EntityKind::Color, id.as_uuid()).await?;
        let color = self
            .catalog
            .delete_color(store_id, id)
            .await
            .map_err(delete_error)?
            .ok_or(AppError::NotFound(EntityKind::Color))?;
        info!("Deleted color");
        Ok(color)
    }

    // =========================================================================
    // Sizes
    // =========================================================================

    /// # Errors
    ///
    /// Returns `Database` on storage failure.
    pub async fn list_sizes(&self, store_id: StoreId) -> Result<Vec<Size>, AppError> {
        Ok(self.catalog.list_sizes(store_id).await?)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the size is not in this store.
    pub async fn get_size(&self, store_id: StoreId, id: SizeId) -> Result<Size, AppError> {
        self.catalog
            .get_size(store_id, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Size))
    }

    /// # Errors
    ///
    /// Returns `Validation` when `name` or `value` is missing.
    #[instrument(skip(self, session, payload), fields(store_id = %store_id))]
    pub async fn create_size(
        &self,
        session: &Session,
        store_id: StoreId,
        payload: SizePayload,
    ) -> Result<Size, AppError> {
        require_principal(session)?;
        let input = payload.validate()?;
        self.guard(session, store_id).await?;
        let size = self
            .catalog
            .insert_size(store_id, &input)
            .await
            .map_err(write_error)?;
        info!(size_id = %size.id, "Created size");
        Ok(size)
    }

    /// # Errors
    ///
    /// As for create, plus `NotFound` when no row matched.
    #[instrument(skip(self, session, payload), fields(store_id = %store_id, size_id = %id))]
    pub async fn update_size(
        &self,
        session: &Session,
        store_id: StoreId,
        id: SizeId,
        payload: SizePayload,
    ) -> Result<Size, AppError> {
        require_principal(session)?;
        let input = payload.validate()?;
        self.guard(session, store_id).await?;
        self.catalog
            .update_size(store_id, id, &input)
            .await
            .map_err(write_error)?
            .ok_or(AppError::NotFound(EntityKind::Size))
    }

    /// # Errors
    ///
    /// Returns `IntegrityBlocked` while products use the size.
    #[instrument(skip(self, session), fields(store_id = %store_id, size_id = %id))]
    pub async fn delete_size(
        &self,
        session: &Session,
        store_id: StoreId,
        id: SizeId,
    ) -> Result<Size, AppError> {
        self.guard(session, store_id).await?;
        self.get_size(store_id, id).await?;
        ensure_deletable(self.catalog(), EntityKind::Size, id.as_uuid()).await?;
        let size = self
            .catalog
            .delete_size(store_id, id)
            .await
            .map_err(delete_error)?
            .ok_or(AppError::NotFound(EntityKind::Size))?;
        info!("Deleted size");
        Ok(size)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Public product listing. Archived products are never included.
    ///
    /// # Errors
    ///
    /// Returns `Database` on storage failure.
    pub async fn list_products(
        &self,
        store_id: StoreId,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, AppError> {
        Ok(self.catalog.list_products(store_id, filter).await?)
    }

    /// A product with its images, archived or not.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the product is not in this store.
    pub async fn get_product(&self, store_id: StoreId, id: ProductId) -> Result<Product, AppError> {
        self.catalog
            .get_product(store_id, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Product))
    }

    /// # Errors
    ///
    /// Returns `Validation` for a bad payload or a reference outside this store.
    #[instrument(skip(self, session, payload), fields(store_id = %store_id))]
    pub async fn create_product(
        &self,
        session: &Session,
        store_id: StoreId,
        payload: ProductPayload,
    ) -> Result<Product, AppError> {
        require_principal(session)?;
        let input = payload.validate()?;
        self.guard(session, store_id).await?;
        self.check_product_refs(store_id, &input).await?;
        let product = self
            .catalog
            .insert_product(store_id, &input)
            .await
            .map_err(write_error)?;
        info!(product_id = %product.id, images = product.images.len(), "Created product");
        Ok(product)
    }

    /// Replace a product's fields and its full image set.
    ///
    /// # Errors
    ///
    /// As for create, plus `NotFound` when no row matched.
    #[instrument(skip(self, session, payload), fields(store_id = %store_id, product_id = %id))]
    pub async fn update_product(
        &self,
        session: &Session,
        store_id: StoreId,
        id: ProductId,
        payload: ProductPayload,
    ) -> Result<Product, AppError> {
        require_principal(session)?;
        let input = payload.validate()?;
        self.guard(session, store_id).await?;
        self.check_product_refs(store_id, &input).await?;
        self.catalog
            .update_product(store_id, id, &input)
            .await
            .map_err(write_error)?
            .ok_or(AppError::NotFound(EntityKind::Product))
    }

    /// Delete a product. Its images go with it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no row matched.
    #[instrument(skip(self, session), fields(store_id = %store_id, product_id = %id))]
    pub async fn delete_product(
        &self,
        session: &Session,
        store_id: StoreId,
        id: ProductId,
    ) -> Result<Product, AppError> {
        self.guard(session, store_id).await?;
        let product = self
            .catalog
            .delete_product(store_id, id)
            .await
            .map_err(delete_error)?
            .ok_or(AppError::NotFound(EntityKind::Product))?;
        info!("Deleted product");
        Ok(product)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use backoffice_core::PrincipalId;

    use super::*;
    use crate::db::MemoryCatalog;
    use crate::models::ImagePayload;

    fn session(user: &str) -> Session {
        Session {
            access_token: Some("token".to_owned()),
            user_id: PrincipalId::parse(user),
        }
    }

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(MemoryCatalog::new()))
    }

    async fn store(service: &CatalogService, user: &str) -> Store {
        service
            .create_store(
                &session(user),
                StorePayload {
                    name: Some("Main".to_owned()),
                },
            )
            .await
            .unwrap()
    }

    async fn billboard(service: &CatalogService, store_id: StoreId) -> Billboard {
        service
            .create_billboard(
                &session("u1"),
                store_id,
                BillboardPayload {
                    label: Some("Summer".to_owned()),
                    image_url: Some("https://cdn.example/s.png".to_owned()),
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_non_owner_create_is_forbidden() {
        let service = service();
        let store = store(&service, "u1").await;

        let err = service
            .create_size(
                &session("u2"),
                store.id,
                SizePayload {
                    name: Some("Large".to_owned()),
                    value: Some("L".to_owned()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
        assert!(service.list_sizes(store.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unauthenticated_before_validation() {
        let service = service();
        let store = store(&service, "u1").await;

        let err = service
            .create_color(&Session::anonymous(), store.id, ColorPayload::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_category_reference_must_be_in_same_store() {
        let service = service();
        let mine = store(&service, "u1").await;
        let other = store(&service, "u1").await;
        let foreign = billboard(&service, other.id).await;

        let err = service
            .create_category(
                &session("u1"),
                mine.id,
                CategoryPayload {
                    name: Some("Shirts".to_owned()),
                    billboard_id: Some(foreign.id.to_string()),
                },
            )
            .await
            .unwrap_err();
        match err {
            AppError::Validation(v) => assert_eq!(v.field(), "billboardId"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_product_lifecycle_and_restrict() {
        let service = service();
        let user = session("u1");
        let store = store(&service, "u1").await;
        let billboard = billboard(&service, store.id).await;
        let category = service
            .create_category(
                &user,
                store.id,
                CategoryPayload {
                    name: Some("Shirts".to_owned()),
                    billboard_id: Some(billboard.id.to_string()),
                },
            )
            .await
            .unwrap();
        let color = service
            .create_color(
                &user,
                store.id,
                ColorPayload {
                    name: Some("Red".to_owned()),
                    value: Some("#ff0000".to_owned()),
                },
            )
            .await
            .unwrap();
        let size = service
            .create_size(
                &user,
                store.id,
                SizePayload {
                    name: Some("Large".to_owned()),
                    value: Some("L".to_owned()),
                },
            )
            .await
            .unwrap();

        let product = service
            .create_product(
                &user,
                store.id,
                ProductPayload {
                    name: Some("Tee".to_owned()),
                    price: Some(Decimal::new(1999, 2)),
                    category_id: Some(category.id.to_string()),
                    color_id: Some(color.id.to_string()),
                    size_id: Some(size.id.to_string()),
                    images: Some(vec![ImagePayload {
                        url: Some("https://cdn.example/tee.png".to_owned()),
                    }]),
                    is_featured: Some(true),
                    is_archived: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(product.images.len(), 1);

        let err = service
            .delete_color(&user, store.id, color.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::IntegrityBlocked { .. }));
        assert!(service.get_color(store.id, color.id).await.is_ok());

        let err = service.delete_store(&user, store.id).await.unwrap_err();
        assert!(matches!(err, AppError::IntegrityBlocked { .. }));

        service
            .delete_product(&user, store.id, product.id)
            .await
            .unwrap();
        service
            .delete_color(&user, store.id, color.id)
            .await
            .unwrap();
        assert!(matches!(
            service.get_color(store.id, color.id).await,
            Err(AppError::NotFound(EntityKind::Color))
        ));
    }

    #[tokio::test]
    async fn test_store_rename_soft_fails_for_non_owner() {
        let service = service();
        let store = store(&service, "u1").await;

        let count = service
            .rename_store(
                &session("u2"),
                store.id,
                StorePayload {
                    name: Some("x".to_owned()),
                },
            )
            .await
            .unwrap();
        assert_eq!(count, 0);

        let unchanged = service.get_store(&session("u1"), store.id).await.unwrap();
        assert_eq!(unchanged.name, "Main");
    }

    #[tokio::test]
    async fn test_store_delete_soft_fails_for_non_owner() {
        let service = service();
        let store = store(&service, "u1").await;
        billboard(&service, store.id).await;

        // Not the owner: zero rows, and no hint that children exist.
        let count = service
            .delete_store(&session("u2"), store.id)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let service = service();
        let store = store(&service, "u1").await;

        let err = service
            .update_size(
                &session("u1"),
                store.id,
                SizeId::generate(),
                SizePayload {
                    name: Some("Large".to_owned()),
                    value: Some("L".to_owned()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(EntityKind::Size)));
    }
}
