//! In-memory catalog.
//!
//! Rows are kept in insertion order per table behind a single lock. Foreign
//! keys are enforced the same way the database does it: a write naming a
//! missing row, or a delete of a row that is still referenced, fails with
//! [`RepositoryError::ForeignKey`] carrying the constraint name.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use backoffice_core::{
    BillboardId, CategoryId, ColorId, EntityKind, ImageId, PrincipalId, ProductId, ReferenceEdge,
    SizeId, StoreId,
};

use super::{Catalog, RepositoryError};
use crate::models::{
    Billboard, BillboardInput, Category, CategoryInput, Color, ColorInput, Image, Product,
    ProductFilter, ProductInput, Size, SizeInput, Store, StoreInput,
};

/// A store-scoped row.
trait Scoped: Clone {
    fn store_id(&self) -> StoreId;
    fn uuid(&self) -> Uuid;
}

macro_rules! scoped {
    ($($ty:ty),*) => {
        $(
            impl Scoped for $ty {
                fn store_id(&self) -> StoreId {
                    self.store_id
                }

                fn uuid(&self) -> Uuid {
                    self.id.as_uuid()
                }
            }
        )*
    };
}

scoped!(Billboard, Category, Color, Size, Product);

fn list<T: Scoped>(rows: &[T], store_id: StoreId) -> Vec<T> {
    rows.iter()
        .rev()
        .filter(|row| row.store_id() == store_id)
        .cloned()
        .collect()
}

fn find<T: Scoped>(rows: &[T], store_id: StoreId, id: Uuid) -> Option<&T> {
    rows.iter()
        .find(|row| row.store_id() == store_id && row.uuid() == id)
}

fn find_mut<T: Scoped>(rows: &mut [T], store_id: StoreId, id: Uuid) -> Option<&mut T> {
    rows.iter_mut()
        .find(|row| row.store_id() == store_id && row.uuid() == id)
}

fn remove<T: Scoped>(rows: &mut Vec<T>, store_id: StoreId, id: Uuid) -> Option<T> {
    let index = rows
        .iter()
        .position(|row| row.store_id() == store_id && row.uuid() == id)?;
    Some(rows.remove(index))
}

fn violation(dependent: EntityKind, target: EntityKind) -> RepositoryError {
    RepositoryError::ForeignKey(format!("{dependent}_{target}_id_fkey"))
}

#[derive(Debug, Default)]
struct Tables {
    stores: Vec<Store>,
    billboards: Vec<Billboard>,
    categories: Vec<Category>,
    colors: Vec<Color>,
    sizes: Vec<Size>,
    products: Vec<Product>,
}

impl Tables {
    fn require_store(&self, dependent: EntityKind, store_id: StoreId) -> Result<(), RepositoryError> {
        if self.stores.iter().any(|s| s.id == store_id) {
            Ok(())
        } else {
            Err(violation(dependent, EntityKind::Store))
        }
    }

    fn require_category_refs(&self, input: &CategoryInput) -> Result<(), RepositoryError> {
        if self.billboards.iter().any(|b| b.id == input.billboard_id) {
            Ok(())
        } else {
            Err(violation(EntityKind::Category, EntityKind::Billboard))
        }
    }

    fn require_product_refs(&self, input: &ProductInput) -> Result<(), RepositoryError> {
        if !self.categories.iter().any(|c| c.id == input.category_id) {
            return Err(violation(EntityKind::Product, EntityKind::Category));
        }
        if !self.colors.iter().any(|c| c.id == input.color_id) {
            return Err(violation(EntityKind::Product, EntityKind::Color));
        }
        if !self.sizes.iter().any(|s| s.id == input.size_id) {
            return Err(violation(EntityKind::Product, EntityKind::Size));
        }
        Ok(())
    }

    fn count_in_store(&self, kind: EntityKind, store_id: StoreId) -> usize {
        fn count<T: Scoped>(rows: &[T], store_id: StoreId) -> usize {
            rows.iter().filter(|row| row.store_id() == store_id).count()
        }

        match kind {
            EntityKind::Billboard => count(&self.billboards, store_id),
            EntityKind::Category => count(&self.categories, store_id),
            EntityKind::Color => count(&self.colors, store_id),
            EntityKind::Size => count(&self.sizes, store_id),
            EntityKind::Product => count(&self.products, store_id),
            EntityKind::Store | EntityKind::Image => 0,
        }
    }

    fn count_dependents(&self, edge: &ReferenceEdge, target: Uuid) -> usize {
        match (edge.dependent, edge.target) {
            (dependent, EntityKind::Store) => {
                self.count_in_store(dependent, StoreId::new(target))
            }
            (EntityKind::Category, EntityKind::Billboard) => self
                .categories
                .iter()
                .filter(|c| c.billboard_id.as_uuid() == target)
                .count(),
            (EntityKind::Product, EntityKind::Category) => self
                .products
                .iter()
                .filter(|p| p.category_id.as_uuid() == target)
                .count(),
            (EntityKind::Product, EntityKind::Color) => self
                .products
                .iter()
                .filter(|p| p.color_id.as_uuid() == target)
                .count(),
            (EntityKind::Product, EntityKind::Size) => self
                .products
                .iter()
                .filter(|p| p.size_id.as_uuid() == target)
                .count(),
            (EntityKind::Image, EntityKind::Product) => self
                .products
                .iter()
                .find(|p| p.id.as_uuid() == target)
                .map_or(0, |p| p.images.len()),
            _ => 0,
        }
    }

    /// Fail the way a restrict constraint would if `target` is still referenced.
    fn restrict(&self, target: EntityKind, id: Uuid) -> Result<(), RepositoryError> {
        backoffice_core::restricting_edges(target)
            .find(|edge| self.count_dependents(edge, id) > 0)
            .map_or(Ok(()), |edge| Err(violation(edge.dependent, edge.target)))
    }
}

fn images_for(product_id: ProductId, urls: &[String]) -> Vec<Image> {
    let now = Utc::now();
    urls.iter()
        .map(|url| Image {
            id: ImageId::generate(),
            product_id,
            url: url.clone(),
            created_at: now,
        })
        .collect()
}

/// Catalog held in process memory.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    tables: RwLock<Tables>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn ping(&self) -> Result<(), RepositoryError> {
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
        let now = Utc::now();
        let store = Store {
            id: StoreId::generate(),
            name: input.name.clone(),
            owner_id: owner.clone(),
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.stores.push(store.clone());
        Ok(store)
    }

    async fn find_owned_store(
        &self,
        id: StoreId,
        owner: &PrincipalId,
    ) -> Result<Option<Store>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .stores
            .iter()
            .find(|s| s.id == id && &s.owner_id == owner)
            .cloned())
    }

    async fn list_owned_stores(&self, owner: &PrincipalId) -> Result<Vec<Store>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .stores
            .iter()
            .filter(|s| &s.owner_id == owner)
            .cloned()
            .collect())
    }

    async fn rename_store(
        &self,
        id: StoreId,
        owner: &PrincipalId,
        input: &StoreInput,
    ) -> Result<u64, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(store) = tables
            .stores
            .iter_mut()
            .find(|s| s.id == id && &s.owner_id == owner)
        else {
            return Ok(0);
        };
        store.name.clone_from(&input.name);
        store.updated_at = Utc::now();
        Ok(1)
    }

    async fn delete_store(&self, id: StoreId, owner: &PrincipalId) -> Result<u64, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(index) = tables
            .stores
            .iter()
            .position(|s| s.id == id && &s.owner_id == owner)
        else {
            return Ok(0);
        };
        if let Some(kind) = EntityKind::STORE_SCOPED
            .into_iter()
            .find(|kind| tables.count_in_store(*kind, id) > 0)
        {
            return Err(violation(kind, EntityKind::Store));
        }
        tables.stores.remove(index);
        Ok(1)
    }

    async fn count_dependents(
        &self,
        edge: &ReferenceEdge,
        target: Uuid,
    ) -> Result<u64, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.count_dependents(edge, target) as u64)
    }

    // -------------------------------------------------------------------------
    // Billboards
    // -------------------------------------------------------------------------

    async fn list_billboards(&self, store_id: StoreId) -> Result<Vec<Billboard>, RepositoryError> {
        Ok(list(&self.tables.read().await.billboards, store_id))
    }

    async fn get_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
    ) -> Result<Option<Billboard>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(find(&tables.billboards, store_id, id.as_uuid()).cloned())
    }

    async fn insert_billboard(
        &self,
        store_id: StoreId,
        input: &BillboardInput,
    ) -> Result<Billboard, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.require_store(EntityKind::Billboard, store_id)?;
        let now = Utc::now();
        let billboard = Billboard {
            id: BillboardId::generate(),
            store_id,
            label: input.label.clone(),
            image_url: input.image_url.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.billboards.push(billboard.clone());
        Ok(billboard)
    }

    async fn update_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
        input: &BillboardInput,
    ) -> Result<Option<Billboard>, RepositoryError> {
        let mut tables = self.tables.write().await;
        Ok(
            find_mut(&mut tables.billboards, store_id, id.as_uuid()).map(|row| {
                row.label.clone_from(&input.label);
                row.image_url.clone_from(&input.image_url);
                row.updated_at = Utc::now();
                row.clone()
            }),
        )
    }

    async fn delete_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
    ) -> Result<Option<Billboard>, RepositoryError> {
        let mut tables = self.tables.write().await;
        if find(&tables.billboards, store_id, id.as_uuid()).is_none() {
            return Ok(None);
        }
        tables.restrict(EntityKind::Billboard, id.as_uuid())?;
        Ok(remove(&mut tables.billboards, store_id, id.as_uuid()))
    }

    // -------------------------------------------------------------------------
    // Categories
    // -------------------------------------------------------------------------

    async fn list_categories(&self, store_id: StoreId) -> Result<Vec<Category>, RepositoryError> {
        Ok(list(&self.tables.read().await.categories, store_id))
    }

    async fn get_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<Option<Category>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(find(&tables.categories, store_id, id.as_uuid()).cloned())
    }

    async fn insert_category(
        &self,
        store_id: StoreId,
        input: &CategoryInput,
    ) -> Result<Category, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.require_store(EntityKind::Category, store_id)?;
        tables.require_category_refs(input)?;
        let now = Utc::now();
        let category = Category {
            id: CategoryId::generate(),
            store_id,
            name: input.name.clone(),
            billboard_id: input.billboard_id,
            created_at: now,
            updated_at: now,
        };
        tables.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
        input: &CategoryInput,
    ) -> Result<Option<Category>, RepositoryError> {
        let mut tables = self.tables.write().await;
        if find(&tables.categories, store_id, id.as_uuid()).is_none() {
            return Ok(None);
        }
        tables.require_category_refs(input)?;
        Ok(
            find_mut(&mut tables.categories, store_id, id.as_uuid()).map(|row| {
                row.name.clone_from(&input.name);
                row.billboard_id = input.billboard_id;
                row.updated_at = Utc::now();
                row.clone()
            }),
        )
    }

    async fn delete_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<Option<Category>, RepositoryError> {
        let mut tables = self.tables.write().await;
        if find(&tables.categories, store_id, id.as_uuid()).is_none() {
            return Ok(None);
        }
        tables.restrict(EntityKind::Category, id.as_uuid())?;
        Ok(remove(&mut tables.categories, store_id, id.as_uuid()))
    }

    // -------------------------------------------------------------------------
    // Colors
    // -------------------------------------------------------------------------

    async fn list_colors(&self, store_id: StoreId) -> Result<Vec<Color>, RepositoryError> {
        Ok(list(&self.tables.read().await.colors, store_id))
    }

    async fn get_color(
        &self,
        store_id: StoreId,
        id: ColorId,
    ) -> Result<Option<Color>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(find(&tables.colors, store_id, id.as_uuid()).cloned())
    }

    async fn insert_color(
        &self,
        store_id: StoreId,
        input: &ColorInput,
    ) -> Result<Color, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.require_store(EntityKind::Color, store_id)?;
        let now = Utc::now();
        let color = Color {
            id: ColorId::generate(),
            store_id,
            name: input.name.clone(),
            value: input.value.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.colors.push(color.clone());
        Ok(color)
    }

    async fn update_color(
        &self,
        store_id: StoreId,
        id: ColorId,
        input: &ColorInput,
    ) -> Result<Option<Color>, RepositoryError> {
        let mut tables = self.tables.write().await;
        Ok(
            find_mut(&mut tables.colors, store_id, id.as_uuid()).map(|row| {
                row.name.clone_from(&input.name);
                row.value = input.value.clone();
                row.updated_at = Utc::now();
                row.clone()
            }),
        )
    }

    async fn delete_color(
        &self,
        store_id: StoreId,
        id: ColorId,
    ) -> Result<Option<Color>, RepositoryError> {
        let mut tables = self.tables.write().await;
        if find(&tables.colors, store_id, id.as_uuid()).is_none() {
            return Ok(None);
        }
        tables.restrict(EntityKind::Color, id.as_uuid())?;
        Ok(remove(&mut tables.colors, store_id, id.as_uuid()))
    }

    // -------------------------------------------------------------------------
    // Sizes
    // -------------------------------------------------------------------------

    async fn list_sizes(&self, store_id: StoreId) -> Result<Vec<Size>, RepositoryError> {
        Ok(list(&self.tables.read().await.sizes, store_id))
    }

    async fn get_size(
        &self,
        store_id: StoreId,
        id: SizeId,
    ) -> Result<Option<Size>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(find(&tables.sizes, store_id, id.as_uuid()).cloned())
    }

    async fn insert_size(
        &self,
        store_id: StoreId,
        input: &SizeInput,
    ) -> Result<Size, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.require_store(EntityKind::Size, store_id)?;
        let now = Utc::now();
        let size = Size {
            id: SizeId::generate(),
            store_id,
            name: input.name.clone(),
            value: input.value.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.sizes.push(size.clone());
        Ok(size)
    }

    async fn update_size(
        &self,
        store_id: StoreId,
        id: SizeId,
        input: &SizeInput,
    ) -> Result<Option<Size>, RepositoryError> {
        let mut tables = self.tables.write().await;
        Ok(
            find_mut(&mut tables.sizes, store_id, id.as_uuid()).map(|row| {
                row.name.clone_from(&input.name);
                row.value.clone_from(&input.value);
                row.updated_at = Utc::now();
                row.clone()
            }),
        )
    }

    async fn delete_size(
        &self,
        store_id: StoreId,
        id: SizeId,
    ) -> Result<Option<Size>, RepositoryError> {
        let mut tables = self.tables.write().await;
        if find(&tables.sizes, store_id, id.as_uuid()).is_none() {
            return Ok(None);
        }
        tables.restrict(EntityKind::Size, id.as_uuid())?;
        Ok(remove(&mut tables.sizes, store_id, id.as_uuid()))
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    async fn list_products(
        &self,
        store_id: StoreId,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(list(&tables.products, store_id)
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect())
    }

    async fn get_product(
        &self,
        store_id: StoreId,
        id: ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(find(&tables.products, store_id, id.as_uuid()).cloned())
    }

    async fn insert_product(
        &self,
        store_id: StoreId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.require_store(EntityKind::Product, store_id)?;
        tables.require_product_refs(input)?;
        let now = Utc::now();
        let id = ProductId::generate();
        let product = Product {
            id,
            store_id,
            name: input.name.clone(),
            price: input.price,
            category_id: input.category_id,
            color_id: input.color_id,
            size_id: input.size_id,
            is_featured: input.is_featured,
            is_archived: input.is_archived,
            images: images_for(id, &input.image_urls),
            created_at: now,
            updated_at: now,
        };
        tables.products.push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        store_id: StoreId,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut tables = self.tables.write().await;
        if find(&tables.products, store_id, id.as_uuid()).is_none() {
            return Ok(None);
        }
        tables.require_product_refs(input)?;
        Ok(
            find_mut(&mut tables.products, store_id, id.as_uuid()).map(|row| {
                row.name.clone_from(&input.name);
                row.price = input.price;
                row.category_id = input.category_id;
                row.color_id = input.color_id;
                row.size_id = input.size_id;
                row.is_featured = input.is_featured;
                row.is_archived = input.is_archived;
                row.images = images_for(id, &input.image_urls);
                row.updated_at = Utc::now();
                row.clone()
            }),
        )
    }

    async fn delete_product(
        &self,
        store_id: StoreId,
        id: ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut tables = self.tables.write().await;
        Ok(remove(&mut tables.products, store_id, id.as_uuid()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use backoffice_core::{HexColor, Price};
    use rust_decimal::Decimal;

    use super::*;

    fn owner() -> PrincipalId {
        PrincipalId::parse("u1").unwrap()
    }

    async fn seeded() -> (MemoryCatalog, Store) {
        let catalog = MemoryCatalog::new();
        let store = catalog
            .create_store(
                &owner(),
                &StoreInput {
                    name: "Main".to_owned(),
                },
            )
            .await
            .unwrap();
        (catalog, store)
    }

    async fn billboard(catalog: &MemoryCatalog, store_id: StoreId) -> Billboard {
        catalog
            .insert_billboard(
                store_id,
                &BillboardInput {
                    label: "Summer".to_owned(),
                    image_url: "https://cdn.example/summer.png".to_owned(),
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_rename_store_is_conditional_on_owner() {
        let (catalog, store) = seeded().await;
        let input = StoreInput {
            name: "x".to_owned(),
        };
        let other = PrincipalId::parse("u2").unwrap();

        assert_eq!(catalog.rename_store(store.id, &other, &input).await.unwrap(), 0);
        assert_eq!(catalog.rename_store(store.id, &owner(), &input).await.unwrap(), 1);

        let renamed = catalog.find_owned_store(store.id, &owner()).await.unwrap();
        assert_eq!(renamed.map(|s| s.name).as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn test_insert_requires_existing_store() {
        let catalog = MemoryCatalog::new();
        let err = catalog
            .insert_billboard(
                StoreId::generate(),
                &BillboardInput {
                    label: "a".to_owned(),
                    image_url: "b".to_owned(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::ForeignKey(name) if name == "billboard_store_id_fkey"));
    }

    #[tokio::test]
    async fn test_referenced_billboard_delete_is_refused() {
        let (catalog, store) = seeded().await;
        let billboard = billboard(&catalog, store.id).await;
        catalog
            .insert_category(
                store.id,
                &CategoryInput {
                    name: "Shirts".to_owned(),
                    billboard_id: billboard.id,
                },
            )
            .await
            .unwrap();

        let err = catalog
            .delete_billboard(store.id, billboard.id)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::ForeignKey(name) if name == "category_billboard_id_fkey"));
        assert!(
            catalog
                .get_billboard(store.id, billboard.id)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_store_delete_refused_while_children_exist() {
        let (catalog, store) = seeded().await;
        let billboard = billboard(&catalog, store.id).await;

        let err = catalog.delete_store(store.id, &owner()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::ForeignKey(_)));

        catalog
            .delete_billboard(store.id, billboard.id)
            .await
            .unwrap();
        assert_eq!(catalog.delete_store(store.id, &owner()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_scoped_lookups_ignore_other_stores() {
        let (catalog, store) = seeded().await;
        let billboard = billboard(&catalog, store.id).await;
        let other = StoreId::generate();

        assert!(
            catalog
                .get_billboard(other, billboard.id)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            catalog
                .delete_billboard(other, billboard.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_lists_newest_first() {
        let (catalog, store) = seeded().await;
        let first = billboard(&catalog, store.id).await;
        let second = billboard(&catalog, store.id).await;

        let ids: Vec<_> = catalog
            .list_billboards(store.id)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_product_update_replaces_images() {
        let (catalog, store) = seeded().await;
        let billboard = billboard(&catalog, store.id).await;
        let category = catalog
            .insert_category(
                store.id,
                &CategoryInput {
                    name: "Shirts".to_owned(),
                    billboard_id: billboard.id,
                },
            )
            .await
            .unwrap();
        let color = catalog
            .insert_color(
                store.id,
                &ColorInput {
                    name: "Red".to_owned(),
                    value: HexColor::parse("#f00").unwrap(),
                },
            )
            .await
            .unwrap();
        let size = catalog
            .insert_size(
                store.id,
                &SizeInput {
                    name: "Large".to_owned(),
                    value: "L".to_owned(),
                },
            )
            .await
            .unwrap();

        let mut input = ProductInput {
            name: "Tee".to_owned(),
            price: Price::new(Decimal::new(20, 0)).unwrap(),
            category_id: category.id,
            color_id: color.id,
            size_id: size.id,
            is_featured: false,
            is_archived: false,
            image_urls: vec!["a".to_owned(), "b".to_owned()],
        };
        let product = catalog.insert_product(store.id, &input).await.unwrap();
        assert_eq!(product.images.len(), 2);

        input.image_urls = vec!["c".to_owned()];
        let updated = catalog
            .update_product(store.id, product.id, &input)
            .await
            .unwrap()
            .unwrap();
        let urls: Vec<_> = updated.images.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["c"]);

        let edge = backoffice_core::restricting_edges(EntityKind::Color)
            .next()
            .copied()
            .unwrap();
        assert_eq!(
            catalog.count_dependents(&edge, color.id.as_uuid()).await.unwrap(),
            1
        );
    }
}
