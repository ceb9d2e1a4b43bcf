//! Store subtree domain types.
//!
//! These are the rows of a tenant's catalog as the API returns them. Every
//! scoped entity carries the `store_id` of the store it lives under.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use backoffice_core::{
    BillboardId, CategoryId, ColorId, HexColor, ImageId, Price, PrincipalId, ProductId, SizeId,
    StoreId,
};

/// A tenant's root entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    /// Principal that owns the store for its whole lifetime.
    pub owner_id: PrincipalId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A promotional banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Billboard {
    pub id: BillboardId,
    pub store_id: StoreId,
    pub label: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product category, shown with a billboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub store_id: StoreId,
    pub name: String,
    pub billboard_id: BillboardId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub id: ColorId,
    pub store_id: StoreId,
    pub name: String,
    pub value: HexColor,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub id: SizeId,
    pub store_id: StoreId,
    pub name: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product image. Owned by exactly one product and written only as part
/// of that product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: ImageId,
    pub product_id: ProductId,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub store_id: StoreId,
    pub name: String,
    pub price: Price,
    pub category_id: CategoryId,
    pub color_id: ColorId,
    pub size_id: SizeId,
    pub is_featured: bool,
    pub is_archived: bool,
    pub images: Vec<Image>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Validated inputs
// =============================================================================

/// Editable fields of a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreInput {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillboardInput {
    pub label: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInput {
    pub name: String,
    pub billboard_id: BillboardId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorInput {
    pub name: String,
    pub value: HexColor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeInput {
    pub name: String,
    pub value: String,
}

/// Editable fields of a product.
///
/// `image_urls` is the complete image set; writing a product replaces
/// whatever images it had before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    pub name: String,
    pub price: Price,
    pub category_id: CategoryId,
    pub color_id: ColorId,
    pub size_id: SizeId,
    pub is_featured: bool,
    pub is_archived: bool,
    pub image_urls: Vec<String>,
}

/// Public product listing filters.
///
/// Archived products are never listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    pub category_id: Option<CategoryId>,
    pub color_id: Option<ColorId>,
    pub size_id: Option<SizeId>,
    pub is_featured: Option<bool>,
}

impl ProductFilter {
    /// Whether a product passes this filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        !product.is_archived
            && self.category_id.is_none_or(|id| id == product.category_id)
            && self.color_id.is_none_or(|id| id == product.color_id)
            && self.size_id.is_none_or(|id| id == product.size_id)
            && self.is_featured.is_none_or(|f| f == product.is_featured)
    }
}
