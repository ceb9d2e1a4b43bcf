//! Request payloads and their field rules.
//!
//! Payload fields are all optional at the JSON level so that a missing field
//! produces a [`ValidationError`] naming it, rather than a generic body
//! rejection. A `storeId` sent in a body is never read: the store always
//! comes from the request path.

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use backoffice_core::{BillboardId, CategoryId, ColorId, HexColor, Price, SizeId};

use super::catalog::{
    BillboardInput, CategoryInput, ColorInput, ProductInput, SizeInput, StoreInput,
};

/// A payload that failed its field rules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is absent or blank.
    #[error("{0} is required")]
    Missing(&'static str),

    /// A field is present but malformed.
    #[error("{field} is invalid: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl ValidationError {
    fn invalid(field: &'static str, reason: impl ToString) -> Self {
        Self::Invalid {
            field,
            reason: reason.to_string(),
        }
    }

    /// The offending field name.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Missing(field) | Self::Invalid { field, .. } => field,
        }
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::Missing(field))
}

fn required_id<T: std::str::FromStr>(
    field: &'static str,
    value: Option<String>,
) -> Result<T, ValidationError> {
    required(field, value)?
        .parse()
        .map_err(|_| ValidationError::invalid(field, "not a valid id"))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorePayload {
    pub name: Option<String>,
}

impl StorePayload {
    /// # Errors
    ///
    /// Returns `ValidationError::Missing` if `name` is absent or blank.
    pub fn validate(self) -> Result<StoreInput, ValidationError> {
        Ok(StoreInput {
            name: required("name", self.name)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillboardPayload {
    pub label: Option<String>,
    pub image_url: Option<String>,
}

impl BillboardPayload {
    /// # Errors
    ///
    /// Returns `ValidationError::Missing` if `label` or `imageUrl` is absent or blank.
    pub fn validate(self) -> Result<BillboardInput, ValidationError> {
        Ok(BillboardInput {
            label: required("label", self.label)?,
            image_url: required("imageUrl", self.image_url)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    pub name: Option<String>,
    pub billboard_id: Option<String>,
}

impl CategoryPayload {
    /// # Errors
    ///
    /// Returns a `ValidationError` if `name` is blank or `billboardId` is
    /// absent or not an id.
    pub fn validate(self) -> Result<CategoryInput, ValidationError> {
        Ok(CategoryInput {
            name: required("name", self.name)?,
            billboard_id: required_id::<BillboardId>("billboardId", self.billboard_id)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPayload {
    pub name: Option<String>,
    pub value: Option<String>,
}

impl ColorPayload {
    /// # Errors
    ///
    /// Returns a `ValidationError` if `name` is blank or `value` is not a hex color.
    pub fn validate(self) -> Result<ColorInput, ValidationError> {
        let name = required("name", self.name)?;
        let value = required("value", self.value)?;
        let value = HexColor::parse(&value).map_err(|e| ValidationError::invalid("value", e))?;
        Ok(ColorInput { name, value })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizePayload {
    pub name: Option<String>,
    pub value: Option<String>,
}

impl SizePayload {
    /// # Errors
    ///
    /// Returns `ValidationError::Missing` if `name` or `value` is absent or blank.
    pub fn validate(self) -> Result<SizeInput, ValidationError> {
        Ok(SizeInput {
            name: required("name", self.name)?,
            value: required("value", self.value)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub category_id: Option<String>,
    pub color_id: Option<String>,
    pub size_id: Option<String>,
    pub images: Option<Vec<ImagePayload>>,
    pub is_featured: Option<bool>,
    pub is_archived: Option<bool>,
}

impl ProductPayload {
    /// # Errors
    ///
    /// Returns a `ValidationError` if any required field is absent, the
    /// price is below the minimum, or the image list is empty or holds a
    /// blank url.
    pub fn validate(self) -> Result<ProductInput, ValidationError> {
        let name = required("name", self.name)?;
        let price = self.price.ok_or(ValidationError::Missing("price"))?;
        let price = Price::new(price).map_err(|e| ValidationError::invalid("price", e))?;
        let category_id = required_id::<CategoryId>("categoryId", self.category_id)?;
        let color_id = required_id::<ColorId>("colorId", self.color_id)?;
        let size_id = required_id::<SizeId>("sizeId", self.size_id)?;

        let images = self.images.unwrap_or_default();
        if images.is_empty() {
            return Err(ValidationError::Missing("images"));
        }
        let image_urls = images
            .into_iter()
            .map(|image| required("images.url", image.url))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ProductInput {
            name,
            price,
            category_id,
            color_id,
            size_id,
            is_featured: self.is_featured.unwrap_or(false),
            is_archived: self.is_archived.unwrap_or(false),
            image_urls,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use uuid::Uuid;

    use super::*;

    fn product_json() -> serde_json::Value {
        json!({
            "name": "Linen Shirt",
            "price": 49,
            "categoryId": Uuid::new_v4().to_string(),
            "colorId": Uuid::new_v4().to_string(),
            "sizeId": Uuid::new_v4().to_string(),
            "images": [{"url": "https://cdn.example/1.png"}]
        })
    }

    fn product(value: serde_json::Value) -> Result<ProductInput, ValidationError> {
        serde_json::from_value::<ProductPayload>(value).unwrap().validate()
    }

    #[test]
    fn test_store_name_required() {
        assert_eq!(
            StorePayload { name: None }.validate(),
            Err(ValidationError::Missing("name"))
        );
        assert_eq!(
            StorePayload {
                name: Some("   ".to_owned())
            }
            .validate(),
            Err(ValidationError::Missing("name"))
        );
    }

    #[test]
    fn test_store_name_trimmed() {
        let input = StorePayload {
            name: Some("  Main Street  ".to_owned()),
        }
        .validate()
        .unwrap();
        assert_eq!(input.name, "Main Street");
    }

    #[test]
    fn test_billboard_requires_image_url() {
        let payload: BillboardPayload = serde_json::from_value(json!({"label": "Summer"})).unwrap();
        assert_eq!(payload.validate(), Err(ValidationError::Missing("imageUrl")));
    }

    #[test]
    fn test_category_rejects_malformed_billboard_id() {
        let payload: CategoryPayload =
            serde_json::from_value(json!({"name": "Shirts", "billboardId": "b1"})).unwrap();
        let err = payload.validate().unwrap_err();
        assert_eq!(err.field(), "billboardId");
        assert!(matches!(err, ValidationError::Invalid { .. }));
    }

    #[test]
    fn test_color_value_must_start_with_hash() {
        let payload: ColorPayload =
            serde_json::from_value(json!({"name": "Red", "value": "ff0000"})).unwrap();
        let err = payload.validate().unwrap_err();
        assert_eq!(err.field(), "value");
    }

    #[test]
    fn test_color_valid() {
        let payload: ColorPayload =
            serde_json::from_value(json!({"name": "Red", "value": "#ff0000"})).unwrap();
        assert_eq!(payload.validate().unwrap().value.as_str(), "#ff0000");
    }

    #[test]
    fn test_size_requires_value() {
        let payload: SizePayload = serde_json::from_value(json!({"name": "Large"})).unwrap();
        assert_eq!(payload.validate(), Err(ValidationError::Missing("value")));
    }

    #[test]
    fn test_product_valid_defaults_flags() {
        let input = product(product_json()).unwrap();
        assert!(!input.is_featured);
        assert!(!input.is_archived);
        assert_eq!(input.image_urls, vec!["https://cdn.example/1.png".to_owned()]);
    }

    #[test]
    fn test_product_price_below_one_rejected() {
        let mut value = product_json();
        value["price"] = json!(0);
        assert_eq!(product(value).unwrap_err().field(), "price");

        let mut value = product_json();
        value["price"] = json!("0.50");
        assert_eq!(product(value).unwrap_err().field(), "price");
    }

    #[test]
    fn test_product_price_required() {
        let mut value = product_json();
        value.as_object_mut().unwrap().remove("price");
        assert_eq!(product(value), Err(ValidationError::Missing("price")));
    }

    #[test]
    fn test_product_requires_images() {
        let mut value = product_json();
        value["images"] = json!([]);
        assert_eq!(product(value), Err(ValidationError::Missing("images")));

        let mut value = product_json();
        value["images"] = json!([{"url": ""}]);
        assert_eq!(product(value), Err(ValidationError::Missing("images.url")));
    }

    #[test]
    fn test_body_store_id_is_ignored() {
        let payload: SizePayload = serde_json::from_value(json!({
            "name": "Small",
            "value": "S",
            "storeId": Uuid::new_v4().to_string()
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
    }
}
