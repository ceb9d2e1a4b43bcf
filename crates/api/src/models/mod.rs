//! Domain models for the back-office API.
//!
//! - [`catalog`]: the store subtree as it is read and written
//! - [`payload`]: request bodies and their field rules

pub mod catalog;
pub mod payload;

pub use catalog::{
    Billboard, BillboardInput, Category, CategoryInput, Color, ColorInput, Image, Product,
    ProductFilter, ProductInput, Size, SizeInput, Store, StoreInput,
};
pub use payload::{
    BillboardPayload, CategoryPayload, ColorPayload, ImagePayload, ProductPayload, SizePayload,
    StorePayload, ValidationError,
};
