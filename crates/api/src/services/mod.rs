//! Business logic services for the API.
//!
//! # Services
//!
//! - `identity` - Signed session tokens
//! - `guard` - Store ownership checks
//! - `integrity` - Restrict-on-delete policy
//! - `catalog` - Validation, authorization and writes for every resource

pub mod catalog;
pub mod guard;
pub mod identity;
pub mod integrity;

pub use catalog::CatalogService;
pub use guard::{Authorization, authorize, require_principal};
pub use identity::{TokenError, TokenKeys};
pub use integrity::ensure_deletable;
