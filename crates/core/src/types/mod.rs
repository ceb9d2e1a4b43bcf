//! Core types for the back-office API.
//!
//! This module provides type-safe wrappers for domain concepts shared by
//! the API server and the CLI.

pub mod color;
pub mod graph;
pub mod id;
pub mod identity;
pub mod price;

pub use color::{HexColor, HexColorError};
pub use graph::{
    Cardinality, DeletePolicy, EntityKind, REFERENCE_EDGES, ReferenceEdge, edge_for_constraint,
    restricting_edges, store_edges,
};
pub use id::*;
pub use identity::{PrincipalId, ProviderAccount, ProviderProfile, Session, TokenPayload};
pub use price::{Price, PriceError};
