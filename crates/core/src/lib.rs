//! Backoffice Core - Shared types library.
//!
//! This crate provides the domain types used across all back-office components:
//! - `api` - The multi-tenant HTTP API
//! - `cli` - Command-line tools for migrations and token issuance
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, principal identity, validated values, and the entity graph

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
