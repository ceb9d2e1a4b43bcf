//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                           - Liveness
//! GET    /health/ready                     - Catalog reachability
//!
//! GET    /api/auth/session                 - Current session, or {}
//!
//! # Stores (owner only)
//! GET    /api/stores                       - Caller's stores
//! POST   /api/stores                       - Create store
//! GET    /api/stores/{store_id}            - Owned store
//! PATCH  /api/stores/{store_id}            - Rename, {"count": n}
//! DELETE /api/stores/{store_id}            - Delete, {"count": n}
//!
//! # Store-scoped resources
//! # (billboards, categories, colors, sizes, products)
//! GET    /api/{store_id}/{resource}        - Public list
//! POST   /api/{store_id}/{resource}        - Create (owner only)
//! GET    /api/{store_id}/{resource}/{id}   - Public read
//! PATCH  /api/{store_id}/{resource}/{id}   - Update (owner only)
//! DELETE /api/{store_id}/{resource}/{id}   - Delete (owner only)
//! ```

use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod billboards;
pub mod categories;
pub mod colors;
pub mod extract;
pub mod health;
pub mod products;
pub mod sizes;
pub mod stores;

/// Build the application router (without outer layers or state).
pub fn routes() -> Router<AppState> {
    let api = Router::new()
        .merge(auth::router())
        .merge(stores::router())
        .merge(billboards::router())
        .merge(categories::router())
        .merge(colors::router())
        .merge(sizes::router())
        .merge(products::router());

    Router::new().merge(health::router()).nest("/api", api)
}
