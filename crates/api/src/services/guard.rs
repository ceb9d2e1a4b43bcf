//! Ownership guard.
//!
//! Decides whether a session may mutate a store's subtree. Existence and
//! ownership are checked with one lookup keyed by `(store_id, owner)`, so a
//! missing store and somebody else's store look the same to the caller.

use tracing::{debug, instrument};

use backoffice_core::{PrincipalId, Session, StoreId};

use crate::db::{Catalog, RepositoryError};
use crate::error::AppError;
use crate::models::Store;

/// Outcome of an ownership check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    /// The session's principal owns the store.
    Authorized(Store),
    /// The session carries no principal.
    Unauthenticated,
    /// No store with that id is owned by the principal.
    Forbidden,
}

impl Authorization {
    /// Convert into the authorized store, or the matching error.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthenticated` or `AppError::Forbidden`.
    pub fn into_store(self) -> Result<Store, AppError> {
        match self {
            Self::Authorized(store) => Ok(store),
            Self::Unauthenticated => Err(AppError::Unauthenticated),
            Self::Forbidden => Err(AppError::Forbidden),
        }
    }
}

/// The principal of `session`, or `Unauthenticated`.
///
/// # Errors
///
/// Returns `AppError::Unauthenticated` when the session has no user id.
pub fn require_principal(session: &Session) -> Result<&PrincipalId, AppError> {
    session.principal().ok_or(AppError::Unauthenticated)
}

/// Check whether `session` may mutate the subtree of `store_id`.
///
/// # Errors
///
/// Returns `RepositoryError` if the lookup fails.
#[instrument(skip(catalog, session), fields(store_id = %store_id))]
pub async fn authorize(
    catalog: &dyn Catalog,
    session: &Session,
    store_id: StoreId,
) -> Result<Authorization, RepositoryError> {
    let Some(principal) = session.principal() else {
        return Ok(Authorization::Unauthenticated);
    };

    match catalog.find_owned_store(store_id, principal).await? {
        Some(store) => Ok(Authorization::Authorized(store)),
        None => {
            debug!(principal = %principal, "Store not owned by principal");
            Ok(Authorization::Forbidden)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryCatalog;
    use crate::models::StoreInput;

    fn session(user: &str) -> Session {
        Session {
            access_token: Some("token".to_owned()),
            user_id: PrincipalId::parse(user),
        }
    }

    async fn store_of(catalog: &MemoryCatalog, user: &str) -> Store {
        catalog
            .create_store(
                &PrincipalId::parse(user).unwrap(),
                &StoreInput {
                    name: "Main".to_owned(),
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_owner_is_authorized() {
        let catalog = MemoryCatalog::new();
        let store = store_of(&catalog, "u1").await;

        let outcome = authorize(&catalog, &session("u1"), store.id).await.unwrap();
        assert_eq!(outcome, Authorization::Authorized(store));
    }

    #[tokio::test]
    async fn test_other_principal_is_forbidden() {
        let catalog = MemoryCatalog::new();
        let store = store_of(&catalog, "u1").await;

        let outcome = authorize(&catalog, &session("u2"), store.id).await.unwrap();
        assert_eq!(outcome, Authorization::Forbidden);
    }

    #[tokio::test]
    async fn test_missing_store_looks_like_foreign_store() {
        let catalog = MemoryCatalog::new();
        let outcome = authorize(&catalog, &session("u1"), StoreId::generate())
            .await
            .unwrap();
        assert_eq!(outcome, Authorization::Forbidden);
    }

    #[tokio::test]
    async fn test_session_without_user_is_unauthenticated() {
        let catalog = MemoryCatalog::new();
        let store = store_of(&catalog, "u1").await;

        let outcome = authorize(&catalog, &Session::anonymous(), store.id)
            .await
            .unwrap();
        assert_eq!(outcome, Authorization::Unauthenticated);
        assert!(matches!(
            outcome.into_store(),
            Err(AppError::Unauthenticated)
        ));
    }
}
