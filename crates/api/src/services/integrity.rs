//! Restrict-on-delete policy.
//!
//! Deletes are checked up front against the entity graph so a refusal names
//! the edge that blocked it. If a dependent appears between the check and
//! the delete, the storage layer refuses instead and the constraint name is
//! mapped back to the same edge.

use tracing::{info, instrument};
use uuid::Uuid;

use backoffice_core::{EntityKind, ReferenceEdge, edge_for_constraint, restricting_edges, store_edges};

use crate::db::{Catalog, RepositoryError};
use crate::error::AppError;
use crate::models::ValidationError;

fn blocking_edges(target: EntityKind) -> Vec<ReferenceEdge> {
    if target == EntityKind::Store {
        store_edges().collect()
    } else {
        restricting_edges(target).copied().collect()
    }
}

/// Refuse the delete of `target` row `id` while anything references it.
///
/// # Errors
///
/// Returns `AppError::IntegrityBlocked` naming the first edge with a
/// dependent, or `AppError::Database` if counting fails.
#[instrument(skip(catalog), fields(target = %target, id = %id))]
pub async fn ensure_deletable(
    catalog: &dyn Catalog,
    target: EntityKind,
    id: Uuid,
) -> Result<(), AppError> {
    for edge in blocking_edges(target) {
        let count = catalog.count_dependents(&edge, id).await?;
        if count > 0 {
            info!(dependents = count, blocked_by = %edge.dependent, "Delete blocked");
            return Err(AppError::IntegrityBlocked { edge });
        }
    }
    Ok(())
}

/// Translate a storage error raised by a delete.
#[must_use]
pub fn delete_error(err: RepositoryError) -> AppError {
    match err {
        RepositoryError::ForeignKey(name) => match edge_for_constraint(&name) {
            Some(edge) => AppError::IntegrityBlocked { edge },
            None => AppError::Database(RepositoryError::ForeignKey(name)),
        },
        other => AppError::Database(other),
    }
}

/// Translate a storage error raised by an insert or update.
///
/// A foreign-key refusal here means a referenced row vanished after it was
/// checked, which the caller sees as an invalid reference field.
#[must_use]
pub fn write_error(err: RepositoryError) -> AppError {
    match err {
        RepositoryError::ForeignKey(name) => match edge_for_constraint(&name) {
            Some(edge) if edge.target != EntityKind::Store => {
                AppError::Validation(ValidationError::Invalid {
                    field: edge.field,
                    reason: format!("no such {} in this store", edge.target),
                })
            }
            _ => AppError::Database(RepositoryError::ForeignKey(name)),
        },
        other => AppError::Database(other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use backoffice_core::{PrincipalId, StoreId};

    use super::*;
    use crate::db::MemoryCatalog;
    use crate::models::{BillboardInput, CategoryInput, StoreInput};

    async fn store_with_category() -> (MemoryCatalog, StoreId, Uuid) {
        let catalog = MemoryCatalog::new();
        let store = catalog
            .create_store(
                &PrincipalId::parse("u1").unwrap(),
                &StoreInput {
                    name: "Main".to_owned(),
                },
            )
            .await
            .unwrap();
        let billboard = catalog
            .insert_billboard(
                store.id,
                &BillboardInput {
                    label: "Summer".to_owned(),
                    image_url: "https://cdn.example/s.png".to_owned(),
                },
            )
            .await
            .unwrap();
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
        (catalog, store.id, billboard.id.as_uuid())
    }

    #[tokio::test]
    async fn test_referenced_billboard_blocked() {
        let (catalog, _, billboard) = store_with_category().await;
        let err = ensure_deletable(&catalog, EntityKind::Billboard, billboard)
            .await
            .unwrap_err();
        match err {
            AppError::IntegrityBlocked { edge } => {
                assert_eq!(edge.dependent, EntityKind::Category);
                assert_eq!(edge.describe(), "categories reference this billboard");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_store_with_children_blocked() {
        let (catalog, store_id, _) = store_with_category().await;
        let err = ensure_deletable(&catalog, EntityKind::Store, store_id.as_uuid())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::IntegrityBlocked { edge } if edge.target == EntityKind::Store));
    }

    #[tokio::test]
    async fn test_unreferenced_color_deletable() {
        let catalog = MemoryCatalog::new();
        assert!(
            ensure_deletable(&catalog, EntityKind::Color, Uuid::new_v4())
                .await
                .is_ok()
        );
    }

    #[test]
    fn test_reactive_delete_error_names_edge() {
        let err = delete_error(RepositoryError::ForeignKey(
            "product_size_id_fkey".to_owned(),
        ));
        assert!(matches!(err, AppError::IntegrityBlocked { edge } if edge.dependent == EntityKind::Product));
    }

    #[test]
    fn test_write_error_is_validation() {
        let err = write_error(RepositoryError::ForeignKey(
            "category_billboard_id_fkey".to_owned(),
        ));
        match err {
            AppError::Validation(v) => assert_eq!(v.field(), "billboardId"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_constraint_is_internal() {
        let err = delete_error(RepositoryError::ForeignKey("mystery".to_owned()));
        assert!(matches!(err, AppError::Database(_)));
    }
}
