//! The fixed entity graph of a store's subtree.
//!
//! Every scoped entity belongs to exactly one store. On top of that, a few
//! entities reference each other. Those reference edges restrict deletion of
//! their target: a referenced row cannot be removed until its dependents are
//! gone. Nothing cascades except a product's images, which have no lifecycle
//! of their own.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Kinds of entity in a store's subtree (plus the store itself).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Store,
    Billboard,
    Category,
    Color,
    Size,
    Product,
    Image,
}

impl EntityKind {
    /// Every kind that carries a `store_id` foreign key.
    pub const STORE_SCOPED: [Self; 5] = [
        Self::Billboard,
        Self::Category,
        Self::Color,
        Self::Size,
        Self::Product,
    ];

    /// Singular lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Store => "store",
            Self::Billboard => "billboard",
            Self::Category => "category",
            Self::Color => "color",
            Self::Size => "size",
            Self::Product => "product",
            Self::Image => "image",
        }
    }

    /// Plural lowercase name, as used in route paths and messages.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Store => "stores",
            Self::Billboard => "billboards",
            Self::Category => "categories",
            Self::Color => "colors",
            Self::Size => "sizes",
            Self::Product => "products",
            Self::Image => "images",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happens to dependents when their target is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// The delete is refused while any dependent exists.
    Restrict,
    /// Dependents are removed together with their target.
    Cascade,
}

/// How many targets a single dependent row points at through an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// Exactly one target per dependent (a required foreign key).
    One,
}

/// A reference from `dependent` rows to a `target` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceEdge {
    /// The referencing kind.
    pub dependent: EntityKind,
    /// The referenced kind.
    pub target: EntityKind,
    /// Name of the foreign-key field on the dependent.
    pub field: &'static str,
    /// How many targets each dependent holds.
    pub cardinality: Cardinality,
    /// What deleting the target does to dependents.
    pub on_delete: DeletePolicy,
}

impl ReferenceEdge {
    /// Human-readable description of the blocking reference,
    /// e.g. "categories reference this billboard".
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "{} reference this {}",
            self.dependent.plural(),
            self.target.as_str()
        )
    }

    /// What the caller has to do before retrying the delete.
    #[must_use]
    pub fn hint(&self) -> String {
        format!(
            "Remove all {} using this {} first.",
            self.dependent.plural(),
            self.target.as_str()
        )
    }

    /// Name of the foreign-key constraint backing this edge,
    /// e.g. `category_billboard_id_fkey`.
    #[must_use]
    pub fn constraint_name(&self) -> String {
        format!(
            "{}_{}_id_fkey",
            self.dependent.as_str(),
            self.target.as_str()
        )
    }
}

/// Find the edge backing a foreign-key constraint, among the reference
/// edges and the store edges.
#[must_use]
pub fn edge_for_constraint(name: &str) -> Option<ReferenceEdge> {
    REFERENCE_EDGES
        .iter()
        .copied()
        .chain(store_edges())
        .find(|edge| edge.constraint_name() == name)
}

const fn restrict(dependent: EntityKind, target: EntityKind, field: &'static str) -> ReferenceEdge {
    ReferenceEdge {
        dependent,
        target,
        field,
        cardinality: Cardinality::One,
        on_delete: DeletePolicy::Restrict,
    }
}

/// The reference edges between scoped entities.
///
/// Store ownership edges (`* -> Store`) are not listed here; see
/// [`store_edges`].
pub const REFERENCE_EDGES: [ReferenceEdge; 5] = [
    restrict(EntityKind::Category, EntityKind::Billboard, "billboardId"),
    restrict(EntityKind::Product, EntityKind::Category, "categoryId"),
    restrict(EntityKind::Product, EntityKind::Color, "colorId"),
    restrict(EntityKind::Product, EntityKind::Size, "sizeId"),
    ReferenceEdge {
        dependent: EntityKind::Image,
        target: EntityKind::Product,
        field: "productId",
        cardinality: Cardinality::One,
        on_delete: DeletePolicy::Cascade,
    },
];

/// Edges whose deletion policy is restrict and whose target is `target`.
pub fn restricting_edges(target: EntityKind) -> impl Iterator<Item = &'static ReferenceEdge> {
    REFERENCE_EDGES
        .iter()
        .filter(move |edge| edge.target == target && edge.on_delete == DeletePolicy::Restrict)
}

/// The `storeId` edges from every scoped kind to [`EntityKind::Store`].
///
/// A store cannot be deleted while any of these has a dependent row.
pub fn store_edges() -> impl Iterator<Item = ReferenceEdge> {
    EntityKind::STORE_SCOPED
        .into_iter()
        .map(|dependent| restrict(dependent, EntityKind::Store, "storeId"))
}
