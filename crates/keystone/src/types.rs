//! Domain types for schema dependents analysis.
//!
//! These types represent the core domain model:
//! - **Identity**: `ObjectId` — one id space shared by every schema object
//! - **References**: `ObjectRef` — id plus kind tag, the unit the graph traverses
//! - **Results**: `DependentRecord` — one discovered dependent with its level
//!
//! ## Design Decisions
//!
//! | Decision | Choice | Rationale |
//! |----------|--------|-----------|
//! | Object kind | Enum not String | Closed-but-extensible; new kinds require a variant |
//! | Edges | Not materialized | Nodes referenced only by id; no cyclic ownership |
//! | `level` | Stored on the record | BFS shortest distance; deterministic per root |

use serde::{Deserialize, Serialize};

/// A strongly-typed schema object id.
///
/// Every catalog object (table or constraint) draws its id from a single
/// shared sequence, so an `ObjectId` alone is enough to deduplicate
/// across kinds during traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub i64);

impl ObjectId {
    /// Extract the raw i64 value.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for ObjectId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Kinds of schema objects that can appear in a dependents graph.
///
/// The traversal recurses only on `Table`; constraints are terminal.
/// Adding an expandable kind requires a variant here and an arm in the
/// builder's recurse branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// A relation that owns constraints and can be referenced by foreign keys
    Table,
    /// A constraint defined on a table (terminal: never expanded)
    Constraint,
}

impl ObjectKind {
    /// Convert to database string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Constraint => "constraint",
        }
    }
}

/// Constraint categories stored in the catalog.
///
/// Only `ForeignKey` constraints carry a referent and produce reverse
/// (referenced-table → referencing-table) edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// Primary key constraint
    PrimaryKey,
    /// Unique constraint
    Unique,
    /// Foreign key constraint; references another (or the same) table
    ForeignKey,
}

impl ConstraintKind {
    /// Convert to database string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrimaryKey => "primary_key",
            Self::Unique => "unique",
            Self::ForeignKey => "foreign_key",
        }
    }
}

/// A reference to a schema object: its id and kind tag.
///
/// Serializes as `{ "objid": <id>, "type": <kind> }`, the shape exposed
/// to callers in response payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    /// The object's catalog id.
    #[serde(rename = "objid")]
    pub id: ObjectId,
    /// The object's kind tag.
    #[serde(rename = "type")]
    pub kind: ObjectKind,
}

impl ObjectRef {
    /// Reference a table by id.
    #[must_use]
    pub fn table(id: ObjectId) -> Self {
        Self {
            id,
            kind: ObjectKind::Table,
        }
    }

    /// Reference a constraint by id.
    #[must_use]
    pub fn constraint(id: ObjectId) -> Self {
        Self {
            id,
            kind: ObjectKind::Constraint,
        }
    }
}

/// One discovered dependent in a dependents graph.
///
/// `parent_obj` is the object whose expansion produced `obj`; `level` is
/// the BFS shortest-path distance from the traversal root (direct
/// dependents have level 1, the root itself is never emitted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependentRecord {
    /// The dependent object.
    pub obj: ObjectRef,
    /// The object whose expansion discovered `obj`.
    pub parent_obj: ObjectRef,
    /// BFS distance from the root; always >= 1.
    pub level: u32,
}
