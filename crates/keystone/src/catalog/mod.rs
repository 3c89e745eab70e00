//! Catalog access for schema dependents analysis.
//!
//! The graph builder never touches storage directly; it sees the catalog
//! through the [`CatalogReader`] trait, which supplies raw edge facts
//! (constraint ownership and foreign-key referencers) and nothing else.
//! The SQLite-backed [`Catalog`] is the production implementation.
//!
//! ## Module Structure
//!
//! - `schema` - Catalog schema (DDL)
//! - `sqlite` - `Catalog`: rusqlite-backed storage and `CatalogReader` impl

mod schema;
mod sqlite;

pub(crate) use schema::SCHEMA;
pub use sqlite::Catalog;

use crate::error::Result;
use crate::types::{ObjectId, ObjectRef};

/// Read access to the schema catalog.
///
/// Implementations must reflect the catalog state at call time; the graph
/// builder tolerates no staleness and performs no retries, so failures
/// propagate unchanged to the caller.
pub trait CatalogReader {
    /// Constraints defined directly on the given table, in any order.
    fn owned_constraints(&self, table: ObjectId) -> Result<Vec<ObjectRef>>;

    /// Distinct tables holding at least one foreign key whose target is
    /// the given table.
    ///
    /// A table with several foreign keys pointing at the same target
    /// still appears once; each such constraint surfaces separately via
    /// [`Self::owned_constraints`] when the referencing table is expanded.
    fn referencing_tables(&self, table: ObjectId) -> Result<Vec<ObjectRef>>;
}
