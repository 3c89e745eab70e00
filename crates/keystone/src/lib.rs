//! # Keystone: Schema Dependents Analysis
//!
//! Keystone answers "if I drop this table, which schema objects break?"
//! It computes, for a table in a relational-database catalog, every
//! object (table or constraint) that transitively depends on it through
//! foreign-key and ownership relationships, annotated with its distance
//! from the root. The result backs impact previews ahead of destructive
//! schema changes.
//!
//! ## Design Philosophy
//!
//! - **Graph core, catalog collaborator** - the traversal owns the
//!   algorithm; raw edge facts come from a [`CatalogReader`]
//! - **Levels are shortest distances** - BFS with a global visited set,
//!   so revisits, cycles and self-references are absorbed, never errors
//! - **Fresh per query** - no state survives a traversal; concurrent
//!   independent queries cannot interfere
//! - **Embeddable** - library only; no CLI or transport surface
//!
//! ## Quick Start
//!
//! ```
//! use keystone::{Catalog, ConstraintKind};
//!
//! let mut catalog = Catalog::open_in_memory()?;
//! let authors = catalog.create_table("authors")?;
//! let books = catalog.create_table("books")?;
//! catalog.add_constraint(books, "books_author_fkey",
//!     ConstraintKind::ForeignKey, Some(authors))?;
//!
//! // Everything that breaks if `authors` is dropped
//! let graph = catalog.dependents_graph(authors, None)?;
//! assert_eq!(graph.len(), 2); // the books table and its foreign key
//! # Ok::<(), keystone::Error>(())
//! ```

mod catalog;
mod error;
mod graph;
mod types;

pub use catalog::{Catalog, CatalogReader};
pub use error::{Error, Result};
pub use graph::{get_dependents_graph, LevelLimit, VisitedSet, DEFAULT_MAX_LEVEL};
pub use types::{ConstraintKind, DependentRecord, ObjectId, ObjectKind, ObjectRef};
