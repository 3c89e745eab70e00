//! Dependents-graph construction.
//!
//! This module provides the core of the crate: a breadth-first walk over
//! the reference-dependency relation supplied by a [`CatalogReader`],
//! producing every object that transitively depends on a root table,
//! annotated with its distance from the root.
//!
//! ## Design
//!
//! - BFS (not DFS) so `level` means true shortest distance
//! - A global visited set, seeded with the root, deduplicates revisits;
//!   cycles and self-references are absorbed by the same rule with no
//!   special cases
//! - Expressed as an explicit queue: memory stays bounded and no
//!   recursion-depth limits apply
//!
//! [`CatalogReader`]: crate::catalog::CatalogReader

mod builder;
mod policy;

pub use builder::get_dependents_graph;
pub use policy::{LevelLimit, VisitedSet};

/// Default maximum traversal depth.
///
/// Dependents further than this many reference steps from the root are
/// omitted from the graph. Can be overridden by passing an explicit
/// `max_level`.
pub const DEFAULT_MAX_LEVEL: u32 = 10;
