//! Traversal policies: visited-set cycle suppression and the level bound.
//!
//! Both are trivial on their own but carry the invariants the builder
//! relies on, so they are factored out and tested independently.

use std::collections::HashSet;

use crate::types::ObjectId;

/// The set of object ids already placed into the result graph.
///
/// Seeded with the traversal root, so self-references and cycles back to
/// the root are filtered by the same rule as any other revisit: the
/// first (shortest) discovery of an id wins, later sightings are
/// silently dropped.
#[derive(Debug)]
pub struct VisitedSet {
    seen: HashSet<ObjectId>,
}

impl VisitedSet {
    /// Create a visited set pre-seeded with the traversal root.
    #[must_use]
    pub fn seeded(root: ObjectId) -> Self {
        let mut seen = HashSet::new();
        seen.insert(root);
        Self { seen }
    }

    /// Record a sighting of `id`, returning `true` only on first visit.
    pub fn first_visit(&mut self, id: ObjectId) -> bool {
        self.seen.insert(id)
    }

    /// Number of distinct ids seen, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Always false: the set is seeded at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Maximum traversal depth.
///
/// Objects whose discovery would exceed the limit are invisible to the
/// caller, not merely unexpanded: expansion stops at nodes that already
/// sit at the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelLimit(pub u32);

impl LevelLimit {
    /// Whether a node at `level` may still be expanded.
    #[must_use]
    pub fn may_expand(self, level: u32) -> bool {
        level < self.0
    }
}

impl Default for LevelLimit {
    fn default() -> Self {
        Self(super::DEFAULT_MAX_LEVEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn visited_set_is_seeded_with_root() {
        let mut visited = VisitedSet::seeded(ObjectId(1));
        assert_eq!(visited.len(), 1);
        assert!(!visited.is_empty());

        // The root never counts as a first visit
        assert!(!visited.first_visit(ObjectId(1)));
    }

    #[test]
    fn first_visit_true_once_per_id() {
        let mut visited = VisitedSet::seeded(ObjectId(1));

        assert!(visited.first_visit(ObjectId(2)));
        assert!(!visited.first_visit(ObjectId(2)));
        assert!(visited.first_visit(ObjectId(3)));
        assert_eq!(visited.len(), 3);
    }

    #[rstest]
    #[case(0, true)]
    #[case(9, true)]
    #[case(10, false)]
    #[case(11, false)]
    fn default_limit_stops_expansion_at_ten(#[case] level: u32, #[case] expandable: bool) {
        assert_eq!(LevelLimit::default().may_expand(level), expandable);
    }

    #[rstest]
    #[case(1, 0, true)]
    #[case(1, 1, false)]
    #[case(0, 0, false)]
    fn custom_limit_compares_strictly(
        #[case] limit: u32,
        #[case] level: u32,
        #[case] expandable: bool,
    ) {
        assert_eq!(LevelLimit(limit).may_expand(level), expandable);
    }
}
