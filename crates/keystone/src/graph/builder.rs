//! Breadth-first dependents traversal.

use std::collections::VecDeque;

use super::policy::{LevelLimit, VisitedSet};
use crate::catalog::{Catalog, CatalogReader};
use crate::error::{Error, Result};
use crate::types::{DependentRecord, ObjectId, ObjectKind, ObjectRef};

/// Compute the dependents graph of a root table.
///
/// Walks the reference-dependency relation breadth-first: each dequeued
/// table contributes its owned constraints and the tables that hold a
/// foreign key referencing it. Survivors of the visited-set filter are
/// recorded with `level = parent level + 1`; only tables are enqueued
/// for further expansion (constraints are terminal). Nodes already at
/// `max_level` are not expanded, so objects beyond the bound never
/// appear in the result.
///
/// The root is assumed to exist and to be a table; an unknown root
/// surfaces as whatever the reader reports (typically empty results or
/// a reader-level error). Reader failures propagate unchanged.
///
/// `max_level` defaults to [`DEFAULT_MAX_LEVEL`](super::DEFAULT_MAX_LEVEL).
pub fn get_dependents_graph<C: CatalogReader + ?Sized>(
    root_id: ObjectId,
    catalog: &C,
    max_level: Option<u32>,
) -> Result<Vec<DependentRecord>> {
    let limit = max_level.map_or_else(LevelLimit::default, LevelLimit);
    let mut visited = VisitedSet::seeded(root_id);
    let mut queue: VecDeque<(ObjectRef, u32)> = VecDeque::new();
    let mut result = Vec::new();

    queue.push_back((ObjectRef::table(root_id), 0));

    while let Some((current, level)) = queue.pop_front() {
        if !limit.may_expand(level) {
            continue;
        }

        // Constraints first is a convention, not a correctness requirement
        let mut direct = catalog.owned_constraints(current.id)?;
        direct.extend(catalog.referencing_tables(current.id)?);

        tracing::debug!(
            oid = current.id.as_i64(),
            level,
            candidates = direct.len(),
            "Expanding dependents"
        );

        for candidate in direct {
            // Revisits are already recorded at an equal or shorter
            // distance (or are the root itself); dropping them here is
            // what suppresses cycles and self-references
            if !visited.first_visit(candidate.id) {
                continue;
            }

            result.push(DependentRecord {
                obj: candidate,
                parent_obj: current,
                level: level + 1,
            });

            if candidate.kind == ObjectKind::Table {
                queue.push_back((candidate, level + 1));
            }
        }
    }

    tracing::debug!(
        root = root_id.as_i64(),
        records = result.len(),
        "Dependents graph complete"
    );
    Ok(result)
}

impl Catalog {
    /// Compute the dependents graph of a table in this catalog.
    ///
    /// Unlike the free function, this verifies that `root` names a table
    /// before traversing.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if `root` is unknown or not a table;
    /// catalog read failures propagate unchanged.
    pub fn dependents_graph(
        &self,
        root: ObjectId,
        max_level: Option<u32>,
    ) -> Result<Vec<DependentRecord>> {
        match self.object_ref(root)? {
            Some(obj) if obj.kind == ObjectKind::Table => {
                get_dependents_graph(root, self, max_level)
            }
            Some(obj) => Err(Error::NotFound(format!(
                "table oid {} (object is a {})",
                root.as_i64(),
                obj.kind.as_str()
            ))),
            None => Err(Error::NotFound(format!("table oid {}", root.as_i64()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet, VecDeque};

    use proptest::prelude::*;

    use super::*;

    /// Map-backed reader for exercising the traversal without storage.
    #[derive(Debug, Default)]
    struct MemoryCatalog {
        constraints: HashMap<ObjectId, Vec<ObjectRef>>,
        referencers: HashMap<ObjectId, Vec<ObjectRef>>,
    }

    impl MemoryCatalog {
        fn constraint(&mut self, owner: i64, oid: i64) {
            self.constraints
                .entry(ObjectId(owner))
                .or_default()
                .push(ObjectRef::constraint(ObjectId(oid)));
        }

        /// Record that `to` holds a foreign key referencing `from`.
        fn reference(&mut self, from: i64, to: i64) {
            let entry = self.referencers.entry(ObjectId(from)).or_default();
            let table = ObjectRef::table(ObjectId(to));
            if !entry.contains(&table) {
                entry.push(table);
            }
        }
    }

    impl CatalogReader for MemoryCatalog {
        fn owned_constraints(&self, table: ObjectId) -> Result<Vec<ObjectRef>> {
            Ok(self.constraints.get(&table).cloned().unwrap_or_default())
        }

        fn referencing_tables(&self, table: ObjectId) -> Result<Vec<ObjectRef>> {
            Ok(self.referencers.get(&table).cloned().unwrap_or_default())
        }
    }

    /// Reader whose every call fails, for error-propagation tests.
    struct BrokenCatalog;

    impl CatalogReader for BrokenCatalog {
        fn owned_constraints(&self, _table: ObjectId) -> Result<Vec<ObjectRef>> {
            Err(Error::Internal("connection lost".to_string()))
        }

        fn referencing_tables(&self, _table: ObjectId) -> Result<Vec<ObjectRef>> {
            Err(Error::Internal("connection lost".to_string()))
        }
    }

    fn levels_of(records: &[DependentRecord]) -> HashMap<ObjectId, u32> {
        records.iter().map(|r| (r.obj.id, r.level)).collect()
    }

    #[test]
    fn direct_dependents_have_level_one() {
        let mut cat = MemoryCatalog::default();
        cat.constraint(1, 10);
        cat.constraint(1, 11);
        cat.reference(1, 2);

        let graph = get_dependents_graph(ObjectId(1), &cat, None).unwrap();

        assert_eq!(graph.len(), 3);
        assert!(graph.iter().all(|r| r.level == 1));
        assert!(graph.iter().all(|r| r.parent_obj == ObjectRef::table(ObjectId(1))));
    }

    #[test]
    fn constraints_are_terminal() {
        let mut cat = MemoryCatalog::default();
        cat.constraint(1, 10);
        // Edges out of a constraint id must never be followed
        cat.reference(10, 3);

        let graph = get_dependents_graph(ObjectId(1), &cat, None).unwrap();

        let levels = levels_of(&graph);
        assert_eq!(levels.get(&ObjectId(10)), Some(&1));
        assert!(!levels.contains_key(&ObjectId(3)));
    }

    #[test]
    fn chain_levels_are_distances() {
        let mut cat = MemoryCatalog::default();
        cat.reference(1, 2);
        cat.reference(2, 3);
        cat.reference(3, 4);

        let graph = get_dependents_graph(ObjectId(1), &cat, None).unwrap();

        let levels = levels_of(&graph);
        assert_eq!(levels.get(&ObjectId(2)), Some(&1));
        assert_eq!(levels.get(&ObjectId(3)), Some(&2));
        assert_eq!(levels.get(&ObjectId(4)), Some(&3));
    }

    #[test]
    fn diamond_records_shortest_distance_once() {
        // 1 -> 2 -> 4 and 1 -> 4: table 4 reachable two ways
        let mut cat = MemoryCatalog::default();
        cat.reference(1, 2);
        cat.reference(1, 4);
        cat.reference(2, 4);

        let graph = get_dependents_graph(ObjectId(1), &cat, None).unwrap();

        let four: Vec<_> = graph.iter().filter(|r| r.obj.id == ObjectId(4)).collect();
        assert_eq!(four.len(), 1, "each object appears at most once");
        assert_eq!(four[0].level, 1, "first (shortest) discovery wins");
        assert_eq!(four[0].parent_obj.id, ObjectId(1));
    }

    #[test]
    fn self_reference_never_emitted() {
        let mut cat = MemoryCatalog::default();
        cat.reference(1, 1);
        cat.constraint(1, 10);

        let graph = get_dependents_graph(ObjectId(1), &cat, None).unwrap();

        assert!(graph.iter().all(|r| r.obj.id != ObjectId(1)));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn mutual_reference_keeps_root_first_direction() {
        // 1 -> 2 and 2 -> 1; from root 1, the back edge is suppressed
        let mut cat = MemoryCatalog::default();
        cat.reference(1, 2);
        cat.reference(2, 1);

        let graph = get_dependents_graph(ObjectId(1), &cat, None).unwrap();

        assert_eq!(graph.len(), 1);
        assert_eq!(graph[0].obj.id, ObjectId(2));
        assert_eq!(graph[0].level, 1);
    }

    #[test]
    fn max_level_zero_yields_empty_graph() {
        let mut cat = MemoryCatalog::default();
        cat.constraint(1, 10);
        cat.reference(1, 2);

        let graph = get_dependents_graph(ObjectId(1), &cat, Some(0)).unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn nodes_at_the_limit_are_recorded_but_not_expanded() {
        let mut cat = MemoryCatalog::default();
        cat.reference(1, 2);
        cat.reference(2, 3);
        cat.constraint(2, 20);

        let graph = get_dependents_graph(ObjectId(1), &cat, Some(1)).unwrap();

        let levels = levels_of(&graph);
        assert_eq!(levels.get(&ObjectId(2)), Some(&1));
        assert!(!levels.contains_key(&ObjectId(3)), "beyond the bound");
        assert!(!levels.contains_key(&ObjectId(20)), "beyond the bound");
    }

    #[test]
    fn reader_failures_propagate_unchanged() {
        let err = get_dependents_graph(ObjectId(1), &BrokenCatalog, None).unwrap_err();
        assert!(matches!(err, Error::Internal(_)), "got: {err}");
    }

    #[test]
    fn isolated_root_yields_empty_graph() {
        let cat = MemoryCatalog::default();
        let graph = get_dependents_graph(ObjectId(1), &cat, None).unwrap();
        assert!(graph.is_empty());
    }

    /// Reference shortest-path distances over the table-reference relation.
    fn bfs_distances(root: usize, edges: &[(usize, usize)], tables: usize) -> Vec<Option<u32>> {
        let mut adj = vec![Vec::new(); tables];
        for &(from, to) in edges {
            adj[from].push(to);
        }

        let mut dist = vec![None; tables];
        dist[root] = Some(0);
        let mut queue = VecDeque::from([root]);
        while let Some(node) = queue.pop_front() {
            let d = dist[node].unwrap();
            for &next in &adj[node] {
                if dist[next].is_none() {
                    dist[next] = Some(d + 1);
                    queue.push_back(next);
                }
            }
        }
        dist
    }

    proptest! {
        /// Levels equal BFS shortest-path distance, each id appears at
        /// most once, the root never appears, and every parent sits one
        /// level above its child along a real edge.
        #[test]
        fn levels_match_reference_bfs(
            edges in proptest::collection::vec((0..12usize, 0..12usize), 0..48),
            max_level in 1u32..12,
        ) {
            const TABLES: usize = 12;
            let mut cat = MemoryCatalog::default();
            for &(from, to) in &edges {
                #[allow(clippy::cast_possible_wrap)]
                cat.reference(from as i64 + 1, to as i64 + 1);
            }

            let graph = get_dependents_graph(ObjectId(1), &cat, Some(max_level)).unwrap();
            let dist = bfs_distances(0, &edges, TABLES);
            let edge_set: HashSet<(i64, i64)> = edges
                .iter()
                .map(|&(f, t)| (f as i64 + 1, t as i64 + 1))
                .collect();

            let mut seen = HashSet::new();
            for record in &graph {
                prop_assert!(record.obj.id != ObjectId(1), "root must not appear");
                prop_assert!(seen.insert(record.obj.id), "duplicate id in graph");
                prop_assert!(record.level <= max_level);

                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let idx = (record.obj.id.as_i64() - 1) as usize;
                prop_assert_eq!(dist[idx], Some(record.level), "level is BFS distance");

                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let parent_idx = (record.parent_obj.id.as_i64() - 1) as usize;
                prop_assert_eq!(dist[parent_idx], Some(record.level - 1));
                prop_assert!(
                    edge_set.contains(&(record.parent_obj.id.as_i64(), record.obj.id.as_i64())),
                    "parent edge must exist in the input"
                );
            }

            // Completeness: everything within the bound is present
            for (idx, d) in dist.iter().enumerate() {
                if idx == 0 {
                    continue;
                }
                if let Some(d) = *d {
                    if d <= max_level {
                        #[allow(clippy::cast_possible_wrap)]
                        let id = ObjectId(idx as i64 + 1);
                        prop_assert!(seen.contains(&id), "table {} at distance {} missing", idx + 1, d);
                    }
                }
            }
        }
    }
}
