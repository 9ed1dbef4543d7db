//! Property-based tests for the visibility and search contracts.
//!
//! - The visible edge set always equals the edges whose endpoints are both visible
//! - Expanding the same node twice never reveals anything the second time
//! - Short queries never return results
//! - Generated catalogs with dangling, self-loop, duplicate and cyclic edges
//!   keep the edge invariant and finite ancestor paths

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::path::ancestor_path;
    use crate::search::{search, SearchOutcome, DEFAULT_SEARCH_CAP};
    use crate::testdata;
    use crate::visibility::{ExpandReason, VisibilityState};
    use crate::{Catalog, CatalogData, Edge, Node, NodeType, Relation};

    #[derive(Debug, Clone)]
    enum Op {
        Expand(usize),
        ExpandTo(usize),
        ExpandAll,
        Reset,
    }

    // Ids include one the catalog does not know.
    const IDS: [&str; 10] = [
        "L0",
        "L1_BUILD",
        "L1_AI",
        "C_DB",
        "C_AGENTS",
        "P_CRM_SIMPLE",
        "T_SUPABASE",
        "T_POSTGRES",
        "K_RAG",
        "UNKNOWN",
    ];

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0..IDS.len()).prop_map(Op::Expand),
            3 => (0..IDS.len()).prop_map(Op::ExpandTo),
            1 => Just(Op::ExpandAll),
            1 => Just(Op::Reset),
        ]
    }

    fn apply(state: &mut VisibilityState, catalog: &Catalog, op: &Op, ids: &[&str]) {
        match *op {
            Op::Expand(i) => {
                state.expand(catalog, ids[i % ids.len()]);
            }
            Op::ExpandTo(i) => {
                state.expand_to(catalog, ids[i % ids.len()]);
            }
            Op::ExpandAll => {
                state.expand_all(catalog);
            }
            Op::Reset => state.reset(catalog),
        }
    }

    // Node ids of generated catalogs; GHOST is only ever an edge endpoint.
    const POOL: [&str; 6] = ["A", "B", "C", "D", "E", "GHOST"];

    fn relation() -> impl Strategy<Value = Relation> {
        prop_oneof![
            3 => Just(Relation::BelongsTo),
            1 => Just(Relation::Requires),
            1 => Just(Relation::Uses),
            1 => Just(Relation::RecommendedWith),
        ]
    }

    /// Arbitrary wiring over five nodes: edges may dangle, loop onto their own
    /// node, repeat, form BELONGS_TO cycles or give a node several parents.
    fn messy_catalog() -> impl Strategy<Value = Catalog> {
        let edge = (0..POOL.len(), 0..POOL.len(), relation());
        (
            prop::collection::vec(0u32..4, POOL.len() - 1),
            prop::collection::vec(edge, 0..16),
            any::<bool>(),
        )
            .prop_map(|(levels, wiring, repeat_first)| {
                let nodes = levels
                    .iter()
                    .enumerate()
                    .map(|(i, &level)| Node {
                        id: POOL[i].to_string(),
                        name: POOL[i].to_string(),
                        node_type: NodeType::Concept,
                        level,
                        summary: String::new(),
                        details: Default::default(),
                        tags: vec![],
                    })
                    .collect();
                let mut edges: Vec<Edge> = wiring
                    .into_iter()
                    .map(|(from, to, relation)| Edge {
                        from: POOL[from].to_string(),
                        to: POOL[to].to_string(),
                        relation,
                    })
                    .collect();
                if repeat_first {
                    if let Some(first) = edges.first().cloned() {
                        edges.push(first);
                    }
                }
                Catalog::from_data(CatalogData {
                    nodes,
                    edges,
                    ..Default::default()
                })
                .unwrap()
            })
    }

    proptest! {
        /// The edge invariant holds on malformed wiring too.
        #[test]
        fn messy_catalogs_keep_visible_edges_consistent(
            catalog in messy_catalog(),
            ops in prop::collection::vec(op(), 0..24),
            level in 0u32..4
        ) {
            let mut state = VisibilityState::initial(&catalog, level);
            prop_assert!(state.is_consistent(&catalog));
            for op in &ops {
                apply(&mut state, &catalog, op, &POOL);
                prop_assert!(state.is_consistent(&catalog), "after {:?}", op);
            }
            let graph = state.visible_graph(&catalog);
            prop_assert!(graph.edges.iter().all(|e| e.from != "GHOST" && e.to != "GHOST"));
        }

        /// Every known node has a finite path ending at itself with no repeats.
        #[test]
        fn messy_catalogs_have_finite_ancestor_paths(catalog in messy_catalog()) {
            for node in catalog.nodes() {
                let path = ancestor_path(&catalog, &node.id);
                prop_assert_eq!(&path.last().unwrap().id, &node.id);
                prop_assert!(path.len() <= catalog.nodes().len());
                let mut ids: Vec<&str> = path.iter().map(|n| n.id.as_str()).collect();
                ids.sort_unstable();
                ids.dedup();
                prop_assert_eq!(ids.len(), path.len());
            }
            prop_assert!(ancestor_path(&catalog, "GHOST").is_empty());
        }

        /// Edge materialization holds after any operation sequence.
        #[test]
        fn visible_edges_follow_visible_nodes(
            ops in prop::collection::vec(op(), 0..24),
            level in 0u32..4
        ) {
            let catalog = testdata::catalog();
            let mut state = VisibilityState::initial(&catalog, level);
            prop_assert!(state.is_consistent(&catalog));

            for op in &ops {
                apply(&mut state, &catalog, op, &IDS);
                prop_assert!(state.is_consistent(&catalog), "after {:?}", op);
            }
        }

        /// A repeated expansion is a no-op.
        #[test]
        fn expand_is_idempotent(
            prefix in prop::collection::vec(op(), 0..8),
            target in 0..IDS.len()
        ) {
            let catalog = testdata::catalog();
            let mut state = VisibilityState::initial(&catalog, 1);
            for op in &prefix {
                apply(&mut state, &catalog, op, &IDS);
            }

            let first = state.expand(&catalog, IDS[target]);
            let snapshot = state.clone();
            let second = state.expand(&catalog, IDS[target]);

            prop_assert_eq!(second.added_count, 0);
            if first.reason == ExpandReason::NoChildren {
                prop_assert_eq!(second.reason, ExpandReason::NoChildren);
            } else {
                prop_assert_eq!(second.reason, ExpandReason::AlreadyVisible);
            }
            prop_assert_eq!(state, snapshot);
        }

        /// Anything under two characters is rejected before matching.
        #[test]
        fn short_queries_never_match(q in "\\PC{0,1}") {
            let catalog = testdata::catalog();
            prop_assert_eq!(search(&catalog, &q, DEFAULT_SEARCH_CAP), SearchOutcome::TooShort);
        }

        /// Results never exceed the cap.
        #[test]
        fn results_respect_the_cap(q in "[a-z]{2,4}", cap in 0usize..5) {
            let catalog = testdata::catalog();
            prop_assert!(search(&catalog, &q, cap).nodes().len() <= cap);
        }
    }
}
