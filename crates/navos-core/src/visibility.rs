//! Progressive reveal of the catalog graph.
//!
//! `VisibilityState` is the only thing that mutates during exploration. The
//! edge set is never edited directly: it follows from the node set, and every
//! operation keeps `visible_edges == { e : e.from visible && e.to visible }`.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::index::far_end;
use crate::path::ancestor_path;
use crate::{Catalog, Edge, Node};

/// Why an expansion did or did not reveal anything.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpandReason {
    /// At least one child was revealed.
    #[serde(rename = "NONE")]
    Expanded,
    /// The node has no children (or is unknown).
    NoChildren,
    /// Every child was already visible.
    AlreadyVisible,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExpandOutcome {
    pub added_count: usize,
    pub reason: ExpandReason,
}

/// Snapshot of what the presentation layer should draw, in catalog order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VisibleGraph<'a> {
    pub nodes: Vec<&'a Node>,
    pub edges: Vec<&'a Edge>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct VisibilityStats {
    pub nodes: usize,
    pub edges: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityState {
    initial_max_level: u32,
    visible_nodes: HashSet<String>,
    /// Positions into `Catalog::edges`.
    visible_edges: BTreeSet<usize>,
    expanded: HashSet<String>,
}

impl VisibilityState {
    /// Reveal every node with `level <= initial_max_level`.
    pub fn initial(catalog: &Catalog, initial_max_level: u32) -> Self {
        let mut state = VisibilityState {
            initial_max_level,
            visible_nodes: HashSet::new(),
            visible_edges: BTreeSet::new(),
            expanded: HashSet::new(),
        };
        state.seed(catalog);
        state
    }

    fn seed(&mut self, catalog: &Catalog) {
        let max = self.initial_max_level;
        let roots: Vec<&str> = catalog
            .nodes()
            .iter()
            .filter(|n| n.level <= max)
            .map(|n| n.id.as_str())
            .collect();
        self.reveal(catalog, roots);
    }

    /// Reveal the direct children of `id`.
    pub fn expand(&mut self, catalog: &Catalog, id: &str) -> ExpandOutcome {
        let children: Vec<&str> = catalog.children_of(id).map(|n| n.id.as_str()).collect();
        if children.is_empty() {
            debug!(node = id, "nothing to expand");
            return ExpandOutcome {
                added_count: 0,
                reason: ExpandReason::NoChildren,
            };
        }

        self.expanded.insert(id.to_string());
        let added_count = self.reveal(catalog, children);
        let reason = if added_count > 0 {
            ExpandReason::Expanded
        } else {
            ExpandReason::AlreadyVisible
        };
        debug!(node = id, added_count, ?reason, "expanded");
        ExpandOutcome { added_count, reason }
    }

    /// Reveal `id` together with its whole ancestry. Returns how many nodes were new.
    pub fn expand_to(&mut self, catalog: &Catalog, id: &str) -> usize {
        let path: Vec<&str> = ancestor_path(catalog, id)
            .into_iter()
            .map(|n| n.id.as_str())
            .collect();
        let added = self.reveal(catalog, path);
        debug!(node = id, added, "expanded to node");
        added
    }

    /// Reveal the entire catalog.
    pub fn expand_all(&mut self, catalog: &Catalog) -> usize {
        let all: Vec<&str> = catalog.nodes().iter().map(|n| n.id.as_str()).collect();
        let added = self.reveal(catalog, all);
        for id in &self.visible_nodes {
            if catalog.children_of(id).next().is_some() {
                self.expanded.insert(id.clone());
            }
        }
        added
    }

    /// Drop everything and reseed from the initial level threshold.
    pub fn reset(&mut self, catalog: &Catalog) {
        self.visible_nodes.clear();
        self.visible_edges.clear();
        self.expanded.clear();
        self.seed(catalog);
    }

    /// Insert nodes, then materialize edges between any visible pair that
    /// involves a newly inserted node.
    fn reveal<'a>(&mut self, catalog: &Catalog, ids: impl IntoIterator<Item = &'a str>) -> usize {
        let fresh: Vec<&str> = ids
            .into_iter()
            .filter(|id| catalog.contains(id) && self.visible_nodes.insert(id.to_string()))
            .collect();

        for id in &fresh {
            for &(pos, dir) in catalog.index().edges_touching(id) {
                let other = far_end(&catalog.edges()[pos], dir);
                if self.visible_nodes.contains(other) {
                    self.visible_edges.insert(pos);
                }
            }
        }
        fresh.len()
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visible_nodes.contains(id)
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn visible_graph<'a>(&self, catalog: &'a Catalog) -> VisibleGraph<'a> {
        VisibleGraph {
            nodes: catalog
                .nodes()
                .iter()
                .filter(|n| self.visible_nodes.contains(&n.id))
                .collect(),
            edges: self
                .visible_edges
                .iter()
                .map(|&pos| &catalog.edges()[pos])
                .collect(),
        }
    }

    pub fn stats(&self) -> VisibilityStats {
        VisibilityStats {
            nodes: self.visible_nodes.len(),
            edges: self.visible_edges.len(),
        }
    }

    /// Recompute the edge set from scratch and compare with the tracked one.
    pub fn is_consistent(&self, catalog: &Catalog) -> bool {
        let expected: BTreeSet<usize> = catalog
            .edges()
            .iter()
            .enumerate()
            .filter(|(_, e)| self.visible_nodes.contains(&e.from) && self.visible_nodes.contains(&e.to))
            .map(|(pos, _)| pos)
            .collect();
        expected == self.visible_edges
    }
}
