//! Lookup structures derived once from the dataset.
//!
//! Everything is stored as positions into the catalog's vectors, so the index
//! owns no node data and never needs updating: the catalog is immutable.

use std::collections::HashMap;

use serde::Serialize;

use crate::{CatalogData, Edge, Node, Relation};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Outgoing,
    Incoming,
}

/// An edge seen from one of its endpoints.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Connection<'a> {
    pub node: &'a Node,
    pub relation: Relation,
    pub direction: Direction,
}

#[derive(Debug, Clone, Default)]
pub struct GraphIndex {
    node_by_id: HashMap<String, usize>,
    playbook_by_id: HashMap<String, usize>,
    rule_by_id: HashMap<String, usize>,
    /// parent id -> child node positions, in edge order
    children_of: HashMap<String, Vec<usize>>,
    /// child id -> first BELONGS_TO edge position pointing at it
    parent_edge: HashMap<String, usize>,
    /// node id -> (edge position, direction as seen from that node)
    edges_touching: HashMap<String, Vec<(usize, Direction)>>,
    /// how many BELONGS_TO edges point at each node
    parent_counts: HashMap<String, usize>,
}

impl GraphIndex {
    /// Build the index. Returns the first duplicated node id as `Err`.
    pub(crate) fn build(data: &CatalogData) -> Result<Self, String> {
        let mut index = GraphIndex::default();

        for (pos, node) in data.nodes.iter().enumerate() {
            if index.node_by_id.insert(node.id.clone(), pos).is_some() {
                return Err(node.id.clone());
            }
        }
        for (pos, playbook) in data.playbooks.iter().enumerate() {
            index.playbook_by_id.entry(playbook.id.clone()).or_insert(pos);
        }
        for (pos, rule) in data.decision_rules.iter().enumerate() {
            index.rule_by_id.entry(rule.id.clone()).or_insert(pos);
        }

        for (pos, edge) in data.edges.iter().enumerate() {
            index
                .edges_touching
                .entry(edge.from.clone())
                .or_default()
                .push((pos, Direction::Outgoing));
            if edge.to != edge.from {
                index
                    .edges_touching
                    .entry(edge.to.clone())
                    .or_default()
                    .push((pos, Direction::Incoming));
            }

            if edge.relation != Relation::BelongsTo {
                continue;
            }
            *index.parent_counts.entry(edge.to.clone()).or_default() += 1;
            index.parent_edge.entry(edge.to.clone()).or_insert(pos);
            if let Some(&child) = index.node_by_id.get(&edge.to) {
                index.children_of.entry(edge.from.clone()).or_default().push(child);
            }
        }

        Ok(index)
    }

    pub fn node_position(&self, id: &str) -> Option<usize> {
        self.node_by_id.get(id).copied()
    }

    pub fn playbook_position(&self, id: &str) -> Option<usize> {
        self.playbook_by_id.get(id).copied()
    }

    pub fn rule_position(&self, id: &str) -> Option<usize> {
        self.rule_by_id.get(id).copied()
    }

    /// Positions of the direct children of `id`. Empty when it has none or is unknown.
    pub fn children_of(&self, id: &str) -> &[usize] {
        self.children_of.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Position of the BELONGS_TO edge linking `id` to its parent.
    pub fn parent_edge(&self, id: &str) -> Option<usize> {
        self.parent_edge.get(id).copied()
    }

    pub fn edges_touching(&self, id: &str) -> &[(usize, Direction)] {
        self.edges_touching.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn parent_counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.parent_counts.iter().map(|(id, n)| (id.as_str(), *n))
    }
}

/// Resolve the far endpoint of an edge seen from one side.
pub(crate) fn far_end(edge: &Edge, direction: Direction) -> &str {
    match direction {
        Direction::Outgoing => &edge.to,
        Direction::Incoming => &edge.from,
    }
}
