use std::collections::HashSet;

use tracing::{info, warn};

use crate::index::{far_end, Connection, Direction, GraphIndex};
use crate::path::walk_ancestors;
use crate::{CatalogData, CatalogError, CatalogIssue, DecisionRule, Edge, Node, NodeType, Playbook, Result};

/// The immutable dataset plus its index. Built once, then shared read-only
/// (wrap it in an `Arc` to hand it to several sessions).
#[derive(Debug, Clone)]
pub struct Catalog {
    data: CatalogData,
    index: GraphIndex,
}

impl Catalog {
    pub fn from_data(data: CatalogData) -> Result<Self> {
        let index = GraphIndex::build(&data).map_err(CatalogError::DuplicateNodeId)?;
        let catalog = Catalog { data, index };

        info!(
            nodes = catalog.data.nodes.len(),
            edges = catalog.data.edges.len(),
            playbooks = catalog.data.playbooks.len(),
            rules = catalog.data.decision_rules.len(),
            "catalog loaded"
        );
        for issue in catalog.validate() {
            warn!(%issue, "dataset issue");
        }
        Ok(catalog)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let data: CatalogData = serde_json::from_str(raw)?;
        Self::from_data(data)
    }

    pub fn data(&self) -> &CatalogData {
        &self.data
    }

    pub fn index(&self) -> &GraphIndex {
        &self.index
    }

    pub fn nodes(&self) -> &[Node] {
        &self.data.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.data.edges
    }

    pub fn playbooks(&self) -> &[Playbook] {
        &self.data.playbooks
    }

    pub fn rules(&self) -> &[DecisionRule] {
        &self.data.decision_rules
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.node_position(id).map(|pos| &self.data.nodes[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.node_position(id).is_some()
    }

    pub fn playbook(&self, id: &str) -> Option<&Playbook> {
        self.index.playbook_position(id).map(|pos| &self.data.playbooks[pos])
    }

    pub fn rule(&self, id: &str) -> Option<&DecisionRule> {
        self.index.rule_position(id).map(|pos| &self.data.decision_rules[pos])
    }

    /// Direct children of `id`, in edge order.
    pub fn children_of<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Node> + 'a {
        self.index
            .children_of(id)
            .iter()
            .map(move |&pos| &self.data.nodes[pos])
    }

    /// Id of the node `id` belongs to, if any. The parent may be missing from the catalog.
    pub fn parent_of(&self, id: &str) -> Option<&str> {
        self.index
            .parent_edge(id)
            .map(|pos| self.data.edges[pos].from.as_str())
    }

    pub fn edges_touching<'a>(
        &'a self,
        id: &str,
    ) -> impl Iterator<Item = (&'a Edge, Direction)> + 'a {
        self.index
            .edges_touching(id)
            .iter()
            .map(move |&(pos, dir)| (&self.data.edges[pos], dir))
    }

    /// Every edge touching `id`, resolved to the node on the other end.
    pub fn connections(&self, id: &str) -> Vec<Connection<'_>> {
        self.edges_touching(id)
            .filter_map(|(edge, direction)| {
                let node = self.node(far_end(edge, direction))?;
                Some(Connection {
                    node,
                    relation: edge.relation,
                    direction,
                })
            })
            .collect()
    }

    /// Check the dataset invariants the engine assumes but does not depend on.
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        for edge in &self.data.edges {
            if !self.contains(&edge.from) || !self.contains(&edge.to) {
                issues.push(CatalogIssue::DanglingEdge {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                });
            }
        }

        let mut multi: Vec<(&str, usize)> = self
            .index
            .parent_counts()
            .filter(|&(_, n)| n > 1)
            .collect();
        multi.sort();
        issues.extend(multi.into_iter().map(|(id, count)| CatalogIssue::MultipleParents {
            id: id.to_string(),
            count,
        }));

        for node in &self.data.nodes {
            let walk = walk_ancestors(self, &node.id);
            if walk.revisited.as_deref() == Some(node.id.as_str()) {
                issues.push(CatalogIssue::AncestryCycle { id: node.id.clone() });
            }
        }

        let playbook_nodes: HashSet<&str> = self
            .data
            .nodes
            .iter()
            .filter(|n| n.node_type == NodeType::Playbook)
            .map(|n| n.id.as_str())
            .collect();
        for playbook in &self.data.playbooks {
            if !playbook_nodes.contains(playbook.id.as_str()) {
                issues.push(CatalogIssue::OrphanPlaybook {
                    id: playbook.id.clone(),
                });
            }
        }

        issues
    }
}
