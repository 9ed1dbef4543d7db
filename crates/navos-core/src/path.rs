//! Ancestor chains for breadcrumb navigation.

use std::collections::HashSet;

use tracing::warn;

use crate::{Catalog, Node};

/// Result of walking BELONGS_TO edges from a node toward its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorWalk {
    /// Root-most first, the starting id last. May include ids missing from the catalog.
    pub ids: Vec<String>,
    /// Set when the walk stopped because it reached an id it had already visited.
    pub revisited: Option<String>,
}

impl AncestorWalk {
    pub fn is_truncated(&self) -> bool {
        self.revisited.is_some()
    }
}

/// Follow parent edges from `id` until there is no parent or an id repeats.
///
/// Bounded by the edge count: every step consumes a distinct BELONGS_TO edge.
pub fn walk_ancestors(catalog: &Catalog, id: &str) -> AncestorWalk {
    let mut ids = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut revisited = None;
    let mut current = Some(id);

    for _ in 0..=catalog.edges().len() {
        let Some(cur) = current else { break };
        if !visited.insert(cur) {
            revisited = Some(cur.to_string());
            break;
        }
        ids.push(cur.to_string());
        current = catalog.parent_of(cur);
    }

    ids.reverse();
    AncestorWalk { ids, revisited }
}

/// Nodes from the root-most ancestor down to `id` itself. Empty when `id` is unknown.
///
/// A cyclic chain is cut at the first repeated node and the partial path is returned.
pub fn ancestor_path<'a>(catalog: &'a Catalog, id: &str) -> Vec<&'a Node> {
    if !catalog.contains(id) {
        return Vec::new();
    }
    let walk = walk_ancestors(catalog, id);
    if let Some(repeat) = &walk.revisited {
        warn!(node = id, repeat = %repeat, "BELONGS_TO cycle, ancestor path truncated");
    }
    walk.ids.iter().filter_map(|a| catalog.node(a)).collect()
}
