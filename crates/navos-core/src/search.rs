//! Substring search over node names, summaries and tags.

use std::ops::Range;

use serde::Serialize;
use tracing::debug;

use crate::{Catalog, Node};

/// Shortest query (in characters, after trimming) that runs a search.
pub const MIN_QUERY_CHARS: usize = 2;

/// Default maximum number of results.
pub const DEFAULT_SEARCH_CAP: usize = 12;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", content = "nodes", rename_all = "snake_case")]
pub enum SearchOutcome<'a> {
    /// Query too short to search; nothing has been looked up.
    TooShort,
    /// Matches in catalog order. May be empty.
    Matches(Vec<&'a Node>),
}

impl<'a> SearchOutcome<'a> {
    pub fn nodes(&self) -> &[&'a Node] {
        match self {
            SearchOutcome::TooShort => &[],
            SearchOutcome::Matches(nodes) => nodes,
        }
    }

    pub fn into_nodes(self) -> Vec<&'a Node> {
        match self {
            SearchOutcome::TooShort => Vec::new(),
            SearchOutcome::Matches(nodes) => nodes,
        }
    }
}

fn searchable_text(node: &Node) -> String {
    let mut text = String::with_capacity(node.name.len() + node.summary.len() + 16);
    text.push_str(&node.name);
    text.push(' ');
    text.push_str(&node.summary);
    for tag in &node.tags {
        text.push(' ');
        text.push_str(tag);
    }
    text.to_lowercase()
}

/// Case-insensitive search, at most `cap` hits, in catalog order.
pub fn search<'a>(catalog: &'a Catalog, query: &str, cap: usize) -> SearchOutcome<'a> {
    let trimmed = query.trim();
    if trimmed.chars().count() < MIN_QUERY_CHARS {
        return SearchOutcome::TooShort;
    }
    let query = trimmed.to_lowercase();

    let matches: Vec<&Node> = catalog
        .nodes()
        .iter()
        .filter(|n| searchable_text(n).contains(&query))
        .take(cap)
        .collect();
    debug!(query = %query, hits = matches.len(), "search");
    SearchOutcome::Matches(matches)
}

/// Byte range of the first case-insensitive occurrence of `query` in `text`,
/// for highlighting a hit. `None` when absent or `query` is blank.
pub fn match_span(text: &str, query: &str) -> Option<Range<usize>> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    // Same lowering as `search`, including the context-dependent final sigma.
    let lowered = text.to_lowercase();

    // Lowercasing can change byte lengths, so map lowered offsets back to the
    // original. Per-char widths match `str::to_lowercase`: the final-sigma
    // rule only swaps σ for ς, which has the same width.
    let mut origin = Vec::with_capacity(lowered.len() + 1);
    for (at, ch) in text.char_indices() {
        let width: usize = ch.to_lowercase().map(char::len_utf8).sum();
        origin.extend(std::iter::repeat(at).take(width));
    }
    if origin.len() != lowered.len() {
        return None;
    }
    origin.push(text.len());

    let start = lowered.find(&query)?;
    let end = start + query.len();
    let orig_end = if end < origin.len() - 1 {
        origin[end]
    } else {
        text.len()
    };
    Some(origin[start]..orig_end)
}
