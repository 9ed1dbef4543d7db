pub mod catalog;
pub mod config;
mod error;
pub mod index;
pub mod path;
pub mod search;
pub mod visibility;

#[cfg(test)]
mod props;
#[cfg(test)]
pub(crate) mod testdata;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub use catalog::Catalog;
pub use config::{
    config_path, read_config, read_config_from, read_config_or_default, AdvisorSettings, GraphSettings,
    NavConfig, SearchSettings,
};
pub use error::{CatalogError, CatalogIssue, Result};
pub use index::{Connection, Direction, GraphIndex};
pub use path::{ancestor_path, walk_ancestors, AncestorWalk};
pub use search::{match_span, search, SearchOutcome};
pub use visibility::{ExpandOutcome, ExpandReason, VisibleGraph, VisibilityState, VisibilityStats};

// --- Types (matching the seed dataset) ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, schemars::JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Layer,
    Category,
    Concept,
    Tool,
    Playbook,
}

impl NodeType {
    pub const ALL: [NodeType; 5] = [
        NodeType::Layer,
        NodeType::Category,
        NodeType::Concept,
        NodeType::Tool,
        NodeType::Playbook,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Layer => "LAYER",
            NodeType::Category => "CATEGORY",
            NodeType::Concept => "CONCEPT",
            NodeType::Tool => "TOOL",
            NodeType::Playbook => "PLAYBOOK",
        }
    }

    /// Human-facing badge text. Presentation only; nothing in the engine branches on the type.
    pub fn label(self) -> &'static str {
        match self {
            NodeType::Layer => "Layer",
            NodeType::Category => "Category",
            NodeType::Concept => "Concept",
            NodeType::Tool => "Tool",
            NodeType::Playbook => "Playbook",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, schemars::JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relation {
    BelongsTo,
    Requires,
    Uses,
    RecommendedWith,
}

/// A value in a node's `details` map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, schemars::JsonSchema)]
#[serde(untagged)]
pub enum DetailValue {
    Text(String),
    List(Vec<String>),
    Rating(f64),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, schemars::JsonSchema)]
pub struct Node {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub level: u32,
    #[serde(default, alias = "summary_leigo")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, DetailValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, schemars::JsonSchema)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub relation: Relation,
}

impl Edge {
    pub fn touches(&self, id: &str) -> bool {
        self.from == id || self.to == id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, schemars::JsonSchema)]
pub struct PromptInput {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, schemars::JsonSchema)]
pub struct PromptGenerator {
    #[serde(default)]
    pub inputs: Vec<PromptInput>,
    pub template: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, schemars::JsonSchema)]
pub struct Playbook {
    pub id: String,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub pitfalls: Vec<String>,
    #[serde(default)]
    pub done_definition: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub stack_variants: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub prompts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_generator: Option<PromptGenerator>,
}

/// Partial predicate over wizard answers. `None` fields match anything.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq, schemars::JsonSchema)]
pub struct RuleCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_auth: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_db: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_rag: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
}

/// An alternative stack. Older seeds list bare tool names without a label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, schemars::JsonSchema)]
#[serde(untagged)]
pub enum AltStack {
    Labeled {
        #[serde(default = "default_alt_label")]
        label: String,
        stack: Vec<String>,
    },
    Bare(Vec<String>),
}

fn default_alt_label() -> String {
    "Alternative".to_string()
}

impl AltStack {
    pub fn label(&self) -> &str {
        match self {
            AltStack::Labeled { label, .. } => label,
            AltStack::Bare(_) => "Alternative",
        }
    }

    pub fn stack(&self) -> &[String] {
        match self {
            AltStack::Labeled { stack, .. } => stack,
            AltStack::Bare(stack) => stack,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq, schemars::JsonSchema)]
pub struct RuleOutcome {
    #[serde(default)]
    pub primary_stack: Vec<String>,
    #[serde(default)]
    pub alt_stacks: Vec<AltStack>,
    #[serde(default)]
    pub tools_to_master: Vec<String>,
    #[serde(default)]
    pub checklist: Vec<String>,
    #[serde(default)]
    pub risks: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, schemars::JsonSchema)]
pub struct DecisionRule {
    pub id: String,
    #[serde(rename = "if", default)]
    pub condition: RuleCondition,
    #[serde(rename = "then", default)]
    pub outcome: RuleOutcome,
    #[serde(default, alias = "explain_leigo")]
    pub explain: String,
}

/// The whole dataset, delivered as one document.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, schemars::JsonSchema)]
pub struct CatalogData {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub playbooks: Vec<Playbook>,
    #[serde(default)]
    pub decision_rules: Vec<DecisionRule>,
}

// --- Storage ---

/// Resolve the global data directory (~/.navos/).
pub fn navos_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".navos")
}

/// Read and index a dataset file.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Catalog::from_json_str(&raw)
}

/// JSON Schema of the dataset document, for validating seed files before shipping them.
pub fn catalog_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(CatalogData)).unwrap_or(serde_json::Value::Null)
}
