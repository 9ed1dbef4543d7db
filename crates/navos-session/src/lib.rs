//! One exploration session over a shared catalog.
//!
//! This is the function-call boundary a presentation layer talks to: it
//! forwards taps, query text and wizard answers here and renders what comes
//! back. Every mutation takes `&mut self`, so a session has a single writer;
//! the catalog behind the `Arc` is read-only and can back many sessions.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use navos_advisor::{AdvisorError, Answers, Recommendation, Selection, Wizard};
use navos_core::{
    Catalog, Connection, ExpandOutcome, NavConfig, Node, Playbook, SearchOutcome, VisibilityState,
    VisibilityStats, VisibleGraph,
};
use serde::Serialize;
use tracing::{debug, info};

/// Everything the side panel shows for a selected node.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NodeCard<'a> {
    pub node: &'a Node,
    pub path: Vec<&'a Node>,
    pub connections: Vec<Connection<'a>>,
    pub playbook: Option<&'a Playbook>,
    pub visible: bool,
    pub expanded: bool,
}

#[derive(Debug, Clone)]
pub struct Session {
    catalog: Arc<Catalog>,
    config: NavConfig,
    visibility: VisibilityState,
    wizard: Wizard,
    selected: Option<String>,
}

impl Session {
    pub fn new(catalog: Arc<Catalog>, config: NavConfig) -> Self {
        let visibility = VisibilityState::initial(&catalog, config.graph.initial_max_level);
        Session {
            catalog,
            config,
            visibility,
            wizard: Wizard::new(),
            selected: None,
        }
    }

    /// Load the configured dataset and start a session on it.
    pub fn open(config: NavConfig) -> navos_core::Result<Self> {
        let path = config.dataset();
        let catalog = navos_core::load_catalog(&path)?;
        info!(path = %path.display(), "session opened");
        Ok(Self::new(Arc::new(catalog), config))
    }

    /// Open with the settings in `~/.navos/config.json` (defaults when absent).
    pub fn open_default() -> navos_core::Result<Self> {
        Self::open(navos_core::read_config())
    }

    /// Open with the settings in `config_file` (defaults when absent or unusable).
    pub fn open_with_config_file(config_file: &Path) -> navos_core::Result<Self> {
        Self::open(navos_core::read_config_or_default(config_file))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn shared_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    // --- Graph ---

    pub fn get_visible_graph(&self) -> VisibleGraph<'_> {
        self.visibility.visible_graph(&self.catalog)
    }

    pub fn stats(&self) -> VisibilityStats {
        self.visibility.stats()
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visibility.is_visible(id)
    }

    pub fn expand(&mut self, id: &str) -> ExpandOutcome {
        self.visibility.expand(&self.catalog, id)
    }

    /// Expand whatever is selected. `None` when nothing is.
    pub fn expand_selected(&mut self) -> Option<ExpandOutcome> {
        let id = self.selected.clone()?;
        Some(self.expand(&id))
    }

    pub fn expand_to(&mut self, id: &str) -> usize {
        self.visibility.expand_to(&self.catalog, id)
    }

    pub fn expand_all(&mut self) -> usize {
        self.visibility.expand_all(&self.catalog)
    }

    /// Back to the initial map with nothing selected.
    pub fn reset(&mut self) {
        self.selected = None;
        self.visibility.reset(&self.catalog);
    }

    pub fn ancestor_path(&self, id: &str) -> Vec<&Node> {
        navos_core::ancestor_path(&self.catalog, id)
    }

    // --- Search ---

    pub fn search(&self, query: &str) -> Vec<&Node> {
        self.search_outcome(query).into_nodes()
    }

    /// Like `search`, but tells a too-short query apart from zero hits.
    pub fn search_outcome(&self, query: &str) -> SearchOutcome<'_> {
        navos_core::search(&self.catalog, query, self.config.search.cap)
    }

    // --- Selection ---

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Select a node and describe it. `None` (and no change) for unknown ids.
    pub fn select_node(&mut self, id: &str) -> Option<NodeCard<'_>> {
        if !self.catalog.contains(id) {
            debug!(node = id, "select of unknown node ignored");
            return None;
        }
        self.selected = Some(id.to_string());
        self.card(id)
    }

    /// Reveal a node's ancestry if needed, then select it. Used for search
    /// hits and breadcrumb clicks.
    pub fn focus(&mut self, id: &str) -> Option<NodeCard<'_>> {
        if !self.catalog.contains(id) {
            return None;
        }
        if !self.visibility.is_visible(id) {
            self.expand_to(id);
        }
        self.select_node(id)
    }

    pub fn card(&self, id: &str) -> Option<NodeCard<'_>> {
        let node = self.catalog.node(id)?;
        Some(NodeCard {
            node,
            path: self.ancestor_path(id),
            connections: self.catalog.connections(id),
            playbook: self.catalog.playbook(id),
            visible: self.visibility.is_visible(id),
            expanded: self.visibility.is_expanded(id),
        })
    }

    // --- Advisor ---

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn wizard_mut(&mut self) -> &mut Wizard {
        &mut self.wizard
    }

    pub fn select_rule(&self, answers: &Answers) -> Result<Selection<'_>, AdvisorError> {
        navos_advisor::select_rule(self.catalog.rules(), answers, &self.config.advisor)
    }

    /// Recommendation for the wizard's answers. Fails until all six are given.
    pub fn recommend(&self) -> Result<Recommendation<'_>, AdvisorError> {
        let answers = self.wizard.answers().complete()?;
        navos_advisor::recommend(&self.catalog, &answers, &self.config.advisor)
    }

    /// Render a playbook's prompt template. `None` when the playbook is unknown
    /// or has no generator.
    pub fn render_prompt(
        &self,
        playbook_id: &str,
        inputs: &HashMap<String, String>,
        current_stack: &[String],
    ) -> Option<String> {
        let playbook = self.catalog.playbook(playbook_id)?;
        navos_advisor::render_playbook_prompt(playbook, inputs, current_stack, &self.config.advisor)
    }
}
