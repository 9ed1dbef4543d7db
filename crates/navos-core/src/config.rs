//! User-tunable settings, read from `~/.navos/config.json`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::search::DEFAULT_SEARCH_CAP;
use crate::{navos_dir, CatalogError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GraphSettings {
    /// Nodes at or below this level are visible on a fresh map.
    pub initial_max_level: u32,
}

impl Default for GraphSettings {
    fn default() -> Self {
        GraphSettings { initial_max_level: 1 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchSettings {
    pub cap: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            cap: DEFAULT_SEARCH_CAP,
        }
    }
}

/// Knobs for the stack advisor. Lives here so one config file covers both crates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AdvisorSettings {
    /// Rule used when scoring cannot pick one.
    pub default_rule_id: String,
    /// Case-insensitive substrings that identify a no-code builder in a stack.
    pub builder_markers: Vec<String>,
    /// Entry prepended to `tools_to_master` for beginners without a builder.
    pub builder_recommendation: String,
    /// `user_level` answer that triggers the builder adjustment.
    pub beginner_level: String,
    /// Placeholder name replaced by the recommended stack in prompt templates.
    pub stack_placeholder: String,
    /// app_type answer -> playbook id.
    pub playbooks_by_app_type: BTreeMap<String, String>,
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        let playbooks_by_app_type = [
            ("landing", "P_LP_LEADS"),
            ("saas", "P_SAAS_MVP"),
            ("crm", "P_CRM_SIMPLE"),
            ("dashboard", "P_DASHBOARD"),
            ("agent", "P_AGENT_BUILDER"),
            ("automation", "P_EMAIL_AUTO"),
            ("bot_whatsapp", "P_BOT_WA"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        AdvisorSettings {
            default_rule_id: "R2".to_string(),
            builder_markers: vec![
                "builder".to_string(),
                "lovable".to_string(),
                "bolt".to_string(),
            ],
            builder_recommendation: "Builder (Lovable/Bolt)".to_string(),
            beginner_level: "beginner".to_string(),
            stack_placeholder: "stack_recomendada".to_string(),
            playbooks_by_app_type,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct NavConfig {
    pub graph: GraphSettings,
    pub search: SearchSettings,
    pub advisor: AdvisorSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_path: Option<PathBuf>,
}

impl NavConfig {
    /// Dataset file to load: the configured path, else `~/.navos/seed.json`.
    pub fn dataset(&self) -> PathBuf {
        self.dataset_path
            .clone()
            .unwrap_or_else(|| navos_dir().join("seed.json"))
    }
}

pub fn config_path() -> PathBuf {
    navos_dir().join("config.json")
}

/// Read the global config. Missing or unreadable files yield the defaults.
pub fn read_config() -> NavConfig {
    read_config_or_default(&config_path())
}

/// Read `path`, falling back to the defaults when it is missing or unusable.
pub fn read_config_or_default(path: &Path) -> NavConfig {
    if !path.exists() {
        return NavConfig::default();
    }
    match read_config_from(path) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "ignoring unusable config, using defaults");
            NavConfig::default()
        }
    }
}

/// Read a config file, surfacing I/O and parse failures.
pub fn read_config_from(path: &Path) -> Result<NavConfig> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw)
        .map_err(|e| CatalogError::Config(format!("{}: {e}", path.display())))
}
