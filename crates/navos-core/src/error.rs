//! Error types for navos-core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using navos-core's error type.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Failures that stop a dataset or config file from being used at all.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid JSON for the expected shape
    #[error("malformed dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two nodes share an id
    #[error("duplicate node id '{0}'")]
    DuplicateNodeId(String),

    /// Configuration file is unusable
    #[error("configuration error: {0}")]
    Config(String),
}

/// Problems in a loaded dataset that the engine tolerates but a dataset author should fix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    #[error("edge {from} -> {to} references a node that does not exist")]
    DanglingEdge { from: String, to: String },

    #[error("node '{id}' has {count} parents")]
    MultipleParents { id: String, count: usize },

    #[error("node '{id}' is part of a BELONGS_TO cycle")]
    AncestryCycle { id: String },

    #[error("playbook '{id}' has no matching PLAYBOOK node")]
    OrphanPlaybook { id: String },
}
