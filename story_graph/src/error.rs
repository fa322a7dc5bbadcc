//! Error types for story loading and save slots.

use std::path::PathBuf;
use thiserror::Error;

use crate::node::NodeId;
use crate::saves::SlotId;

/// Errors raised while loading or querying a story graph.
///
/// Every variant except [`StoryError::NodeNotFound`] means the story data is
/// unusable and startup cannot continue.
#[derive(Debug, Error)]
pub enum StoryError {
    #[error("failed to read story file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("story document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("story document is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported story format for {path}: expected a .json or .toml file")]
    UnsupportedFormat { path: PathBuf },

    #[error("story has no entry node (expected a node with id \"entry\")")]
    MissingEntry,

    #[error("story defines node '{0}' more than once")]
    DuplicateNode(NodeId),

    #[error("node id {id:?} is empty or has leading or trailing whitespace")]
    InvalidNodeId { id: NodeId },

    #[error("action '{action}' on node '{node}' points to missing node '{target}'")]
    DanglingTarget {
        node: NodeId,
        action: String,
        target: NodeId,
    },

    #[error("node '{node}' has no actions and is not an ending")]
    DeadEnd { node: NodeId },

    #[error("story node not found: {0}")]
    NodeNotFound(NodeId),
}

impl StoryError {
    /// Whether this error means the story data itself is malformed.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, StoryError::NodeNotFound(_))
    }
}

/// Errors raised by save stores.
///
/// A slot that was never written is not an error; stores report it as
/// `Ok(None)`.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save slot {slot} could not be accessed: {source}")]
    Io {
        slot: SlotId,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid save slot '{0}': expected a number from 0 to 3")]
    InvalidSlot(String),
}
