//! Story documents - the authored, serialized form of the graph.
//!
//! A document is a map from node id to node record:
//!
//! ```json
//! {
//!   "entry": {
//!     "prompt": "You wake up in a collapsed subway tunnel.",
//!     "background": "tunnel.png",
//!     "actions": [{ "name": "Climb out", "next_state": "surface" }]
//!   },
//!   "surface": { "endgame": true, "heading": "SURVIVED", "desc": "..." }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::StoryError;
use crate::node::{Action, Ending, NodeId, StoryNode};

/// Heading used by ending records that do not provide one.
pub const DEFAULT_ENDING_HEADING: &str = "THE END";

/// Serialization format of a story document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryFormat {
    Json,
    Toml,
}

impl StoryFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, StoryError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(StoryFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(StoryFormat::Toml),
            _ => Err(StoryError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// A choice as written in the data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub name: String,
    pub next_state: String,
}

/// A node as written in the data file. The node id is the record's key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(default)]
    pub prompt: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    #[serde(default)]
    pub actions: Vec<ActionRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,

    #[serde(default, rename = "desc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub endgame: bool,
}

impl NodeRecord {
    /// Convert the record into a node, attaching its key as the id.
    ///
    /// Endings fall back to [`DEFAULT_ENDING_HEADING`] and to the prompt when
    /// `heading` or `desc` is missing.
    pub fn into_node(self, id: NodeId) -> StoryNode {
        let ending = self.endgame.then(|| {
            Ending::new(
                self.heading
                    .unwrap_or_else(|| DEFAULT_ENDING_HEADING.to_string()),
                self.description.unwrap_or_else(|| self.prompt.clone()),
            )
        });

        StoryNode {
            id,
            prompt: self.prompt,
            background: self.background,
            actions: self
                .actions
                .into_iter()
                .map(|a| Action::new(a.name, a.next_state))
                .collect(),
            ending,
        }
    }
}

/// A whole story document, keyed by node id.
///
/// Keys are kept sorted so node indices and validation errors are
/// deterministic across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryDocument {
    pub nodes: BTreeMap<String, NodeRecord>,
}

impl StoryDocument {
    /// Parse a document in the given format.
    pub fn parse(text: &str, format: StoryFormat) -> Result<Self, StoryError> {
        match format {
            StoryFormat::Json => Self::from_json_str(text),
            StoryFormat::Toml => Self::from_toml_str(text),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, StoryError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, StoryError> {
        Ok(toml::from_str(text)?)
    }

    /// Consume the document, yielding nodes in id order.
    pub fn into_nodes(self) -> impl Iterator<Item = StoryNode> {
        self.nodes
            .into_iter()
            .map(|(id, record)| record.into_node(NodeId::new(id)))
    }
}
