//! Story node definitions.

mod action;

pub use action::*;

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Id of the node every new playthrough starts on.
pub const ENTRY_NODE: &str = "entry";

/// Stable identifier of a story node. This is what save slots persist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node id from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id of the entry node.
    pub fn entry() -> Self {
        Self(ENTRY_NODE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_entry(&self) -> bool {
        self.0 == ENTRY_NODE
    }

    /// Non-empty and free of leading or trailing whitespace.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && self.0.trim() == self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a node inside the graph that owns it.
///
/// Indices are only handed out by a [`crate::StoryGraph`] and are only
/// meaningful for that graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub(crate) usize);

impl NodeIndex {
    pub fn get(self) -> usize {
        self.0
    }
}

/// End-of-story summary carried by ending nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ending {
    pub heading: String,
    pub description: String,
}

impl Ending {
    pub fn new(heading: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            description: description.into(),
        }
    }
}

/// A single narrative beat: text, an optional background and the choices
/// leading away from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryNode {
    pub id: NodeId,

    /// Text shown to the player.
    pub prompt: String,

    /// Key of the background image, if any.
    pub background: Option<String>,

    /// Choices in presentation order. Duplicated labels are kept as-is.
    pub actions: Vec<Action>,

    /// Set on ending nodes; replaces the choices with an end-game summary.
    pub ending: Option<Ending>,
}

impl StoryNode {
    /// Create a node with a prompt and no choices.
    pub fn new(id: impl Into<NodeId>, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            background: None,
            actions: Vec::new(),
            ending: None,
        }
    }

    /// Set the background image key.
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    /// Append a choice leading to `target`.
    pub fn with_action(mut self, label: impl Into<String>, target: impl Into<NodeId>) -> Self {
        self.actions.push(Action::new(label, target));
        self
    }

    /// Turn this node into an ending.
    pub fn with_ending(mut self, heading: impl Into<String>, description: impl Into<String>) -> Self {
        self.ending = Some(Ending::new(heading, description));
        self
    }

    pub fn is_ending(&self) -> bool {
        self.ending.is_some()
    }

    /// A non-ending node the player cannot leave.
    pub fn is_dead_end(&self) -> bool {
        !self.is_ending() && self.actions.is_empty()
    }

    /// Look up one of this node's actions.
    ///
    /// Labels match the first action carrying that label.
    pub fn find_action(&self, action: &ActionRef) -> Option<(usize, &Action)> {
        match action {
            ActionRef::Index(index) => self.actions.get(*index).map(|a| (*index, a)),
            ActionRef::Label(label) => self
                .actions
                .iter()
                .enumerate()
                .find(|(_, a)| a.label == *label),
        }
    }
}
