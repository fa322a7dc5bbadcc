//! Choices leading from one node to another.

use super::{NodeId, NodeIndex};

/// A labelled choice on a story node.
///
/// The target is kept as authored; the graph fills in the resolved index when
/// the node is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub label: String,
    target: NodeId,
    pub(crate) resolved: Option<NodeIndex>,
}

impl Action {
    /// Create an unresolved action.
    pub fn new(label: impl Into<String>, target: impl Into<NodeId>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
            resolved: None,
        }
    }

    /// Id of the node this action leads to.
    pub fn target(&self) -> &NodeId {
        &self.target
    }

    /// Index of the target node, or `None` if the target is not in the graph.
    pub fn resolved(&self) -> Option<NodeIndex> {
        self.resolved
    }
}

/// How a caller picks one of the current node's actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRef {
    /// Position in the node's action list.
    Index(usize),
    /// Action label.
    Label(String),
}

impl From<usize> for ActionRef {
    fn from(index: usize) -> Self {
        ActionRef::Index(index)
    }
}

impl From<&str> for ActionRef {
    fn from(label: &str) -> Self {
        ActionRef::Label(label.to_string())
    }
}

impl std::fmt::Display for ActionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionRef::Index(index) => write!(f, "#{}", index),
            ActionRef::Label(label) => write!(f, "'{}'", label),
        }
    }
}
