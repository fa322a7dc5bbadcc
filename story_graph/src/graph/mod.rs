//! Story Graph - the immutable set of narrative nodes a playthrough walks.
//!
//! The graph is built once from a story document. Every action target is
//! resolved to a [`NodeIndex`] at build time, so moving between nodes never
//! needs a string lookup.

mod document;

pub use document::*;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::error::StoryError;
use crate::node::{NodeId, NodeIndex, StoryNode, ENTRY_NODE};

/// How strictly a story is checked when the graph is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Reject actions pointing at missing nodes.
    #[default]
    Strict,
    /// Keep actions pointing at missing nodes; they fail when chosen.
    Lenient,
}

/// The loaded story.
#[derive(Debug, Clone)]
pub struct StoryGraph {
    nodes: Vec<StoryNode>,
    index: HashMap<NodeId, NodeIndex>,
    entry: NodeIndex,
}

impl StoryGraph {
    /// Load a story file. The format is picked from the file extension.
    pub fn load(path: impl AsRef<Path>, policy: ValidationPolicy) -> Result<Self, StoryError> {
        let path = path.as_ref();
        let format = StoryFormat::from_path(path)?;
        let text = fs::read_to_string(path).map_err(|source| StoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let graph = Self::from_document(StoryDocument::parse(&text, format)?, policy)?;
        info!(
            path = %path.display(),
            nodes = graph.len(),
            endings = graph.endings().count(),
            "loaded story graph"
        );
        Ok(graph)
    }

    /// Build a graph from a JSON document.
    pub fn from_json_str(text: &str, policy: ValidationPolicy) -> Result<Self, StoryError> {
        Self::from_document(StoryDocument::from_json_str(text)?, policy)
    }

    /// Build a graph from a TOML document.
    pub fn from_toml_str(text: &str, policy: ValidationPolicy) -> Result<Self, StoryError> {
        Self::from_document(StoryDocument::from_toml_str(text)?, policy)
    }

    pub fn from_document(
        document: StoryDocument,
        policy: ValidationPolicy,
    ) -> Result<Self, StoryError> {
        Self::from_nodes(document.into_nodes(), policy)
    }

    /// Build a graph from nodes, resolving and validating every action.
    ///
    /// Fails if an id is empty or padded with whitespace, the entry node is
    /// missing, an id is used twice, a non-ending
    /// node has no actions, or (under [`ValidationPolicy::Strict`]) an action
    /// points at a node that does not exist.
    pub fn from_nodes(
        nodes: impl IntoIterator<Item = StoryNode>,
        policy: ValidationPolicy,
    ) -> Result<Self, StoryError> {
        let mut nodes: Vec<StoryNode> = nodes.into_iter().collect();

        let mut index = HashMap::with_capacity(nodes.len());
        for (position, node) in nodes.iter().enumerate() {
            if !node.id.is_valid() {
                return Err(StoryError::InvalidNodeId {
                    id: node.id.clone(),
                });
            }
            if index.insert(node.id.clone(), NodeIndex(position)).is_some() {
                return Err(StoryError::DuplicateNode(node.id.clone()));
            }
        }

        let entry = *index.get(ENTRY_NODE).ok_or(StoryError::MissingEntry)?;

        for node in &mut nodes {
            if node.is_dead_end() {
                return Err(StoryError::DeadEnd {
                    node: node.id.clone(),
                });
            }

            for action in &mut node.actions {
                action.resolved = index.get(action.target()).copied();
                if action.resolved.is_some() {
                    continue;
                }

                match policy {
                    ValidationPolicy::Strict => {
                        return Err(StoryError::DanglingTarget {
                            node: node.id.clone(),
                            action: action.label.clone(),
                            target: action.target().clone(),
                        });
                    }
                    ValidationPolicy::Lenient => {
                        warn!(
                            node = %node.id,
                            action = %action.label,
                            target = %action.target(),
                            "action points to a missing node"
                        );
                    }
                }
            }
        }

        Ok(Self {
            nodes,
            index,
            entry,
        })
    }

    /// Look up a node by id.
    pub fn get(&self, id: &str) -> Result<&StoryNode, StoryError> {
        self.index_of(id)
            .map(|index| self.node(index))
            .ok_or_else(|| StoryError::NodeNotFound(NodeId::new(id)))
    }

    /// Index of the node with the given id.
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Node at an index handed out by this graph.
    ///
    /// # Panics
    ///
    /// Panics if `index` came from a different, larger graph.
    pub fn node(&self, index: NodeIndex) -> &StoryNode {
        &self.nodes[index.0]
    }

    pub fn entry(&self) -> &StoryNode {
        self.node(self.entry)
    }

    pub fn entry_index(&self) -> NodeIndex {
        self.entry
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Get the total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for a built graph, which holds at least the entry node.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get all nodes in the graph.
    pub fn nodes(&self) -> impl Iterator<Item = &StoryNode> {
        self.nodes.iter()
    }

    /// Get all ending nodes.
    pub fn endings(&self) -> impl Iterator<Item = &StoryNode> {
        self.nodes.iter().filter(|n| n.is_ending())
    }

    /// Actions left unresolved by a lenient build, as `(node, label, target)`.
    pub fn unresolved_actions(&self) -> impl Iterator<Item = (&NodeId, &str, &NodeId)> {
        self.nodes.iter().flat_map(|node| {
            node.actions
                .iter()
                .filter(|a| a.resolved().is_none())
                .map(move |a| (&node.id, a.label.as_str(), a.target()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SCENARIO: &str = r#"{
        "entry": {"prompt": "A ruined gas station.", "actions": [{"name": "go", "next_state": "end1"}]},
        "end1": {"endgame": true, "heading": "DONE", "desc": "..."}
    }"#;

    fn setup_test_nodes() -> Vec<StoryNode> {
        vec![
            StoryNode::new("entry", "You wake in the ash.")
                .with_background("ash.png")
                .with_action("Search the car", "car")
                .with_action("Walk north", "road"),
            StoryNode::new("car", "The glovebox holds a map.").with_action("Walk north", "road"),
            StoryNode::new("road", "").with_ending("ALIVE", "You reach the settlement."),
        ]
    }

    #[test]
    fn test_build_resolves_targets() {
        let graph = StoryGraph::from_nodes(setup_test_nodes(), ValidationPolicy::Strict).unwrap();

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.entry().id.as_str(), "entry");

        let road = graph.index_of("road").unwrap();
        for action in &graph.entry().actions {
            assert!(action.resolved().is_some());
        }
        assert_eq!(graph.entry().actions[1].resolved(), Some(road));
        assert_eq!(graph.unresolved_actions().count(), 0);
    }

    #[test]
    fn test_get_and_not_found() {
        let graph = StoryGraph::from_nodes(setup_test_nodes(), ValidationPolicy::Strict).unwrap();

        assert_eq!(graph.get("car").unwrap().prompt, "The glovebox holds a map.");
        assert!(graph.contains("road"));

        let err = graph.get("bunker").unwrap_err();
        assert!(matches!(&err, StoryError::NodeNotFound(id) if id.as_str() == "bunker"));
        assert!(!err.is_malformed());
    }

    #[test]
    fn test_missing_entry_is_rejected() {
        let nodes = vec![StoryNode::new("start", "").with_ending("X", "Y")];

        let err = StoryGraph::from_nodes(nodes, ValidationPolicy::Strict).unwrap_err();

        assert!(matches!(err, StoryError::MissingEntry));
        assert!(err.is_malformed());
    }

    #[test]
    fn test_duplicate_node_is_rejected() {
        let mut nodes = setup_test_nodes();
        nodes.push(StoryNode::new("car", "Another car.").with_action("leave", "road"));

        let err = StoryGraph::from_nodes(nodes, ValidationPolicy::Strict).unwrap_err();

        assert!(matches!(err, StoryError::DuplicateNode(id) if id.as_str() == "car"));
    }

    #[test]
    fn test_invalid_node_ids_are_rejected() {
        for bad in ["", " camp", "camp ", "\tcamp"] {
            let mut nodes = setup_test_nodes();
            nodes.push(StoryNode::new(bad, "Somewhere.").with_action("leave", "road"));

            let err = StoryGraph::from_nodes(nodes, ValidationPolicy::Lenient).unwrap_err();

            assert!(matches!(&err, StoryError::InvalidNodeId { id } if id.as_str() == bad));
            assert!(err.is_malformed());
        }
    }

    #[test]
    fn test_invalid_node_id_in_document() {
        let text = r#"{
            "entry": {"prompt": "Go.", "actions": [{"name": "on", "next_state": " camp"}]},
            " camp": {"endgame": true}
        }"#;

        let err = StoryGraph::from_json_str(text, ValidationPolicy::Strict).unwrap_err();

        assert!(matches!(err, StoryError::InvalidNodeId { .. }));
    }

    #[test]
    fn test_dangling_target_strict() {
        let mut nodes = setup_test_nodes();
        nodes[1] = StoryNode::new("car", "Empty.").with_action("Open trunk", "trunk");

        let err = StoryGraph::from_nodes(nodes, ValidationPolicy::Strict).unwrap_err();

        match err {
            StoryError::DanglingTarget {
                node,
                action,
                target,
            } => {
                assert_eq!(node.as_str(), "car");
                assert_eq!(action, "Open trunk");
                assert_eq!(target.as_str(), "trunk");
            }
            other => panic!("expected DanglingTarget, got {other:?}"),
        }
    }

    #[test]
    fn test_dangling_target_lenient() {
        let mut nodes = setup_test_nodes();
        nodes[1] = StoryNode::new("car", "Empty.")
            .with_action("Open trunk", "trunk")
            .with_action("Walk north", "road");

        let graph = StoryGraph::from_nodes(nodes, ValidationPolicy::Lenient).unwrap();

        let car = graph.get("car").unwrap();
        assert!(car.actions[0].resolved().is_none());
        assert!(car.actions[1].resolved().is_some());

        let unresolved: Vec<_> = graph.unresolved_actions().collect();
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].1, "Open trunk");
    }

    #[test]
    fn test_dead_end_rejected_under_both_policies() {
        for policy in [ValidationPolicy::Strict, ValidationPolicy::Lenient] {
            let mut nodes = setup_test_nodes();
            nodes.push(StoryNode::new("pit", "You fall into a pit."));

            let err = StoryGraph::from_nodes(nodes, policy).unwrap_err();
            assert!(matches!(err, StoryError::DeadEnd { node } if node.as_str() == "pit"));
        }
    }

    #[test]
    fn test_scenario_document() {
        let graph = StoryGraph::from_json_str(SCENARIO, ValidationPolicy::Strict).unwrap();

        let end = graph.get("end1").unwrap();
        assert!(end.is_ending());
        assert_eq!(end.ending.as_ref().unwrap().heading, "DONE");
        assert_eq!(graph.endings().count(), 1);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("story.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(SCENARIO.as_bytes()).unwrap();

        let graph = StoryGraph::load(&path, ValidationPolicy::Strict).unwrap();

        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let err = StoryGraph::load(dir.path().join("story.json"), ValidationPolicy::Strict)
            .unwrap_err();

        assert!(matches!(err, StoryError::Io { .. }));
        assert!(err.is_malformed());
    }

    #[test]
    fn test_validation_policy_serde() {
        let policy: ValidationPolicy = serde_json::from_str("\"lenient\"").unwrap();
        assert_eq!(policy, ValidationPolicy::Lenient);
        assert_eq!(ValidationPolicy::default(), ValidationPolicy::Strict);
    }
}
