//! Read-only snapshots of the engine for rendering.

use serde::{Deserialize, Serialize};
use story_graph::{Ending, NodeId, StoryNode};

/// One choice as a front-end should draw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceView {
    pub label: String,
    /// False for actions whose target is missing from the story.
    pub enabled: bool,
}

/// The node the player is currently on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneView {
    pub node: NodeId,
    pub prompt: String,
    pub background: Option<String>,
    pub choices: Vec<ChoiceView>,
}

impl SceneView {
    pub(crate) fn from_node(node: &StoryNode) -> Self {
        Self {
            node: node.id.clone(),
            prompt: node.prompt.clone(),
            background: node.background.clone(),
            choices: node
                .actions
                .iter()
                .map(|a| ChoiceView {
                    label: a.label.clone(),
                    enabled: a.resolved().is_some(),
                })
                .collect(),
        }
    }
}

/// Content of the end-game screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndingView {
    pub heading: String,
    pub description: String,
    pub background: Option<String>,
}

impl EndingView {
    pub(crate) fn from_ending(ending: &Ending, background: Option<&String>) -> Self {
        Self {
            heading: ending.heading.clone(),
            description: ending.description.clone(),
            background: background.cloned(),
        }
    }
}

/// What the engine shows after an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Progress {
    /// Still playing.
    Scene(SceneView),
    /// Reached an ending node.
    Ended(EndingView),
    /// The player gave up.
    Surrendered(EndingView),
}

impl Progress {
    /// The end-game summary, if the playthrough is over.
    pub fn ending(&self) -> Option<&EndingView> {
        match self {
            Progress::Scene(_) => None,
            Progress::Ended(view) | Progress::Surrendered(view) => Some(view),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.ending().is_some()
    }
}
