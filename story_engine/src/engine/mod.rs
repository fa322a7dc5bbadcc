//! Narrative Engine - walks the story graph one choice at a time.
//!
//! The engine is either positioned on a node, finished on an ending node, or
//! finished by surrender. Surrender is a synthetic ending that is not part of
//! the loaded story.

mod view;

pub use view::*;

use std::sync::Arc;
use story_graph::{ActionRef, NodeId, NodeIndex, StoryGraph};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::NarrativeError;

/// Heading of the surrender screen.
pub const SURRENDER_HEADING: &str = "YOU SURRENDERED";

/// Description of the surrender screen.
pub const SURRENDER_DESCRIPTION: &str =
    "You lay down your pack and let the wasteland have the rest.";

/// Identifies one playthrough in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaythroughId(pub Uuid);

impl PlaythroughId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlaythroughId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlaythroughId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the engine is in the story.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Playing(NodeIndex),
    Ended(NodeIndex),
    Surrendered,
}

/// The state machine behind the in-game screen.
#[derive(Debug, Clone)]
pub struct NarrativeEngine {
    graph: Arc<StoryGraph>,
    state: EngineState,
    playthrough: PlaythroughId,
    /// Nodes visited since start, in order.
    history: Vec<NodeIndex>,
}

impl NarrativeEngine {
    /// Start a new playthrough at the entry node.
    pub fn start(graph: Arc<StoryGraph>) -> Self {
        let entry = graph.entry_index();
        let engine = Self::at(graph, entry);
        info!(playthrough = %engine.playthrough, "started new playthrough");
        engine
    }

    /// Resume a playthrough at a saved node.
    ///
    /// The id is checked against the loaded story, which may have changed
    /// since the save was written.
    pub fn resume(graph: Arc<StoryGraph>, saved: &NodeId) -> Result<Self, NarrativeError> {
        let Some(index) = graph.index_of(saved.as_str()) else {
            warn!(node = %saved, "saved node is missing from the story");
            return Err(NarrativeError::NodeNotFound { id: saved.clone() });
        };

        let engine = Self::at(graph, index);
        info!(playthrough = %engine.playthrough, node = %saved, "resumed playthrough");
        Ok(engine)
    }

    fn at(graph: Arc<StoryGraph>, index: NodeIndex) -> Self {
        let state = if graph.node(index).is_ending() {
            EngineState::Ended(index)
        } else {
            EngineState::Playing(index)
        };

        Self {
            graph,
            state,
            playthrough: PlaythroughId::new(),
            history: vec![index],
        }
    }

    /// Pick one of the current node's actions.
    ///
    /// On error the engine stays on the current node.
    pub fn choose(&mut self, action: impl Into<ActionRef>) -> Result<Progress, NarrativeError> {
        let action = action.into();
        let EngineState::Playing(current) = self.state else {
            return Err(NarrativeError::StoryOver);
        };

        let node = self.graph.node(current);
        let Some(target) = node
            .find_action(&action)
            .and_then(|(_, chosen)| chosen.resolved())
        else {
            warn!(
                playthrough = %self.playthrough,
                node = %node.id,
                action = %action,
                "chosen action does not lead anywhere"
            );
            return Err(NarrativeError::ActionNotFound {
                node: node.id.clone(),
                action,
            });
        };

        let next = self.graph.node(target);
        debug!(
            playthrough = %self.playthrough,
            from = %node.id,
            to = %next.id,
            action = %action,
            "moved to node"
        );

        self.history.push(target);
        if next.is_ending() {
            info!(playthrough = %self.playthrough, node = %next.id, "reached an ending");
            self.state = EngineState::Ended(target);
        } else {
            self.state = EngineState::Playing(target);
        }

        Ok(self.current())
    }

    /// Give up. Always succeeds, whatever the current state.
    pub fn surrender(&mut self) -> Progress {
        info!(playthrough = %self.playthrough, "player surrendered");
        self.state = EngineState::Surrendered;
        self.current()
    }

    /// Snapshot of what the player sees right now.
    pub fn current(&self) -> Progress {
        match self.state {
            EngineState::Playing(index) => {
                Progress::Scene(SceneView::from_node(self.graph.node(index)))
            }
            EngineState::Ended(index) => {
                let node = self.graph.node(index);
                match &node.ending {
                    Some(ending) => {
                        Progress::Ended(EndingView::from_ending(ending, node.background.as_ref()))
                    }
                    // Only ending nodes are ever stored as Ended
                    None => Progress::Scene(SceneView::from_node(node)),
                }
            }
            EngineState::Surrendered => Progress::Surrendered(EndingView {
                heading: SURRENDER_HEADING.to_string(),
                description: SURRENDER_DESCRIPTION.to_string(),
                background: None,
            }),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Id of the node being played, or `None` once the playthrough is over.
    pub fn position(&self) -> Option<&NodeId> {
        match self.state {
            EngineState::Playing(index) => Some(&self.graph.node(index).id),
            EngineState::Ended(_) | EngineState::Surrendered => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self.state, EngineState::Playing(_))
    }

    pub fn playthrough(&self) -> PlaythroughId {
        self.playthrough
    }

    /// Ids of the nodes visited since start, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &NodeId> {
        self.history.iter().map(|index| &self.graph.node(*index).id)
    }

    pub fn graph(&self) -> &StoryGraph {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_graph::{StoryNode, ValidationPolicy};

    const SCENARIO: &str = r#"{
        "entry": {"prompt": "Where to?", "actions": [{"name": "go", "next_state": "end1"}]},
        "end1": {"endgame": true, "heading": "DONE", "desc": "...", "background": "sunrise.png"}
    }"#;

    fn setup_test_graph() -> Arc<StoryGraph> {
        let nodes = vec![
            StoryNode::new("entry", "The shelter door is jammed.")
                .with_background("shelter.png")
                .with_action("Force it", "corridor")
                .with_action("Wait", "entry")
                .with_action("Force it", "collapse"),
            StoryNode::new("corridor", "A dark corridor.")
                .with_action("Run", "outside")
                .with_action("Hide", "entry"),
            StoryNode::new("collapse", "").with_ending("CRUSHED", "The ceiling gives way."),
            StoryNode::new("outside", "").with_ending("FREE", "Daylight at last."),
        ];
        Arc::new(StoryGraph::from_nodes(nodes, ValidationPolicy::Strict).unwrap())
    }

    fn lenient_graph() -> Arc<StoryGraph> {
        let nodes = vec![
            StoryNode::new("entry", "A fork in the road.")
                .with_action("Left", "nowhere")
                .with_action("Right", "town"),
            StoryNode::new("town", "").with_ending("HOME", "You found people."),
        ];
        Arc::new(StoryGraph::from_nodes(nodes, ValidationPolicy::Lenient).unwrap())
    }

    fn scene(progress: Progress) -> SceneView {
        match progress {
            Progress::Scene(scene) => scene,
            other => panic!("expected a scene, got {other:?}"),
        }
    }

    #[test]
    fn test_start_at_entry() {
        let engine = NarrativeEngine::start(setup_test_graph());

        let view = scene(engine.current());
        assert_eq!(view.node.as_str(), "entry");
        assert_eq!(view.prompt, "The shelter door is jammed.");
        assert_eq!(view.background.as_deref(), Some("shelter.png"));
        let labels: Vec<_> = view.choices.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Force it", "Wait", "Force it"]);
        assert!(view.choices.iter().all(|c| c.enabled));
        assert_eq!(engine.position().map(NodeId::as_str), Some("entry"));
    }

    #[test]
    fn test_choose_by_index() {
        let mut engine = NarrativeEngine::start(setup_test_graph());

        let view = scene(engine.choose(0).unwrap());

        assert_eq!(view.node.as_str(), "corridor");
        assert_eq!(engine.position().unwrap().as_str(), "corridor");
    }

    #[test]
    fn test_duplicate_labels_are_addressed_by_position() {
        let mut engine = NarrativeEngine::start(setup_test_graph());

        let progress = engine.choose(2).unwrap();

        assert_eq!(progress.ending().unwrap().heading, "CRUSHED");
    }

    #[test]
    fn test_choose_by_label_picks_first_match() {
        let mut engine = NarrativeEngine::start(setup_test_graph());

        let view = scene(engine.choose("Force it").unwrap());

        assert_eq!(view.node.as_str(), "corridor");
    }

    #[test]
    fn test_choose_is_deterministic() {
        let graph = setup_test_graph();

        let mut a = NarrativeEngine::start(graph.clone());
        let mut b = NarrativeEngine::start(graph);

        assert_eq!(a.choose(0).unwrap(), b.choose(0).unwrap());
        assert_eq!(a.choose(1).unwrap(), b.choose(1).unwrap());
    }

    #[test]
    fn test_unknown_action_leaves_node_unchanged() {
        let mut engine = NarrativeEngine::start(setup_test_graph());

        let err = engine.choose(7).unwrap_err();
        assert!(matches!(err, NarrativeError::ActionNotFound { ref node, .. } if node.as_str() == "entry"));

        let err = engine.choose("Dig").unwrap_err();
        assert!(matches!(err, NarrativeError::ActionNotFound { .. }));

        assert_eq!(engine.state(), EngineState::Playing(engine.graph().entry_index()));
    }

    #[test]
    fn test_missing_target_yields_action_not_found() {
        let mut engine = NarrativeEngine::start(lenient_graph());

        let view = scene(engine.current());
        assert!(!view.choices[0].enabled);
        assert!(view.choices[1].enabled);

        let err = engine.choose("Left").unwrap_err();
        match err {
            NarrativeError::ActionNotFound { node, action } => {
                assert_eq!(node.as_str(), "entry");
                assert_eq!(action, ActionRef::from("Left"));
            }
            other => panic!("expected ActionNotFound, got {other:?}"),
        }
        assert_eq!(engine.position().unwrap().as_str(), "entry");

        // The other branch still works
        assert!(engine.choose("Right").unwrap().is_finished());
    }

    #[test]
    fn test_scenario_reaches_ending() {
        let graph = Arc::new(StoryGraph::from_json_str(SCENARIO, ValidationPolicy::Strict).unwrap());
        let mut engine = NarrativeEngine::start(graph);

        assert_eq!(scene(engine.current()).prompt, "Where to?");

        let progress = engine.choose("go").unwrap();
        match progress {
            Progress::Ended(view) => {
                assert_eq!(view.heading, "DONE");
                assert_eq!(view.description, "...");
                assert_eq!(view.background.as_deref(), Some("sunrise.png"));
            }
            other => panic!("expected Ended, got {other:?}"),
        }
        assert!(engine.is_finished());
        assert!(engine.position().is_none());
    }

    #[test]
    fn test_choose_after_ending_fails() {
        let mut engine = NarrativeEngine::start(setup_test_graph());
        engine.choose(2).unwrap();

        assert!(matches!(engine.choose(0), Err(NarrativeError::StoryOver)));
    }

    #[test]
    fn test_surrender() {
        let mut engine = NarrativeEngine::start(setup_test_graph());
        engine.choose(0).unwrap();

        let progress = engine.surrender();

        match progress {
            Progress::Surrendered(view) => {
                assert_eq!(view.heading, SURRENDER_HEADING);
                assert_eq!(view.description, SURRENDER_DESCRIPTION);
            }
            other => panic!("expected Surrendered, got {other:?}"),
        }
        assert_eq!(engine.state(), EngineState::Surrendered);
        assert!(matches!(engine.choose(0), Err(NarrativeError::StoryOver)));
    }

    #[test]
    fn test_resume_at_saved_node() {
        let engine = NarrativeEngine::resume(setup_test_graph(), &NodeId::new("corridor")).unwrap();

        assert_eq!(scene(engine.current()).prompt, "A dark corridor.");
    }

    #[test]
    fn test_resume_at_missing_node() {
        let err = NarrativeEngine::resume(setup_test_graph(), &NodeId::new("vault")).unwrap_err();

        assert!(matches!(err, NarrativeError::NodeNotFound { id } if id.as_str() == "vault"));
    }

    #[test]
    fn test_resume_on_ending_is_finished() {
        let engine = NarrativeEngine::resume(setup_test_graph(), &NodeId::new("outside")).unwrap();

        assert!(engine.is_finished());
        assert_eq!(engine.current().ending().unwrap().heading, "FREE");
    }

    #[test]
    fn test_history() {
        let mut engine = NarrativeEngine::start(setup_test_graph());
        engine.choose(0).unwrap();
        engine.choose("Hide").unwrap();
        engine.choose(0).unwrap();

        let visited: Vec<_> = engine.history().map(NodeId::as_str).collect();
        assert_eq!(visited, vec!["entry", "corridor", "entry", "corridor"]);
    }

    #[test]
    fn test_playthroughs_are_distinct() {
        let graph = setup_test_graph();
        let a = NarrativeEngine::start(graph.clone());
        let b = NarrativeEngine::start(graph);

        assert_ne!(a.playthrough(), b.playthrough());
    }
}
