//! Error types for play, configuration and phase handling.

use std::path::PathBuf;
use story_graph::{ActionRef, NodeId, SaveError, SlotId};
use thiserror::Error;

use crate::events::Input;
use crate::phases::PhaseKind;

/// Errors from the narrative engine. All of them are recoverable.
#[derive(Debug, Error)]
pub enum NarrativeError {
    /// The chosen action does not exist or points outside the story.
    #[error("action {action} on node '{node}' does not lead to a node in the story")]
    ActionNotFound { node: NodeId, action: ActionRef },

    /// A saved position no longer exists in the loaded story.
    #[error("saved node '{id}' is not part of the current story")]
    NodeNotFound { id: NodeId },

    #[error("the story is over; start a new playthrough to continue")]
    StoryOver,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors surfaced by the phase controller.
///
/// The controller stays on the screen it was on when one of these is returned.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Narrative(#[from] NarrativeError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error("save slot {slot} is empty")]
    EmptySlot { slot: SlotId },

    #[error("{input} is not available on the {phase} screen")]
    UnexpectedInput { phase: PhaseKind, input: Input },
}
