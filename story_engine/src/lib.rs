//! # Story Engine
//!
//! The narrative state machine of the wasteland story. This crate walks the
//! graph from `story_graph`, keeps track of which screen the player is on and
//! writes save slots as the player moves between them.
//!
//! ## Core Components
//!
//! - **engine**: Narrative engine - current node, choices and endings
//! - **phases**: Phase controller - main menu, in-game, pause, saved games, end game
//! - **events**: Logical inputs produced by a front-end
//! - **config**: Game configuration loaded from TOML
//!
//! ## Design Philosophy
//!
//! - **Render-agnostic**: Phases expose plain view data and accept logical inputs
//! - **Owned phases**: Each transition builds the next phase instead of mutating a shared table
//! - **Recoverable play**: Errors during play are returned to the caller and leave the phase unchanged

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod phases;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use events::*;
pub use phases::*;
