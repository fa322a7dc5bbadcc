//! # Story Graph
//!
//! The "story bible" crate - the static narrative graph and the save slots that
//! point into it. This crate owns the data model and its persistence; it does
//! not contain any engine or UI logic.
//!
//! ## Core Components
//!
//! - **node**: Story nodes, actions and their resolved targets
//! - **graph**: The immutable story graph and its document loader
//! - **saves**: Slot ids and the stores that persist a position in the graph

pub mod error;
pub mod graph;
pub mod node;
pub mod saves;

pub use error::*;
pub use graph::*;
pub use node::*;
pub use saves::*;
