//! Save slots - persisted pointers into the story graph.
//!
//! A save holds nothing but the id of the node the player was on. The graph
//! itself is static and reloaded from the story file, so resuming is just
//! "jump to node X".

mod file;
mod memory;

pub use file::*;
pub use memory::*;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::SaveError;
use crate::node::NodeId;

/// Identifier of a save slot.
///
/// Slot `0` is the quicksave written automatically when leaving a game;
/// slots `1` to `3` are written by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SlotId(u8);

impl SlotId {
    pub const QUICKSAVE: SlotId = SlotId(0);

    /// Slots the player picks from the saved-games screen.
    pub const MANUAL: [SlotId; 3] = [SlotId(1), SlotId(2), SlotId(3)];

    const LAST: u8 = 3;

    /// Create a slot id, rejecting numbers outside `0..=3`.
    pub fn new(number: u8) -> Result<Self, SaveError> {
        if number <= Self::LAST {
            Ok(Self(number))
        } else {
            Err(SaveError::InvalidSlot(number.to_string()))
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn is_quicksave(self) -> bool {
        self == Self::QUICKSAVE
    }

    /// Every slot, quicksave first.
    pub fn all() -> impl Iterator<Item = SlotId> {
        (0..=Self::LAST).map(SlotId)
    }
}

impl TryFrom<u8> for SlotId {
    type Error = SaveError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::new(number)
    }
}

impl From<SlotId> for u8 {
    fn from(slot: SlotId) -> Self {
        slot.0
    }
}

impl FromStr for SlotId {
    type Err = SaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| SaveError::InvalidSlot(s.to_string()))
            .and_then(Self::new)
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Storage for save slots.
pub trait SaveStore: std::fmt::Debug {
    /// Write `node` to `slot`, replacing whatever was there.
    fn save(&mut self, slot: SlotId, node: &NodeId) -> Result<(), SaveError>;

    /// Read the node saved in `slot`, or `None` if the slot was never written.
    fn load(&self, slot: SlotId) -> Result<Option<NodeId>, SaveError>;

    /// Whether `slot` currently holds a record.
    fn exists(&self, slot: SlotId) -> bool;

    /// Manual slots that currently hold a record.
    fn occupied_slots(&self) -> Vec<SlotId> {
        SlotId::MANUAL
            .into_iter()
            .filter(|slot| self.exists(*slot))
            .collect()
    }
}
