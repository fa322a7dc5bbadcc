//! In-memory save store.

use std::collections::HashMap;

use super::{SaveStore, SlotId};
use crate::error::SaveError;
use crate::node::NodeId;

/// Keeps slots in a map for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MemorySaveStore {
    records: HashMap<SlotId, NodeId>,
}

impl MemorySaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a slot.
    pub fn with_record(mut self, slot: SlotId, node: impl Into<NodeId>) -> Self {
        self.records.insert(slot, node.into());
        self
    }
}

impl SaveStore for MemorySaveStore {
    fn save(&mut self, slot: SlotId, node: &NodeId) -> Result<(), SaveError> {
        self.records.insert(slot, node.clone());
        Ok(())
    }

    fn load(&self, slot: SlotId) -> Result<Option<NodeId>, SaveError> {
        Ok(self.records.get(&slot).cloned())
    }

    fn exists(&self, slot: SlotId) -> bool {
        self.records.contains_key(&slot)
    }
}
