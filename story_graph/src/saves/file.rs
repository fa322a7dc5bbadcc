//! File-backed save store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{SaveStore, SlotId};
use crate::error::SaveError;
use crate::node::NodeId;

/// Stores each slot as `slot_<n>.sav` inside a directory.
///
/// The file holds the node id and nothing else.
#[derive(Debug, Clone)]
pub struct FileSaveStore {
    dir: PathBuf,
}

impl FileSaveStore {
    /// Create a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record backing `slot`.
    pub fn slot_path(&self, slot: SlotId) -> PathBuf {
        self.dir.join(format!("slot_{}.sav", slot.number()))
    }
}

impl SaveStore for FileSaveStore {
    fn save(&mut self, slot: SlotId, node: &NodeId) -> Result<(), SaveError> {
        fs::create_dir_all(&self.dir).map_err(|source| SaveError::Io { slot, source })?;
        fs::write(self.slot_path(slot), node.as_str())
            .map_err(|source| SaveError::Io { slot, source })?;

        debug!(slot = %slot, node = %node, dir = %self.dir.display(), "wrote save slot");
        Ok(())
    }

    fn load(&self, slot: SlotId) -> Result<Option<NodeId>, SaveError> {
        // Ids round-trip byte for byte
        match fs::read_to_string(self.slot_path(slot)) {
            Ok(text) => Ok(Some(NodeId::new(text))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SaveError::Io { slot, source }),
        }
    }

    fn exists(&self, slot: SlotId) -> bool {
        self.slot_path(slot).is_file()
    }
}
