//! Game configuration.
//!
//! Every key is optional; missing keys take the defaults below.
//!
//! ```toml
//! title = "POST APOCALYPTIC SURVIVAL GAME"
//! story_path = "assets/story.json"
//! save_dir = "saves"
//! validation = "strict"
//! quicksave_on_menu = true
//! quicksave_on_exit = true
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use story_graph::{FileSaveStore, StoryError, StoryGraph, ValidationPolicy};

use crate::error::ConfigError;

/// Top-level game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Title shown on the main menu.
    pub title: String,

    /// Story document, `.json` or `.toml`.
    pub story_path: PathBuf,

    /// Directory holding the save slot files.
    pub save_dir: PathBuf,

    /// How strictly the story is checked at load.
    pub validation: ValidationPolicy,

    /// Write the quicksave when leaving a game for the main menu.
    pub quicksave_on_menu: bool,

    /// Write the quicksave when exiting from the pause menu.
    pub quicksave_on_exit: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "POST APOCALYPTIC SURVIVAL GAME".to_string(),
            story_path: PathBuf::from("assets/story.json"),
            save_dir: PathBuf::from("saves"),
            validation: ValidationPolicy::Strict,
            quicksave_on_menu: true,
            quicksave_on_exit: true,
        }
    }
}

impl GameConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Load the configured story.
    pub fn load_story(&self) -> Result<StoryGraph, StoryError> {
        StoryGraph::load(&self.story_path, self.validation)
    }

    /// A file-backed save store rooted at the configured directory.
    pub fn save_store(&self) -> FileSaveStore {
        FileSaveStore::new(&self.save_dir)
    }
}
