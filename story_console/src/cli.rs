//! Command-line options.

use clap::Parser;
use std::path::PathBuf;
use story_engine::{ConfigError, GameConfig};
use story_graph::ValidationPolicy;

#[derive(Debug, Parser)]
#[command(name = "wasteland")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Play the post-apocalyptic survival story in a terminal")]
#[command(long_about = r#"
Plays a branching story in the terminal. Pick choices and menu buttons by
typing their number.

ENVIRONMENT VARIABLES:
  STORY_LOG    Log filter, e.g. "debug" or "story_engine=trace" (default: warn)
"#)]
pub struct Cli {
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Story document (.json or .toml), overrides the config
    #[arg(long)]
    pub story: Option<PathBuf>,

    /// Directory for save slots, overrides the config
    #[arg(long)]
    pub saves: Option<PathBuf>,

    /// Allow choices that point at missing nodes instead of refusing to start
    #[arg(long)]
    pub lenient: bool,

    /// Load and check the story, then exit
    #[arg(long)]
    pub check: bool,
}

impl Cli {
    /// Build the game configuration: config file first, then flags on top.
    pub fn resolve_config(&self) -> Result<GameConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(story) = &self.story {
            config.story_path = story.clone();
        }
        if let Some(saves) = &self.saves {
            config.save_dir = saves.clone();
        }
        if self.lenient {
            config.validation = ValidationPolicy::Lenient;
        }
        Ok(config)
    }
}
