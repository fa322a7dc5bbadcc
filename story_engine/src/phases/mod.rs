//! Phase Controller - the top-level screen switch.
//!
//! Each screen is a [`Phase`] variant that owns its own state. A transition
//! consumes the current phase and builds the next one, so the narrative engine
//! moves between in-game, pause and saved-games screens without being shared.

mod screens;

pub use screens::*;

use serde::{Deserialize, Serialize};
use std::mem;
use std::sync::Arc;
use story_graph::{SaveStore, SlotId, StoryGraph};
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::engine::{EndingView, NarrativeEngine, Progress};
use crate::error::GameError;
use crate::events::{Button, Input};

/// Which screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    MainMenu,
    InGame,
    Paused,
    SavedGames,
    EndGame,
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PhaseKind::MainMenu => "main menu",
            PhaseKind::InGame => "in-game",
            PhaseKind::Paused => "pause",
            PhaseKind::SavedGames => "saved games",
            PhaseKind::EndGame => "end game",
        };
        write!(f, "{}", name)
    }
}

/// The active screen and the state it owns.
#[derive(Debug)]
pub enum Phase {
    MainMenu,
    InGame(NarrativeEngine),
    Paused(NarrativeEngine),
    /// Saving keeps the paused engine so the player can return to it.
    SavedGames {
        mode: SlotMode,
        engine: Option<NarrativeEngine>,
    },
    EndGame(EndingView),
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::MainMenu => PhaseKind::MainMenu,
            Phase::InGame(_) => PhaseKind::InGame,
            Phase::Paused(_) => PhaseKind::Paused,
            Phase::SavedGames { .. } => PhaseKind::SavedGames,
            Phase::EndGame(_) => PhaseKind::EndGame,
        }
    }

    /// The engine of the playthrough in progress, if any.
    pub fn engine(&self) -> Option<&NarrativeEngine> {
        match self {
            Phase::InGame(engine) | Phase::Paused(engine) => Some(engine),
            Phase::SavedGames { engine, .. } => engine.as_ref(),
            Phase::MainMenu | Phase::EndGame(_) => None,
        }
    }
}

/// What the front-end should do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

type Step = Result<(Phase, Flow), (Phase, GameError)>;

/// Owns the story, the save store and the active phase, and routes inputs to
/// the active phase.
#[derive(Debug)]
pub struct PhaseController {
    graph: Arc<StoryGraph>,
    saves: Box<dyn SaveStore>,
    config: GameConfig,
    phase: Phase,
    notice: Option<String>,
}

impl PhaseController {
    /// Create a controller sitting on the main menu.
    pub fn new(graph: Arc<StoryGraph>, saves: Box<dyn SaveStore>, config: GameConfig) -> Self {
        Self {
            graph,
            saves,
            config,
            phase: Phase::MainMenu,
            notice: None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    pub fn saves(&self) -> &dyn SaveStore {
        self.saves.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// A message for the player about something that went wrong in the
    /// background, such as a failed quicksave. Cleared once taken.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Snapshot of the active screen.
    pub fn view(&self) -> PhaseView {
        match &self.phase {
            Phase::MainMenu => main_menu(&self.config.title, self.saves.as_ref()),
            Phase::InGame(engine) => match engine.current() {
                Progress::Scene(scene) => in_game(scene),
                Progress::Ended(ending) | Progress::Surrendered(ending) => end_game(ending),
            },
            Phase::Paused(_) => paused(),
            Phase::SavedGames { mode, .. } => saved_games(*mode, self.saves.as_ref()),
            Phase::EndGame(ending) => end_game(ending.clone()),
        }
    }

    /// Handle one input.
    ///
    /// On error the controller stays on the phase it was on, so the front-end
    /// can report the problem and let the player try again.
    pub fn handle(&mut self, input: Input) -> Result<Flow, GameError> {
        let phase = mem::replace(&mut self.phase, Phase::MainMenu);
        let from = phase.kind();

        match self.step(phase, input) {
            Ok((next, flow)) => {
                if next.kind() != from {
                    debug!(from = %from, to = %next.kind(), input = %input, "phase change");
                }
                self.phase = next;
                Ok(flow)
            }
            Err((phase, err)) => {
                warn!(phase = %from, input = %input, error = %err, "input rejected");
                self.phase = phase;
                Err(err)
            }
        }
    }

    fn step(&mut self, phase: Phase, input: Input) -> Step {
        match phase {
            Phase::MainMenu => self.main_menu(input),
            Phase::InGame(engine) => self.in_game(engine, input),
            Phase::Paused(engine) => self.paused(engine, input),
            Phase::SavedGames { mode, engine } => self.saved_games(mode, engine, input),
            Phase::EndGame(ending) => match input {
                Input::Button(Button::MainMenu) => Ok((Phase::MainMenu, Flow::Continue)),
                Input::Button(Button::ExitGame) => Ok((Phase::MainMenu, Flow::Exit)),
                _ => unexpected(Phase::EndGame(ending), input),
            },
        }
    }

    fn main_menu(&mut self, input: Input) -> Step {
        match input {
            Input::Button(Button::NewGame) => {
                let engine = NarrativeEngine::start(self.graph.clone());
                Ok((play(engine), Flow::Continue))
            }
            Input::Button(Button::LoadSaved) => Ok((
                Phase::SavedGames {
                    mode: SlotMode::Load,
                    engine: None,
                },
                Flow::Continue,
            )),
            Input::Button(Button::LoadQuicksave) => match self.resume(SlotId::QUICKSAVE) {
                Ok(engine) => Ok((play(engine), Flow::Continue)),
                Err(err) => Err((Phase::MainMenu, err)),
            },
            Input::Button(Button::ExitGame) => Ok((Phase::MainMenu, Flow::Exit)),
            _ => unexpected(Phase::MainMenu, input),
        }
    }

    fn in_game(&mut self, mut engine: NarrativeEngine, input: Input) -> Step {
        match input {
            Input::Choice(index) => match engine.choose(index) {
                Ok(Progress::Scene(_)) => Ok((Phase::InGame(engine), Flow::Continue)),
                Ok(Progress::Ended(ending)) | Ok(Progress::Surrendered(ending)) => {
                    Ok((Phase::EndGame(ending), Flow::Continue))
                }
                Err(err) => Err((Phase::InGame(engine), err.into())),
            },
            Input::Button(Button::Pause) => Ok((Phase::Paused(engine), Flow::Continue)),
            _ => unexpected(Phase::InGame(engine), input),
        }
    }

    fn paused(&mut self, mut engine: NarrativeEngine, input: Input) -> Step {
        match input {
            // The pause icon toggles back to the game
            Input::Button(Button::Resume) | Input::Button(Button::Pause) => {
                Ok((Phase::InGame(engine), Flow::Continue))
            }
            Input::Button(Button::SaveGame) => Ok((
                Phase::SavedGames {
                    mode: SlotMode::Save,
                    engine: Some(engine),
                },
                Flow::Continue,
            )),
            Input::Button(Button::MainMenu) => {
                if self.config.quicksave_on_menu {
                    self.quicksave(&engine);
                }
                Ok((Phase::MainMenu, Flow::Continue))
            }
            Input::Button(Button::Surrender) => {
                engine.surrender();
                Ok((play(engine), Flow::Continue))
            }
            Input::Button(Button::ExitGame) => {
                if self.config.quicksave_on_exit {
                    self.quicksave(&engine);
                }
                Ok((Phase::MainMenu, Flow::Exit))
            }
            _ => unexpected(Phase::Paused(engine), input),
        }
    }

    fn saved_games(
        &mut self,
        mode: SlotMode,
        engine: Option<NarrativeEngine>,
        input: Input,
    ) -> Step {
        let back = |engine: Option<NarrativeEngine>| match engine {
            Some(engine) => Phase::Paused(engine),
            None => Phase::MainMenu,
        };

        match (mode, input) {
            (_, Input::Button(Button::Back)) => Ok((back(engine), Flow::Continue)),
            (_, Input::Slot(slot)) if slot.is_quicksave() => {
                unexpected(Phase::SavedGames { mode, engine }, input)
            }
            (SlotMode::Load, Input::Slot(slot)) => match self.resume(slot) {
                Ok(resumed) => Ok((play(resumed), Flow::Continue)),
                Err(err) => Err((Phase::SavedGames { mode, engine }, err)),
            },
            (SlotMode::Save, Input::Slot(slot)) => {
                let Some(position) = engine.as_ref().and_then(|e| e.position()).cloned() else {
                    return unexpected(Phase::SavedGames { mode, engine }, input);
                };
                match self.saves.save(slot, &position) {
                    Ok(()) => {
                        info!(slot = %slot, node = %position, "game saved");
                        Ok((back(engine), Flow::Continue))
                    }
                    Err(err) => Err((Phase::SavedGames { mode, engine }, err.into())),
                }
            }
            _ => unexpected(Phase::SavedGames { mode, engine }, input),
        }
    }

    /// Build an engine from a save slot.
    fn resume(&self, slot: SlotId) -> Result<NarrativeEngine, GameError> {
        let saved = self
            .saves
            .load(slot)?
            .ok_or(GameError::EmptySlot { slot })?;
        Ok(NarrativeEngine::resume(self.graph.clone(), &saved)?)
    }

    /// Write the quicksave. Failures are reported as a notice and never block
    /// the transition that triggered the save.
    fn quicksave(&mut self, engine: &NarrativeEngine) {
        let Some(position) = engine.position() else {
            return;
        };

        match self.saves.save(SlotId::QUICKSAVE, position) {
            Ok(()) => info!(node = %position, playthrough = %engine.playthrough(), "quicksaved"),
            Err(err) => {
                warn!(error = %err, "quicksave failed");
                self.notice = Some(format!("Quicksave failed: {err}"));
            }
        }
    }
}

/// Enter the in-game phase, or go straight to the end screen if the engine
/// is already finished.
fn play(engine: NarrativeEngine) -> Phase {
    match engine.current() {
        Progress::Scene(_) => Phase::InGame(engine),
        Progress::Ended(ending) | Progress::Surrendered(ending) => Phase::EndGame(ending),
    }
}

fn unexpected(phase: Phase, input: Input) -> Step {
    let kind = phase.kind();
    Err((phase, GameError::UnexpectedInput { phase: kind, input }))
}
