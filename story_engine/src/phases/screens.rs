//! Screen contents for each phase, as handed to a front-end.

use serde::{Deserialize, Serialize};
use story_graph::{SaveStore, SlotId};

use crate::engine::{EndingView, SceneView};
use crate::events::Button;

/// A menu button and whether it can be pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonView {
    pub button: Button,
    pub enabled: bool,
}

impl ButtonView {
    pub fn new(button: Button, enabled: bool) -> Self {
        Self { button, enabled }
    }

    fn enabled(button: Button) -> Self {
        Self::new(button, true)
    }

    pub fn label(&self) -> &'static str {
        self.button.label()
    }
}

/// Whether the saved-games screen reads or writes slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotMode {
    Load,
    Save,
}

/// One entry on the saved-games screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub slot: SlotId,
    pub occupied: bool,
    pub enabled: bool,
}

/// Everything a front-end needs to draw the active phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseView {
    MainMenu {
        title: String,
        buttons: Vec<ButtonView>,
    },
    InGame {
        scene: SceneView,
        buttons: Vec<ButtonView>,
    },
    Paused {
        buttons: Vec<ButtonView>,
    },
    SavedGames {
        mode: SlotMode,
        slots: Vec<SlotView>,
        buttons: Vec<ButtonView>,
    },
    EndGame {
        ending: EndingView,
        buttons: Vec<ButtonView>,
    },
}

impl PhaseView {
    /// Menu buttons on this screen, in drawing order.
    pub fn buttons(&self) -> &[ButtonView] {
        match self {
            PhaseView::MainMenu { buttons, .. }
            | PhaseView::InGame { buttons, .. }
            | PhaseView::Paused { buttons }
            | PhaseView::SavedGames { buttons, .. }
            | PhaseView::EndGame { buttons, .. } => buttons,
        }
    }

    /// Whether `button` is on this screen and can be pressed.
    pub fn is_enabled(&self, button: Button) -> bool {
        self.buttons()
            .iter()
            .any(|b| b.button == button && b.enabled)
    }
}

pub(crate) fn main_menu(title: &str, saves: &dyn SaveStore) -> PhaseView {
    PhaseView::MainMenu {
        title: title.to_string(),
        buttons: vec![
            ButtonView::enabled(Button::NewGame),
            ButtonView::enabled(Button::LoadSaved),
            ButtonView::new(Button::LoadQuicksave, saves.exists(SlotId::QUICKSAVE)),
            ButtonView::enabled(Button::ExitGame),
        ],
    }
}

pub(crate) fn in_game(scene: SceneView) -> PhaseView {
    PhaseView::InGame {
        scene,
        buttons: vec![ButtonView::enabled(Button::Pause)],
    }
}

pub(crate) fn paused() -> PhaseView {
    PhaseView::Paused {
        buttons: [
            Button::Resume,
            Button::SaveGame,
            Button::MainMenu,
            Button::Surrender,
            Button::ExitGame,
        ]
        .into_iter()
        .map(ButtonView::enabled)
        .collect(),
    }
}

pub(crate) fn saved_games(mode: SlotMode, saves: &dyn SaveStore) -> PhaseView {
    let slots = SlotId::MANUAL
        .into_iter()
        .map(|slot| {
            let occupied = saves.exists(slot);
            SlotView {
                slot,
                occupied,
                enabled: mode == SlotMode::Save || occupied,
            }
        })
        .collect();

    PhaseView::SavedGames {
        mode,
        slots,
        buttons: vec![ButtonView::enabled(Button::Back)],
    }
}

pub(crate) fn end_game(ending: EndingView) -> PhaseView {
    PhaseView::EndGame {
        ending,
        buttons: vec![
            ButtonView::enabled(Button::MainMenu),
            ButtonView::enabled(Button::ExitGame),
        ],
    }
}
