//! Logical input events produced by a front-end.
//!
//! Front-ends translate clicks and key presses into these; the phase
//! controller never sees raw device input.

use serde::{Deserialize, Serialize};
use story_graph::SlotId;

/// Every menu button in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    NewGame,
    LoadSaved,
    LoadQuicksave,
    /// The pause icon on the in-game screen.
    Pause,
    Resume,
    SaveGame,
    MainMenu,
    Surrender,
    ExitGame,
    Back,
}

impl Button {
    /// Caption shown on the button.
    pub fn label(self) -> &'static str {
        match self {
            Button::NewGame => "NEW GAME",
            Button::LoadSaved => "LOAD SAVED",
            Button::LoadQuicksave => "LOAD QUICKSAVE",
            Button::Pause => "PAUSE",
            Button::Resume => "RESUME",
            Button::SaveGame => "SAVE GAME",
            Button::MainMenu => "MAIN MENU",
            Button::Surrender => "SURRENDER",
            Button::ExitGame => "EXIT GAME",
            Button::Back => "BACK",
        }
    }
}

impl std::fmt::Display for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    Button(Button),
    /// Index into the current node's choices.
    Choice(usize),
    /// A slot picked on the saved-games screen.
    Slot(SlotId),
}

impl From<Button> for Input {
    fn from(button: Button) -> Self {
        Input::Button(button)
    }
}

impl std::fmt::Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Button(button) => write!(f, "button {}", button),
            Input::Choice(index) => write!(f, "choice #{}", index),
            Input::Slot(slot) => write!(f, "slot {}", slot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_display() {
        assert_eq!(Input::from(Button::LoadQuicksave).to_string(), "button LOAD QUICKSAVE");
        assert_eq!(Input::Choice(2).to_string(), "choice #2");
        assert_eq!(Input::Slot(SlotId::MANUAL[0]).to_string(), "slot 1");
    }
}
