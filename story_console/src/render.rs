//! Text rendering of phase views.
//!
//! Every selectable item gets a number; the player types the number to pick
//! it.

use story_engine::{ButtonView, Input, PhaseView, SlotMode};

/// A rendered screen and the input behind each numbered option.
#[derive(Debug)]
pub struct Menu {
    pub text: String,
    options: Vec<Input>,
}

impl Menu {
    /// Input for a typed line, if it names one of the options.
    pub fn select(&self, line: &str) -> Option<Input> {
        let number: usize = line.trim().parse().ok()?;
        number
            .checked_sub(1)
            .and_then(|index| self.options.get(index))
            .copied()
    }

    fn option(&mut self, input: Input, label: &str, enabled: bool) {
        self.options.push(input);
        let marker = if enabled { "" } else { " (unavailable)" };
        self.line(&format!("  [{}] {}{}", self.options.len(), label, marker));
    }

    fn buttons(&mut self, buttons: &[ButtonView]) {
        for button in buttons {
            self.option(Input::Button(button.button), button.label(), button.enabled);
        }
    }

    fn line(&mut self, text: &str) {
        self.text.push_str(text);
        self.text.push('\n');
    }
}

pub fn render(view: &PhaseView) -> Menu {
    let mut menu = Menu {
        text: String::new(),
        options: Vec::new(),
    };

    match view {
        PhaseView::MainMenu { title, buttons } => {
            menu.line(&format!("\n=== {} ===\n", title));
            menu.buttons(buttons);
        }
        PhaseView::InGame { scene, buttons } => {
            menu.line("");
            if let Some(background) = &scene.background {
                menu.line(&format!("[{}]", background));
            }
            menu.line(&scene.prompt);
            menu.line("");
            for (index, choice) in scene.choices.iter().enumerate() {
                menu.option(Input::Choice(index), &choice.label, choice.enabled);
            }
            menu.buttons(buttons);
        }
        PhaseView::Paused { buttons } => {
            menu.line("\n=== PAUSED ===\n");
            menu.buttons(buttons);
        }
        PhaseView::SavedGames {
            mode,
            slots,
            buttons,
        } => {
            let heading = match mode {
                SlotMode::Load => "LOAD GAME",
                SlotMode::Save => "SAVE GAME",
            };
            menu.line(&format!("\n=== {} ===\n", heading));
            for slot in slots {
                let label = if slot.occupied {
                    format!("Slot {}", slot.slot)
                } else {
                    format!("Slot {} - empty", slot.slot)
                };
                menu.option(Input::Slot(slot.slot), &label, slot.enabled);
            }
            menu.buttons(buttons);
        }
        PhaseView::EndGame { ending, buttons } => {
            menu.line("");
            if let Some(background) = &ending.background {
                menu.line(&format!("[{}]", background));
            }
            menu.line(&format!("*** {} ***", ending.heading));
            menu.line(&ending.description);
            menu.line("");
            menu.buttons(buttons);
        }
    }

    menu
}
