use super::data::Dialogue;
use super::runner::DialogueRunner;
use std::cell::Cell;
use std::rc::Rc;

/// Starts a dialogue when fired, optionally only the first time
#[derive(Debug)]
pub struct DialogueTrigger {
    dialogue: Rc<Dialogue>,
    use_once: bool,
    triggered: Cell<bool>,
}

impl DialogueTrigger {
    pub fn new(dialogue: Rc<Dialogue>) -> Self {
        DialogueTrigger {
            dialogue,
            use_once: true,
            triggered: Cell::new(false),
        }
    }

    pub fn repeatable(mut self) -> Self {
        self.use_once = false;
        self
    }

    pub fn has_fired(&self) -> bool {
        self.triggered.get()
    }

    /// Starts the dialogue. Returns false if a use-once trigger already fired.
    pub fn fire(&self, runner: &mut DialogueRunner) -> bool {
        if self.use_once && self.triggered.get() {
            return false;
        }

        self.triggered.set(true);
        runner.start(Rc::clone(&self.dialogue));
        true
    }

    /// Proximity entry: only the player starts the dialogue
    pub fn on_enter(&self, is_player: bool, runner: &mut DialogueRunner) -> bool {
        is_player && self.fire(runner)
    }
}
