use crate::events::{ListenerId, Observers};
use log::info;
use std::cell::Cell;
use std::rc::Rc;

/// A two-state puzzle piece
///
/// Shared between the entity the player interacts with and the puzzle
/// that checks it, hence the interior mutability.
#[derive(Debug)]
pub struct PuzzleSwitch {
    correct_state: bool,
    current_state: Cell<bool>,
}

impl PuzzleSwitch {
    pub fn new(correct_state: bool, current_state: bool) -> Rc<Self> {
        Rc::new(PuzzleSwitch {
            correct_state,
            current_state: Cell::new(current_state),
        })
    }

    /// Flips the switch and returns the new state
    pub fn toggle(&self) -> bool {
        let state = !self.current_state.get();
        self.current_state.set(state);
        state
    }

    pub fn state(&self) -> bool {
        self.current_state.get()
    }

    pub fn is_in_correct_state(&self) -> bool {
        self.current_state.get() == self.correct_state
    }
}

/// A set of switches that is solved once every switch is correct
///
/// Solving is latched: `on_solved` fires the first time the puzzle is
/// found solved, later checks don't fire again.
#[derive(Debug)]
pub struct Puzzle {
    name: String,
    switches: Vec<Rc<PuzzleSwitch>>,
    solved: bool,
    on_solved: Observers<str>,
}

impl Puzzle {
    pub fn new(name: impl Into<String>, switches: Vec<Rc<PuzzleSwitch>>) -> Self {
        Puzzle {
            name: name.into(),
            switches,
            solved: false,
            on_solved: Observers::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn switches(&self) -> &[Rc<PuzzleSwitch>] {
        &self.switches
    }

    /// True if every switch currently matches its target state
    pub fn all_correct(&self) -> bool {
        self.switches.iter().all(|switch| switch.is_in_correct_state())
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Marks the puzzle solved without firing listeners (save restore)
    pub fn mark_solved(&mut self) {
        self.solved = true;
    }

    /// Re-checks the switches after one changed
    ///
    /// Returns true only on the check that solves the puzzle.
    pub fn check(&mut self) -> bool {
        if self.solved || !self.all_correct() {
            return false;
        }

        self.solved = true;
        info!("Puzzle '{}' solved", self.name);
        self.on_solved.notify(&self.name);
        true
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&str) + 'static) -> ListenerId {
        self.on_solved.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.on_solved.unsubscribe(id)
    }
}
