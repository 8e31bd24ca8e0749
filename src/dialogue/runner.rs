use super::data::{Dialogue, DialogueLine};
use crate::events::{ListenerId, Observers};
use log::{debug, warn};
use std::rc::Rc;

/// Notifications raised while a dialogue plays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueEvent {
    /// A line became current (index into the dialogue)
    LineStarted(usize),
    /// The current line is fully visible and waits for `advance`
    LineRevealed(usize),
    /// The last line was dismissed
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Typing { revealed: usize, progress: f32 },
    Waiting,
}

/// Plays a `Dialogue` one line at a time
///
/// The typewriter effect is plain state advanced by `tick(dt)` from the
/// game loop: each tick reveals `dt * chars_per_second` more characters.
/// `advance` is the player's "next" input: it finishes the reveal while
/// typing, otherwise moves on to the next line (or completes).
#[derive(Debug)]
pub struct DialogueRunner {
    dialogue: Option<Rc<Dialogue>>,
    line_index: usize,
    phase: Phase,
    default_chars_per_second: f32,
    events: Observers<DialogueEvent>,
}

impl DialogueRunner {
    pub fn new(default_chars_per_second: f32) -> Self {
        DialogueRunner {
            dialogue: None,
            line_index: 0,
            phase: Phase::Idle,
            default_chars_per_second,
            events: Observers::new(),
        }
    }

    /// Starts a dialogue, replacing any dialogue already running
    ///
    /// An empty dialogue completes immediately.
    pub fn start(&mut self, dialogue: Rc<Dialogue>) {
        if dialogue.is_empty() {
            warn!("Dialogue has no lines, completing immediately");
            self.finish();
            return;
        }

        self.dialogue = Some(dialogue);
        self.line_index = 0;
        self.show_current_line();
    }

    /// Stops without raising `Completed`
    pub fn stop(&mut self) {
        self.dialogue = None;
        self.line_index = 0;
        self.phase = Phase::Idle;
    }

    /// Advances the typewriter by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        let Phase::Typing { revealed, progress } = self.phase else {
            return;
        };
        let Some(line) = self.current_line() else {
            return;
        };

        let total = line.text.chars().count();
        let speed = self.speed_for(line);
        let progress = progress + dt.max(0.0) * speed;
        let revealed = revealed.max((progress as usize).min(total));

        if revealed >= total {
            self.reveal_all();
        } else {
            self.phase = Phase::Typing { revealed, progress };
        }
    }

    /// Player input: skip the typewriter, or go to the next line
    ///
    /// Returns false when no dialogue is running.
    pub fn advance(&mut self) -> bool {
        match self.phase {
            Phase::Idle => false,
            Phase::Typing { .. } => {
                self.reveal_all();
                true
            }
            Phase::Waiting => {
                let line_count = self.dialogue.as_ref().map_or(0, |d| d.lines.len());
                if self.line_index + 1 >= line_count {
                    self.finish();
                } else {
                    self.line_index += 1;
                    self.show_current_line();
                }
                true
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn is_typing(&self) -> bool {
        matches!(self.phase, Phase::Typing { .. })
    }

    pub fn line_index(&self) -> Option<usize> {
        self.is_active().then_some(self.line_index)
    }

    pub fn current_line(&self) -> Option<&DialogueLine> {
        if !self.is_active() {
            return None;
        }
        self.dialogue.as_ref()?.lines.get(self.line_index)
    }

    /// The part of the current line revealed so far
    pub fn visible_text(&self) -> &str {
        let Some(line) = self.current_line() else {
            return "";
        };

        match self.phase {
            Phase::Typing { revealed, .. } => {
                let end = line
                    .text
                    .char_indices()
                    .nth(revealed)
                    .map_or(line.text.len(), |(byte, _)| byte);
                &line.text[..end]
            }
            _ => &line.text,
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&DialogueEvent) + 'static) -> ListenerId {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    fn speed_for(&self, line: &DialogueLine) -> f32 {
        line.chars_per_second.unwrap_or(self.default_chars_per_second)
    }

    fn show_current_line(&mut self) {
        let Some(line) = self.current_line_unchecked() else {
            self.finish();
            return;
        };
        let instant = line.text.is_empty() || self.speed_for(line) <= 0.0;

        debug!("Dialogue line {}", self.line_index);
        self.phase = Phase::Typing { revealed: 0, progress: 0.0 };
        self.events.notify(&DialogueEvent::LineStarted(self.line_index));

        if instant {
            self.reveal_all();
        }
    }

    fn current_line_unchecked(&self) -> Option<&DialogueLine> {
        self.dialogue.as_ref()?.lines.get(self.line_index)
    }

    fn reveal_all(&mut self) {
        self.phase = Phase::Waiting;
        self.events.notify(&DialogueEvent::LineRevealed(self.line_index));
    }

    fn finish(&mut self) {
        self.stop();
        self.events.notify(&DialogueEvent::Completed);
    }
}

impl Default for DialogueRunner {
    fn default() -> Self {
        Self::new(crate::config::DialogueConfig::default().default_chars_per_second)
    }
}
