// Dialogue module
//
// - data: dialogue lines and sequences (content, deserializable from JSON)
// - runner: tick-driven sequencer with a typewriter reveal
// - trigger: fires a dialogue once (or every time) from interaction/proximity

pub mod data;
pub mod runner;
pub mod trigger;

pub use data::{Dialogue, DialogueLine};
pub use runner::{DialogueEvent, DialogueRunner};
pub use trigger::DialogueTrigger;
