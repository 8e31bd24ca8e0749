use crate::config::InteractionConfig;
use crate::math::Vec2;

/// Anything the player can interact with
///
/// `C` is the context handed to `interact`, usually the game world, so
/// an interactable can change inventories, start dialogue, etc. without
/// reaching for global state.
///
/// There are deliberately no provided methods: implementors store an
/// `InteractionProfile` and forward to it.
pub trait Interactable<C> {
    /// Runs the interaction (open, talk, pull lever...)
    fn interact(&self, ctx: &mut C);

    /// Text shown by the prompt UI ("Talk", "Pick up")
    fn prompt_text(&self) -> String;

    /// Higher wins when several candidates are in range
    fn priority(&self) -> i32;

    /// Current world position, used for the distance tie-break
    fn position(&self) -> Vec2;
}

/// Prompt text and priority for an interactable
///
/// `Default` gives "Interact" / 0; `from_config` takes the configured
/// defaults instead. Use the builder methods to override per entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionProfile {
    pub prompt: String,
    pub priority: i32,
}

impl InteractionProfile {
    pub fn from_config(config: &InteractionConfig) -> Self {
        InteractionProfile {
            prompt: config.default_prompt.clone(),
            priority: config.default_priority,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl Default for InteractionProfile {
    fn default() -> Self {
        Self::from_config(&InteractionConfig::default())
    }
}
