use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Every sound effect the game can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundName {
    Hit,
    Heal,
    Death,
    ButtonClick,
    BackgroundMusic,
    PowerUp,
    LevelComplete,
    GameOver,
    CheckPoint,
    Jump,
    Interact,
    Attack,
    Coin,
    DoorOpen,
}

/// Maps sound names to clip paths
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoundBank {
    clips: HashMap<SoundName, String>,
}

impl SoundBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the clip for a sound
    pub fn insert(&mut self, name: SoundName, clip: impl Into<String>) {
        self.clips.insert(name, clip.into());
    }

    pub fn with(mut self, name: SoundName, clip: impl Into<String>) -> Self {
        self.insert(name, clip);
        self
    }

    pub fn clip(&self, name: SoundName) -> Option<&str> {
        self.clips.get(&name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}
