//! Gameplay configuration
//!
//! All tuning values live in one TOML file. Every section and field has a
//! default, so an empty file (or no file at all) is a valid configuration.
//!
//! ```toml
//! [inventory]
//! slot_count = 20
//!
//! [interaction]
//! default_prompt = "Interact"
//! default_priority = 0
//!
//! [sound]
//! voice_pool_size = 10
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub inventory: InventoryConfig,
    pub interaction: InteractionConfig,
    pub dialogue: DialogueConfig,
    pub door: DoorConfig,
    pub sound: SoundConfig,
    pub save: SaveConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub slot_count: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        InventoryConfig { slot_count: 20 }
    }
}

/// Defaults for interactables that don't set their own prompt/priority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub default_prompt: String,
    pub default_priority: i32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        InteractionConfig {
            default_prompt: "Interact".to_string(),
            default_priority: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    /// Typewriter speed for lines that don't set one (0 = instant)
    pub default_chars_per_second: f32,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        DialogueConfig {
            default_chars_per_second: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorConfig {
    /// How far each panel slides, in world units
    pub open_distance: f32,
    /// Seconds the slide takes
    pub open_duration: f32,
}

impl Default for DoorConfig {
    fn default() -> Self {
        DoorConfig {
            open_distance: 1.0,
            open_duration: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    pub voice_pool_size: usize,
    pub ambient_volume: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,
}

impl Default for SoundConfig {
    fn default() -> Self {
        SoundConfig {
            voice_pool_size: 10,
            ambient_volume: 0.1,
            pitch_min: 0.8,
            pitch_max: 1.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    /// Save directory; None uses the platform data directory
    pub directory: Option<PathBuf>,
}

impl GameplayConfig {
    /// Loads and validates a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parses and validates TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameplayConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.inventory.slot_count == 0 {
            return Err(ConfigError::Invalid("inventory.slot_count must be > 0".into()));
        }
        if !(self.dialogue.default_chars_per_second >= 0.0) {
            return Err(ConfigError::Invalid(
                "dialogue.default_chars_per_second must be >= 0".into(),
            ));
        }
        if !(self.door.open_duration >= 0.0) {
            return Err(ConfigError::Invalid("door.open_duration must be >= 0".into()));
        }
        if !(0.0..=1.0).contains(&self.sound.ambient_volume) {
            return Err(ConfigError::Invalid("sound.ambient_volume must be in 0..=1".into()));
        }
        if !(self.sound.pitch_min > 0.0 && self.sound.pitch_min <= self.sound.pitch_max) {
            return Err(ConfigError::Invalid(
                "sound.pitch_min must be > 0 and <= sound.pitch_max".into(),
            ));
        }
        Ok(())
    }
}
