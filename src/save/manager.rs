//! Save manager for handling save/load operations
//!
//! Handles:
//! - Writing and reading JSON save files in one directory
//! - Manual slots (`slot_N.json`) and timestamped autosaves
//! - Autosave timing and listing existing saves

use super::types::*;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

const SLOT_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

pub struct SaveManager {
    save_directory: PathBuf,
    current_save_slot: u8,
    autosave_interval: Duration,
    last_autosave: Option<SystemTime>,
}

/// Summary of a save file found on disk
#[derive(Debug, Clone)]
pub struct SaveFileInfo {
    pub filename: String,
    pub timestamp: SystemTime,
    pub metadata: SaveMetadata,
}

impl SaveManager {
    /// Creates a SaveManager for `save_directory`, creating the directory if needed
    pub fn new(save_directory: impl AsRef<Path>) -> Result<Self, SaveError> {
        let save_directory = save_directory.as_ref().to_path_buf();
        fs::create_dir_all(&save_directory)?;

        Ok(SaveManager {
            save_directory,
            current_save_slot: 1,
            autosave_interval: Duration::from_secs(300),
            last_autosave: None,
        })
    }

    /// Platform data directory for saves (e.g. `~/.local/share/gameplay_core/saves`)
    pub fn default_directory() -> Result<PathBuf, SaveError> {
        dirs::data_dir()
            .map(|dir| dir.join("gameplay_core").join("saves"))
            .ok_or(SaveError::NoSaveDirectory)
    }

    pub fn directory(&self) -> &Path {
        &self.save_directory
    }

    /// Sets the current save slot (1-5)
    pub fn set_save_slot(&mut self, slot: u8) {
        self.current_save_slot = slot.clamp(*SLOT_RANGE.start(), *SLOT_RANGE.end());
    }

    pub fn save_slot(&self) -> u8 {
        self.current_save_slot
    }

    pub fn set_autosave_interval(&mut self, interval: Duration) {
        self.autosave_interval = interval;
    }

    /// Writes a save file and returns its path
    pub fn save_game(&mut self, save_file: &SaveFile) -> Result<PathBuf, SaveError> {
        let filename = Self::filename_for(save_file.metadata.save_type, save_file.metadata.save_slot);
        let path = self.save_directory.join(filename);

        let json = serde_json::to_string_pretty(save_file)?;
        fs::write(&path, json)?;

        if save_file.metadata.save_type == SaveType::Auto {
            self.last_autosave = Some(SystemTime::now());
        }

        info!("Game saved to {}", path.display());
        Ok(path)
    }

    /// Loads the manual save in `slot`
    pub fn load_game(&self, slot: u8) -> Result<SaveFile, SaveError> {
        self.load_game_by_filename(&format!("slot_{}.json", slot))
    }

    pub fn load_game_by_filename(&self, filename: &str) -> Result<SaveFile, SaveError> {
        let path = self.save_directory.join(filename);
        let json = fs::read_to_string(&path)?;
        let save_file: SaveFile = serde_json::from_str(&json)?;

        if save_file.version > CURRENT_SAVE_VERSION {
            return Err(SaveError::InvalidVersion(save_file.version));
        }

        info!("Loaded save {}", path.display());
        Ok(save_file)
    }

    pub fn save_exists(&self, slot: u8) -> bool {
        self.save_directory.join(format!("slot_{}.json", slot)).exists()
    }

    /// True if no autosave happened yet or the interval has elapsed
    pub fn should_autosave(&self) -> bool {
        match self.last_autosave {
            None => true,
            Some(last) => SystemTime::now()
                .duration_since(last)
                .map(|elapsed| elapsed >= self.autosave_interval)
                .unwrap_or(false),
        }
    }

    /// Lists readable save files, newest first
    pub fn list_saves(&self) -> Result<Vec<SaveFileInfo>, SaveError> {
        let mut saves = Vec::new();

        for entry in fs::read_dir(&self.save_directory)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if let Ok(save_file) = self.load_game_by_filename(filename) {
                saves.push(SaveFileInfo {
                    filename: filename.to_string(),
                    timestamp: save_file.timestamp,
                    metadata: save_file.metadata,
                });
            }
        }

        saves.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(saves)
    }

    fn filename_for(save_type: SaveType, slot: u8) -> String {
        match save_type {
            SaveType::Manual | SaveType::QuickSave => format!("slot_{}.json", slot),
            SaveType::Auto => {
                let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
                format!("autosave_slot{}_{}.json", slot, stamp)
            }
        }
    }
}
