//! Save data types
//!
//! Everything here is plain serde data written as pretty JSON. Items are
//! referenced by id and resolved through the `ItemRegistry` on load.

use crate::inventory::InventorySnapshot;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use thiserror::Error;

/// Current save file version
pub const CURRENT_SAVE_VERSION: u32 = 1;

/// The root save file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub timestamp: SystemTime,
    pub metadata: SaveMetadata,
    pub inventory: InventorySnapshot,
    /// Names of puzzles already solved (their doors load open)
    #[serde(default)]
    pub solved_puzzles: Vec<String>,
}

/// Metadata about the save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub game_version: String,
    pub player_name: Option<String>,
    pub playtime_seconds: u64,
    pub save_type: SaveType,
    pub save_slot: u8,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SaveType {
    Manual,
    Auto,
    QuickSave,
}

/// Error types for save/load operations
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unsupported save version: {0}")]
    InvalidVersion(u32),

    #[error("corrupted save data: {0}")]
    CorruptedData(String),

    #[error("unknown item id in save: {0}")]
    UnknownItem(String),

    #[error("no save directory available on this platform")]
    NoSaveDirectory,
}
