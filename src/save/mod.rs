//! Save/Load system
//!
//! - JSON save files (human-readable, debuggable)
//! - Multiple manual slots (1-5) plus timestamped autosaves
//! - `Saveable` trait for state captured into a save
//!
//! # Architecture
//!
//! - `types`: Save data structures and error types
//! - `manager`: SaveManager for file operations
//! - `saveable`: Saveable trait and the inventory implementation

pub mod manager;
pub mod saveable;
pub mod types;

// Re-export commonly used types
pub use manager::{SaveFileInfo, SaveManager};
pub use saveable::Saveable;
pub use types::*;
