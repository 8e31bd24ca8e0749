//! Gameplay core: inventory, interaction targeting, crafting, dialogue,
//! puzzles, sound pooling and saves for a 2D game.
//!
//! Everything is driven from a single tick loop (`game::Session::tick`);
//! nothing here renders, polls input or loads assets.

pub mod config;
pub mod crafting;
pub mod dialogue;
pub mod events;
pub mod game;
pub mod interaction;
pub mod inventory;
pub mod item;
pub mod math;
pub mod puzzle;
pub mod save;
pub mod sound;
