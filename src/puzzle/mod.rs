// Puzzle module
//
// - switch: two-state pieces (levers) that must match a target state
// - door: a puzzle whose solution slides a door open over time

pub mod door;
pub mod switch;

pub use door::{DoorMotion, PuzzleDoor};
pub use switch::{Puzzle, PuzzleSwitch};
