// Game module - composes the subsystems into a playable session
//
// This module contains:
// - world.rs: World, the context every interaction receives
// - entities.rs: concrete interactables (pickups, levers, talk bridges)
// - session.rs: Session, the per-tick driver owning world + selector

pub mod entities;
pub mod session;
pub mod world;

pub use entities::{DialogueBridge, PickupItem, PuzzleLever};
pub use session::{Session, TickInput, TickReport};
pub use world::{EntityId, World};
