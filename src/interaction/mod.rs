// Interaction module
//
// - Interactable: capability contract for anything the player can use
// - InteractionProfile: prompt/priority values with configurable defaults
// - InteractionSelector: picks the best candidate in range every tick

pub mod interactable;
pub mod selector;

pub use interactable::{Interactable, InteractionProfile};
pub use selector::{Candidate, InteractionSelector};
