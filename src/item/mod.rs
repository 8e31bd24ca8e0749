// Item system module
//
// This module provides the item data model:
// - Item definitions (shared, immutable, compared by identity)
// - Item registry for id lookups (save loading, content setup)
// - Item stacks for quantity management

pub mod definition;
pub mod registry;
pub mod stack;

// Re-export main types for convenient access
pub use definition::{ItemDefinition, ItemRef};
pub use registry::{ItemRegistry, RegistryError};
pub use stack::ItemStack;
