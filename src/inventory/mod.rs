// Inventory system module
//
// This module provides inventory management:
// - InventoryStore: fixed slot count, sparse storage, stacking rules
// - Snapshots for the save system

pub mod snapshot;
pub mod store;

// Re-export main types
pub use snapshot::{InventorySnapshot, SlotSnapshot};
pub use store::InventoryStore;
