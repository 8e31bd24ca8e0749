use super::definition::{ItemDefinition, ItemRef};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("item '{0}' already registered")]
    Duplicate(String),
}

/// Central registry of all item definitions
///
/// Hands out shared `ItemRef` handles so every stack in every inventory
/// points at the same definition. Saves store ids and are resolved
/// back through this registry.
#[derive(Debug, Default)]
pub struct ItemRegistry {
    items: HashMap<String, ItemRef>,
}

impl ItemRegistry {
    /// Creates a new empty registry
    pub fn new() -> Self {
        ItemRegistry {
            items: HashMap::new(),
        }
    }

    /// Registers a new item definition and returns its shared handle
    ///
    /// Returns error if an item with this ID already exists.
    pub fn register(&mut self, item: ItemDefinition) -> Result<ItemRef, RegistryError> {
        let item = item.with_id_from_name();
        if self.items.contains_key(&item.id) {
            return Err(RegistryError::Duplicate(item.id));
        }

        let handle = item.into_ref();
        self.items.insert(handle.id.clone(), handle.clone());
        Ok(handle)
    }

    /// Gets an item definition by ID
    pub fn get(&self, id: &str) -> Option<ItemRef> {
        self.items.get(id).cloned()
    }

    /// Returns true if an item with this ID exists
    pub fn exists(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates all registered definitions (unordered)
    pub fn iter(&self) -> impl Iterator<Item = &ItemRef> {
        self.items.values()
    }
}
