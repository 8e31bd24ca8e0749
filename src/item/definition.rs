use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Shared handle to an item definition
///
/// Stacks hold one of these and compare definitions with `Rc::ptr_eq`,
/// so two definitions with the same id but different allocations are
/// different items.
pub type ItemRef = Rc<ItemDefinition>;

/// The blueprint for an item type
///
/// This defines the static properties of an item that are shared
/// across all instances. Think of it as the "class" and ItemStack
/// as the "instance". Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Unique identifier (used for lookups and saves)
    pub id: String,

    /// Display name shown in UI
    pub name: String,

    /// Description shown in tooltips
    #[serde(default)]
    pub description: String,

    /// Whether several of this item can share one slot
    #[serde(default = "default_stackable")]
    pub stackable: bool,

    /// Maximum amount per slot when stackable (0 = unbounded)
    #[serde(default = "default_max_stack_size")]
    pub max_stack_size: u32,
}

fn default_stackable() -> bool {
    true
}

fn default_max_stack_size() -> u32 {
    99
}

impl ItemDefinition {
    /// Creates a new stackable item definition
    pub fn new(id: impl Into<String>, name: impl Into<String>, max_stack_size: u32) -> Self {
        ItemDefinition {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            stackable: true,
            max_stack_size,
        }
        .with_id_from_name()
    }

    /// Creates a definition that always takes one slot per item
    pub fn unique(id: impl Into<String>, name: impl Into<String>) -> Self {
        ItemDefinition {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            stackable: false,
            max_stack_size: 1,
        }
        .with_id_from_name()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Fills an empty id from the display name ("Red Key" -> "red_key")
    pub fn with_id_from_name(mut self) -> Self {
        if self.id.is_empty() && !self.name.is_empty() {
            self.id = self.name.to_lowercase().replace(' ', "_");
        }
        self
    }

    /// Effective per-slot capacity
    ///
    /// A configured size of 0 means "no limit" and reports `u32::MAX`.
    pub fn max_stack_size(&self) -> u32 {
        if self.max_stack_size == 0 {
            u32::MAX
        } else {
            self.max_stack_size
        }
    }

    /// How much of this item a single empty slot can take
    pub fn slot_capacity(&self) -> u32 {
        if self.stackable { self.max_stack_size() } else { 1 }
    }

    /// Wraps the definition in a shared handle
    pub fn into_ref(self) -> ItemRef {
        Rc::new(self)
    }
}
