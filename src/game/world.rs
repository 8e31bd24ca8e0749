// World: the mutable game state interactions operate on
//
// Owns the inventory, crafting station, dialogue runner, sound system and
// puzzle doors. Interactables receive `&mut World` instead of looking up
// singletons; anything they can't do directly (despawning themselves) is
// queued here and applied by the Session after the interaction returns.

use crate::config::GameplayConfig;
use crate::crafting::CraftingSystem;
use crate::dialogue::DialogueRunner;
use crate::inventory::InventoryStore;
use crate::puzzle::PuzzleDoor;
use crate::sound::{SoundName, SoundSystem};
use log::warn;

/// Stable handle for a spawned entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u32);

/// Structural changes requested during an interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntityCommand {
    /// Drop the entity entirely
    Despawn(EntityId),
    /// Keep the entity but take it out of interaction range for good
    Deactivate(EntityId),
}

#[derive(Debug)]
pub struct World {
    pub config: GameplayConfig,
    pub inventory: InventoryStore,
    pub crafting: CraftingSystem,
    pub dialogue: DialogueRunner,
    pub sounds: SoundSystem,
    doors: Vec<PuzzleDoor>,
    commands: Vec<EntityCommand>,
}

impl World {
    pub fn new(config: GameplayConfig, sounds: SoundSystem, crafting: CraftingSystem) -> Self {
        World {
            inventory: InventoryStore::new(config.inventory.slot_count),
            dialogue: DialogueRunner::new(config.dialogue.default_chars_per_second),
            crafting,
            sounds,
            doors: Vec::new(),
            commands: Vec::new(),
            config,
        }
    }

    /// Adds a puzzle door and returns its index for levers to reference
    pub fn add_door(&mut self, door: PuzzleDoor) -> usize {
        self.doors.push(door);
        self.doors.len() - 1
    }

    pub fn door(&self, index: usize) -> Option<&PuzzleDoor> {
        self.doors.get(index)
    }

    pub fn doors(&self) -> &[PuzzleDoor] {
        &self.doors
    }

    pub(crate) fn doors_mut(&mut self) -> &mut [PuzzleDoor] {
        &mut self.doors
    }

    /// A switch of door `index` changed; opens the door if that solved it
    pub fn switch_changed(&mut self, index: usize) -> bool {
        let Some(door) = self.doors.get_mut(index) else {
            warn!("Switch changed for unknown door {}", index);
            return false;
        };

        if !door.on_switch_changed() {
            return false;
        }

        let position = door.position;
        self.sounds.play(SoundName::DoorOpen, position, false);
        true
    }

    /// Queues `id` for removal after the current interaction
    pub fn despawn(&mut self, id: EntityId) {
        self.commands.push(EntityCommand::Despawn(id));
    }

    /// Queues `id` to leave interaction range permanently
    pub fn deactivate(&mut self, id: EntityId) {
        self.commands.push(EntityCommand::Deactivate(id));
    }

    pub(crate) fn take_commands(&mut self) -> Vec<EntityCommand> {
        std::mem::take(&mut self.commands)
    }
}
