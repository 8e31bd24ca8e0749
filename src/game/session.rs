// Session: one play session driven by a fixed tick loop
//
// Owns the World, the InteractionSelector and every spawned interactable.
// The outer host (renderer, physics, input) calls `enter_proximity` /
// `exit_proximity` as things come in and out of range, `enter_area` when
// something walks into a dialogue area, and `tick` once per frame with the
// player's position and input.

use super::world::{EntityCommand, EntityId, World};
use crate::dialogue::DialogueTrigger;
use crate::interaction::{Candidate, InteractionSelector};
use crate::item::ItemRegistry;
use crate::math::Vec2;
use crate::save::{SaveError, SaveFile, SaveMetadata, Saveable, CURRENT_SAVE_VERSION};
use log::debug;
use std::collections::{BTreeMap, HashSet};
use std::time::SystemTime;

/// Input for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickInput {
    /// Player position
    pub anchor: Vec2,
    /// Seconds since the previous tick
    pub dt: f32,
    /// Interact key went down this tick
    pub interact_pressed: bool,
    /// Dialogue advance key went down this tick
    pub advance_pressed: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub target_changed: bool,
    pub interacted: bool,
    pub doors_opened: usize,
}

pub struct Session {
    pub world: World,
    selector: InteractionSelector<World>,
    entities: BTreeMap<EntityId, Candidate<World>>,
    inactive: HashSet<EntityId>,
    areas: Vec<DialogueTrigger>,
    next_id: u32,
}

impl Session {
    pub fn new(world: World) -> Self {
        Session {
            world,
            selector: InteractionSelector::new(),
            entities: BTreeMap::new(),
            inactive: HashSet::new(),
            areas: Vec::new(),
            next_id: 0,
        }
    }

    /// Spawns an interactable; `build` receives the id the entity will have
    pub fn spawn(&mut self, build: impl FnOnce(EntityId) -> Candidate<World>) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, build(id));
        id
    }

    /// Removes an entity; the selector forgets it on the next tick
    pub fn despawn(&mut self, id: EntityId) -> bool {
        self.inactive.remove(&id);
        self.entities.remove(&id).is_some()
    }

    pub fn entity(&self, id: EntityId) -> Option<&Candidate<World>> {
        self.entities.get(&id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn is_active(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id) && !self.inactive.contains(&id)
    }

    /// The spatial system reports `id` entered interaction range
    pub fn enter_proximity(&mut self, id: EntityId) -> bool {
        if !self.is_active(id) {
            return false;
        }
        match self.entities.get(&id) {
            Some(entity) => self.selector.add_candidate(entity),
            None => false,
        }
    }

    /// The spatial system reports `id` left interaction range
    pub fn exit_proximity(&mut self, id: EntityId) -> bool {
        match self.entities.get(&id) {
            Some(entity) => self.selector.remove_candidate(entity),
            None => false,
        }
    }

    /// Registers an area that starts a dialogue when the player walks in
    pub fn add_dialogue_area(&mut self, trigger: DialogueTrigger) -> usize {
        self.areas.push(trigger);
        self.areas.len() - 1
    }

    /// The spatial system reports something entered dialogue area `area`
    ///
    /// Returns true if a dialogue started. Only the player triggers areas.
    pub fn enter_area(&mut self, area: usize, is_player: bool) -> bool {
        match self.areas.get(area) {
            Some(trigger) => trigger.on_enter(is_player, &mut self.world.dialogue),
            None => false,
        }
    }

    pub fn selector(&self) -> &InteractionSelector<World> {
        &self.selector
    }

    /// Mutable access for registering target-changed listeners
    pub fn selector_mut(&mut self) -> &mut InteractionSelector<World> {
        &mut self.selector
    }

    /// Prompt the UI should show, if anything is targeted
    pub fn prompt(&self) -> Option<String> {
        self.selector.current_prompt()
    }

    /// Runs one frame: select, interact, apply despawns, then advance timers
    pub fn tick(&mut self, input: TickInput) -> TickReport {
        let mut report = TickReport {
            target_changed: self.selector.evaluate(input.anchor),
            ..TickReport::default()
        };

        if input.interact_pressed {
            report.interacted = self.selector.trigger(&mut self.world);
        }
        self.apply_commands();

        if input.advance_pressed {
            self.world.dialogue.advance();
        }
        self.world.dialogue.tick(input.dt);

        for door in self.world.doors_mut() {
            if door.tick(input.dt) {
                report.doors_opened += 1;
            }
        }

        self.world.sounds.recycle();
        report
    }

    /// Captures the persistent parts of the session
    pub fn capture_save(&self, metadata: SaveMetadata) -> SaveFile {
        SaveFile {
            version: CURRENT_SAVE_VERSION,
            timestamp: SystemTime::now(),
            metadata,
            inventory: self.world.inventory.to_snapshot(),
            solved_puzzles: self
                .world
                .doors()
                .iter()
                .filter(|door| door.puzzle.is_solved())
                .map(|door| door.puzzle.name().to_string())
                .collect(),
        }
    }

    /// Restores inventory and puzzle progress from a save
    ///
    /// Solved puzzles load with their doors already fully open.
    pub fn apply_save(&mut self, save: &SaveFile, registry: &ItemRegistry) -> Result<(), SaveError> {
        self.world.inventory.restore(&save.inventory, registry)?;

        for door in self.world.doors_mut() {
            if save.solved_puzzles.iter().any(|name| name == door.puzzle.name()) {
                door.puzzle.mark_solved();
                door.open();
                door.tick(f32::MAX);
            }
        }
        Ok(())
    }

    fn apply_commands(&mut self) {
        for command in self.world.take_commands() {
            match command {
                EntityCommand::Despawn(id) => {
                    debug!("Despawning entity {:?}", id);
                    self.despawn(id);
                }
                EntityCommand::Deactivate(id) => {
                    debug!("Deactivating entity {:?}", id);
                    if let Some(entity) = self.entities.get(&id) {
                        self.selector.remove_candidate(entity);
                        self.inactive.insert(id);
                    }
                }
            }
        }
    }
}
