// Concrete interactables
//
// Each one stores an InteractionProfile for its prompt/priority and a
// fixed position; the Session owns them behind `Rc` and the selector
// only sees weak handles.

use super::world::{EntityId, World};
use crate::dialogue::DialogueTrigger;
use crate::interaction::{Interactable, InteractionProfile};
use crate::item::ItemRef;
use crate::math::Vec2;
use crate::puzzle::PuzzleSwitch;
use crate::sound::SoundName;
use log::debug;
use std::cell::Cell;
use std::rc::Rc;

/// An item lying in the world
///
/// Interacting adds as much as fits to the inventory. Once everything is
/// taken the pickup despawns (or deactivates if `destroy_on_pickup` is
/// off); a partial pickup leaves the rest on the ground.
pub struct PickupItem {
    id: EntityId,
    item: ItemRef,
    remaining: Cell<u32>,
    profile: InteractionProfile,
    position: Vec2,
    destroy_on_pickup: bool,
}

impl PickupItem {
    pub fn new(id: EntityId, item: ItemRef, amount: u32, position: Vec2, profile: InteractionProfile) -> Self {
        PickupItem {
            id,
            item,
            remaining: Cell::new(amount),
            profile,
            position,
            destroy_on_pickup: true,
        }
    }

    /// Deactivate instead of despawning once emptied
    pub fn keep_after_pickup(mut self) -> Self {
        self.destroy_on_pickup = false;
        self
    }

    pub fn remaining(&self) -> u32 {
        self.remaining.get()
    }
}

impl Interactable<World> for PickupItem {
    fn interact(&self, world: &mut World) {
        let added = world.inventory.add_item(&self.item, self.remaining.get());
        if added == 0 {
            debug!("No room to pick up {}", self.item.id);
            return;
        }

        world.sounds.play(SoundName::Coin, self.position, true);

        let left = self.remaining.get() - added;
        self.remaining.set(left);
        if left > 0 {
            return;
        }

        if self.destroy_on_pickup {
            world.despawn(self.id);
        } else {
            world.deactivate(self.id);
        }
    }

    fn prompt_text(&self) -> String {
        self.profile.prompt.clone()
    }

    fn priority(&self) -> i32 {
        self.profile.priority
    }

    fn position(&self) -> Vec2 {
        self.position
    }
}

/// A lever that toggles one switch of a puzzle door
pub struct PuzzleLever {
    switch: Rc<PuzzleSwitch>,
    door: usize,
    profile: InteractionProfile,
    position: Vec2,
}

impl PuzzleLever {
    pub fn new(switch: Rc<PuzzleSwitch>, door: usize, position: Vec2, profile: InteractionProfile) -> Self {
        PuzzleLever {
            switch,
            door,
            profile,
            position,
        }
    }

    /// Sprite flip state for the renderer
    pub fn is_flipped(&self) -> bool {
        self.switch.state()
    }
}

impl Interactable<World> for PuzzleLever {
    fn interact(&self, world: &mut World) {
        self.switch.toggle();
        world.sounds.play(SoundName::Interact, self.position, false);
        world.switch_changed(self.door);
    }

    fn prompt_text(&self) -> String {
        self.profile.prompt.clone()
    }

    fn priority(&self) -> i32 {
        self.profile.priority
    }

    fn position(&self) -> Vec2 {
        self.position
    }
}

/// Lets the player start a dialogue by interacting instead of walking in
pub struct DialogueBridge {
    trigger: DialogueTrigger,
    profile: InteractionProfile,
    position: Vec2,
}

impl DialogueBridge {
    pub fn new(trigger: DialogueTrigger, position: Vec2, profile: InteractionProfile) -> Self {
        DialogueBridge {
            trigger,
            profile,
            position,
        }
    }
}

impl Interactable<World> for DialogueBridge {
    fn interact(&self, world: &mut World) {
        self.trigger.fire(&mut world.dialogue);
    }

    fn prompt_text(&self) -> String {
        self.profile.prompt.clone()
    }

    fn priority(&self) -> i32 {
        self.profile.priority
    }

    fn position(&self) -> Vec2 {
        self.position
    }
}
