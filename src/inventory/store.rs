use crate::events::{ListenerId, Observers};
use crate::item::{ItemRef, ItemStack};
use log::debug;
use std::collections::BTreeMap;

/// Fixed-capacity, stacking-aware item storage
///
/// Slots live in a sparse map from slot index to a non-empty stack;
/// a missing entry is an empty slot. The map is ordered by index, so
/// every scan (top-up, removal, empty slot search) walks slots in
/// ascending order and the same calls always produce the same layout.
///
/// All operations are total: an out-of-range slot or a zero amount is
/// a no-op that reports 0, never an error.
#[derive(Debug)]
pub struct InventoryStore {
    capacity: usize,
    slots: BTreeMap<usize, ItemStack>,
    listeners: Observers<InventoryStore>,
}

impl InventoryStore {
    /// Creates a new empty inventory with the specified number of slots
    pub fn new(capacity: usize) -> Self {
        InventoryStore {
            capacity,
            slots: BTreeMap::new(),
            listeners: Observers::new(),
        }
    }

    /// Number of addressable slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots currently holding a stack
    pub fn occupied_slots(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the stack in a slot, or None for empty/out-of-range slots
    pub fn slot(&self, index: usize) -> Option<ItemStack> {
        if index >= self.capacity {
            return None;
        }
        self.slots.get(&index).cloned()
    }

    /// Iterates occupied slots in ascending index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ItemStack)> {
        self.slots.iter().map(|(index, stack)| (*index, stack))
    }

    /// Counts how many of a specific item are in the inventory
    ///
    /// Saturates at `u32::MAX` (several full stacks of an unbounded item).
    pub fn total_count(&self, item: &ItemRef) -> u32 {
        let total: u64 = self
            .slots
            .values()
            .filter(|stack| stack.holds(item))
            .map(|stack| u64::from(stack.amount))
            .sum();
        u32::try_from(total).unwrap_or(u32::MAX)
    }

    /// Checks if the inventory has at least `amount` of an item
    pub fn has_item(&self, item: &ItemRef, amount: u32) -> bool {
        self.total_count(item) >= amount
    }

    /// How much of `amount` an `add_item` call would accept right now
    ///
    /// Mirrors `add_item` without touching any slot: spare room in
    /// matching stacks first (stackable items only), then empty slots.
    pub fn count_space_for(&self, item: &ItemRef, amount: u32) -> u32 {
        if amount == 0 {
            return 0;
        }

        let mut remaining = amount;

        if item.stackable {
            for stack in self.slots.values().filter(|stack| stack.holds(item)) {
                if remaining == 0 {
                    break;
                }
                remaining -= remaining.min(stack.space_left());
            }
        }

        let empty_slots = (self.capacity - self.slots.len()) as u64;
        let empty_room = empty_slots.saturating_mul(item.slot_capacity() as u64);
        remaining -= (remaining as u64).min(empty_room) as u32;

        amount - remaining
    }

    /// Adds items to the inventory
    ///
    /// Returns how many items were actually added.
    ///
    /// # Strategy
    /// 1. Top up existing partial stacks of the same item (stackable only)
    /// 2. Create new stacks in empty slots, lowest index first
    /// 3. Whatever is left over is simply not added
    pub fn add_item(&mut self, item: &ItemRef, amount: u32) -> u32 {
        if amount == 0 {
            return 0;
        }

        let mut remaining = amount;

        // Phase 1: Top up existing stacks
        if item.stackable {
            for stack in self.slots.values_mut() {
                if remaining == 0 {
                    break;
                }
                if stack.holds(item) {
                    remaining = stack.add(remaining);
                }
            }
        }

        // Phase 2: Fill empty slots in ascending order
        let per_slot = item.slot_capacity();
        let mut index = 0;
        while remaining > 0 && index < self.capacity {
            if !self.slots.contains_key(&index) {
                let put = remaining.min(per_slot);
                self.slots.insert(index, ItemStack::new(item.clone(), put));
                remaining -= put;
            }
            index += 1;
        }

        let added = amount - remaining;
        if added > 0 {
            debug!("Added {} x{} ({} requested)", item.id, added, amount);
            self.notify_changed();
        }
        added
    }

    /// Removes items from the inventory
    ///
    /// Returns the number of items actually removed (might be less than requested).
    /// Stacks that run out are deleted from their slot.
    pub fn remove_item(&mut self, item: &ItemRef, amount: u32) -> u32 {
        let mut remaining = amount;

        for stack in self.slots.values_mut() {
            if remaining == 0 {
                break;
            }
            if stack.holds(item) {
                remaining -= stack.take(remaining);
            }
        }

        self.slots.retain(|_, stack| !stack.is_empty());

        let removed = amount - remaining;
        if removed > 0 {
            debug!("Removed {} x{} ({} requested)", item.id, removed, amount);
            self.notify_changed();
        }
        removed
    }

    /// Removes up to `amount` from one specific slot
    ///
    /// Returns the number of items removed.
    pub fn remove_at(&mut self, slot_index: usize, amount: u32) -> u32 {
        if slot_index >= self.capacity || amount == 0 {
            return 0;
        }

        let Some(stack) = self.slots.get_mut(&slot_index) else {
            return 0;
        };

        let removed = stack.take(amount);
        if stack.is_empty() {
            self.slots.remove(&slot_index);
        }

        if removed > 0 {
            debug!("Removed x{} from slot {}", removed, slot_index);
            self.notify_changed();
        }
        removed
    }

    /// Swaps the contents of two slots, including empty ones
    ///
    /// Out-of-range indices are ignored. Notifies listeners once unless
    /// both slots were already empty.
    pub fn swap_slots(&mut self, slot_a: usize, slot_b: usize) {
        if slot_a >= self.capacity || slot_b >= self.capacity {
            return;
        }

        if slot_a == slot_b {
            if self.slots.contains_key(&slot_a) {
                self.notify_changed();
            }
            return;
        }

        let stack_a = self.slots.remove(&slot_a);
        let stack_b = self.slots.remove(&slot_b);

        if stack_a.is_none() && stack_b.is_none() {
            return;
        }

        if let Some(stack) = stack_b {
            self.slots.insert(slot_a, stack);
        }
        if let Some(stack) = stack_a {
            self.slots.insert(slot_b, stack);
        }

        self.notify_changed();
    }

    /// Clears all items from the inventory
    pub fn clear(&mut self) {
        if self.slots.is_empty() {
            return;
        }
        self.slots.clear();
        self.notify_changed();
    }

    /// Registers a change listener; it receives the store after each mutation
    pub fn subscribe(&mut self, listener: impl FnMut(&InventoryStore) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Replaces every slot at once (used when restoring a save)
    ///
    /// Entries outside the capacity or with a zero amount are dropped.
    pub(crate) fn replace_slots(&mut self, slots: BTreeMap<usize, ItemStack>) {
        let capacity = self.capacity;
        self.slots = slots
            .into_iter()
            .filter(|(index, stack)| *index < capacity && !stack.is_empty())
            .collect();
        self.notify_changed();
    }

    fn notify_changed(&mut self) {
        // Listeners only see `&self`, so none of them can be mid-call here
        let mut listeners = std::mem::take(&mut self.listeners);
        listeners.notify(self);
        self.listeners = listeners;
    }
}
