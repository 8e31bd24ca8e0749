//! Saveable trait for game state that goes into a save file

use super::types::SaveError;
use crate::inventory::{InventorySnapshot, InventoryStore};
use crate::item::{ItemRegistry, ItemStack};
use std::collections::BTreeMap;

/// State that can be captured into, and restored from, plain save data
///
/// Restoring happens in place so listeners registered on the live object
/// stay attached and see one change notification.
pub trait Saveable {
    type Snapshot;

    fn to_snapshot(&self) -> Self::Snapshot;

    /// Replaces the current state with `snapshot`
    ///
    /// On error the current state is left untouched.
    fn restore(&mut self, snapshot: &Self::Snapshot, registry: &ItemRegistry) -> Result<(), SaveError>;
}

impl Saveable for InventoryStore {
    type Snapshot = InventorySnapshot;

    fn to_snapshot(&self) -> InventorySnapshot {
        InventorySnapshot::capture(self)
    }

    fn restore(&mut self, snapshot: &InventorySnapshot, registry: &ItemRegistry) -> Result<(), SaveError> {
        let mut slots = BTreeMap::new();

        for entry in &snapshot.slots {
            if entry.slot >= self.capacity() {
                return Err(SaveError::CorruptedData(format!(
                    "slot {} outside inventory of {} slots",
                    entry.slot,
                    self.capacity()
                )));
            }

            let item = registry
                .get(&entry.item_id)
                .ok_or_else(|| SaveError::UnknownItem(entry.item_id.clone()))?;

            if entry.amount == 0 || entry.amount > item.slot_capacity() {
                return Err(SaveError::CorruptedData(format!(
                    "slot {} holds {} x {} (max {})",
                    entry.slot,
                    entry.amount,
                    item.id,
                    item.slot_capacity()
                )));
            }

            if slots.insert(entry.slot, ItemStack::new(item, entry.amount)).is_some() {
                return Err(SaveError::CorruptedData(format!("slot {} listed twice", entry.slot)));
            }
        }

        self.replace_slots(slots);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::SlotSnapshot;
    use crate::item::ItemDefinition;
    use std::rc::Rc;

    fn registry() -> ItemRegistry {
        let mut registry = ItemRegistry::new();
        registry.register(ItemDefinition::new("wood", "Wood", 10)).unwrap();
        registry.register(ItemDefinition::unique("key", "Key")).unwrap();
        registry
    }

    fn entry(slot: usize, item_id: &str, amount: u32) -> SlotSnapshot {
        SlotSnapshot { slot, item_id: item_id.into(), amount }
    }

    #[test]
    fn test_restore_resolves_shared_definitions() {
        let registry = registry();
        let wood = registry.get("wood").unwrap();

        let mut store = InventoryStore::new(4);
        store.add_item(&wood, 13);
        store.swap_slots(0, 2);
        let snapshot = store.to_snapshot();

        let mut loaded = InventoryStore::new(4);
        loaded.restore(&snapshot, &registry).unwrap();

        assert_eq!(loaded.to_snapshot(), snapshot);
        assert!(Rc::ptr_eq(&loaded.slot(2).unwrap().item, &wood));
        // Restored stacks keep stacking with new additions
        assert_eq!(loaded.add_item(&wood, 7), 7);
        assert_eq!(loaded.total_count(&wood), 20);
    }

    #[test]
    fn test_restore_rejects_bad_entries() {
        let registry = registry();
        let mut store = InventoryStore::new(2);
        let wood = registry.get("wood").unwrap();
        store.add_item(&wood, 3);

        let cases = [
            InventorySnapshot { capacity: 2, slots: vec![entry(5, "wood", 1)] },
            InventorySnapshot { capacity: 2, slots: vec![entry(0, "wood", 11)] },
            InventorySnapshot { capacity: 2, slots: vec![entry(0, "key", 2)] },
            InventorySnapshot { capacity: 2, slots: vec![entry(0, "wood", 0)] },
            InventorySnapshot { capacity: 2, slots: vec![entry(1, "wood", 1), entry(1, "key", 1)] },
        ];
        for snapshot in &cases {
            assert!(matches!(
                store.restore(snapshot, &registry),
                Err(SaveError::CorruptedData(_))
            ));
        }

        let unknown = InventorySnapshot { capacity: 2, slots: vec![entry(0, "gold", 1)] };
        assert!(matches!(store.restore(&unknown, &registry), Err(SaveError::UnknownItem(_))));

        // Failed restores leave the store as it was
        assert_eq!(store.total_count(&wood), 3);
    }
}
