use super::store::InventoryStore;
use serde::{Deserialize, Serialize};

/// One occupied slot as written to a save file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSnapshot {
    pub slot: usize,
    pub item_id: String,
    pub amount: u32,
}

/// Serializable view of an inventory
///
/// Items are stored by id; loading resolves them back to shared
/// definitions through the `ItemRegistry`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub capacity: usize,
    pub slots: Vec<SlotSnapshot>,
}

impl InventorySnapshot {
    /// Captures the occupied slots of a store, lowest index first
    pub fn capture(store: &InventoryStore) -> Self {
        InventorySnapshot {
            capacity: store.capacity(),
            slots: store
                .iter()
                .map(|(slot, stack)| SlotSnapshot {
                    slot,
                    item_id: stack.item.id.clone(),
                    amount: stack.amount,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemDefinition;

    #[test]
    fn test_capture_lists_occupied_slots() {
        let wood = ItemDefinition::new("wood", "Wood", 10).into_ref();
        let mut store = InventoryStore::new(4);
        store.add_item(&wood, 12);
        store.swap_slots(1, 3);

        let snapshot = InventorySnapshot::capture(&store);
        assert_eq!(snapshot.capacity, 4);
        assert_eq!(
            snapshot.slots,
            vec![
                SlotSnapshot { slot: 0, item_id: "wood".into(), amount: 10 },
                SlotSnapshot { slot: 3, item_id: "wood".into(), amount: 2 },
            ]
        );
    }
}
