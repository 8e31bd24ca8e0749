use super::definition::ItemRef;
use std::rc::Rc;

/// An instance of an item with quantity
///
/// This represents a specific amount of an item type stored in one
/// inventory slot. The store never keeps a stack with `amount == 0`;
/// an absent slot is the empty stack.
#[derive(Debug, Clone)]
pub struct ItemStack {
    /// Shared definition, compared by identity
    pub item: ItemRef,

    /// How many of this item (1 to max_stack_size while stored)
    pub amount: u32,
}

impl ItemStack {
    /// Creates a new item stack
    pub fn new(item: ItemRef, amount: u32) -> Self {
        ItemStack { item, amount }
    }

    /// Returns true if this stack holds the given definition
    pub fn holds(&self, item: &ItemRef) -> bool {
        Rc::ptr_eq(&self.item, item)
    }

    /// Returns true if this stack holds nothing
    pub fn is_empty(&self) -> bool {
        self.amount == 0
    }

    /// How many more items fit before hitting the max stack size
    pub fn space_left(&self) -> u32 {
        self.item.max_stack_size().saturating_sub(self.amount)
    }

    /// Returns true if `other` could be merged into this stack
    ///
    /// Both must be non-empty, share the same definition and this stack
    /// must still have room.
    pub fn can_stack_with(&self, other: &ItemStack) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && Rc::ptr_eq(&self.item, &other.item)
            && self.space_left() > 0
    }

    /// Adds items to this stack
    ///
    /// Returns how many items couldn't fit (overflow)
    pub fn add(&mut self, amount: u32) -> u32 {
        let added = amount.min(self.space_left());
        self.amount += added;
        amount - added
    }

    /// Takes up to `amount` items from this stack
    ///
    /// Returns how many items were actually taken (might be less if stack is small)
    pub fn take(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.amount);
        self.amount -= taken;
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemDefinition;

    #[test]
    fn test_add_overflows_at_max() {
        let item = ItemDefinition::new("stone", "Stone", 64).into_ref();
        let mut stack = ItemStack::new(item, 50);

        let overflow = stack.add(20);
        assert_eq!(stack.amount, 64);
        assert_eq!(overflow, 6);
        assert_eq!(stack.space_left(), 0);
    }

    #[test]
    fn test_take_clamps_to_amount() {
        let item = ItemDefinition::new("stone", "Stone", 64).into_ref();
        let mut stack = ItemStack::new(item, 5);

        let taken = stack.take(10);
        assert_eq!(taken, 5); // Only had 5 to take
        assert!(stack.is_empty());
    }

    #[test]
    fn test_stacking_uses_identity() {
        let a = ItemDefinition::new("gem", "Gem", 10).into_ref();
        let a_again = ItemDefinition::new("gem", "Gem", 10).into_ref();

        let first = ItemStack::new(a.clone(), 3);
        assert!(first.can_stack_with(&ItemStack::new(a.clone(), 1)));
        // Same id, different definition handle: not the same item
        assert!(!first.can_stack_with(&ItemStack::new(a_again, 1)));
        assert!(!ItemStack::new(a.clone(), 10).can_stack_with(&ItemStack::new(a, 1)));
    }
}
