use super::recipe::CraftingRecipe;
use crate::events::{ListenerId, Observers};
use crate::inventory::InventoryStore;
use log::{info, warn};
use thiserror::Error;

/// Why a recipe can't be crafted right now
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CraftError {
    #[error("recipe '{0}' is not valid")]
    InvalidRecipe(String),

    #[error("missing {item_id} (required: {required}, available: {available})")]
    MissingIngredient {
        item_id: String,
        required: u32,
        available: u32,
    },

    #[error("no room for {amount} x {item_id}")]
    NoSpace { item_id: String, amount: u32 },
}

/// Raised after a successful craft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftedEvent {
    pub recipe: String,
    pub amount: u32,
}

/// The recipes available at one crafting station
#[derive(Debug, Default)]
pub struct CraftingSystem {
    recipes: Vec<CraftingRecipe>,
    on_crafted: Observers<CraftedEvent>,
}

impl CraftingSystem {
    pub fn new(recipes: Vec<CraftingRecipe>) -> Self {
        CraftingSystem {
            recipes,
            on_crafted: Observers::new(),
        }
    }

    pub fn recipes(&self) -> &[CraftingRecipe] {
        &self.recipes
    }

    pub fn recipe(&self, name: &str) -> Option<&CraftingRecipe> {
        self.recipes.iter().find(|recipe| recipe.name == name)
    }

    /// Checks ingredients and result space without changing anything
    pub fn check(&self, recipe: &CraftingRecipe, inventory: &InventoryStore) -> Result<(), CraftError> {
        if !recipe.is_valid() {
            return Err(CraftError::InvalidRecipe(recipe.name.clone()));
        }

        for ingredient in recipe.requirements() {
            let available = inventory.total_count(&ingredient.item);
            if available < ingredient.amount {
                return Err(CraftError::MissingIngredient {
                    item_id: ingredient.item.id.clone(),
                    required: ingredient.amount,
                    available,
                });
            }
        }

        let result = &recipe.result;
        if inventory.count_space_for(&result.item, result.amount) < result.amount {
            return Err(CraftError::NoSpace {
                item_id: result.item.id.clone(),
                amount: result.amount,
            });
        }

        Ok(())
    }

    pub fn can_craft(&self, recipe: &CraftingRecipe, inventory: &InventoryStore) -> bool {
        self.check(recipe, inventory).is_ok()
    }

    /// Recipes that could be crafted with the current inventory
    pub fn craftable<'a>(&'a self, inventory: &'a InventoryStore) -> impl Iterator<Item = &'a CraftingRecipe> + 'a {
        self.recipes
            .iter()
            .filter(move |recipe| self.can_craft(recipe, inventory))
    }

    /// Consumes the ingredients and adds the result
    ///
    /// Space is checked up front, so on success the full result amount is
    /// added. Nothing is consumed when the check fails.
    pub fn craft(&mut self, recipe: &CraftingRecipe, inventory: &mut InventoryStore) -> Result<u32, CraftError> {
        if let Err(err) = self.check(recipe, inventory) {
            warn!("Cannot craft {}: {}", recipe.name, err);
            return Err(err);
        }

        for ingredient in recipe.requirements() {
            inventory.remove_item(&ingredient.item, ingredient.amount);
        }

        let added = inventory.add_item(&recipe.result.item, recipe.result.amount);
        info!("Crafted {} x{}", recipe.name, added);

        self.on_crafted.notify(&CraftedEvent {
            recipe: recipe.name.clone(),
            amount: added,
        });
        Ok(added)
    }

    /// Crafts a registered recipe by name
    pub fn craft_named(&mut self, name: &str, inventory: &mut InventoryStore) -> Result<u32, CraftError> {
        let recipe = self
            .recipe(name)
            .cloned()
            .ok_or_else(|| CraftError::InvalidRecipe(name.to_string()))?;
        self.craft(&recipe, inventory)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&CraftedEvent) + 'static) -> ListenerId {
        self.on_crafted.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.on_crafted.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crafting::RecipeIngredient;
    use crate::item::{ItemDefinition, ItemRef};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Fixture {
        wood: ItemRef,
        stone: ItemRef,
        axe: ItemRef,
        recipe: CraftingRecipe,
    }

    fn fixture() -> Fixture {
        let wood = ItemDefinition::new("wood", "Wood", 10).into_ref();
        let stone = ItemDefinition::new("stone", "Stone", 10).into_ref();
        let axe = ItemDefinition::unique("axe", "Axe").into_ref();
        let recipe = CraftingRecipe::new("Axe", RecipeIngredient::new(axe.clone(), 1))
            .with_ingredient(wood.clone(), 3)
            .with_ingredient(stone.clone(), 2);
        Fixture { wood, stone, axe, recipe }
    }

    #[test]
    fn test_craft_consumes_and_produces() {
        let f = fixture();
        let mut inventory = InventoryStore::new(4);
        inventory.add_item(&f.wood, 5);
        inventory.add_item(&f.stone, 2);

        let mut crafting = CraftingSystem::new(vec![f.recipe.clone()]);
        let crafted = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&crafted);
        crafting.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        assert_eq!(crafting.craft(&f.recipe, &mut inventory), Ok(1));
        assert_eq!(inventory.total_count(&f.wood), 2);
        assert_eq!(inventory.total_count(&f.stone), 0);
        assert_eq!(inventory.total_count(&f.axe), 1);
        assert_eq!(
            *crafted.borrow(),
            vec![CraftedEvent { recipe: "Axe".into(), amount: 1 }]
        );
    }

    #[test]
    fn test_missing_ingredient_leaves_inventory_alone() {
        let f = fixture();
        let mut inventory = InventoryStore::new(4);
        inventory.add_item(&f.wood, 5);
        inventory.add_item(&f.stone, 1);

        let mut crafting = CraftingSystem::new(vec![f.recipe.clone()]);
        let err = crafting.craft(&f.recipe, &mut inventory).unwrap_err();

        assert_eq!(
            err,
            CraftError::MissingIngredient { item_id: "stone".into(), required: 2, available: 1 }
        );
        assert_eq!(inventory.total_count(&f.wood), 5);
        assert_eq!(inventory.total_count(&f.stone), 1);
    }

    #[test]
    fn test_no_space_for_result() {
        let f = fixture();
        let mut inventory = InventoryStore::new(2);
        inventory.add_item(&f.wood, 10);
        inventory.add_item(&f.stone, 2);

        let crafting = CraftingSystem::new(vec![f.recipe.clone()]);
        // Space is checked before ingredients are removed
        assert_eq!(
            crafting.check(&f.recipe, &inventory),
            Err(CraftError::NoSpace { item_id: "axe".into(), amount: 1 })
        );
    }

    #[test]
    fn test_repeated_ingredient_counts_in_full() {
        let f = fixture();
        let chest = CraftingRecipe::new("Crate", RecipeIngredient::new(f.axe.clone(), 1))
            .with_ingredient(f.wood.clone(), 3)
            .with_ingredient(f.wood.clone(), 3);
        let mut inventory = InventoryStore::new(4);
        inventory.add_item(&f.wood, 5);

        let mut crafting = CraftingSystem::new(vec![chest.clone()]);
        assert_eq!(
            crafting.check(&chest, &inventory),
            Err(CraftError::MissingIngredient { item_id: "wood".into(), required: 6, available: 5 })
        );

        inventory.add_item(&f.wood, 2);
        assert_eq!(crafting.craft(&chest, &mut inventory), Ok(1));
        assert_eq!(inventory.total_count(&f.wood), 1);
    }

    #[test]
    fn test_invalid_recipe_rejected() {
        let f = fixture();
        let inventory = InventoryStore::new(2);
        let empty = CraftingRecipe::new("Nothing", RecipeIngredient::new(f.axe.clone(), 1));
        let zero = CraftingRecipe::new("Zero", RecipeIngredient::new(f.axe.clone(), 0))
            .with_ingredient(f.wood.clone(), 1);

        let crafting = CraftingSystem::default();
        assert!(!crafting.can_craft(&empty, &inventory));
        assert!(!crafting.can_craft(&zero, &inventory));
    }

    #[test]
    fn test_craftable_and_craft_named() {
        let f = fixture();
        let mut inventory = InventoryStore::new(4);
        inventory.add_item(&f.wood, 3);
        inventory.add_item(&f.stone, 2);

        let mut crafting = CraftingSystem::new(vec![f.recipe.clone()]);
        let names: Vec<_> = crafting.craftable(&inventory).map(|r| r.name.clone()).collect();
        assert_eq!(names, vec!["Axe".to_string()]);

        assert_eq!(crafting.craft_named("Axe", &mut inventory), Ok(1));
        assert_eq!(crafting.craftable(&inventory).count(), 0);
        assert!(matches!(
            crafting.craft_named("Sword", &mut inventory),
            Err(CraftError::InvalidRecipe(_))
        ));
    }
}
