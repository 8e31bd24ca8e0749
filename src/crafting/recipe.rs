use crate::item::ItemRef;
use std::rc::Rc;

/// Item + amount pair used for both ingredients and results
#[derive(Debug, Clone)]
pub struct RecipeIngredient {
    pub item: ItemRef,
    pub amount: u32,
}

impl RecipeIngredient {
    pub fn new(item: ItemRef, amount: u32) -> Self {
        RecipeIngredient { item, amount }
    }

    pub fn is_valid(&self) -> bool {
        self.amount > 0
    }
}

/// A crafting recipe: what goes in, what comes out
#[derive(Debug, Clone)]
pub struct CraftingRecipe {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub result: RecipeIngredient,
}

impl CraftingRecipe {
    pub fn new(name: impl Into<String>, result: RecipeIngredient) -> Self {
        CraftingRecipe {
            name: name.into(),
            description: String::new(),
            ingredients: Vec::new(),
            result,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_ingredient(mut self, item: ItemRef, amount: u32) -> Self {
        self.ingredients.push(RecipeIngredient::new(item, amount));
        self
    }

    /// Total amount needed per distinct item
    ///
    /// An item listed more than once is merged into a single entry, in the
    /// order it first appears.
    pub fn requirements(&self) -> Vec<RecipeIngredient> {
        let mut merged: Vec<RecipeIngredient> = Vec::new();
        for ingredient in &self.ingredients {
            match merged.iter_mut().find(|m| Rc::ptr_eq(&m.item, &ingredient.item)) {
                Some(existing) => existing.amount = existing.amount.saturating_add(ingredient.amount),
                None => merged.push(ingredient.clone()),
            }
        }
        merged
    }

    /// At least one ingredient, and every ingredient plus the result has a positive amount
    pub fn is_valid(&self) -> bool {
        !self.ingredients.is_empty()
            && self.ingredients.iter().all(RecipeIngredient::is_valid)
            && self.result.is_valid()
    }
}
