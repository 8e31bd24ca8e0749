// Crafting module
//
// Recipes consume ingredients from an InventoryStore and add a result.

pub mod recipe;
pub mod system;

pub use recipe::{CraftingRecipe, RecipeIngredient};
pub use system::{CraftError, CraftedEvent, CraftingSystem};
