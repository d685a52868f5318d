//! Recipe registry: registration-order scan, first match wins

use std::sync::Arc;

use crate::core::types::RecipeId;
use crate::crafting::inventory::RecipeInventory;
use crate::crafting::recipe::StationRecipe;

#[derive(Default)]
pub struct RecipeRegistry {
    recipes: Vec<Arc<dyn StationRecipe>>,
}

impl RecipeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, recipe: Arc<dyn StationRecipe>) {
        self.recipes.push(recipe);
    }

    /// First registered recipe that matches, or None
    pub fn find_match(&self, inv: &dyn RecipeInventory) -> Option<Arc<dyn StationRecipe>> {
        self.recipes
            .iter()
            .find(|recipe| recipe.matches(inv))
            .cloned()
    }

    pub fn get(&self, id: &RecipeId) -> Option<Arc<dyn StationRecipe>> {
        self.recipes.iter().find(|recipe| recipe.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
