//! The station recipe contract

use crate::core::config::config;
use crate::core::types::RecipeId;
use crate::crafting::inventory::{ItemStack, MutableRecipeInventory, RecipeInventory};
use crate::crafting::validated::ValidatedResult;

/// One recipe the crafting station can apply
///
/// Recipes are polymorphic over static and computed results: simple recipes
/// implement `craft_result` and inherit the default validation; recipes
/// with user-visible failure modes override `validated_result`.
pub trait StationRecipe: Send + Sync {
    fn id(&self) -> &RecipeId;

    /// Whether this recipe matches the inventory, ignoring tool state
    fn matches(&self, inv: &dyn RecipeInventory) -> bool;

    /// Compute the raw result; empty means "pass"
    fn craft_result(&self, inv: &dyn RecipeInventory) -> ItemStack;

    /// Result plus user-visible errors for matching-but-inapplicable states
    fn validated_result(&self, inv: &dyn RecipeInventory) -> ValidatedResult {
        let result = self.craft_result(inv);
        if result.is_empty() {
            ValidatedResult::Pass
        } else {
            ValidatedResult::success(result)
        }
    }

    /// Consume inputs when a craft commits
    ///
    /// The default shrinks every input slot by one. `is_server` gates
    /// side effects that must not run on the predicting client, such as
    /// handing byproducts back to the player.
    fn update_inputs(
        &self,
        _result: &ItemStack,
        inv: &mut dyn MutableRecipeInventory,
        _is_server: bool,
    ) {
        for index in 0..inv.input_count() {
            inv.shrink_input(index, 1);
        }
    }

    /// How many units the tool slot loses on craft
    ///
    /// May exceed the stack's count; the station clamps rather than going
    /// negative.
    fn shrink_tool_slot_by(&self) -> u32 {
        config().tool_slot_stack_size
    }
}
