//! Crafting station state machine
//!
//! Caches the last matched recipe so unchanged inventories skip the full
//! registry rescan, computes the result lazily, and pushes sync packets
//! only when the recipe reference (or a non-recipe result) actually changes.

use std::sync::Arc;

use crate::crafting::inventory::{ItemStack, MutableRecipeInventory, RecipeInventory};
use crate::crafting::recipe::StationRecipe;
use crate::crafting::registry::RecipeRegistry;
use crate::crafting::sync::{StationPacket, SyncChannel};
use crate::crafting::validated::ValidatedResult;

/// Slot index of the tool slot
pub const TOOL_SLOT: usize = 0;
/// Slot index of the first input slot
pub const INPUT_SLOT: usize = 1;

pub struct CraftingStation {
    /// Slot 0 is the tool slot, the rest are inputs
    slots: Vec<ItemStack>,
    registry: Arc<RecipeRegistry>,
    channel: Arc<dyn SyncChannel>,
    /// Last crafted/matched recipe, kept across result invalidations
    last_recipe: Option<Arc<dyn StationRecipe>>,
    /// Last user-visible validation error
    current_error: Option<String>,
    /// Lazily computed result; None means it must be recomputed
    cached_result: Option<ItemStack>,
    /// Byproducts waiting for the host to hand to the player
    overflow: Vec<ItemStack>,
}

impl CraftingStation {
    pub fn new(
        input_slots: usize,
        registry: Arc<RecipeRegistry>,
        channel: Arc<dyn SyncChannel>,
    ) -> Self {
        Self {
            slots: vec![ItemStack::empty(); input_slots + 1],
            registry,
            channel,
            last_recipe: None,
            current_error: None,
            cached_result: None,
            overflow: Vec::new(),
        }
    }

    pub fn slot(&self, index: usize) -> &ItemStack {
        &self.slots[index]
    }

    /// Replace a slot's contents
    ///
    /// Any slot mutation invalidates the lazily-cached result, but not the
    /// matched recipe; the next result query revalidates it first.
    pub fn set_slot(&mut self, index: usize, stack: ItemStack) {
        self.slots[index] = stack;
        self.cached_result = None;
    }

    pub fn current_error(&self) -> Option<&str> {
        self.current_error.as_deref()
    }

    pub fn last_recipe(&self) -> Option<&Arc<dyn StationRecipe>> {
        self.last_recipe.as_ref()
    }

    /// Drain byproducts produced by crafts since the last call
    pub fn take_overflow(&mut self) -> Vec<ItemStack> {
        std::mem::take(&mut self.overflow)
    }

    /// Current result, computed lazily and cached until a slot changes
    pub fn result(&mut self, is_server: bool) -> ItemStack {
        if let Some(cached) = &self.cached_result {
            return cached.clone();
        }
        let computed = self.calc_result(is_server);
        self.cached_result = Some(computed.clone());
        computed
    }

    /// Recompute the result and revalidate the cached recipe
    fn calc_result(&mut self, is_server: bool) -> ItemStack {
        // assume empty unless we learn otherwise
        let mut result = ItemStack::empty();
        self.current_error = None;

        if is_server {
            // first, try the cached recipe; if it no longer matches, rescan
            let mut recipe = self
                .last_recipe
                .clone()
                .filter(|recipe| recipe.matches(self));
            if recipe.is_none() {
                recipe = self.registry.find_match(self);
            }

            let mut needs_sync = true;
            if let Some(recipe) = recipe {
                // sync only when the recipe reference actually changed
                let unchanged = self
                    .last_recipe
                    .as_ref()
                    .is_some_and(|last| Arc::ptr_eq(last, &recipe));
                if !unchanged {
                    self.last_recipe = Some(Arc::clone(&recipe));
                    self.channel
                        .send(StationPacket::UpdateRecipe(recipe.id().clone()));
                    needs_sync = false;
                }

                match recipe.validated_result(self) {
                    ValidatedResult::Success(stack) => result = stack,
                    ValidatedResult::Error(message) => {
                        tracing::debug!(recipe = %recipe.id(), %message, "recipe cannot apply");
                        self.current_error = Some(message);
                    }
                    ValidatedResult::Pass => {}
                }
            }
            // the recipe packet refreshes the screen on its own; only
            // non-recipe-driven result changes need the extra push
            if needs_sync {
                self.channel.send(StationPacket::RefreshScreen);
            }
        } else if let Some(last) = self.last_recipe.clone() {
            // client side reuses the synced recipe and never rescans
            if last.matches(self) {
                match last.validated_result(self) {
                    ValidatedResult::Success(stack) => result = stack,
                    ValidatedResult::Error(message) => self.current_error = Some(message),
                    ValidatedResult::Pass => {}
                }
            }
        }

        result
    }

    /// Commit a craft: consume inputs and shrink the tool slot
    ///
    /// Returns the crafted stack, or empty when nothing was craftable.
    pub fn on_craft(&mut self, amount: u32, is_server: bool) -> ItemStack {
        if amount == 0 {
            return ItemStack::empty();
        }
        let result = self.result(is_server);
        if result.is_empty() {
            return ItemStack::empty();
        }
        let Some(recipe) = self.last_recipe.clone() else {
            return ItemStack::empty();
        };

        // consume inputs on both sides, for prediction parity
        recipe.update_inputs(&result, self, is_server);

        // shrink the tool slot, clamped: a stack at or below the shrink
        // amount is cleared entirely, never driven negative
        let tool = self.slots[TOOL_SLOT].clone();
        if !tool.is_empty() {
            let shrink = recipe.shrink_tool_slot_by();
            if tool.count <= shrink {
                self.set_slot(TOOL_SLOT, ItemStack::empty());
            } else {
                self.set_slot(TOOL_SLOT, tool.with_count(tool.count - shrink));
            }
        }

        self.cached_result = None;
        result
    }

    /// Apply a recipe pushed from the server (client side)
    pub fn update_recipe(&mut self, recipe: Arc<dyn StationRecipe>) {
        self.last_recipe = Some(recipe);
        self.cached_result = None;
    }
}

impl RecipeInventory for CraftingStation {
    fn tool_slot(&self) -> &ItemStack {
        &self.slots[TOOL_SLOT]
    }

    fn input_count(&self) -> usize {
        self.slots.len() - 1
    }

    fn input(&self, index: usize) -> &ItemStack {
        &self.slots[INPUT_SLOT + index]
    }
}

impl MutableRecipeInventory for CraftingStation {
    fn shrink_input(&mut self, index: usize, count: u32) {
        self.slots[INPUT_SLOT + index].shrink(count);
        self.cached_result = None;
    }

    fn give_item(&mut self, stack: ItemStack) {
        self.overflow.push(stack);
    }
}
