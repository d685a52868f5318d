//! Built-in station recipes: modifier attachment, repair, tool building

use serde_json::Value;
use std::sync::Arc;

use crate::core::types::{ItemId, MaterialId, ModifierId, RecipeId};
use crate::crafting::inventory::{ItemStack, MutableRecipeInventory, RecipeInventory};
use crate::crafting::recipe::StationRecipe;
use crate::crafting::validated::ValidatedResult;
use crate::materials::registry::MaterialRegistry;
use crate::modifiers::hooks::{Modifier, ToolView};
use crate::modifiers::registry::ModifierRegistry;
use crate::tools::damage;
use crate::tools::definition::{ToolDefinition, ToolDefinitions};
use crate::tools::stack::ToolStack;

/// Tag key naming the material of a part item
pub const TAG_MATERIAL: &str = "material";
/// Tag key listing the materials a built tool was assembled from
pub const TAG_MATERIALS: &str = "materials";

/// Sum of matching ingredient units across all input slots
fn total_ingredient(inv: &dyn RecipeInventory, ingredient: &ItemId) -> u32 {
    (0..inv.input_count())
        .map(|i| inv.input(i))
        .filter(|stack| !stack.is_empty() && &stack.item == ingredient)
        .map(|stack| stack.count)
        .sum()
}

/// True when every non-empty input holds the ingredient, and at least one does
fn inputs_are(inv: &dyn RecipeInventory, ingredient: &ItemId) -> bool {
    let mut any = false;
    for i in 0..inv.input_count() {
        let input = inv.input(i);
        if input.is_empty() {
            continue;
        }
        if &input.item != ingredient {
            return false;
        }
        any = true;
    }
    any
}

/// Consume `count` ingredient units, draining slots left to right
fn consume_ingredient(inv: &mut dyn MutableRecipeInventory, ingredient: &ItemId, count: u32) {
    let mut remaining = count;
    for index in 0..inv.input_count() {
        if remaining == 0 {
            break;
        }
        let input = inv.input(index);
        if input.is_empty() || &input.item != ingredient {
            continue;
        }
        let take = remaining.min(input.count);
        inv.shrink_input(index, take);
        remaining -= take;
    }
}

/// Attaches one modifier level per application
pub struct ModifierRecipe {
    id: RecipeId,
    modifier: Arc<dyn Modifier>,
    ingredient: ItemId,
    ingredient_count: u32,
    max_level: u32,
    incompatible: Vec<ModifierId>,
    /// Byproduct handed back to the player, server side only
    leftover: Option<ItemStack>,
    /// Integer tags written onto the upgraded tool (shield pools, charge)
    set_tags: Vec<(String, i64)>,
    tools: Arc<ToolDefinitions>,
    modifiers: Arc<ModifierRegistry>,
}

impl ModifierRecipe {
    pub fn new(
        id: impl Into<RecipeId>,
        modifier: Arc<dyn Modifier>,
        ingredient: impl Into<ItemId>,
        ingredient_count: u32,
        max_level: u32,
        tools: Arc<ToolDefinitions>,
        modifiers: Arc<ModifierRegistry>,
    ) -> Self {
        Self {
            id: id.into(),
            modifier,
            ingredient: ingredient.into(),
            ingredient_count,
            max_level,
            incompatible: Vec::new(),
            leftover: None,
            set_tags: Vec::new(),
            tools,
            modifiers,
        }
    }

    pub fn with_incompatible(mut self, ids: Vec<ModifierId>) -> Self {
        self.incompatible = ids;
        self
    }

    pub fn with_leftover(mut self, leftover: ItemStack) -> Self {
        self.leftover = Some(leftover);
        self
    }

    pub fn with_set_tags(mut self, tags: Vec<(String, i64)>) -> Self {
        self.set_tags = tags;
        self
    }
}

impl StationRecipe for ModifierRecipe {
    fn id(&self) -> &RecipeId {
        &self.id
    }

    fn matches(&self, inv: &dyn RecipeInventory) -> bool {
        let tool = inv.tool_slot();
        !tool.is_empty() && self.tools.contains(&tool.item) && inputs_are(inv, &self.ingredient)
    }

    fn craft_result(&self, inv: &dyn RecipeInventory) -> ItemStack {
        match self.validated_result(inv) {
            ValidatedResult::Success(stack) => stack,
            _ => ItemStack::empty(),
        }
    }

    fn validated_result(&self, inv: &dyn RecipeInventory) -> ValidatedResult {
        let stack = inv.tool_slot();
        let definition = match self.tools.get(&stack.item) {
            Ok(definition) => definition,
            Err(_) => return ValidatedResult::Pass,
        };

        let total = total_ingredient(inv, &self.ingredient);
        if total < self.ingredient_count {
            return ValidatedResult::error(format!(
                "Requires {} x {}",
                self.ingredient_count, self.ingredient
            ));
        }

        let tool = ToolStack::from_tag(definition, stack.tag.clone(), &self.modifiers);
        for id in &self.incompatible {
            if tool.modifier_level(id) > 0 {
                return ValidatedResult::error(format!("Incompatible with {}", id));
            }
        }
        if tool.modifier_level(&self.modifier.id()) >= self.max_level {
            return ValidatedResult::error(format!(
                "{} is already at its maximum level",
                self.modifier.id()
            ));
        }

        let mut upgraded = tool;
        upgraded.add_modifier(Arc::clone(&self.modifier), 1);
        for (key, value) in &self.set_tags {
            upgraded.tag_mut().put_int(key.clone(), *value);
        }

        ValidatedResult::success(ItemStack {
            item: stack.item.clone(),
            count: 1,
            tag: upgraded.to_tag(),
        })
    }

    fn update_inputs(
        &self,
        _result: &ItemStack,
        inv: &mut dyn MutableRecipeInventory,
        is_server: bool,
    ) {
        consume_ingredient(inv, &self.ingredient, self.ingredient_count);
        if is_server {
            if let Some(leftover) = &self.leftover {
                inv.give_item(leftover.clone());
            }
        }
    }
}

/// Restores durability from a repair material; result is computed, not static
pub struct RepairRecipe {
    id: RecipeId,
    material: MaterialId,
    ingredient: ItemId,
    materials: Arc<MaterialRegistry>,
    tools: Arc<ToolDefinitions>,
    modifiers: Arc<ModifierRegistry>,
}

impl RepairRecipe {
    pub fn new(
        id: impl Into<RecipeId>,
        material: impl Into<MaterialId>,
        ingredient: impl Into<ItemId>,
        materials: Arc<MaterialRegistry>,
        tools: Arc<ToolDefinitions>,
        modifiers: Arc<ModifierRegistry>,
    ) -> Self {
        Self {
            id: id.into(),
            material: material.into(),
            ingredient: ingredient.into(),
            materials,
            tools,
            modifiers,
        }
    }

    /// Units actually consumed: never more than needed to fully repair
    fn units_used(&self, inv: &dyn RecipeInventory, per_unit: u32) -> u32 {
        let stack = inv.tool_slot();
        let Ok(definition) = self.tools.get(&stack.item) else {
            return 0;
        };
        let tool = ToolStack::from_tag(definition, stack.tag.clone(), &self.modifiers);
        let needed = ToolView::damage(&tool).div_ceil(per_unit);
        needed.min(total_ingredient(inv, &self.ingredient))
    }
}

impl StationRecipe for RepairRecipe {
    fn id(&self) -> &RecipeId {
        &self.id
    }

    fn matches(&self, inv: &dyn RecipeInventory) -> bool {
        let tool = inv.tool_slot();
        !tool.is_empty() && self.tools.contains(&tool.item) && inputs_are(inv, &self.ingredient)
    }

    fn craft_result(&self, inv: &dyn RecipeInventory) -> ItemStack {
        match self.validated_result(inv) {
            ValidatedResult::Success(stack) => stack,
            _ => ItemStack::empty(),
        }
    }

    fn validated_result(&self, inv: &dyn RecipeInventory) -> ValidatedResult {
        let stack = inv.tool_slot();
        let definition = match self.tools.get(&stack.item) {
            Ok(definition) => definition,
            Err(_) => return ValidatedResult::Pass,
        };
        let material = match self.materials.get(&self.material) {
            Ok(material) => material,
            Err(_) => {
                return ValidatedResult::error(format!("Unknown material: {}", self.material))
            }
        };
        if material.repair_value == 0 {
            return ValidatedResult::error(format!("{} cannot repair tools", material.name));
        }

        let tool = ToolStack::from_tag(definition, stack.tag.clone(), &self.modifiers);
        if !damage::needs_repair(&tool) {
            return ValidatedResult::error("Tool is fully repaired");
        }

        let used = self.units_used(inv, material.repair_value);
        let mut repaired = tool;
        damage::repair(&mut repaired, (used * material.repair_value) as i32);

        ValidatedResult::success(ItemStack {
            item: stack.item.clone(),
            count: 1,
            tag: repaired.to_tag(),
        })
    }

    fn update_inputs(
        &self,
        _result: &ItemStack,
        inv: &mut dyn MutableRecipeInventory,
        _is_server: bool,
    ) {
        let per_unit = match self.materials.get(&self.material) {
            Ok(material) if material.repair_value > 0 => material.repair_value,
            _ => return,
        };
        let used = self.units_used(inv, per_unit);
        consume_ingredient(inv, &self.ingredient, used);
    }
}

/// Assembles a tool from material parts placed in the input slots
pub struct ToolBuildingRecipe {
    id: RecipeId,
    definition: Arc<ToolDefinition>,
    materials: Arc<MaterialRegistry>,
}

impl ToolBuildingRecipe {
    pub fn new(
        id: impl Into<RecipeId>,
        definition: Arc<ToolDefinition>,
        materials: Arc<MaterialRegistry>,
    ) -> Self {
        Self {
            id: id.into(),
            definition,
            materials,
        }
    }
}

impl StationRecipe for ToolBuildingRecipe {
    fn id(&self) -> &RecipeId {
        &self.id
    }

    fn matches(&self, inv: &dyn RecipeInventory) -> bool {
        if !inv.tool_slot().is_empty() {
            return false;
        }
        let parts = &self.definition.parts;
        if parts.is_empty() || inv.input_count() < parts.len() {
            return false;
        }
        for (index, part) in parts.iter().enumerate() {
            let input = inv.input(index);
            if input.is_empty() || &input.item != part {
                return false;
            }
        }
        // no stray items beyond the part slots
        (parts.len()..inv.input_count()).all(|index| inv.input(index).is_empty())
    }

    fn craft_result(&self, inv: &dyn RecipeInventory) -> ItemStack {
        match self.validated_result(inv) {
            ValidatedResult::Success(stack) => stack,
            _ => ItemStack::empty(),
        }
    }

    fn validated_result(&self, inv: &dyn RecipeInventory) -> ValidatedResult {
        let mut stats = self.definition.base_stats.clone();
        let mut used = Vec::new();

        for index in 0..self.definition.parts.len() {
            let input = inv.input(index);
            let Some(material_id) = input.tag.get_str(TAG_MATERIAL) else {
                return ValidatedResult::error(format!("{} has no material", input.item));
            };
            let material_id = MaterialId::from(material_id);
            let material = match self.materials.get(&material_id) {
                Ok(material) => material,
                Err(_) => {
                    return ValidatedResult::error(format!("Unknown material: {}", material_id))
                }
            };
            for (stat, bonus) in material.stats.iter() {
                let current = stats.get(stat);
                stats.set(stat, current + bonus);
            }
            used.push(material_id);
        }

        let mut tool = ToolStack::with_base_stats(Arc::clone(&self.definition), stats);
        tool.tag_mut().put(
            TAG_MATERIALS,
            Value::Array(used.iter().map(|m| Value::from(m.as_str())).collect()),
        );

        ValidatedResult::success(ItemStack {
            item: self.definition.id.clone(),
            count: 1,
            tag: tool.to_tag(),
        })
    }
}
