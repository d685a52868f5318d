//! Crafting station integration tests
//!
//! Exercise the full state machine end-to-end: recipe caching, lazy result
//! invalidation, sync-on-change, input consumption, and the tool-slot
//! shrink clamp.

use std::path::Path;
use std::sync::Arc;

use forgecraft::core::types::{ItemId, ModifierId, RecipeId};
use forgecraft::crafting::loader::RecipeLoader;
use forgecraft::crafting::recipes::{ModifierRecipe, TAG_MATERIAL};
use forgecraft::crafting::station::TOOL_SLOT;
use forgecraft::crafting::sync::{RecordingChannel, StationPacket};
use forgecraft::crafting::{CraftingStation, ItemStack, RecipeRegistry};
use forgecraft::materials::MaterialRegistry;
use forgecraft::modifiers::library::register_defaults;
use forgecraft::modifiers::ModifierRegistry;
use forgecraft::modifiers::ToolView;
use forgecraft::stats::StatId;
use forgecraft::tools::{TagData, ToolDefinition, ToolDefinitions, ToolStack};

struct Fixture {
    modifiers: Arc<ModifierRegistry>,
    tools: Arc<ToolDefinitions>,
    recipes: Arc<RecipeRegistry>,
    channel: Arc<RecordingChannel>,
}

impl Fixture {
    fn new() -> Self {
        let mut modifiers = ModifierRegistry::new();
        register_defaults(&mut modifiers).unwrap();
        let modifiers = Arc::new(modifiers);

        let mut materials = MaterialRegistry::new();
        materials
            .register(
                toml::from_str(
                    r#"
                    id = "cobalt"
                    name = "Cobalt"
                    repair_value = 25

                    [stats]
                    durability = 150.0
                    "#,
                )
                .unwrap(),
            )
            .unwrap();
        let materials = Arc::new(materials);

        let mut tools = ToolDefinitions::new();
        tools
            .register(
                ToolDefinition::new(
                    "pickaxe",
                    "Pickaxe",
                    [(StatId::Durability, 100.0)].into_iter().collect(),
                )
                .with_parts(vec![ItemId::from("pick_head"), ItemId::from("tool_rod")]),
            )
            .unwrap();
        let tools = Arc::new(tools);

        let loader = RecipeLoader::new(
            Arc::clone(&modifiers),
            Arc::clone(&materials),
            Arc::clone(&tools),
        );
        let mut recipes = RecipeRegistry::new();
        for (name, toml) in [
            (
                "fiery_upgrade.toml",
                r#"
                type = "modifier"
                id = "fiery_upgrade"
                modifier = "fiery"
                ingredient = { item = "blaze_powder", count = 4 }
                max_level = 5

                [set_tags]
                "charge:fiery" = 25
                "#,
            ),
            (
                "repair_cobalt.toml",
                r#"
                type = "repair"
                id = "repair_cobalt"
                material = "cobalt"
                ingredient = "cobalt_ingot"
                "#,
            ),
            (
                "build_pickaxe.toml",
                r#"
                type = "tool"
                id = "build_pickaxe"
                tool = "pickaxe"
                "#,
            ),
        ] {
            let recipe = loader.load_str(toml, name).unwrap();
            recipes.register(recipe);
        }

        Self {
            modifiers,
            tools,
            recipes: Arc::new(recipes),
            channel: Arc::new(RecordingChannel::new()),
        }
    }

    fn station(&self) -> CraftingStation {
        let channel: Arc<dyn forgecraft::crafting::sync::SyncChannel> = self.channel.clone();
        CraftingStation::new(4, Arc::clone(&self.recipes), channel)
    }

    fn fresh_tool_stack(&self) -> ItemStack {
        let definition = self.tools.get(&ItemId::from("pickaxe")).unwrap();
        let tool = ToolStack::new(definition);
        ItemStack::new("pickaxe", 1).with_tag(tool.to_tag())
    }
}

#[test]
fn test_recipe_match_is_idempotent_cached_reference() {
    let fixture = Fixture::new();
    let mut station = fixture.station();

    station.set_slot(TOOL_SLOT, fixture.fresh_tool_stack());
    station.set_slot(1, ItemStack::new("blaze_powder", 4));

    station.result(true);
    let first = station.last_recipe().cloned().unwrap();

    // touch a slot so the result cache invalidates, then recompute
    station.set_slot(2, ItemStack::empty());
    station.result(true);
    let second = station.last_recipe().cloned().unwrap();

    // identical reference, not merely an equal recipe
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_sync_only_on_recipe_change() {
    let fixture = Fixture::new();
    let mut station = fixture.station();

    station.set_slot(TOOL_SLOT, fixture.fresh_tool_stack());
    station.set_slot(1, ItemStack::new("blaze_powder", 4));
    station.result(true);

    let packets = fixture.channel.take();
    assert_eq!(
        packets,
        vec![StationPacket::UpdateRecipe(RecipeId::from("fiery_upgrade"))]
    );

    // same recipe still matches after a slot change: screen refresh only
    station.set_slot(2, ItemStack::empty());
    station.result(true);
    assert_eq!(fixture.channel.take(), vec![StationPacket::RefreshScreen]);

    // cached result: no recompute, no packets
    station.result(true);
    assert!(fixture.channel.take().is_empty());
}

#[test]
fn test_result_invalidated_on_slot_change() {
    let fixture = Fixture::new();
    let mut station = fixture.station();

    station.set_slot(TOOL_SLOT, fixture.fresh_tool_stack());
    station.set_slot(1, ItemStack::new("blaze_powder", 4));
    assert!(!station.result(true).is_empty());

    // removing the ingredients empties the result
    station.set_slot(1, ItemStack::empty());
    assert!(station.result(true).is_empty());
}

#[test]
fn test_craft_consumes_inputs_and_clears_tool_slot() {
    let fixture = Fixture::new();
    let mut station = fixture.station();

    station.set_slot(TOOL_SLOT, fixture.fresh_tool_stack());
    station.set_slot(1, ItemStack::new("blaze_powder", 6));

    let result = station.on_craft(1, true);
    assert!(!result.is_empty());

    // 4 of 6 powder consumed, tool slot cleared (1 <= default shrink of 16)
    assert_eq!(station.slot(1).count, 2);
    assert!(station.slot(TOOL_SLOT).is_empty());

    let upgraded = ToolStack::from_tag(
        fixture.tools.get(&ItemId::from("pickaxe")).unwrap(),
        result.tag.clone(),
        &fixture.modifiers,
    );
    assert_eq!(upgraded.modifier_level(&ModifierId::from("fiery")), 1);
}

#[test]
fn test_tool_slot_shrink_clamps_never_negative() {
    let fixture = Fixture::new();
    let mut station = fixture.station();

    // 10 tools in the slot, recipe shrinks by 16: slot empties, never -6
    let mut stack = fixture.fresh_tool_stack();
    stack.count = 10;
    station.set_slot(TOOL_SLOT, stack);
    station.set_slot(1, ItemStack::new("blaze_powder", 4));

    let result = station.on_craft(1, true);
    assert!(!result.is_empty());
    assert!(station.slot(TOOL_SLOT).is_empty());
}

#[test]
fn test_tool_slot_shrink_leaves_remainder_above_cap() {
    let fixture = Fixture::new();
    let mut station = fixture.station();

    let mut stack = fixture.fresh_tool_stack();
    stack.count = 20;
    station.set_slot(TOOL_SLOT, stack);
    station.set_slot(1, ItemStack::new("blaze_powder", 4));

    station.on_craft(1, true);
    assert_eq!(station.slot(TOOL_SLOT).count, 4);
}

#[test]
fn test_error_result_is_user_visible_not_a_failure() {
    let fixture = Fixture::new();
    let mut station = fixture.station();

    // matching structurally, but not enough powder
    station.set_slot(TOOL_SLOT, fixture.fresh_tool_stack());
    station.set_slot(1, ItemStack::new("blaze_powder", 2));

    let result = station.result(true);
    assert!(result.is_empty());
    let error = station.current_error().unwrap();
    assert!(error.contains("blaze_powder"));

    // crafting is a no-op while in error
    assert!(station.on_craft(1, true).is_empty());
    assert_eq!(station.slot(1).count, 2);
}

#[test]
fn test_build_then_upgrade_then_repair_lifecycle() {
    let fixture = Fixture::new();
    let mut station = fixture.station();

    // build from parts
    let mut head_tag = TagData::new();
    head_tag.put_str(TAG_MATERIAL, "cobalt");
    let mut rod_tag = TagData::new();
    rod_tag.put_str(TAG_MATERIAL, "cobalt");
    station.set_slot(1, ItemStack::new("pick_head", 1).with_tag(head_tag));
    station.set_slot(2, ItemStack::new("tool_rod", 1).with_tag(rod_tag));

    let built = station.on_craft(1, true);
    assert_eq!(built.item, ItemId::from("pickaxe"));
    assert!(station.slot(1).is_empty());
    assert!(station.slot(2).is_empty());

    let definition = fixture.tools.get(&ItemId::from("pickaxe")).unwrap();
    let mut tool = ToolStack::from_tag(definition.clone(), built.tag.clone(), &fixture.modifiers);
    assert_eq!(tool.durability(), 400);

    // damage it, then repair at the station
    forgecraft::tools::damage::damage(&mut tool, 50, None);
    station.set_slot(
        TOOL_SLOT,
        ItemStack::new("pickaxe", 1).with_tag(tool.to_tag()),
    );
    station.set_slot(1, ItemStack::new("cobalt_ingot", 5));

    let repaired = station.on_craft(1, true);
    assert!(!repaired.is_empty());
    let tool = ToolStack::from_tag(definition, repaired.tag.clone(), &fixture.modifiers);
    assert!(!forgecraft::tools::damage::needs_repair(&tool));
    // 50 damage at 25 per ingot: 2 consumed
    assert_eq!(station.slot(1).count, 3);
}

#[test]
fn test_client_side_reuses_synced_recipe_without_rescan() {
    let fixture = Fixture::new();
    let mut station = fixture.station();

    station.set_slot(TOOL_SLOT, fixture.fresh_tool_stack());
    station.set_slot(1, ItemStack::new("blaze_powder", 4));

    // client has no recipe yet: result stays empty
    assert!(station.result(false).is_empty());

    // server pushes the recipe reference; client recomputes from it
    let recipe = fixture
        .recipes
        .get(&RecipeId::from("fiery_upgrade"))
        .unwrap();
    station.update_recipe(recipe);
    assert!(!station.result(false).is_empty());
}

#[test]
fn test_byproduct_goes_to_overflow_server_side_only() {
    let fixture = Fixture::new();

    let mut recipes = RecipeRegistry::new();
    recipes.register(Arc::new(
        ModifierRecipe::new(
            "overgrowth_upgrade",
            fixture
                .modifiers
                .get(&ModifierId::from("overgrowth"))
                .unwrap(),
            "slime_bucket",
            1,
            3,
            Arc::clone(&fixture.tools),
            Arc::clone(&fixture.modifiers),
        )
        .with_leftover(ItemStack::new("bucket", 1))
        .with_set_tags(vec![("overgrowth".to_string(), 50)]),
    ));

    let mut station = CraftingStation::new(
        4,
        Arc::new(recipes),
        Arc::new(forgecraft::crafting::sync::NullChannel),
    );
    station.set_slot(TOOL_SLOT, fixture.fresh_tool_stack());
    station.set_slot(1, ItemStack::new("slime_bucket", 1));

    station.on_craft(1, true);
    let overflow = station.take_overflow();
    assert_eq!(overflow.len(), 1);
    assert_eq!(overflow[0].item, ItemId::from("bucket"));
    assert!(station.take_overflow().is_empty());
}

#[test]
fn test_bundled_data_directory_loads() {
    // only runs from a checkout with the data directory present
    let materials_dir = Path::new("data/materials");
    let recipes_dir = Path::new("data/recipes");
    if !materials_dir.exists() || !recipes_dir.exists() {
        return;
    }

    let mut modifiers = ModifierRegistry::new();
    register_defaults(&mut modifiers).unwrap();
    let modifiers = Arc::new(modifiers);

    let mut materials = MaterialRegistry::new();
    let loaded = materials.load_directory(materials_dir).unwrap();
    assert!(!loaded.is_empty());
    let materials = Arc::new(materials);

    let mut tools = ToolDefinitions::new();
    tools
        .register(
            ToolDefinition::new(
                "pickaxe",
                "Pickaxe",
                [(StatId::Durability, 100.0)].into_iter().collect(),
            )
            .with_parts(vec![ItemId::from("pick_head"), ItemId::from("tool_rod")]),
        )
        .unwrap();
    let tools = Arc::new(tools);

    let loader = RecipeLoader::new(modifiers, materials, tools);
    let mut recipes = RecipeRegistry::new();
    let ids = loader.load_directory(&mut recipes, recipes_dir).unwrap();
    assert!(ids.contains(&RecipeId::from("fiery_upgrade")));
    assert!(ids.contains(&RecipeId::from("build_pickaxe")));
}
