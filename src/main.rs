//! Forgecraft - Demo Entry Point
//!
//! Loads the bundled material and recipe definitions, then walks a tool
//! through its lifecycle at a crafting station: build from parts, upgrade,
//! swing, damage, repair.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;
use std::sync::Arc;

use forgecraft::combat::{dispatch_attack, CombatTarget, HitContext};
use forgecraft::core::config::config;
use forgecraft::core::error::Result;
use forgecraft::core::types::{ItemId, ModifierId};
use forgecraft::crafting::loader::RecipeLoader;
use forgecraft::crafting::recipes::TAG_MATERIAL;
use forgecraft::crafting::station::TOOL_SLOT;
use forgecraft::crafting::sync::NullChannel;
use forgecraft::crafting::{CraftingStation, ItemStack, RecipeRegistry};
use forgecraft::materials::MaterialRegistry;
use forgecraft::modifiers::library::register_defaults;
use forgecraft::modifiers::{ModifierRegistry, ToolView};
use forgecraft::stats::StatId;
use forgecraft::tools::{damage, TagData, ToolDefinition, ToolDefinitions, ToolStack};

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("forgecraft=debug")
        .init();

    tracing::info!("Forgecraft starting...");
    if let Err(message) = config().validate() {
        tracing::error!(%message, "invalid configuration");
        return Ok(());
    }

    // Modifiers and tool definitions are code; materials and recipes are data
    let mut modifiers = ModifierRegistry::new();
    register_defaults(&mut modifiers)?;
    let modifiers = Arc::new(modifiers);

    let mut tools = ToolDefinitions::new();
    tools.register(
        ToolDefinition::new(
            "pickaxe",
            "Pickaxe",
            [(StatId::Durability, 100.0), (StatId::MiningSpeed, 4.0)]
                .into_iter()
                .collect(),
        )
        .with_parts(vec![ItemId::from("pick_head"), ItemId::from("tool_rod")]),
    )?;
    let tools = Arc::new(tools);

    let mut materials = MaterialRegistry::new();
    materials.load_directory(Path::new("data/materials"))?;
    let materials = Arc::new(materials);

    let loader = RecipeLoader::new(
        Arc::clone(&modifiers),
        Arc::clone(&materials),
        Arc::clone(&tools),
    );
    let mut recipes = RecipeRegistry::new();
    loader.load_directory(&mut recipes, Path::new("data/recipes"))?;

    println!("\n=== FORGECRAFT ===");
    println!(
        "{} modifiers, {} materials, {} recipes loaded",
        modifiers.len(),
        materials.len(),
        recipes.len()
    );

    let mut station = CraftingStation::new(5, Arc::new(recipes), Arc::new(NullChannel));

    // 1. Build a cobalt pickaxe from parts
    let mut head_tag = TagData::new();
    head_tag.put_str(TAG_MATERIAL, "cobalt");
    let mut rod_tag = TagData::new();
    rod_tag.put_str(TAG_MATERIAL, "slimewood");
    station.set_slot(1, ItemStack::new("pick_head", 1).with_tag(head_tag));
    station.set_slot(2, ItemStack::new("tool_rod", 1).with_tag(rod_tag));

    let built = station.on_craft(1, true);
    let definition = tools.get(&built.item)?;
    let tool = ToolStack::from_tag(definition.clone(), built.tag.clone(), &modifiers);
    println!(
        "\nBuilt {}: durability {}, mining speed {:.1}",
        definition.name,
        tool.durability(),
        tool.stats().get(StatId::MiningSpeed)
    );

    // 2. Upgrade it with fiery at the station
    station.set_slot(1, ItemStack::empty());
    station.set_slot(2, ItemStack::empty());
    station.set_slot(TOOL_SLOT, built);
    station.set_slot(1, ItemStack::new("blaze_powder", 4));
    let upgraded = station.on_craft(1, true);
    if let Some(error) = station.current_error() {
        println!("Upgrade failed: {}", error);
        return Ok(());
    }
    let mut tool = ToolStack::from_tag(definition.clone(), upgraded.tag.clone(), &modifiers);
    println!(
        "Upgraded: fiery level {}",
        tool.modifier_level(&ModifierId::from("fiery"))
    );
    for line in tool.tooltip() {
        println!("  {}", line);
    }

    // 3. Swing it (seeded so runs reproduce)
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut ctx = HitContext::new(1, &mut rng).with_damage(tool.stats().get(StatId::AttackDamage));
    let mut target = CombatTarget::new();
    let outcome = dispatch_attack(&tool, &mut ctx, &mut target, 0.4, true);
    println!(
        "Swing landed: knockback {:.1}, target burning {}s",
        outcome.knockback,
        target.burn_time()
    );

    // 4. Wear it down, then repair it with cobalt ingots
    damage::damage(&mut tool, 60, None);
    println!(
        "After mining: {}/{} durability",
        tool.durability() - ToolView::damage(&tool),
        tool.durability()
    );
    damage::repair(&mut tool, 60);
    println!(
        "Repaired: {}/{} durability",
        tool.durability() - ToolView::damage(&tool),
        tool.durability()
    );

    tracing::info!("demo complete");
    Ok(())
}
