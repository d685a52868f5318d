//! Recipe definitions loaded from TOML files
//!
//! Each file holds one recipe, discriminated by `type`. A malformed or
//! dangling definition (unknown modifier/material/tool id) fails that file
//! with a descriptive error; the directory walker logs and skips it.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::core::error::{ForgeError, Result};
use crate::core::types::{MaterialId, ModifierId, RecipeId};
use crate::crafting::inventory::ItemStack;
use crate::crafting::recipe::StationRecipe;
use crate::crafting::recipes::{ModifierRecipe, RepairRecipe, ToolBuildingRecipe};
use crate::crafting::registry::RecipeRegistry;
use crate::materials::registry::MaterialRegistry;
use crate::modifiers::registry::ModifierRegistry;
use crate::tools::definition::ToolDefinitions;

#[derive(Debug, Deserialize)]
struct IngredientDef {
    item: String,
    #[serde(default = "one")]
    count: u32,
}

fn one() -> u32 {
    1
}

fn default_max_level() -> u32 {
    5
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RecipeDef {
    Modifier {
        id: String,
        modifier: String,
        ingredient: IngredientDef,
        #[serde(default = "default_max_level")]
        max_level: u32,
        #[serde(default)]
        incompatible: Vec<String>,
        #[serde(default)]
        leftover: Option<IngredientDef>,
        #[serde(default)]
        set_tags: BTreeMap<String, i64>,
    },
    Repair {
        id: String,
        material: String,
        ingredient: String,
    },
    Tool {
        id: String,
        tool: String,
    },
}

/// Builds recipe objects from definitions, resolving ids against the
/// modifier/material/tool registries
pub struct RecipeLoader {
    modifiers: Arc<ModifierRegistry>,
    materials: Arc<MaterialRegistry>,
    tools: Arc<ToolDefinitions>,
}

impl RecipeLoader {
    pub fn new(
        modifiers: Arc<ModifierRegistry>,
        materials: Arc<MaterialRegistry>,
        tools: Arc<ToolDefinitions>,
    ) -> Self {
        Self {
            modifiers,
            materials,
            tools,
        }
    }

    fn build(&self, def: RecipeDef) -> Result<Arc<dyn StationRecipe>> {
        match def {
            RecipeDef::Modifier {
                id,
                modifier,
                ingredient,
                max_level,
                incompatible,
                leftover,
                set_tags,
            } => {
                let modifier = self.modifiers.get(&ModifierId::new(modifier))?;
                let mut recipe = ModifierRecipe::new(
                    RecipeId::new(id),
                    modifier,
                    ingredient.item.as_str(),
                    ingredient.count,
                    max_level,
                    Arc::clone(&self.tools),
                    Arc::clone(&self.modifiers),
                )
                .with_incompatible(incompatible.into_iter().map(ModifierId::new).collect())
                .with_set_tags(set_tags.into_iter().collect());
                if let Some(leftover) = leftover {
                    recipe =
                        recipe.with_leftover(ItemStack::new(leftover.item.as_str(), leftover.count));
                }
                Ok(Arc::new(recipe))
            }
            RecipeDef::Repair {
                id,
                material,
                ingredient,
            } => {
                let material = MaterialId::new(material);
                // fail fast on dangling material references
                self.materials.get(&material)?;
                Ok(Arc::new(RepairRecipe::new(
                    RecipeId::new(id),
                    material,
                    ingredient.as_str(),
                    Arc::clone(&self.materials),
                    Arc::clone(&self.tools),
                    Arc::clone(&self.modifiers),
                )))
            }
            RecipeDef::Tool { id, tool } => {
                let definition = self.tools.get(&crate::core::types::ItemId::new(tool))?;
                Ok(Arc::new(ToolBuildingRecipe::new(
                    RecipeId::new(id),
                    definition,
                    Arc::clone(&self.materials),
                )))
            }
        }
    }

    /// Parse one recipe definition from TOML text
    pub fn load_str(&self, content: &str, origin: &str) -> Result<Arc<dyn StationRecipe>> {
        let def: RecipeDef = toml::from_str(content).map_err(|e| ForgeError::InvalidDefinition {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        self.build(def)
    }

    /// Load one recipe file into the registry
    pub fn load_file(&self, registry: &mut RecipeRegistry, path: &Path) -> Result<RecipeId> {
        let content = std::fs::read_to_string(path)?;
        let recipe = self.load_str(&content, &path.display().to_string())?;
        let id = recipe.id().clone();
        registry.register(recipe);
        Ok(id)
    }

    /// Load all .toml files from a directory recursively, in sorted order
    ///
    /// Sorting keeps the registration-order scan deterministic across
    /// platforms. Bad definitions are logged and skipped.
    pub fn load_directory(
        &self,
        registry: &mut RecipeRegistry,
        path: &Path,
    ) -> Result<Vec<RecipeId>> {
        let mut files = Vec::new();
        collect_toml_files(path, &mut files)?;
        files.sort();

        let mut ids = Vec::new();
        for file in files {
            match self.load_file(registry, &file) {
                Ok(id) => ids.push(id),
                Err(e) => {
                    tracing::warn!(path = %file.display(), error = %e, "skipping recipe definition");
                }
            }
        }
        tracing::info!(count = ids.len(), dir = %path.display(), "loaded recipes");
        Ok(ids)
    }
}

fn collect_toml_files(path: &Path, files: &mut Vec<std::path::PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        let entry_path = entry.path();
        if entry_path.is_dir() {
            collect_toml_files(&entry_path, files)?;
        } else if entry_path.extension().is_some_and(|ext| ext == "toml") {
            files.push(entry_path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::library::register_defaults;
    use crate::stats::definitions::StatId;
    use crate::tools::definition::ToolDefinition;

    fn loader() -> RecipeLoader {
        let mut modifiers = ModifierRegistry::new();
        register_defaults(&mut modifiers).unwrap();

        let mut materials = MaterialRegistry::new();
        materials
            .register(
                toml::from_str(
                    r#"
                    id = "cobalt"
                    name = "Cobalt"
                    repair_value = 25
                    "#,
                )
                .unwrap(),
            )
            .unwrap();

        let mut tools = ToolDefinitions::new();
        tools
            .register(ToolDefinition::new(
                "pickaxe",
                "Pickaxe",
                [(StatId::Durability, 100.0)].into_iter().collect(),
            ))
            .unwrap();

        RecipeLoader::new(Arc::new(modifiers), Arc::new(materials), Arc::new(tools))
    }

    #[test]
    fn test_load_modifier_recipe() {
        let recipe = loader()
            .load_str(
                r#"
                type = "modifier"
                id = "fiery_upgrade"
                modifier = "fiery"
                ingredient = { item = "blaze_powder", count = 4 }
                max_level = 5
                incompatible = ["lacerating"]

                [set_tags]
                "charge:fiery" = 25
                "#,
                "fiery_upgrade.toml",
            )
            .unwrap();
        assert_eq!(recipe.id(), &RecipeId::from("fiery_upgrade"));
    }

    #[test]
    fn test_load_repair_recipe() {
        let recipe = loader()
            .load_str(
                r#"
                type = "repair"
                id = "repair_cobalt"
                material = "cobalt"
                ingredient = "cobalt_ingot"
                "#,
                "repair_cobalt.toml",
            )
            .unwrap();
        assert_eq!(recipe.id(), &RecipeId::from("repair_cobalt"));
    }

    #[test]
    fn test_unknown_modifier_fails_that_definition() {
        let err = loader()
            .load_str(
                r#"
                type = "modifier"
                id = "ghost_upgrade"
                modifier = "ghost"
                ingredient = { item = "dust" }
                "#,
                "ghost.toml",
            )
            .err().unwrap();
        assert!(matches!(err, ForgeError::ModifierNotFound(_)));
    }

    #[test]
    fn test_malformed_toml_is_descriptive() {
        let err = loader()
            .load_str("type = \"modifier\"", "broken.toml")
            .err().unwrap();
        match err {
            ForgeError::InvalidDefinition { path, .. } => assert_eq!(path, "broken.toml"),
            other => panic!("expected InvalidDefinition, got {other:?}"),
        }
    }
}
