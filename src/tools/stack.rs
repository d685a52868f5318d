//! Runtime view of one tool instance
//!
//! A `ToolStack` is parsed from the persisted tag blob, mutated by
//! damage/repair/modifier operations, and written back when the host
//! replaces the stored representation. Aggregated stats are cached and
//! rebuilt whenever the modifier list changes.

use serde_json::Value;
use std::sync::Arc;

use crate::core::types::ModifierId;
use crate::modifiers::entry::{ModifierEntry, SavedModifier};
use crate::modifiers::hooks::{BreakSpeedEvent, Modifier, ToolView};
use crate::modifiers::registry::ModifierRegistry;
use crate::stats::aggregation::aggregate_stats;
use crate::stats::definitions::StatTable;
use crate::tools::definition::ToolDefinition;
use crate::tools::tags::TagData;

pub const TAG_DAMAGE: &str = "damage";
pub const TAG_BROKEN: &str = "broken";
pub const TAG_UNBREAKABLE: &str = "unbreakable";
pub const TAG_MODIFIERS: &str = "modifiers";
pub const TAG_STATS: &str = "stats";

#[derive(Clone)]
pub struct ToolStack {
    definition: Arc<ToolDefinition>,
    entries: Vec<ModifierEntry>,
    /// Pre-modifier stats; the definition's, unless materials overrode them
    base_stats: StatTable,
    /// Aggregated stats, rebuilt when the modifier list changes
    stats: StatTable,
    damage: u32,
    broken: bool,
    tag: TagData,
}

impl ToolStack {
    /// A fresh, undamaged tool with no modifiers
    pub fn new(definition: Arc<ToolDefinition>) -> Self {
        let base_stats = definition.base_stats.clone();
        Self::with_base_stats(definition, base_stats)
    }

    /// A fresh tool whose pre-modifier stats were computed elsewhere
    /// (tool building bakes material bonuses into them)
    pub fn with_base_stats(definition: Arc<ToolDefinition>, base_stats: StatTable) -> Self {
        let stats = aggregate_stats(&base_stats, &[]);
        Self {
            definition,
            entries: Vec::new(),
            base_stats,
            stats,
            damage: 0,
            broken: false,
            tag: TagData::new(),
        }
    }

    /// Parse a tool from its persisted tag blob
    ///
    /// Modifier entries whose id is not registered are skipped with a
    /// warning; they are never replaced by a default modifier.
    pub fn from_tag(
        definition: Arc<ToolDefinition>,
        tag: TagData,
        registry: &ModifierRegistry,
    ) -> Self {
        let mut entries = Vec::new();
        if let Some(value) = tag.get(TAG_MODIFIERS) {
            match serde_json::from_value::<Vec<SavedModifier>>(value.clone()) {
                Ok(saved) => {
                    for entry in saved {
                        match registry.get(&entry.id) {
                            Ok(modifier) => {
                                entries.push(ModifierEntry::new(modifier, entry.level));
                            }
                            Err(_) => {
                                tracing::warn!(id = %entry.id, "skipping unknown modifier on tool");
                            }
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(tool = %definition.id, error = %e, "malformed modifier list");
                }
            }
        }

        let base_stats = tag
            .get(TAG_STATS)
            .and_then(|value| serde_json::from_value::<StatTable>(value.clone()).ok())
            .unwrap_or_else(|| definition.base_stats.clone());

        let stats = aggregate_stats(&base_stats, &entries);
        let broken = tag.get_bool(TAG_BROKEN);
        let mut damage = tag.get_int(TAG_DAMAGE).max(0) as u32;
        if !broken {
            damage = damage.min(stats.durability());
        }

        Self {
            definition,
            entries,
            base_stats,
            stats,
            damage,
            broken,
            tag,
        }
    }

    /// Write current state back into a tag blob
    pub fn to_tag(&self) -> TagData {
        let mut tag = self.tag.clone();
        tag.put_int(TAG_DAMAGE, i64::from(self.damage));
        tag.put_bool(TAG_BROKEN, self.broken);
        let saved: Vec<Value> = self
            .entries
            .iter()
            .map(|e| {
                serde_json::json!({
                    "id": e.id().as_str(),
                    "level": e.level(),
                })
            })
            .collect();
        tag.put(TAG_MODIFIERS, Value::Array(saved));
        let stats: serde_json::Map<String, Value> = self
            .base_stats
            .iter()
            .map(|(stat, value)| (stat.name().to_string(), Value::from(value)))
            .collect();
        tag.put(TAG_STATS, Value::Object(stats));
        tag
    }

    pub fn definition(&self) -> &Arc<ToolDefinition> {
        &self.definition
    }

    /// Attach a modifier, or raise its level if already present
    ///
    /// Duplicates by id are disallowed; adding an existing modifier is an
    /// explicit level increment. List order is otherwise preserved.
    pub fn add_modifier(&mut self, modifier: Arc<dyn Modifier>, levels: u32) {
        let id = modifier.id();
        if let Some(existing) = self.entries.iter_mut().find(|e| e.id() == id) {
            *existing = ModifierEntry::new(modifier, existing.level() + levels);
        } else {
            self.entries.push(ModifierEntry::new(modifier, levels));
        }
        self.rebuild_stats();
    }

    pub fn modifier_level(&self, id: &ModifierId) -> u32 {
        self.entries
            .iter()
            .find(|e| &e.id() == id)
            .map(|e| e.level())
            .unwrap_or(0)
    }

    fn rebuild_stats(&mut self) {
        self.stats = aggregate_stats(&self.base_stats, &self.entries);
        if !self.broken {
            self.damage = self.damage.min(self.stats.durability());
        }
    }

    /// Set stored damage; marks the tool broken when capacity is reached
    pub fn set_damage(&mut self, damage: u32) {
        let durability = self.stats.durability();
        if damage >= durability {
            self.damage = durability;
            self.broken = true;
        } else {
            self.damage = damage;
            self.broken = false;
        }
    }

    /// Tooltip lines contributed by every modifier, in list order
    pub fn tooltip(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for entry in &self.entries {
            entry.modifier().add_tooltip(self, entry.level(), &mut lines);
        }
        lines
    }

    /// Run every modifier's break-speed hook over the event, in list order
    pub fn apply_break_speed(&self, event: &mut BreakSpeedEvent) {
        for entry in &self.entries {
            entry.modifier().on_break_speed(self, entry.level(), event);
        }
    }
}

impl ToolView for ToolStack {
    fn damage(&self) -> u32 {
        self.damage
    }

    /// Effective durability; a broken tool reports 0 regardless of stats
    fn durability(&self) -> u32 {
        if self.broken {
            0
        } else {
            self.stats.durability()
        }
    }

    fn is_broken(&self) -> bool {
        self.broken
    }

    fn is_unbreakable(&self) -> bool {
        self.tag.get_bool(TAG_UNBREAKABLE)
    }

    fn stats(&self) -> &StatTable {
        &self.stats
    }

    fn tag(&self) -> &TagData {
        &self.tag
    }

    fn tag_mut(&mut self) -> &mut TagData {
        &mut self.tag
    }

    fn entries(&self) -> &[ModifierEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::library::{register_defaults, Diamond};
    use crate::stats::definitions::StatId;

    fn pickaxe() -> Arc<ToolDefinition> {
        Arc::new(ToolDefinition::new(
            "pickaxe",
            "Pickaxe",
            [(StatId::Durability, 100.0), (StatId::MiningSpeed, 4.0)]
                .into_iter()
                .collect(),
        ))
    }

    #[test]
    fn test_fresh_tool() {
        let tool = ToolStack::new(pickaxe());
        assert_eq!(tool.damage(), 0);
        assert_eq!(tool.durability(), 100);
        assert!(!tool.is_broken());
    }

    #[test]
    fn test_add_modifier_rebuilds_stats() {
        let mut tool = ToolStack::new(pickaxe());
        tool.add_modifier(Arc::new(Diamond), 1);
        assert_eq!(tool.durability(), 600);
    }

    #[test]
    fn test_duplicate_add_increments_level() {
        let mut tool = ToolStack::new(pickaxe());
        tool.add_modifier(Arc::new(Diamond), 1);
        tool.add_modifier(Arc::new(Diamond), 1);
        assert_eq!(tool.entries().len(), 1);
        assert_eq!(tool.modifier_level(&ModifierId::from("diamond")), 2);
        assert_eq!(tool.durability(), 1100);
    }

    #[test]
    fn test_tag_round_trip() {
        let mut registry = ModifierRegistry::new();
        register_defaults(&mut registry).unwrap();

        let mut tool = ToolStack::new(pickaxe());
        tool.add_modifier(registry.get(&ModifierId::from("diamond")).unwrap(), 2);
        tool.set_damage(40);

        let tag = tool.to_tag();
        let restored = ToolStack::from_tag(pickaxe(), tag, &registry);
        assert_eq!(restored.damage(), 40);
        assert_eq!(restored.durability(), tool.durability());
        assert_eq!(restored.modifier_level(&ModifierId::from("diamond")), 2);
    }

    #[test]
    fn test_unknown_modifier_skipped_not_defaulted() {
        let registry = ModifierRegistry::new(); // nothing registered

        let mut tool = ToolStack::new(pickaxe());
        tool.add_modifier(Arc::new(Diamond), 1);
        let tag = tool.to_tag();

        let restored = ToolStack::from_tag(pickaxe(), tag, &registry);
        assert!(restored.entries().is_empty());
        // stats fall back to base, and damage stays clamped to them
        assert_eq!(restored.durability(), 100);
    }

    #[test]
    fn test_break_speed_runs_modifier_hooks() {
        use crate::modifiers::library::Dwarven;

        let mut tool = ToolStack::new(pickaxe());
        tool.add_modifier(Arc::new(Dwarven), 1);

        let mut event = BreakSpeedEvent::new(0, true, 4.0);
        tool.apply_break_speed(&mut event);
        assert!((event.speed - 4.4).abs() < 1e-4);
    }

    #[test]
    fn test_broken_tool_reports_zero_durability() {
        let mut tool = ToolStack::new(pickaxe());
        tool.set_damage(100);
        assert!(tool.is_broken());
        assert_eq!(tool.durability(), 0);
        // stored damage still reflects the stat table
        assert_eq!(tool.damage(), 100);
    }

    #[test]
    fn test_broken_flag_survives_round_trip() {
        let registry = ModifierRegistry::new();
        let mut tool = ToolStack::new(pickaxe());
        tool.set_damage(100);

        let restored = ToolStack::from_tag(pickaxe(), tool.to_tag(), &registry);
        assert!(restored.is_broken());
    }
}
