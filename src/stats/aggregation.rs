//! Stat aggregation: folding a base stat table through an ordered modifier list
//!
//! The fold is a pure function of (base stats, modifier list). No ordering
//! policy exists beyond list order; modifiers that want commutativity must
//! restrict themselves to additive transforms.

use crate::core::config::config;
use crate::modifiers::entry::ModifierEntry;
use crate::stats::definitions::{StatId, StatTable};

/// Mutable view handed to each modifier's stat transform
#[derive(Debug)]
pub struct StatsBuilder {
    table: StatTable,
}

impl StatsBuilder {
    pub fn from_base(base: &StatTable) -> Self {
        Self {
            table: base.clone(),
        }
    }

    pub fn get(&self, stat: StatId) -> f32 {
        self.table.get(stat)
    }

    pub fn set(&mut self, stat: StatId, value: f32) {
        self.table.set(stat, value);
    }

    pub fn add(&mut self, stat: StatId, amount: f32) {
        let value = self.table.get(stat);
        self.table.set(stat, value + amount);
    }

    pub fn multiply(&mut self, stat: StatId, factor: f32) {
        let value = self.table.get(stat);
        self.table.set(stat, value * factor);
    }

    pub fn clamp(&mut self, stat: StatId, min: f32, max: f32) {
        let value = self.table.get(stat);
        self.table.set(stat, value.clamp(min, max));
    }

    /// Finish the fold, applying the central durability floor
    pub fn build(mut self) -> StatTable {
        let floor = config().min_durability as f32;
        if self.table.get(StatId::Durability) < floor {
            self.table.set(StatId::Durability, floor);
        }
        self.table
    }
}

/// Fold base stats through every modifier's transform, in list order
pub fn aggregate_stats(base: &StatTable, entries: &[ModifierEntry]) -> StatTable {
    let mut builder = StatsBuilder::from_base(base);
    for entry in entries {
        entry.modifier().modify_stats(entry.level(), &mut builder);
    }
    builder.build()
}
