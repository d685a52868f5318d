//! Tool stat identifiers and stat tables

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Numeric stats a tool carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatId {
    /// Maximum damage the tool absorbs before breaking
    Durability,
    /// Bonus damage dealt on hit
    AttackDamage,
    /// Attacks per second factor
    AttackSpeed,
    /// Block break speed factor
    MiningSpeed,
    /// Highest material tier the tool can harvest
    HarvestLevel,
    /// Bonus drop chance factor
    Luck,
}

impl StatId {
    /// Stable name, matching the serialized form
    pub fn name(self) -> &'static str {
        match self {
            StatId::Durability => "durability",
            StatId::AttackDamage => "attack_damage",
            StatId::AttackSpeed => "attack_speed",
            StatId::MiningSpeed => "mining_speed",
            StatId::HarvestLevel => "harvest_level",
            StatId::Luck => "luck",
        }
    }

    /// Value used when a table has no entry for this stat
    pub fn default_value(self) -> f32 {
        match self {
            StatId::Durability => 1.0,
            StatId::AttackDamage => 0.0,
            StatId::AttackSpeed => 1.0,
            StatId::MiningSpeed => 1.0,
            StatId::HarvestLevel => 0.0,
            StatId::Luck => 0.0,
        }
    }
}

/// Mapping from stat id to numeric value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatTable {
    values: AHashMap<StatId, f32>,
}

impl StatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a stat, falling back to its default when unset
    pub fn get(&self, stat: StatId) -> f32 {
        self.values
            .get(&stat)
            .copied()
            .unwrap_or_else(|| stat.default_value())
    }

    pub fn set(&mut self, stat: StatId, value: f32) {
        self.values.insert(stat, value);
    }

    /// Durability as the integer the damage engine works in
    pub fn durability(&self) -> u32 {
        self.get(StatId::Durability).max(0.0) as u32
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatId, f32)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }
}

/// Convenience constructor used by tool definitions and tests
impl FromIterator<(StatId, f32)> for StatTable {
    fn from_iter<T: IntoIterator<Item = (StatId, f32)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_stats_fall_back_to_defaults() {
        let table = StatTable::new();
        assert_eq!(table.get(StatId::Durability), 1.0);
        assert_eq!(table.get(StatId::MiningSpeed), 1.0);
        assert_eq!(table.get(StatId::AttackDamage), 0.0);
    }

    #[test]
    fn test_set_and_get() {
        let mut table = StatTable::new();
        table.set(StatId::Durability, 350.0);
        assert_eq!(table.get(StatId::Durability), 350.0);
        assert_eq!(table.durability(), 350);
    }

    #[test]
    fn test_name_matches_serialized_form() {
        let json = serde_json::to_string(&StatId::MiningSpeed).unwrap();
        assert_eq!(json, format!("\"{}\"", StatId::MiningSpeed.name()));
    }

    #[test]
    fn test_from_iterator() {
        let table: StatTable = [(StatId::Durability, 100.0), (StatId::Luck, 0.5)]
            .into_iter()
            .collect();
        assert_eq!(table.durability(), 100);
        assert_eq!(table.get(StatId::Luck), 0.5);
    }
}
