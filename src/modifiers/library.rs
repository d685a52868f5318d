//! Built-in modifier library
//!
//! Each modifier overrides only the hooks it cares about; everything else
//! falls through to the neutral defaults in [`Modifier`].

use rand::Rng;
use std::sync::Arc;

use crate::combat::context::{Actor, CombatTarget, HitContext};
use crate::core::error::Result;
use crate::core::types::ModifierId;
use crate::modifiers::hooks::{BreakSpeedEvent, Modifier, ToolView};
use crate::modifiers::registry::ModifierRegistry;
use crate::stats::aggregation::StatsBuilder;
use crate::stats::definitions::StatId;

/// Sets targets on fire; burn length scales continuously with stored charge
pub struct Fiery;

impl Fiery {
    /// Charge units (e.g. powder consumed) per full level
    const CHARGE_PER_LEVEL: u32 = 25;
    /// Burn seconds per scaled level on a landed hit
    const BURN_PER_LEVEL: f32 = 5.0;
}

impl Modifier for Fiery {
    fn id(&self) -> ModifierId {
        ModifierId::from("fiery")
    }

    fn color(&self) -> u32 {
        0x953300
    }

    fn charge_needed_per_level(&self) -> Option<u32> {
        Some(Self::CHARGE_PER_LEVEL)
    }

    fn before_hit(
        &self,
        _tool: &dyn ToolView,
        _level: u32,
        _ctx: &mut HitContext<'_>,
        target: &mut CombatTarget,
        knockback: f32,
    ) -> f32 {
        // ignite early so an instant kill drops cooked items; undone in
        // failed_hit if the swing misses
        if !target.is_burning() {
            target.ignite(1);
        }
        knockback
    }

    fn failed_hit(
        &self,
        _tool: &dyn ToolView,
        _level: u32,
        _ctx: &mut HitContext<'_>,
        target: &mut CombatTarget,
    ) {
        if target.is_burning() {
            target.extinguish();
        }
    }

    fn after_hit(
        &self,
        tool: &dyn ToolView,
        level: u32,
        _ctx: &mut HitContext<'_>,
        target: &mut CombatTarget,
        _damage_dealt: f32,
    ) -> f32 {
        let seconds = (self.scaled_level(tool, level) * Self::BURN_PER_LEVEL).round() as u32;
        target.ignite(seconds);
        0.0
    }

    fn add_tooltip(&self, tool: &dyn ToolView, level: u32, lines: &mut Vec<String>) {
        let seconds = (self.scaled_level(tool, level) * Self::BURN_PER_LEVEL).round() as u32;
        lines.push(format!("Fiery: {}s burn", seconds));
    }
}

/// Chance to apply a bleed on fully charged hits
pub struct Lacerating;

impl Modifier for Lacerating {
    fn id(&self) -> ModifierId {
        ModifierId::from("lacerating")
    }

    fn color(&self) -> u32 {
        0x601CC4
    }

    fn after_hit(
        &self,
        _tool: &dyn ToolView,
        level: u32,
        ctx: &mut HitContext<'_>,
        target: &mut CombatTarget,
        _damage_dealt: f32,
    ) -> f32 {
        if ctx.fully_charged() && target.is_alive() && ctx.rng.gen::<f32>() < 0.50 {
            // attribute the bleed so kills credit the attacker
            target.set_last_attacker(ctx.attacker);
            // 41-140 ticks depending on level roll
            let duration = 1 + 20 * (2 + ctx.rng.gen_range(0..level + 3));
            target.apply_bleed(duration, level.saturating_sub(1));
        }
        0.0
    }
}

/// Faster mining the deeper the block being broken sits
pub struct Dwarven;

impl Dwarven {
    /// Height where the boost crosses zero
    const SEA_LEVEL: i32 = 64;
    /// Fractional bonus per level at y = 0
    const BOOST_AT_0: f32 = 0.1;

    fn boost(y: i32, level: u32) -> f32 {
        (Self::SEA_LEVEL - y) as f32 * level as f32 * (Self::BOOST_AT_0 / Self::SEA_LEVEL as f32)
    }
}

impl Modifier for Dwarven {
    fn id(&self) -> ModifierId {
        ModifierId::from("dwarven")
    }

    fn color(&self) -> u32 {
        0xF98648
    }

    fn on_break_speed(&self, _tool: &dyn ToolView, level: u32, event: &mut BreakSpeedEvent) {
        if !event.is_effective {
            return;
        }
        let factor = Self::boost(event.y, level);
        if factor > 0.0 {
            event.speed *= 1.0 + factor;
        }
    }

    fn add_tooltip(&self, _tool: &dyn ToolView, level: u32, lines: &mut Vec<String>) {
        let boost = Self::BOOST_AT_0 * level as f32;
        lines.push(format!("Dwarven: +{:.0}% mining speed at depth", boost * 100.0));
    }
}

/// Flat durability-damage reduction; at max level the tool never takes damage
pub struct Reinforced;

impl Reinforced {
    /// Fraction of incoming tool damage negated per level
    const REDUCTION_PER_LEVEL: f32 = 0.2;
    /// At this level the tool is effectively unbreakable
    const MAX_LEVEL: u32 = 5;
}

impl Modifier for Reinforced {
    fn id(&self) -> ModifierId {
        ModifierId::from("reinforced")
    }

    fn color(&self) -> u32 {
        0xCACACA
    }

    fn on_damage(
        &self,
        _tool: &mut dyn ToolView,
        level: u32,
        amount: i32,
        _actor: Option<&Actor>,
    ) -> i32 {
        if level >= Self::MAX_LEVEL {
            // fully absorbed: stop the chain, tool intact
            return -1;
        }
        let keep = 1.0 - Self::REDUCTION_PER_LEVEL * level as f32;
        ((amount as f32 * keep).floor() as i32).max(0)
    }

    fn add_tooltip(&self, _tool: &dyn ToolView, level: u32, lines: &mut Vec<String>) {
        if level >= Self::MAX_LEVEL {
            lines.push("Reinforced: unbreakable".to_string());
        } else {
            let pct = Self::REDUCTION_PER_LEVEL * level as f32 * 100.0;
            lines.push(format!("Reinforced: -{:.0}% tool damage", pct));
        }
    }
}

/// A regrowing shield pool consumed before durability, shown on the bar
pub struct Overgrowth;

impl Overgrowth {
    const TAG_KEY: &'static str = "overgrowth";
    /// Shield capacity per level
    pub const CAPACITY_PER_LEVEL: u32 = 50;

    fn shield(tool: &dyn ToolView) -> u32 {
        tool.tag().get_int(Self::TAG_KEY).max(0) as u32
    }

    fn capacity(level: u32) -> u32 {
        Self::CAPACITY_PER_LEVEL * level
    }
}

impl Modifier for Overgrowth {
    fn id(&self) -> ModifierId {
        ModifierId::from("overgrowth")
    }

    fn color(&self) -> u32 {
        0x74C54F
    }

    fn on_damage(
        &self,
        tool: &mut dyn ToolView,
        _level: u32,
        amount: i32,
        _actor: Option<&Actor>,
    ) -> i32 {
        let shield = Self::shield(tool);
        if shield == 0 || amount <= 0 {
            return amount;
        }
        let absorbed = shield.min(amount as u32);
        tool.tag_mut()
            .put_int(Self::TAG_KEY, i64::from(shield - absorbed));
        let remaining = amount - absorbed as i32;
        if remaining == 0 {
            // fully absorbed by the shield
            -1
        } else {
            remaining
        }
    }

    fn show_durability_bar(&self, tool: &dyn ToolView, _level: u32) -> Option<bool> {
        if Self::shield(tool) > 0 {
            Some(true)
        } else {
            None
        }
    }

    fn damage_percentage(&self, tool: &dyn ToolView, level: u32) -> f32 {
        let shield = Self::shield(tool);
        if shield == 0 {
            return f32::NAN;
        }
        1.0 - shield as f32 / Self::capacity(level) as f32
    }

    fn durability_rgb(&self, tool: &dyn ToolView, _level: u32) -> i32 {
        if Self::shield(tool) > 0 {
            self.color() as i32
        } else {
            super::hooks::NO_COLOR_OVERRIDE
        }
    }

    fn add_tooltip(&self, tool: &dyn ToolView, level: u32, lines: &mut Vec<String>) {
        lines.push(format!(
            "Overgrowth: {}/{}",
            Self::shield(tool),
            Self::capacity(level)
        ));
    }
}

/// Durability multiplier with a harvest-tier floor
pub struct Emerald;

impl Modifier for Emerald {
    fn id(&self) -> ModifierId {
        ModifierId::from("emerald")
    }

    fn color(&self) -> u32 {
        0x41F384
    }

    fn modify_stats(&self, level: u32, stats: &mut StatsBuilder) {
        stats.multiply(StatId::Durability, 1.0 + 0.5 * level as f32);
        if stats.get(StatId::HarvestLevel) < 2.0 {
            stats.set(StatId::HarvestLevel, 2.0);
        }
    }
}

/// Flat durability, harvest, and damage bonuses
pub struct Diamond;

impl Modifier for Diamond {
    fn id(&self) -> ModifierId {
        ModifierId::from("diamond")
    }

    fn color(&self) -> u32 {
        0x8CF4E2
    }

    fn modify_stats(&self, level: u32, stats: &mut StatsBuilder) {
        let level = level as f32;
        stats.add(StatId::Durability, 500.0 * level);
        stats.add(StatId::HarvestLevel, 1.0 * level);
        stats.add(StatId::AttackDamage, 0.5 * level);
    }
}

/// Register every built-in modifier
pub fn register_defaults(registry: &mut ModifierRegistry) -> Result<()> {
    registry.register(Arc::new(Fiery))?;
    registry.register(Arc::new(Lacerating))?;
    registry.register(Arc::new(Dwarven))?;
    registry.register(Arc::new(Reinforced))?;
    registry.register(Arc::new(Overgrowth))?;
    registry.register(Arc::new(Emerald))?;
    registry.register(Arc::new(Diamond))?;
    Ok(())
}
