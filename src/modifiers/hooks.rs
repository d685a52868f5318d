//! The modifier capability contract
//!
//! Every hook has a neutral default so aggregation code can tell "did not
//! participate" from "explicitly computed zero". Callers branch on the
//! sentinels directly:
//! - damage interception: a negative return means fully absorbed, stop the
//!   chain, tool did not break
//! - damage percentage: `f32::NAN` means no override
//! - durability color: [`NO_COLOR_OVERRIDE`] (−1) means no override

use crate::combat::context::{Actor, CombatTarget, HitContext};
use crate::core::types::ModifierId;
use crate::modifiers::entry::ModifierEntry;
use crate::stats::aggregation::StatsBuilder;
use crate::stats::definitions::StatTable;
use crate::tools::tags::TagData;

/// Sentinel for [`Modifier::durability_rgb`]: no opinion.
/// The top bits of a packed RGB value are unused, so −1 is unambiguous.
pub const NO_COLOR_OVERRIDE: i32 = -1;

/// Read access to the tool a hook is running against
///
/// Tool stacks implement this; hooks never see the concrete type, which
/// keeps modifiers testable against lightweight fakes.
pub trait ToolView {
    /// Damage taken so far
    fn damage(&self) -> u32;

    /// Aggregated durability; 0 when broken
    fn durability(&self) -> u32;

    fn is_broken(&self) -> bool;

    fn is_unbreakable(&self) -> bool;

    /// Aggregated stat table
    fn stats(&self) -> &StatTable;

    /// Persisted free-form data
    fn tag(&self) -> &TagData;

    fn tag_mut(&mut self) -> &mut TagData;

    /// Ordered modifier list
    fn entries(&self) -> &[ModifierEntry];
}

/// A composable behavior unit attached to a tool at a given level
///
/// Modifiers are immutable and stateless per call; the level comes from the
/// tool's modifier list, and any per-instance state lives in the tool's tag.
pub trait Modifier: Send + Sync {
    /// Stable identifier, used for registry lookup and persistence
    fn id(&self) -> ModifierId;

    /// Display color as packed RGB
    fn color(&self) -> u32;

    /// Transform aggregated stats; runs during the stat fold, in list order
    fn modify_stats(&self, _level: u32, _stats: &mut StatsBuilder) {}

    /// Intercept incoming tool damage
    ///
    /// Returns the rewritten amount. A negative return means the damage was
    /// fully absorbed and the chain stops with the tool intact.
    fn on_damage(
        &self,
        _tool: &mut dyn ToolView,
        _level: u32,
        amount: i32,
        _actor: Option<&Actor>,
    ) -> i32 {
        amount
    }

    /// Adjust outgoing knockback before a hit lands
    ///
    /// Runs in list order; each modifier sees the previous one's value.
    /// Side effects applied here are speculative and must be undone in
    /// [`Modifier::failed_hit`] if the attack does not land.
    fn before_hit(
        &self,
        _tool: &dyn ToolView,
        _level: u32,
        _ctx: &mut HitContext<'_>,
        _target: &mut CombatTarget,
        knockback: f32,
    ) -> f32 {
        knockback
    }

    /// React to a landed hit; returns a cooldown-delay contribution
    fn after_hit(
        &self,
        _tool: &dyn ToolView,
        _level: u32,
        _ctx: &mut HitContext<'_>,
        _target: &mut CombatTarget,
        _damage_dealt: f32,
    ) -> f32 {
        0.0
    }

    /// Undo speculative state from [`Modifier::before_hit`] after a miss
    fn failed_hit(
        &self,
        _tool: &dyn ToolView,
        _level: u32,
        _ctx: &mut HitContext<'_>,
        _target: &mut CombatTarget,
    ) {
    }

    /// Adjust block break speed
    fn on_break_speed(&self, _tool: &dyn ToolView, _level: u32, _event: &mut BreakSpeedEvent) {}

    /// Append tooltip lines
    fn add_tooltip(&self, _tool: &dyn ToolView, _level: u32, _lines: &mut Vec<String>) {}

    /// Whether the durability bar should be shown; `None` means no opinion
    fn show_durability_bar(&self, _tool: &dyn ToolView, _level: u32) -> Option<bool> {
        None
    }

    /// Override the displayed damage fraction; `f32::NAN` means no opinion
    fn damage_percentage(&self, _tool: &dyn ToolView, _level: u32) -> f32 {
        f32::NAN
    }

    /// Override the durability bar color; [`NO_COLOR_OVERRIDE`] means no opinion
    fn durability_rgb(&self, _tool: &dyn ToolView, _level: u32) -> i32 {
        NO_COLOR_OVERRIDE
    }

    /// Charge units per level for incremental modifiers, `None` otherwise
    fn charge_needed_per_level(&self) -> Option<u32> {
        None
    }

    /// Effective level scaled by stored charge
    ///
    /// Incremental modifiers count full levels below the current one plus
    /// the charge fraction toward the next. With no stored charge (or a
    /// non-incremental modifier) this is simply the level.
    fn scaled_level(&self, tool: &dyn ToolView, level: u32) -> f32 {
        match self.charge_needed_per_level() {
            Some(needed) if needed > 0 => {
                let key = charge_key(&self.id());
                if tool.tag().contains(&key) {
                    let amount = tool.tag().get_int(&key).clamp(0, i64::from(needed)) as f32;
                    (level as f32 - 1.0) + amount / needed as f32
                } else {
                    level as f32
                }
            }
            _ => level as f32,
        }
    }
}

/// Tag key holding an incremental modifier's charge toward its next level
pub fn charge_key(id: &ModifierId) -> String {
    format!("charge:{}", id)
}

/// Mutable break-speed event passed through [`Modifier::on_break_speed`]
#[derive(Debug, Clone, PartialEq)]
pub struct BreakSpeedEvent {
    /// Height of the block being broken
    pub y: i32,
    /// Whether the tool is effective against the block
    pub is_effective: bool,
    /// Speed after prior modifiers; hooks rewrite this in place
    pub speed: f32,
}

impl BreakSpeedEvent {
    pub fn new(y: i32, is_effective: bool, speed: f32) -> Self {
        Self {
            y,
            is_effective,
            speed,
        }
    }
}
