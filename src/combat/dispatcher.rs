//! Ordered dispatch of hit hooks across a tool's modifiers
//!
//! Three extension points per swing: before-hit (knockback fold, list
//! order), after-hit (landed attacks only, all modifiers run), failed-hit
//! (computed but missed attacks, rolls back speculative state).

use crate::combat::context::{CombatTarget, HitContext};
use crate::modifiers::hooks::ToolView;

/// Aggregated result of dispatching one swing
#[derive(Debug, Clone, PartialEq)]
pub struct AttackOutcome {
    pub landed: bool,
    /// Knockback after every before-hit adjustment
    pub knockback: f32,
    /// Sum of cooldown-delay contributions from after-hit hooks
    pub cooldown_delay: f32,
}

/// Run the hit hook chain for one swing
///
/// `landed` reports whether the computed attack actually connected; a miss
/// still dispatches `failed_hit` so modifiers can undo speculative effects
/// from `before_hit`.
pub fn dispatch_attack(
    tool: &dyn ToolView,
    ctx: &mut HitContext<'_>,
    target: &mut CombatTarget,
    base_knockback: f32,
    landed: bool,
) -> AttackOutcome {
    let mut knockback = base_knockback;
    for entry in tool.entries() {
        knockback = entry
            .modifier()
            .before_hit(tool, entry.level(), ctx, target, knockback);
    }

    if !landed {
        for entry in tool.entries() {
            entry.modifier().failed_hit(tool, entry.level(), ctx, target);
        }
        return AttackOutcome {
            landed: false,
            knockback,
            cooldown_delay: 0.0,
        };
    }

    let damage_dealt = ctx.damage;
    let mut cooldown_delay = 0.0;
    for entry in tool.entries() {
        cooldown_delay +=
            entry
                .modifier()
                .after_hit(tool, entry.level(), ctx, target, damage_dealt);
    }

    AttackOutcome {
        landed: true,
        knockback,
        cooldown_delay,
    }
}
