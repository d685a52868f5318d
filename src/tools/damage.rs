//! Tool damage and repair, along with the raw broken-flag path
//!
//! Damage runs the modifier chain in list order; repair deliberately does
//! not (repair bonuses are a recipe concern). `break_tool`/`is_broken`
//! bypass `ToolStack` for contexts holding only the serialized tag; both
//! paths share the same persisted broken key.

use crate::combat::context::Actor;
use crate::core::config::config;
use crate::modifiers::hooks::{ToolView, NO_COLOR_OVERRIDE};
use crate::tools::stack::{ToolStack, TAG_BROKEN};
use crate::tools::tags::TagData;

/// Damage the tool, running the modifier chain first
///
/// Returns true if the tool broke. Preconditions (silent no-op, false):
/// non-positive amount, already broken, unbreakable, creative actor.
/// Each modifier may rewrite the pending amount; a negative rewrite means
/// the damage was fully absorbed and the chain stops with the tool intact.
pub fn damage(tool: &mut ToolStack, amount: i32, actor: Option<&Actor>) -> bool {
    if amount <= 0 || tool.is_broken() || tool.is_unbreakable() {
        return false;
    }
    if actor.is_some_and(|a| a.creative) {
        return false;
    }

    let mut amount = amount;
    let entries = tool.entries().to_vec();
    for entry in &entries {
        amount = entry
            .modifier()
            .on_damage(tool, entry.level(), amount, actor);
        if amount < 0 {
            return false;
        }
    }
    direct_damage(tool, amount, actor)
}

/// Damage the tool directly, bypassing modifier hooks
pub fn direct_damage(tool: &mut ToolStack, amount: i32, actor: Option<&Actor>) -> bool {
    if actor.is_some_and(|a| a.creative) {
        return false;
    }

    let durability = tool.durability();
    let current = durability.saturating_sub(ToolView::damage(tool));
    let amount = (amount.max(0) as u32).min(current);
    if amount > 0 {
        let new_damage = ToolView::damage(tool) + amount;
        tool.set_damage(new_damage);
        return new_damage >= durability;
    }
    false
}

/// Repair the tool by the given amount
///
/// No-op when the amount is non-positive or the tool is undamaged. Never
/// repairs past zero damage, and never runs the modifier chain. A broken
/// tool repaired below capacity becomes usable again.
pub fn repair(tool: &mut ToolStack, amount: i32) {
    if amount <= 0 {
        return;
    }

    let damage = ToolView::damage(tool);
    if damage == 0 {
        return;
    }

    // modifier repair bonuses are applied by the recipe, not here
    let new_damage = damage - (amount as u32).min(damage);
    tool.set_damage(new_damage);
}

/// Whether the tool has any damage worth repairing
pub fn needs_repair(tool: &ToolStack) -> bool {
    ToolView::damage(tool) > 0 || tool.is_broken()
}

/* Raw tag path, for contexts without a parsed ToolStack */

/// Mark a serialized tool as broken
pub fn break_tool(tag: &mut TagData) {
    tag.put_bool(TAG_BROKEN, true);
}

/// Check the broken flag on a serialized tool
pub fn is_broken(tag: &TagData) -> bool {
    tag.get_bool(TAG_BROKEN)
}

/* Durability display */

/// Whether the durability bar should be drawn
///
/// The first modifier with an opinion wins; otherwise the bar shows
/// whenever the tool has taken damage.
pub fn show_durability_bar(tool: &ToolStack) -> bool {
    for entry in tool.entries() {
        if let Some(show) = entry.modifier().show_durability_bar(tool, entry.level()) {
            return show;
        }
    }
    ToolView::damage(tool) > 0
}

/// Damage fraction before display scaling; first non-NaN override wins
fn damage_percentage(tool: &ToolStack) -> f32 {
    for entry in tool.entries() {
        let display = entry.modifier().damage_percentage(tool, entry.level());
        if !display.is_nan() {
            return display;
        }
    }
    ToolView::damage(tool) as f32 / tool.stats().durability() as f32
}

/// Damage shown on the durability bar, between 0 and 1
///
/// A broken tool always shows a fully consumed bar; unbroken tools keep a
/// sliver visible so "nearly broken" stays distinguishable.
pub fn damage_for_display(tool: &ToolStack) -> f32 {
    if tool.is_broken() {
        return 1.0;
    }
    config().durability_bar_scale * damage_percentage(tool)
}

/// Packed RGB for the durability bar; first modifier override wins
pub fn durability_rgb(tool: &ToolStack) -> u32 {
    for entry in tool.entries() {
        let rgb = entry.modifier().durability_rgb(tool, entry.level());
        if rgb != NO_COLOR_OVERRIDE {
            return rgb as u32;
        }
    }
    hsv_to_rgb((1.0 - damage_percentage(tool)).max(0.0) / 3.0, 1.0, 1.0)
}

/// Convert HSV (each in [0, 1]) to packed RGB
fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> u32 {
    let i = (hue * 6.0).floor() as i32;
    let f = hue * 6.0 - i as f32;
    let p = value * (1.0 - saturation);
    let q = value * (1.0 - f * saturation);
    let t = value * (1.0 - (1.0 - f) * saturation);
    let (r, g, b) = match i.rem_euclid(6) {
        0 => (value, t, p),
        1 => (q, value, p),
        2 => (p, value, t),
        3 => (p, q, value),
        4 => (t, p, value),
        _ => (value, p, q),
    };
    let to_byte = |c: f32| (c * 255.0).round().clamp(0.0, 255.0) as u32;
    (to_byte(r) << 16) | (to_byte(g) << 8) | to_byte(b)
}
