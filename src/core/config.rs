//! Engine configuration with documented constants
//!
//! Gameplay-facing magic numbers are collected here with explanations of
//! their purpose and how they interact with each other.

/// Configuration for the crafting and tool systems
#[derive(Debug, Clone)]
pub struct ForgeConfig {
    // === CRAFTING STATION ===
    /// Maximum number of tools consumed from the station tool slot per craft
    ///
    /// Recipes default to consuming "everything up to this cap". A stack
    /// larger than this keeps the remainder in the slot; a stack at or
    /// below it is cleared entirely.
    pub tool_slot_stack_size: u32,

    // === TOOL STATS ===
    /// Floor applied to aggregated durability
    ///
    /// Modifier authors are not trusted to keep durability positive; the
    /// aggregator clamps to this value after the full transform chain runs.
    pub min_durability: u32,

    // === DURABILITY DISPLAY ===
    /// Fraction of the durability bar a fully damaged (but unbroken) tool
    /// shows as consumed
    ///
    /// Keeping 5% of the bar visible distinguishes "nearly broken" from
    /// "broken" at a glance. Broken tools always display a full bar.
    pub durability_bar_scale: f32,

    // === COMBAT ===
    /// Attack charge above which a swing counts as fully charged
    ///
    /// Proc-on-hit modifiers only fire on fully charged swings so that
    /// spam-clicking does not multiply their effects.
    pub fully_charged_threshold: f32,

    // === RENDERING ===
    /// Whether to log material textures missing from the resource pack
    ///
    /// Logged at debug level, at most once per unique location per
    /// resource-reload cycle.
    pub log_missing_textures: bool,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            tool_slot_stack_size: 16,
            min_durability: 1,
            durability_bar_scale: 0.95,
            fully_charged_threshold: 0.9,
            log_missing_textures: true,
        }
    }
}

impl ForgeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.tool_slot_stack_size == 0 {
            return Err("tool_slot_stack_size must be at least 1".into());
        }
        if self.min_durability == 0 {
            return Err("min_durability must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.durability_bar_scale) {
            return Err(format!(
                "durability_bar_scale ({}) must be within [0, 1]",
                self.durability_bar_scale
            ));
        }
        if !(0.0..=1.0).contains(&self.fully_charged_threshold) {
            return Err(format!(
                "fully_charged_threshold ({}) must be within [0, 1]",
                self.fully_charged_threshold
            ));
        }
        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<ForgeConfig> = OnceLock::new();

/// Get the global config (initializes with defaults if not set)
pub fn config() -> &'static ForgeConfig {
    CONFIG.get_or_init(ForgeConfig::default)
}

/// Set the global config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: ForgeConfig) -> Result<(), ForgeConfig> {
    CONFIG.set(config)
}
