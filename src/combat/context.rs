//! Combat context shared between the dispatcher and modifier hooks
//!
//! Target state is mutated only through this module so that speculative
//! effects applied in a before-hit always have a rollback path available
//! to the matching failed-hit.

use rand::RngCore;

use crate::core::config::config;
use crate::core::types::Hand;

/// The entity swinging (or otherwise damaging) a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: u64,
    /// Creative-mode actors are exempt from tool damage
    pub creative: bool,
}

impl Actor {
    pub fn survival(id: u64) -> Self {
        Self {
            id,
            creative: false,
        }
    }

    pub fn creative(id: u64) -> Self {
        Self { id, creative: true }
    }
}

/// An active bleed effect on a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bleed {
    /// Remaining duration in ticks
    pub duration: u32,
    /// Effect strength, zero-indexed
    pub amplifier: u32,
}

/// Observable state of the entity being hit
#[derive(Debug, Clone, PartialEq)]
pub struct CombatTarget {
    alive: bool,
    /// Remaining burn time in seconds
    burning: u32,
    bleed: Option<Bleed>,
    last_attacker: Option<u64>,
}

impl CombatTarget {
    pub fn new() -> Self {
        Self {
            alive: true,
            burning: 0,
            bleed: None,
            last_attacker: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn is_burning(&self) -> bool {
        self.burning > 0
    }

    pub fn burn_time(&self) -> u32 {
        self.burning
    }

    /// Set the target on fire; never shortens an existing burn
    pub fn ignite(&mut self, seconds: u32) {
        self.burning = self.burning.max(seconds);
    }

    pub fn extinguish(&mut self) {
        self.burning = 0;
    }

    pub fn bleed(&self) -> Option<Bleed> {
        self.bleed
    }

    pub fn apply_bleed(&mut self, duration: u32, amplifier: u32) {
        self.bleed = Some(Bleed {
            duration,
            amplifier,
        });
    }

    pub fn last_attacker(&self) -> Option<u64> {
        self.last_attacker
    }

    /// Attribute follow-up effects to an attacker (kill credit)
    pub fn set_last_attacker(&mut self, attacker: u64) {
        self.last_attacker = Some(attacker);
    }
}

impl Default for CombatTarget {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-swing context handed to every hit hook
///
/// Carries the RNG so that probabilistic modifier effects reproduce under
/// a seeded source.
pub struct HitContext<'a> {
    pub attacker: u64,
    pub hand: Hand,
    pub is_critical: bool,
    /// Attack charge in [0, 1]; procs usually require a full charge
    pub cooldown: f32,
    /// True for sweep/secondary strikes
    pub is_extra_attack: bool,
    /// Outgoing damage computed for this swing
    pub damage: f32,
    pub rng: &'a mut dyn RngCore,
}

impl<'a> HitContext<'a> {
    pub fn new(attacker: u64, rng: &'a mut dyn RngCore) -> Self {
        Self {
            attacker,
            hand: Hand::Main,
            is_critical: false,
            cooldown: 1.0,
            is_extra_attack: false,
            damage: 1.0,
            rng,
        }
    }

    pub fn with_cooldown(mut self, cooldown: f32) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_damage(mut self, damage: f32) -> Self {
        self.damage = damage;
        self
    }

    pub fn with_critical(mut self, critical: bool) -> Self {
        self.is_critical = critical;
        self
    }

    pub fn fully_charged(&self) -> bool {
        self.cooldown > config().fully_charged_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_ignite_never_shortens_burn() {
        let mut target = CombatTarget::new();
        target.ignite(10);
        target.ignite(3);
        assert_eq!(target.burn_time(), 10);
    }

    #[test]
    fn test_extinguish_clears_burn() {
        let mut target = CombatTarget::new();
        target.ignite(5);
        target.extinguish();
        assert!(!target.is_burning());
    }

    #[test]
    fn test_fully_charged_threshold() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let ctx = HitContext::new(1, &mut rng).with_cooldown(0.95);
        assert!(ctx.fully_charged());

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let ctx = HitContext::new(1, &mut rng).with_cooldown(0.5);
        assert!(!ctx.fully_charged());
    }
}
