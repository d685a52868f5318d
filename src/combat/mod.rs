pub mod context;
pub mod dispatcher;

pub use context::{Actor, Bleed, CombatTarget, HitContext};
pub use dispatcher::{dispatch_attack, AttackOutcome};
