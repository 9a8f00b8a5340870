use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod actor;
pub mod catalog;
pub mod commands;
pub mod content;
pub mod error;
pub mod order;
pub mod resolver;
pub mod round;
pub mod status;

pub use actor::{Actor, Roster, Side};
pub use catalog::{AttackProfile, Skill, SkillCatalog, SkillKind, TargetShape};
pub use error::ContentError;
pub use order::{QueuedAction, determine_turn_order, format_order};
pub use resolver::{BASIC_ATTACK, EventKind, ResolveEvent, resolve_actions};
pub use round::{RoundOutcome, run_round};
pub use status::{
    ApplyOutcome, BaseStats, EffectInstance, EffectKind, EffectSpec, ModifiedStats, RejectReason,
    StatKey, StatusStore,
};

/// Seedable random source injected into the scheduler and resolver.
pub struct BattleRng {
    rng: ChaCha8Rng,
}

impl BattleRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Independent draw used to break ordering ties.
    pub fn draw(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// True with probability `p` (clamped to 0..=1).
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform pick from a slice; `None` when empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.rng.gen_range(0..items.len())])
        }
    }
}
