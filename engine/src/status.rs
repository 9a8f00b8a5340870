use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::actor::Actor;
use crate::catalog::SkillCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Buff,
    Debuff,
    Status,
}

/// The stat or flag a timed modifier acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKey {
    Atk,
    Def,
    Spd,
    MagicResist,
    ProtectAll,
    Stunned,
    Regen,
    NextAtk,
}

impl StatKey {
    pub fn as_str(self) -> &'static str {
        match self {
            StatKey::Atk => "atk",
            StatKey::Def => "def",
            StatKey::Spd => "spd",
            StatKey::MagicResist => "magic_resist",
            StatKey::ProtectAll => "protect_all",
            StatKey::Stunned => "stunned",
            StatKey::Regen => "regen",
            StatKey::NextAtk => "next_atk",
        }
    }
}

/// Effect payload as authored in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectSpec {
    pub kind: EffectKind,
    pub key: StatKey,
    pub value: f64,
    pub duration: u32,
}

/// One active timed modifier owned by a single actor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectInstance {
    pub owner: String,
    pub source_skill: String,
    pub effect: EffectSpec,
    pub remaining_rounds: u32,
    pub stackable: bool,
}

/// Why an effect application was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    SkillNotFound,
    SkillHasNoEffect,
    NoDuration,
    AlreadyExists,
}

impl RejectReason {
    pub fn as_str(self) -> &'static str {
        match self {
            RejectReason::SkillNotFound => "skill_not_found",
            RejectReason::SkillHasNoEffect => "skill_has_no_effect",
            RejectReason::NoDuration => "no_duration",
            RejectReason::AlreadyExists => "already_exists",
        }
    }
}

/// Result of an attempted effect application. Refusals are normal flow, not
/// errors; the battle continues either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApplyOutcome {
    pub applied: bool,
    pub reason: Option<RejectReason>,
}

impl ApplyOutcome {
    fn applied() -> Self {
        Self {
            applied: true,
            reason: None,
        }
    }

    fn rejected(reason: RejectReason) -> Self {
        Self {
            applied: false,
            reason: Some(reason),
        }
    }
}

/// Unmodified stats fed into [`StatusStore::modified_stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseStats {
    pub atk: i32,
    pub def: i32,
    pub spd: i32,
}

impl From<&Actor> for BaseStats {
    fn from(actor: &Actor) -> Self {
        Self {
            atk: actor.atk,
            def: actor.def,
            spd: actor.spd,
        }
    }
}

/// Derived view of an actor's stats with every active modifier folded in.
/// Never written back; recomputed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModifiedStats {
    pub atk: i32,
    pub def: i32,
    pub spd: i32,
    /// Multiplier applied to incoming magic damage (1.0 = no change).
    pub magic_resist: f64,
}

/// Holds every active timed modifier, keyed by (owner, stat key) so
/// stackability and removal checks avoid scanning unrelated effects.
#[derive(Debug, Clone, Default)]
pub struct StatusStore {
    effects: IndexMap<(String, StatKey), Vec<EffectInstance>>,
}

impl StatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the skill's attached effect and store an instance of it.
    /// Nothing is mutated on a refusal.
    pub fn add_effect_by_skill(
        &mut self,
        catalog: &SkillCatalog,
        owner: &str,
        skill_id: &str,
    ) -> ApplyOutcome {
        let Some(skill) = catalog.get(skill_id) else {
            return ApplyOutcome::rejected(RejectReason::SkillNotFound);
        };
        let Some(effect) = skill.effect().copied() else {
            return ApplyOutcome::rejected(RejectReason::SkillHasNoEffect);
        };
        // Effects without a duration are non-persistent and cannot be stored.
        if effect.duration == 0 {
            return ApplyOutcome::rejected(RejectReason::NoDuration);
        }

        let slot = (owner.to_string(), effect.key);
        if !skill.stackable
            && self
                .effects
                .get(&slot)
                .is_some_and(|list| list.iter().any(|e| e.remaining_rounds > 0))
        {
            return ApplyOutcome::rejected(RejectReason::AlreadyExists);
        }

        debug!(owner = %owner, skill = %skill_id, key = effect.key.as_str(), "effect applied");
        self.effects.entry(slot).or_default().push(EffectInstance {
            owner: owner.to_string(),
            source_skill: skill_id.to_string(),
            effect,
            remaining_rounds: effect.duration,
            stackable: skill.stackable,
        });
        ApplyOutcome::applied()
    }

    /// True iff an active instance on `key` exists for the owner.
    pub fn has_effect(&self, owner: &str, key: StatKey) -> bool {
        self.effects
            .get(&(owner.to_string(), key))
            .is_some_and(|list| list.iter().any(|e| e.remaining_rounds > 0))
    }

    /// Remove and return all instances matching `key` (and `kind`, if given).
    pub fn remove_effect(
        &mut self,
        owner: &str,
        key: StatKey,
        kind: Option<EffectKind>,
    ) -> Vec<EffectInstance> {
        let slot = (owner.to_string(), key);
        let mut removed = Vec::new();
        if let Some(list) = self.effects.get_mut(&slot) {
            let (matched, kept): (Vec<_>, Vec<_>) = list
                .drain(..)
                .partition(|e| kind.is_none_or(|k| e.effect.kind == k));
            removed = matched;
            *list = kept;
        }
        if self.effects.get(&slot).is_some_and(|list| list.is_empty()) {
            self.effects.shift_remove(&slot);
        }
        removed
    }

    /// Advance one round: decrement every instance once and expire those
    /// reaching zero. Called exactly once after all actions have resolved.
    pub fn tick_turn(&mut self) -> Vec<EffectInstance> {
        let mut removed = Vec::new();
        for list in self.effects.values_mut() {
            let mut kept = Vec::with_capacity(list.len());
            for mut instance in list.drain(..) {
                instance.remaining_rounds = instance.remaining_rounds.saturating_sub(1);
                if instance.remaining_rounds > 0 {
                    kept.push(instance);
                } else {
                    debug!(
                        owner = %instance.owner,
                        key = instance.effect.key.as_str(),
                        "effect expired"
                    );
                    removed.push(instance);
                }
            }
            *list = kept;
        }
        self.effects.retain(|_, list| !list.is_empty());
        removed
    }

    /// Every active instance for one owner, in application order per key.
    pub fn effects_of(&self, owner: &str) -> Vec<&EffectInstance> {
        self.effects
            .iter()
            .filter(|((o, _), _)| o == owner)
            .flat_map(|(_, list)| list)
            .collect()
    }

    /// Fold all active modifiers into a read-only stat view. Buffs multiply
    /// atk/def, debuffs divide them (rounded, floored at zero). For spd a
    /// magnitude >= 1 is a multiplier and < 1 an additive delta; both skill
    /// authoring conventions are live in the catalog, so the split stays.
    /// Magic resistance keeps the lowest multiplier (most resistance wins).
    pub fn modified_stats(&self, base: BaseStats, owner: &str) -> ModifiedStats {
        let mut atk = base.atk;
        let mut def = base.def;
        let mut spd = base.spd;
        let mut magic_resist = 1.0_f64;

        for instance in self.effects_of(owner) {
            let value = instance.effect.value;
            match instance.effect.key {
                StatKey::Atk => match instance.effect.kind {
                    EffectKind::Buff => atk = mul_round(atk, value),
                    EffectKind::Debuff => atk = div_round(atk, value),
                    EffectKind::Status => {}
                },
                StatKey::Def => match instance.effect.kind {
                    EffectKind::Buff => def = mul_round(def, value),
                    EffectKind::Debuff => def = div_round(def, value),
                    EffectKind::Status => {}
                },
                StatKey::Spd => {
                    if value >= 1.0 {
                        spd = mul_round(spd, value);
                    } else {
                        spd = (spd + value.round() as i32).max(0);
                    }
                }
                StatKey::MagicResist => magic_resist = magic_resist.min(value),
                StatKey::ProtectAll | StatKey::Stunned | StatKey::Regen | StatKey::NextAtk => {}
            }
        }

        ModifiedStats {
            atk,
            def,
            spd,
            magic_resist,
        }
    }

    /// Drop every stored instance (new encounter).
    pub fn clear(&mut self) {
        self.effects.clear();
    }
}

fn mul_round(stat: i32, value: f64) -> i32 {
    ((stat as f64 * value).round() as i32).max(0)
}

fn div_round(stat: i32, value: f64) -> i32 {
    ((stat as f64 / value).round() as i32).max(0)
}
