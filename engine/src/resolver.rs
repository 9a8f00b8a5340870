use serde::Serialize;
use tracing::warn;

use crate::BattleRng;
use crate::actor::{Actor, Roster, Side};
use crate::catalog::{AttackProfile, Skill, SkillCatalog, SkillKind, TargetShape};
use crate::order::QueuedAction;
use crate::status::{ApplyOutcome, BaseStats, EffectKind, EffectSpec, StatusStore};

/// Skill every actor can always fall back on.
pub const BASIC_ATTACK: &str = "attack";

/// HP restored by a revival, capped at the target's maximum.
const REVIVE_HP: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Damage,
    Heal,
    ApplyBuff,
    RemoveBuff,
    Revive,
    Miss,
    Other,
}

/// One resolved sub-effect. Append-only output, ordered exactly as effects
/// occur during resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveEvent {
    pub actor: String,
    pub skill: String,
    pub targets: Vec<String>,
    pub kind: EventKind,
    pub value: Option<i32>,
    pub detail: Option<String>,
}

fn event(actor: &str, skill: &str, targets: Vec<String>, kind: EventKind) -> ResolveEvent {
    ResolveEvent {
        actor: actor.to_string(),
        skill: skill.to_string(),
        targets,
        kind,
        value: None,
        detail: None,
    }
}

/// Execute one ordered list of actions against the shared roster and status
/// store. The roster is mutated in place; the returned events are the full
/// account of what happened, in order.
pub fn resolve_actions(
    catalog: &SkillCatalog,
    ordered: &[QueuedAction],
    roster: &mut Roster,
    store: &mut StatusStore,
    rng: &mut BattleRng,
) -> Vec<ResolveEvent> {
    let mut events = Vec::new();
    for action in ordered {
        resolve_one(catalog, action, roster, store, rng, &mut events);
    }
    events
}

fn resolve_one(
    catalog: &SkillCatalog,
    action: &QueuedAction,
    roster: &mut Roster,
    store: &mut StatusStore,
    rng: &mut BattleRng,
    events: &mut Vec<ResolveEvent>,
) {
    let (name, side, mp, known_skills) = match roster.get(&action.actor) {
        // Dead units never act and produce zero events.
        Some(actor) if actor.is_alive() => {
            (actor.name.clone(), actor.side, actor.mp, actor.skills.clone())
        }
        Some(_) => return,
        None => {
            warn!(actor = %action.actor, "queued actor not in roster; skipping action");
            return;
        }
    };

    let skill_id = match &action.skill {
        Some(id) => id.clone(),
        None => {
            // MP for pre-selected skills was deducted at queue time; auto
            // picks pay here.
            let picked = pick_auto_skill(catalog, &known_skills, mp, rng);
            let cost = catalog.get(&picked).map_or(0, |s| s.mp_cost);
            if let Some(actor) = roster.get_mut(&name) {
                actor.mp = (actor.mp - cost).max(0);
            }
            picked
        }
    };

    let Some(skill) = catalog.get(&skill_id) else {
        // The caller queued something the catalog has never heard of; drop
        // the one action rather than the whole round.
        warn!(actor = %name, skill = %skill_id, "unknown skill queued; skipping action");
        return;
    };

    let targets = resolve_targets(
        roster,
        rng,
        &name,
        side,
        skill.target,
        action.targets.as_deref(),
    );

    match &skill.kind {
        SkillKind::Buff { effect } => {
            apply_effects(catalog, skill, effect, store, &name, &targets, events);
        }
        SkillKind::Debuff { effect, .. } => {
            apply_effects(catalog, skill, effect, store, &name, &targets, events);
        }
        SkillKind::AttackDebuff { effect, .. } => {
            apply_effects(catalog, skill, effect, store, &name, &targets, events);
            if let Some(profile) = skill.attack_profile() {
                attack(skill, profile, roster, store, rng, &name, &targets, events);
            }
        }
        SkillKind::Physical { .. }
        | SkillKind::Magic { .. }
        | SkillKind::MultiHit { .. }
        | SkillKind::Drain { .. }
        | SkillKind::Reckless { .. }
        | SkillKind::Fast { .. }
        | SkillKind::Gamble { .. } => {
            if let Some(profile) = skill.attack_profile() {
                attack(skill, profile, roster, store, rng, &name, &targets, events);
            }
        }
        SkillKind::Heal { power } | SkillKind::Regen { power, .. } => {
            heal_targets(skill, *power, roster, &name, &targets, events);
        }
        SkillKind::Revive | SkillKind::MassRevive => {
            revive_targets(skill, roster, &name, &targets, events);
        }
        SkillKind::Protect { .. } | SkillKind::Stun { .. } | SkillKind::Charge { .. } => {
            events.push(event(&name, &skill.id, targets, EventKind::Other));
        }
    }
}

/// Uniform pick among the actor's own skills plus the basic attack,
/// restricted to those the actor can afford right now. The basic attack is
/// the fallback when nothing is affordable. Kept behind this one seam so a
/// smarter picker only touches one function.
fn pick_auto_skill(
    catalog: &SkillCatalog,
    known_skills: &[String],
    mp: i32,
    rng: &mut BattleRng,
) -> String {
    let mut pool: Vec<&str> = known_skills.iter().map(String::as_str).collect();
    pool.push(BASIC_ATTACK);
    let affordable: Vec<&str> = pool
        .into_iter()
        .filter(|id| catalog.get(id).is_some_and(|s| s.mp_cost <= mp))
        .collect();
    rng.pick(&affordable)
        .copied()
        .unwrap_or(BASIC_ATTACK)
        .to_string()
}

/// Explicit target lists win, filtered to the living. Otherwise the skill's
/// target shape decides: single shapes draw one living member of the
/// relevant side at random, `*_all` shapes take every living member.
fn resolve_targets(
    roster: &Roster,
    rng: &mut BattleRng,
    actor: &str,
    side: Side,
    shape: TargetShape,
    explicit: Option<&[String]>,
) -> Vec<String> {
    if let Some(ids) = explicit {
        if !ids.is_empty() {
            return ids
                .iter()
                .filter(|id| roster.get(id).is_some_and(Actor::is_alive))
                .cloned()
                .collect();
        }
    }
    match shape {
        TargetShape::SelfOnly => vec![actor.to_string()],
        TargetShape::EnemyAll => roster.living_on(side.opposite()),
        TargetShape::AllyAll => roster.living_on(side),
        TargetShape::EnemySingle => pick_one(roster.living_on(side.opposite()), rng),
        TargetShape::AllySingle => pick_one(roster.living_on(side), rng),
    }
}

fn pick_one(pool: Vec<String>, rng: &mut BattleRng) -> Vec<String> {
    rng.pick(&pool).cloned().into_iter().collect()
}

fn push_apply_event(
    actor: &str,
    skill: &Skill,
    target: &str,
    outcome: ApplyOutcome,
    events: &mut Vec<ResolveEvent>,
) {
    if outcome.applied {
        events.push(event(
            actor,
            &skill.id,
            vec![target.to_string()],
            EventKind::ApplyBuff,
        ));
    } else {
        let mut e = event(actor, &skill.id, vec![target.to_string()], EventKind::Other);
        e.detail = outcome.reason.map(|r| r.as_str().to_string());
        events.push(e);
    }
}

/// One key never carries a buff and a debuff at once: an incoming effect
/// whose opposite is active on the same key strips the resident instead of
/// stacking both.
fn apply_effects(
    catalog: &SkillCatalog,
    skill: &Skill,
    effect: &EffectSpec,
    store: &mut StatusStore,
    actor: &str,
    targets: &[String],
    events: &mut Vec<ResolveEvent>,
) {
    let opposing = match effect.kind {
        EffectKind::Buff => Some(EffectKind::Debuff),
        EffectKind::Debuff => Some(EffectKind::Buff),
        EffectKind::Status => None,
    };
    for target in targets {
        let resident = opposing.is_some_and(|kind| {
            store.effects_of(target).iter().any(|e| {
                e.effect.key == effect.key && e.effect.kind == kind && e.remaining_rounds > 0
            })
        });
        if resident {
            let removed = store.remove_effect(target, effect.key, opposing);
            let mut e = event(actor, &skill.id, vec![target.clone()], EventKind::RemoveBuff);
            e.value = Some(removed.len() as i32);
            e.detail = Some(effect.key.as_str().to_string());
            events.push(e);
        } else {
            let outcome = store.add_effect_by_skill(catalog, target, &skill.id);
            push_apply_event(actor, skill, target, outcome, events);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn attack(
    skill: &Skill,
    profile: AttackProfile,
    roster: &mut Roster,
    store: &StatusStore,
    rng: &mut BattleRng,
    attacker: &str,
    targets: &[String],
    events: &mut Vec<ResolveEvent>,
) {
    let attacker_atk = roster.get(attacker).map_or(0, |a| a.atk);
    for _ in 0..profile.hits.max(1) {
        for target_id in targets {
            let Some(target) = roster.get(target_id) else {
                continue;
            };
            if !target.is_alive() {
                continue;
            }

            let damage = if profile.magic {
                // Magic ignores defense; only the resist multiplier applies.
                let resist = store
                    .modified_stats(BaseStats::from(target), target_id)
                    .magic_resist;
                ((profile.power * resist).round() as i32).max(0)
            } else {
                let raw = attacker_atk as f64 * profile.power - target.def as f64;
                (raw.round() as i32).max(1)
            };

            if let Some(t) = roster.get_mut(target_id) {
                t.hp = (t.hp - damage).max(0);
            }
            let mut e = event(
                attacker,
                &skill.id,
                vec![target_id.clone()],
                EventKind::Damage,
            );
            e.value = Some(damage);
            events.push(e);

            if let Some(drain) = profile.drain {
                let healed = (damage as f64 * drain).round() as i32;
                if let Some(a) = roster.get_mut(attacker) {
                    a.hp = (a.hp + healed).min(a.max_hp);
                }
                let mut e = event(
                    attacker,
                    &skill.id,
                    vec![attacker.to_string()],
                    EventKind::Heal,
                );
                e.value = Some(healed);
                events.push(e);
            }

            // A failed trigger roll reports a miss on top of damage that has
            // already landed. Observed behavior, kept as-is.
            if let Some(chance) = profile.chance {
                if !rng.chance(chance) {
                    events.push(event(
                        attacker,
                        &skill.id,
                        vec![target_id.clone()],
                        EventKind::Miss,
                    ));
                }
            }
        }
    }
}

fn heal_targets(
    skill: &Skill,
    power: f64,
    roster: &mut Roster,
    actor: &str,
    targets: &[String],
    events: &mut Vec<ResolveEvent>,
) {
    let amount = power.round() as i32;
    for target_id in targets {
        if let Some(target) = roster.get_mut(target_id) {
            target.hp = (target.hp + amount).min(target.max_hp);
            let mut e = event(actor, &skill.id, vec![target_id.clone()], EventKind::Heal);
            e.value = Some(amount);
            events.push(e);
        }
    }
}

fn revive_targets(
    skill: &Skill,
    roster: &mut Roster,
    actor: &str,
    targets: &[String],
    events: &mut Vec<ResolveEvent>,
) {
    for target_id in targets {
        let Some(target) = roster.get_mut(target_id) else {
            continue;
        };
        if target.hp <= 0 {
            target.hp = REVIVE_HP.min(target.max_hp);
            let mut e = event(actor, &skill.id, vec![target_id.clone()], EventKind::Revive);
            e.value = Some(target.hp);
            events.push(e);
        } else {
            // Reviving the living is a no-op, not an error.
            let mut e = event(actor, &skill.id, vec![target_id.clone()], EventKind::Other);
            e.detail = Some("target_not_dead".to_string());
            events.push(e);
        }
    }
}
