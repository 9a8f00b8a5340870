use serde::Serialize;

use crate::BattleRng;
use crate::actor::{Roster, Side};
use crate::catalog::SkillCatalog;
use crate::order::{QueuedAction, determine_turn_order};
use crate::resolver::{ResolveEvent, resolve_actions};
use crate::status::{EffectInstance, StatusStore};

/// Outcome of one fully resolved round.
#[derive(Debug, Clone, Serialize)]
pub struct RoundOutcome {
    pub events: Vec<ResolveEvent>,
    /// Effects whose duration ran out at the end of this round.
    pub expired_effects: Vec<EffectInstance>,
    pub players_defeated: bool,
    pub enemies_defeated: bool,
}

/// Run one complete round.
///
/// Entries in `queued` carry decisions already made (their MP is deducted
/// here, at queue-application time); every other living actor is entered as
/// an auto action. The round is atomic: ordering, resolution, and the
/// store's duration tick all happen before this returns.
pub fn run_round(
    catalog: &SkillCatalog,
    roster: &mut Roster,
    store: &mut StatusStore,
    queued: Vec<QueuedAction>,
    rng: &mut BattleRng,
) -> RoundOutcome {
    let mut actions = queued;
    actions.retain(|a| roster.get(&a.actor).is_some_and(|actor| actor.is_alive()));

    for action in &actions {
        if let Some(skill_id) = &action.skill {
            let cost = catalog.get(skill_id).map_or(0, |s| s.mp_cost);
            if let Some(actor) = roster.get_mut(&action.actor) {
                actor.mp = (actor.mp - cost).max(0);
            }
        }
    }

    // Everyone without orders fights on autopilot.
    let decided: Vec<String> = actions.iter().map(|a| a.actor.clone()).collect();
    let undecided: Vec<String> = roster
        .iter()
        .filter(|a| a.is_alive() && !decided.contains(&a.name))
        .map(|a| a.name.clone())
        .collect();
    actions.extend(undecided.into_iter().map(QueuedAction::auto));

    let ordered = determine_turn_order(catalog, roster, actions, rng);
    let events = resolve_actions(catalog, &ordered, roster, store, rng);
    let expired_effects = store.tick_turn();

    RoundOutcome {
        events,
        expired_effects,
        players_defeated: roster.side_defeated(Side::Player),
        enemies_defeated: roster.side_defeated(Side::Enemy),
    }
}
