use serde::{Deserialize, Serialize};

use crate::BattleRng;
use crate::actor::Roster;
use crate::catalog::SkillCatalog;

/// One queued action for the round: who acts, and optionally with what.
/// `skill: None` marks an auto entry; the resolver picks a skill for it at
/// execution time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedAction {
    pub actor: String,
    #[serde(default)]
    pub skill: Option<String>,
    #[serde(default)]
    pub targets: Option<Vec<String>>,
}

impl QueuedAction {
    pub fn auto(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            skill: None,
            targets: None,
        }
    }

    pub fn with_skill(actor: impl Into<String>, skill: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            skill: Some(skill.into()),
            targets: None,
        }
    }

    pub fn aimed(
        actor: impl Into<String>,
        skill: impl Into<String>,
        targets: Vec<String>,
    ) -> Self {
        Self {
            actor: actor.into(),
            skill: Some(skill.into()),
            targets: Some(targets),
        }
    }
}

/// Produce the execution order for one round.
///
/// Sorts descending by the skill's priority tier (auto entries count as 0),
/// then by the actor's base speed, then by an independent random draw per
/// entry. Insertion order never decides a tie, so neither team is
/// systematically favored. No entry is dropped, added, or mutated.
pub fn determine_turn_order(
    catalog: &SkillCatalog,
    roster: &Roster,
    actions: Vec<QueuedAction>,
    rng: &mut BattleRng,
) -> Vec<QueuedAction> {
    let mut keyed: Vec<(i32, i32, u64, QueuedAction)> = actions
        .into_iter()
        .map(|action| {
            let priority = action
                .skill
                .as_deref()
                .map_or(0, |id| catalog.priority_of(id));
            let spd = roster.get(&action.actor).map_or(0, |actor| actor.spd);
            (priority, spd, rng.draw(), action)
        })
        .collect();

    keyed.sort_by(|a, b| (b.0, b.1, b.2).cmp(&(a.0, a.1, a.2)));
    keyed.into_iter().map(|(_, _, _, action)| action).collect()
}

/// Human-readable summary of an order, one line per entry.
pub fn format_order(roster: &Roster, ordered: &[QueuedAction]) -> Vec<String> {
    ordered
        .iter()
        .map(|action| {
            let glyph = roster.get(&action.actor).map_or("", |a| a.glyph.as_str());
            format!(
                "{}{} -> {}",
                glyph,
                action.actor,
                action.skill.as_deref().unwrap_or("auto")
            )
        })
        .collect()
}
