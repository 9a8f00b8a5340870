//! Pre-queue checks for player-issued commands. These run before an action
//! enters the round's queue; once queued, the core never re-validates.

use thiserror::Error;

use crate::actor::Roster;
use crate::catalog::{SkillCatalog, TargetShape};
use crate::order::QueuedAction;

/// Why a selection was refused at queue time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("{0} is not in this battle")]
    UnknownActor(String),
    #[error("{0} has already chosen an action")]
    AlreadyQueued(String),
    #[error("unknown skill '{0}'")]
    UnknownSkill(String),
    #[error("{actor} does not have enough MP for {skill}")]
    NotEnoughMp { actor: String, skill: String },
}

pub fn validate_selection(
    catalog: &SkillCatalog,
    roster: &Roster,
    queue: &[QueuedAction],
    actor: &str,
    skill_id: &str,
) -> Result<(), SelectionError> {
    let Some(unit) = roster.get(actor) else {
        return Err(SelectionError::UnknownActor(actor.to_string()));
    };
    if queue.iter().any(|a| a.actor == actor) {
        return Err(SelectionError::AlreadyQueued(actor.to_string()));
    }
    let Some(skill) = catalog.get(skill_id) else {
        return Err(SelectionError::UnknownSkill(skill_id.to_string()));
    };
    if unit.mp < skill.mp_cost {
        return Err(SelectionError::NotEnoughMp {
            actor: actor.to_string(),
            skill: skill_id.to_string(),
        });
    }
    Ok(())
}

/// Targets that need no prompt: self and whole-side shapes. Single-target
/// shapes return `None`, meaning the caller must ask the player to pick.
pub fn auto_targets(
    catalog: &SkillCatalog,
    roster: &Roster,
    actor: &str,
    skill_id: &str,
) -> Option<Vec<String>> {
    let skill = catalog.get(skill_id)?;
    let side = roster.get(actor)?.side;
    match skill.target {
        TargetShape::SelfOnly => Some(vec![actor.to_string()]),
        TargetShape::AllyAll => Some(roster.living_on(side)),
        TargetShape::EnemyAll => Some(roster.living_on(side.opposite())),
        TargetShape::AllySingle | TargetShape::EnemySingle => None,
    }
}

/// Living members of the side a single-target skill would prompt for.
pub fn target_candidates(
    catalog: &SkillCatalog,
    roster: &Roster,
    actor: &str,
    skill_id: &str,
) -> Vec<String> {
    let Some(skill) = catalog.get(skill_id) else {
        return Vec::new();
    };
    let Some(side) = roster.get(actor).map(|a| a.side) else {
        return Vec::new();
    };
    match skill.target {
        TargetShape::EnemySingle => roster.living_on(side.opposite()),
        TargetShape::AllySingle => roster.living_on(side),
        _ => Vec::new(),
    }
}
