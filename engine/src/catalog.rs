use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::status::EffectSpec;

/// The declared audience of a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetShape {
    EnemySingle,
    EnemyAll,
    AllySingle,
    AllyAll,
    #[serde(rename = "self")]
    SelfOnly,
}

/// Category-specific payload. A closed sum type so the resolver's dispatch is
/// exhaustive: adding a category is a compile-time exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkillKind {
    Physical { power: f64 },
    Magic { power: f64 },
    MultiHit { power: f64, hits: u32 },
    Drain { power: f64, drain: f64 },
    Reckless { power: f64, def_penalty: f64 },
    AttackDebuff { power: f64, effect: EffectSpec, chance: f64 },
    Fast { power: f64 },
    Gamble { power: f64, chance: f64 },
    Buff { effect: EffectSpec },
    Debuff { effect: EffectSpec, chance: f64 },
    Heal { power: f64 },
    Regen { power: f64, effect: EffectSpec },
    Revive,
    MassRevive,
    Protect { effect: EffectSpec },
    Stun { effect: EffectSpec, chance: f64 },
    Charge { effect: EffectSpec },
}

/// Flattened view of the damage-dealing kinds, shared by the resolver's
/// attack path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackProfile {
    pub power: f64,
    pub hits: u32,
    pub drain: Option<f64>,
    pub chance: Option<f64>,
    pub magic: bool,
}

impl AttackProfile {
    fn physical(power: f64) -> Self {
        Self {
            power,
            hits: 1,
            drain: None,
            chance: None,
            magic: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// One catalog entry. The category payload lives in [`SkillKind`]; everything
/// here is common to all categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: SkillKind,
    pub mp_cost: i32,
    pub target: TargetShape,
    pub description: String,
    /// Ordering override: higher tiers act before any speed comparison.
    #[serde(default)]
    pub priority: i32,
    /// Whether a second application may coexist with an active one.
    #[serde(default = "default_true")]
    pub stackable: bool,
}

impl Skill {
    /// The attack half of this skill, if it deals direct damage.
    pub fn attack_profile(&self) -> Option<AttackProfile> {
        match self.kind {
            SkillKind::Physical { power } => Some(AttackProfile::physical(power)),
            SkillKind::Magic { power } => Some(AttackProfile {
                magic: true,
                ..AttackProfile::physical(power)
            }),
            SkillKind::MultiHit { power, hits } => Some(AttackProfile {
                hits,
                ..AttackProfile::physical(power)
            }),
            SkillKind::Drain { power, drain } => Some(AttackProfile {
                drain: Some(drain),
                ..AttackProfile::physical(power)
            }),
            SkillKind::Reckless { power, .. } => Some(AttackProfile::physical(power)),
            SkillKind::AttackDebuff { power, chance, .. } => Some(AttackProfile {
                chance: Some(chance),
                ..AttackProfile::physical(power)
            }),
            SkillKind::Fast { power } => Some(AttackProfile::physical(power)),
            SkillKind::Gamble { power, chance } => Some(AttackProfile {
                chance: Some(chance),
                ..AttackProfile::physical(power)
            }),
            SkillKind::Buff { .. }
            | SkillKind::Debuff { .. }
            | SkillKind::Heal { .. }
            | SkillKind::Regen { .. }
            | SkillKind::Revive
            | SkillKind::MassRevive
            | SkillKind::Protect { .. }
            | SkillKind::Stun { .. }
            | SkillKind::Charge { .. } => None,
        }
    }

    /// The attached status effect, if the category carries one.
    pub fn effect(&self) -> Option<&EffectSpec> {
        match &self.kind {
            SkillKind::AttackDebuff { effect, .. }
            | SkillKind::Buff { effect }
            | SkillKind::Debuff { effect, .. }
            | SkillKind::Regen { effect, .. }
            | SkillKind::Protect { effect }
            | SkillKind::Stun { effect, .. }
            | SkillKind::Charge { effect } => Some(effect),
            _ => None,
        }
    }
}

/// Read-only skill definitions keyed by id. Supplied entirely by external
/// data; the engine performs no I/O of its own.
#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    skills: IndexMap<String, Skill>,
}

impl SkillCatalog {
    pub fn from_skills(skills: impl IntoIterator<Item = Skill>) -> Result<Self, ContentError> {
        let mut map = IndexMap::new();
        for skill in skills {
            if map.contains_key(&skill.id) {
                return Err(ContentError::DuplicateSkill(skill.id));
            }
            map.insert(skill.id.clone(), skill);
        }
        Ok(Self { skills: map })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ContentError> {
        let skills: Vec<Skill> = serde_json::from_str(json).map_err(|source| {
            ContentError::Json {
                what: "skill catalog",
                source,
            }
        })?;
        Self::from_skills(skills)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ContentError> {
        let skills: Vec<Skill> = serde_yaml::from_str(yaml).map_err(|source| {
            ContentError::Yaml {
                what: "skill catalog",
                source,
            }
        })?;
        Self::from_skills(skills)
    }

    pub fn get(&self, id: &str) -> Option<&Skill> {
        self.skills.get(id)
    }

    /// Priority tier for ordering; unknown ids fall back to 0.
    pub fn priority_of(&self, id: &str) -> i32 {
        self.get(id).map_or(0, |s| s.priority)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.values()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}
