//! Built-in content, embedded the same way it would be shipped: plain data
//! files parsed at startup. The engine itself never touches the filesystem.

use serde::Deserialize;

use crate::actor::{Actor, Roster, Side};
use crate::catalog::SkillCatalog;
use crate::error::ContentError;

/// The full built-in skill roster.
pub fn builtin_catalog() -> Result<SkillCatalog, ContentError> {
    SkillCatalog::from_json_str(include_str!("../content/skills.json"))
}

pub fn builtin_heroes() -> Result<Vec<ActorSpec>, ContentError> {
    parse_party(include_str!("../content/parties/heroes.json"))
}

pub fn builtin_monsters() -> Result<Vec<ActorSpec>, ContentError> {
    parse_party(include_str!("../content/parties/monsters.json"))
}

/// A party member as authored in content files. Current HP/MP start at the
/// authored values, which double as the maximums.
#[derive(Debug, Clone, Deserialize)]
pub struct ActorSpec {
    pub name: String,
    #[serde(default)]
    pub glyph: String,
    pub hp: i32,
    pub mp: i32,
    pub atk: i32,
    pub def: i32,
    pub spd: i32,
    pub skills: Vec<String>,
}

impl ActorSpec {
    pub fn into_actor(self, side: Side) -> Actor {
        Actor {
            name: self.name,
            glyph: self.glyph,
            hp: self.hp,
            mp: self.mp,
            max_hp: self.hp,
            max_mp: self.mp,
            atk: self.atk,
            def: self.def,
            spd: self.spd,
            skills: self.skills,
            side,
        }
    }
}

fn parse_party(json: &str) -> Result<Vec<ActorSpec>, ContentError> {
    serde_json::from_str(json).map_err(|source| ContentError::Json {
        what: "party",
        source,
    })
}

/// A battle setup loaded from a user-supplied YAML file.
#[derive(Debug, Clone, Deserialize)]
pub struct Encounter {
    pub heroes: Vec<ActorSpec>,
    pub monsters: Vec<ActorSpec>,
}

impl Encounter {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ContentError> {
        serde_yaml::from_str(yaml).map_err(|source| ContentError::Yaml {
            what: "encounter",
            source,
        })
    }

    pub fn into_roster(self) -> Roster {
        let heroes = self.heroes.into_iter().map(|s| s.into_actor(Side::Player));
        let monsters = self.monsters.into_iter().map(|s| s.into_actor(Side::Enemy));
        Roster::from_actors(heroes.chain(monsters))
    }
}

/// Default encounter: the first three heroes against the first three
/// monsters.
pub fn default_roster() -> Result<Roster, ContentError> {
    let heroes = builtin_heroes()?
        .into_iter()
        .take(3)
        .map(|s| s.into_actor(Side::Player));
    let monsters = builtin_monsters()?
        .into_iter()
        .take(3)
        .map(|s| s.into_actor(Side::Enemy));
    Ok(Roster::from_actors(heroes.chain(monsters)))
}
