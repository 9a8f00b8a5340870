use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Which team an actor fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// One combatant. `hp`/`mp` are current values and are mutated in place
/// while a round resolves; the caller owns the authoritative copy between
/// rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    #[serde(default)]
    pub glyph: String,
    pub hp: i32,
    pub mp: i32,
    pub max_hp: i32,
    pub max_mp: i32,
    pub atk: i32,
    pub def: i32,
    pub spd: i32,
    pub skills: Vec<String>,
    pub side: Side,
}

impl Actor {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// The full actor set for one encounter, keyed by name. Insertion order is
/// preserved so a seeded battle replays identically.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    actors: IndexMap<String, Actor>,
}

impl Roster {
    pub fn from_actors(actors: impl IntoIterator<Item = Actor>) -> Self {
        let mut map = IndexMap::new();
        for actor in actors {
            map.insert(actor.name.clone(), actor);
        }
        Self { actors: map }
    }

    pub fn get(&self, name: &str) -> Option<&Actor> {
        self.actors.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Actor> {
        self.actors.get_mut(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    /// Names of the living members of one side, in roster order.
    pub fn living_on(&self, side: Side) -> Vec<String> {
        self.actors
            .values()
            .filter(|a| a.side == side && a.is_alive())
            .map(|a| a.name.clone())
            .collect()
    }

    pub fn side_defeated(&self, side: Side) -> bool {
        self.actors
            .values()
            .filter(|a| a.side == side)
            .all(|a| !a.is_alive())
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn into_actors(self) -> Vec<Actor> {
        self.actors.into_values().collect()
    }
}
