//! Character class reference data.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The twelve PHB character classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Barbarian,
    Bard,
    Cleric,
    Druid,
    Fighter,
    Monk,
    Paladin,
    Ranger,
    Rogue,
    Sorcerer,
    Warlock,
    Wizard,
}

impl CharacterClass {
    /// Hit die size for the class.
    pub fn hit_die(&self) -> i32 {
        match self {
            CharacterClass::Barbarian => 12,
            CharacterClass::Fighter | CharacterClass::Paladin | CharacterClass::Ranger => 10,
            CharacterClass::Bard
            | CharacterClass::Cleric
            | CharacterClass::Druid
            | CharacterClass::Monk
            | CharacterClass::Rogue
            | CharacterClass::Warlock => 8,
            CharacterClass::Sorcerer | CharacterClass::Wizard => 6,
        }
    }

    /// Case-insensitive lookup by class name.
    pub fn from_name(name: &str) -> Option<CharacterClass> {
        match name.trim().to_ascii_lowercase().as_str() {
            "barbarian" => Some(CharacterClass::Barbarian),
            "bard" => Some(CharacterClass::Bard),
            "cleric" => Some(CharacterClass::Cleric),
            "druid" => Some(CharacterClass::Druid),
            "fighter" => Some(CharacterClass::Fighter),
            "monk" => Some(CharacterClass::Monk),
            "paladin" => Some(CharacterClass::Paladin),
            "ranger" => Some(CharacterClass::Ranger),
            "rogue" => Some(CharacterClass::Rogue),
            "sorcerer" => Some(CharacterClass::Sorcerer),
            "warlock" => Some(CharacterClass::Warlock),
            "wizard" => Some(CharacterClass::Wizard),
            _ => None,
        }
    }

    /// Get all character classes.
    pub fn all() -> &'static [CharacterClass] {
        &[
            CharacterClass::Barbarian,
            CharacterClass::Bard,
            CharacterClass::Cleric,
            CharacterClass::Druid,
            CharacterClass::Fighter,
            CharacterClass::Monk,
            CharacterClass::Paladin,
            CharacterClass::Ranger,
            CharacterClass::Rogue,
            CharacterClass::Sorcerer,
            CharacterClass::Warlock,
            CharacterClass::Wizard,
        ]
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
