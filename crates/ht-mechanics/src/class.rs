//! Character classes and hit dice.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MechError;

/// Hit die used when a class name is not recognized.
pub const DEFAULT_HIT_DIE: u32 = 8;

/// A character class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    /// Raging front-liner (d12).
    Barbarian,
    /// Performer and spellcaster (d8).
    Bard,
    /// Divine caster (d8).
    Cleric,
    /// Nature caster (d8).
    Druid,
    /// Trained warrior (d10).
    Fighter,
    /// Unarmed martial artist (d8).
    Monk,
    /// Oath-bound knight (d10).
    Paladin,
    /// Wilderness hunter (d10).
    Ranger,
    /// Skirmisher and sneak (d8).
    Rogue,
    /// Innate caster (d6).
    Sorcerer,
    /// Pact caster (d8).
    Warlock,
    /// Studied caster (d8).
    Wizard,
}

impl CharacterClass {
    /// All classes in alphabetical order.
    pub const ALL: [CharacterClass; 12] = [
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
    ];

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Barbarian => "barbarian",
            Self::Bard => "bard",
            Self::Cleric => "cleric",
            Self::Druid => "druid",
            Self::Fighter => "fighter",
            Self::Monk => "monk",
            Self::Paladin => "paladin",
            Self::Ranger => "ranger",
            Self::Rogue => "rogue",
            Self::Sorcerer => "sorcerer",
            Self::Warlock => "warlock",
            Self::Wizard => "wizard",
        }
    }

    /// Sides on this class's hit die.
    pub fn hit_die(self) -> u32 {
        match self {
            Self::Barbarian => 12,
            Self::Fighter | Self::Paladin | Self::Ranger => 10,
            Self::Sorcerer => 6,
            Self::Bard
            | Self::Cleric
            | Self::Druid
            | Self::Monk
            | Self::Rogue
            | Self::Warlock
            | Self::Wizard => 8,
        }
    }
}

impl FromStr for CharacterClass {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        CharacterClass::ALL
            .into_iter()
            .find(|c| c.name() == lower)
            .ok_or_else(|| MechError::UnknownClass(s.trim().to_string()))
    }
}

impl std::fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Hit die for a free-form class name, falling back to d8.
pub fn hit_die_for(class_name: &str) -> u32 {
    class_name
        .parse::<CharacterClass>()
        .map(CharacterClass::hit_die)
        .unwrap_or(DEFAULT_HIT_DIE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_dice() {
        assert_eq!(CharacterClass::Barbarian.hit_die(), 12);
        assert_eq!(CharacterClass::Paladin.hit_die(), 10);
        assert_eq!(CharacterClass::Rogue.hit_die(), 8);
        assert_eq!(CharacterClass::Sorcerer.hit_die(), 6);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(hit_die_for("FIGHTER"), 10);
        assert_eq!(hit_die_for(" Barbarian "), 12);
    }

    #[test]
    fn unknown_class_defaults_to_d8() {
        assert_eq!(hit_die_for("artificer"), DEFAULT_HIT_DIE);
        assert_eq!(hit_die_for(""), DEFAULT_HIT_DIE);
    }
}
