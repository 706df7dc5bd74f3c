//! Playable races and their ability score increases.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ability::Ability;
use crate::error::MechError;

/// A playable race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Race {
    /// +1 to every ability.
    Human,
    /// +2 DEX.
    Elf,
    /// +2 CON.
    Dwarf,
    /// +2 DEX.
    Halfling,
    /// +2 STR, +1 CHA.
    Dragonborn,
    /// +2 INT.
    Gnome,
    /// +2 CHA and +1 to two other abilities of the player's choice.
    HalfElf,
    /// +2 STR, +1 CON.
    HalfOrc,
    /// +1 INT, +2 CHA.
    Tiefling,
}

impl Race {
    /// All races in menu order.
    pub const ALL: [Race; 9] = [
        Race::Human,
        Race::Elf,
        Race::Dwarf,
        Race::Halfling,
        Race::Dragonborn,
        Race::Gnome,
        Race::HalfElf,
        Race::HalfOrc,
        Race::Tiefling,
    ];

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Elf => "elf",
            Self::Dwarf => "dwarf",
            Self::Halfling => "halfling",
            Self::Dragonborn => "dragonborn",
            Self::Gnome => "gnome",
            Self::HalfElf => "half-elf",
            Self::HalfOrc => "half-orc",
            Self::Tiefling => "tiefling",
        }
    }

    /// Fixed ability score increases.
    pub fn bonuses(self) -> &'static [(Ability, i32)] {
        use Ability::*;
        match self {
            Self::Human => &[
                (Strength, 1),
                (Dexterity, 1),
                (Constitution, 1),
                (Intelligence, 1),
                (Wisdom, 1),
                (Charisma, 1),
            ],
            Self::Elf | Self::Halfling => &[(Dexterity, 2)],
            Self::Dwarf => &[(Constitution, 2)],
            Self::Dragonborn => &[(Strength, 2), (Charisma, 1)],
            Self::Gnome => &[(Intelligence, 2)],
            Self::HalfElf => &[(Charisma, 2)],
            Self::HalfOrc => &[(Strength, 2), (Constitution, 1)],
            Self::Tiefling => &[(Intelligence, 1), (Charisma, 2)],
        }
    }

    /// Number of +1 increases the player assigns to abilities of their choice.
    pub fn flexible_increases(self) -> usize {
        match self {
            Self::HalfElf => 2,
            _ => 0,
        }
    }

    /// Abilities that may not receive a flexible increase.
    pub fn excluded_from_choice(self) -> &'static [Ability] {
        match self {
            Self::HalfElf => &[Ability::Charisma],
            _ => &[],
        }
    }

    /// Racial traits.
    pub fn traits(self) -> &'static [&'static str] {
        match self {
            Self::Human => &["Extra Language", "Extra Skill"],
            Self::Elf => &["Darkvision", "Fey Ancestry", "Trance"],
            Self::Dwarf => &["Darkvision", "Dwarven Resilience", "Stonecunning"],
            Self::Halfling => &["Lucky", "Brave", "Halfling Nimbleness"],
            Self::Dragonborn => &["Draconic Ancestry", "Breath Weapon", "Damage Resistance"],
            Self::Gnome => &["Darkvision", "Gnome Cunning"],
            Self::HalfElf => &["Darkvision", "Fey Ancestry", "Extra Skills"],
            Self::HalfOrc => &["Darkvision", "Relentless Endurance", "Savage Attacks"],
            Self::Tiefling => &["Darkvision", "Hellish Resistance", "Infernal Legacy"],
        }
    }
}

impl FromStr for Race {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        Race::ALL
            .into_iter()
            .find(|r| r.name() == normalized)
            .ok_or_else(|| MechError::UnknownRace(s.trim().to_string()))
    }
}

impl std::fmt::Display for Race {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
