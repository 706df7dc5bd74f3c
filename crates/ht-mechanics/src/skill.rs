//! Skills and their governing abilities.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ability::Ability;
use crate::error::MechError;

/// A trained skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    /// Tumbling and balance (DEX).
    Acrobatics,
    /// Climbing, swimming, grappling (STR).
    Athletics,
    /// Lying convincingly (CHA).
    Deception,
    /// Recalling lore (INT).
    History,
    /// Reading intentions (WIS).
    Insight,
    /// Threats and coercion (CHA).
    Intimidation,
    /// Searching for clues (INT).
    Investigation,
    /// Tending wounds (WIS).
    Medicine,
    /// Noticing things (WIS).
    Perception,
    /// Diplomacy (CHA).
    Persuasion,
    /// Moving unseen (DEX).
    Stealth,
    /// Tracking and foraging (WIS).
    Survival,
}

impl Skill {
    /// All skills in sheet order.
    pub const ALL: [Skill; 12] = [
        Skill::Acrobatics,
        Skill::Athletics,
        Skill::Deception,
        Skill::History,
        Skill::Insight,
        Skill::Intimidation,
        Skill::Investigation,
        Skill::Medicine,
        Skill::Perception,
        Skill::Persuasion,
        Skill::Stealth,
        Skill::Survival,
    ];

    /// The ability whose modifier this skill uses.
    pub fn ability(self) -> Ability {
        match self {
            Self::Acrobatics | Self::Stealth => Ability::Dexterity,
            Self::Athletics => Ability::Strength,
            Self::Deception | Self::Intimidation | Self::Persuasion => Ability::Charisma,
            Self::History | Self::Investigation => Ability::Intelligence,
            Self::Insight | Self::Medicine | Self::Perception | Self::Survival => Ability::Wisdom,
        }
    }

    /// Lowercase name, as used in save files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Acrobatics => "acrobatics",
            Self::Athletics => "athletics",
            Self::Deception => "deception",
            Self::History => "history",
            Self::Insight => "insight",
            Self::Intimidation => "intimidation",
            Self::Investigation => "investigation",
            Self::Medicine => "medicine",
            Self::Perception => "perception",
            Self::Persuasion => "persuasion",
            Self::Stealth => "stealth",
            Self::Survival => "survival",
        }
    }
}

impl FromStr for Skill {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Skill::ALL
            .into_iter()
            .find(|skill| skill.name() == lower)
            .ok_or_else(|| MechError::UnknownSkill(s.trim().to_string()))
    }
}

impl std::fmt::Display for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self.name();
        let mut chars = name.chars();
        if let Some(first) = chars.next() {
            write!(f, "{}{}", first.to_ascii_uppercase(), chars.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn governing_abilities() {
        assert_eq!(Skill::Stealth.ability(), Ability::Dexterity);
        assert_eq!(Skill::Athletics.ability(), Ability::Strength);
        assert_eq!(Skill::Perception.ability(), Ability::Wisdom);
        assert_eq!(Skill::History.ability(), Ability::Intelligence);
        assert_eq!(Skill::Persuasion.ability(), Ability::Charisma);
    }

    #[test]
    fn parse_and_display() {
        let s: Skill = "Perception".parse().unwrap();
        assert_eq!(s, Skill::Perception);
        assert_eq!(s.to_string(), "Perception");
        assert!("arcana".parse::<Skill>().is_err());
    }
}
