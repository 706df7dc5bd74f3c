//! The six ability scores and their modifiers.

use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dice::roll_die;
use crate::error::{MechError, MechResult};

/// One of the six core abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    /// Physical power.
    Strength,
    /// Agility and reflexes.
    Dexterity,
    /// Endurance and health.
    Constitution,
    /// Reasoning and memory.
    Intelligence,
    /// Perception and insight.
    Wisdom,
    /// Force of personality.
    Charisma,
}

impl Ability {
    /// All abilities in sheet order.
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    /// Lowercase full name, as used in save files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Dexterity => "dexterity",
            Self::Constitution => "constitution",
            Self::Intelligence => "intelligence",
            Self::Wisdom => "wisdom",
            Self::Charisma => "charisma",
        }
    }

    /// Three-letter abbreviation.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Dexterity => "DEX",
            Self::Constitution => "CON",
            Self::Intelligence => "INT",
            Self::Wisdom => "WIS",
            Self::Charisma => "CHA",
        }
    }

    /// Capitalized name for display.
    pub fn title(self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Dexterity => "Dexterity",
            Self::Constitution => "Constitution",
            Self::Intelligence => "Intelligence",
            Self::Wisdom => "Wisdom",
            Self::Charisma => "Charisma",
        }
    }
}

impl FromStr for Ability {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Ability::ALL
            .into_iter()
            .find(|a| a.name() == lower || a.abbreviation().eq_ignore_ascii_case(&lower))
            .ok_or_else(|| MechError::UnknownAbility(s.trim().to_string()))
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Ability modifier for a score: `floor((score - 10) / 2)`.
///
/// Uses floor division so odd scores below 10 round toward negative
/// infinity (9 gives -1, 7 gives -2).
pub fn modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// A character's six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityScores {
    /// Strength score.
    pub strength: i32,
    /// Dexterity score.
    pub dexterity: i32,
    /// Constitution score.
    pub constitution: i32,
    /// Intelligence score.
    pub intelligence: i32,
    /// Wisdom score.
    pub wisdom: i32,
    /// Charisma score.
    pub charisma: i32,
}

impl AbilityScores {
    /// Scores in sheet order (STR, DEX, CON, INT, WIS, CHA).
    pub fn new(scores: [i32; 6]) -> Self {
        let [strength, dexterity, constitution, intelligence, wisdom, charisma] = scores;
        Self {
            strength,
            dexterity,
            constitution,
            intelligence,
            wisdom,
            charisma,
        }
    }

    /// The standard array: 15, 14, 13, 12, 10, 8.
    pub fn standard_array() -> Self {
        Self::new([15, 14, 13, 12, 10, 8])
    }

    /// Score for an ability.
    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    /// Mutable score for an ability.
    pub fn get_mut(&mut self, ability: Ability) -> &mut i32 {
        match ability {
            Ability::Strength => &mut self.strength,
            Ability::Dexterity => &mut self.dexterity,
            Ability::Constitution => &mut self.constitution,
            Ability::Intelligence => &mut self.intelligence,
            Ability::Wisdom => &mut self.wisdom,
            Ability::Charisma => &mut self.charisma,
        }
    }

    /// Overwrite a score.
    pub fn set(&mut self, ability: Ability, score: i32) {
        *self.get_mut(ability) = score;
    }

    /// Add a bonus (or penalty) to a score.
    pub fn add(&mut self, ability: Ability, delta: i32) {
        *self.get_mut(ability) += delta;
    }

    /// Modifier for an ability.
    pub fn modifier(&self, ability: Ability) -> i32 {
        modifier(self.get(ability))
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::new([10; 6])
    }
}

/// One ability score rolled as 4d6, keeping the highest three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilityRoll {
    /// The four dice, sorted highest first.
    pub rolls: [u32; 4],
    /// Sum of the highest three.
    pub kept: i32,
}

impl AbilityRoll {
    /// Sort four dice descending and keep the top three.
    pub fn from_dice(mut rolls: [u32; 4]) -> Self {
        rolls.sort_unstable_by(|a, b| b.cmp(a));
        let kept = rolls[..3].iter().map(|&v| v as i32).sum();
        Self { rolls, kept }
    }

    /// The discarded die.
    pub fn dropped(&self) -> u32 {
        self.rolls[3]
    }
}

/// Roll a single ability score: 4d6, drop the lowest.
pub fn roll_ability_score<R: Rng + ?Sized>(rng: &mut R) -> AbilityRoll {
    let dice = [
        roll_die(6, rng),
        roll_die(6, rng),
        roll_die(6, rng),
        roll_die(6, rng),
    ];
    AbilityRoll::from_dice(dice)
}

/// Roll all six abilities in sheet order.
pub fn roll_ability_scores<R: Rng + ?Sized>(rng: &mut R) -> (AbilityScores, Vec<(Ability, AbilityRoll)>) {
    let mut scores = AbilityScores::default();
    let mut rolls = Vec::with_capacity(Ability::ALL.len());
    for ability in Ability::ALL {
        let roll = roll_ability_score(rng);
        scores.set(ability, roll.kept);
        rolls.push((ability, roll));
    }
    (scores, rolls)
}

/// Parse a list of ability names, e.g. `"str, dex"`.
pub fn parse_abilities(list: &str) -> MechResult<Vec<Ability>> {
    list.split([',', ' '])
        .filter(|s| !s.trim().is_empty())
        .map(str::parse)
        .collect()
}
