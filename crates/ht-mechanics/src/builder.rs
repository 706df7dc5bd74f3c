//! Staged character creation.
//!
//! Abilities must be rolled before racial bonuses are applied, and both
//! must happen before derived statistics and hit points are computed.
//! Each stage is a distinct type, so out-of-order calls do not compile:
//!
//! ```
//! use ht_mechanics::{AbilityScores, CharacterBuilder};
//!
//! let character = CharacterBuilder::new("Mira")
//!     .class("rogue")
//!     .with_scores(AbilityScores::standard_array())
//!     .apply_race("elf")
//!     .finish();
//! assert_eq!(character.abilities.dexterity, 16);
//! ```

use std::marker::PhantomData;

use rand::Rng;

use crate::ability::{Ability, AbilityRoll, AbilityScores, roll_ability_scores};
use crate::character::Character;
use crate::error::{MechError, MechResult};
use crate::race::Race;

/// Abilities have not been generated yet.
#[derive(Debug)]
pub struct Unrolled;

/// Abilities are set; race not yet applied.
#[derive(Debug)]
pub struct Rolled;

/// Racial bonuses applied; ready to finish.
#[derive(Debug)]
pub struct RaceApplied;

/// Builds a [`Character`] through its setup stages.
#[derive(Debug)]
pub struct CharacterBuilder<Stage> {
    character: Character,
    race: Option<Race>,
    _stage: PhantomData<Stage>,
}

impl<Stage> CharacterBuilder<Stage> {
    fn into_stage<Next>(self) -> CharacterBuilder<Next> {
        CharacterBuilder {
            character: self.character,
            race: self.race,
            _stage: PhantomData,
        }
    }

    /// Set the class name.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.character.character_class = class.into();
        self
    }

    /// Set the background.
    pub fn background(mut self, background: impl Into<String>) -> Self {
        self.character.background = background.into();
        self
    }

    /// Set the alignment.
    pub fn alignment(mut self, alignment: impl Into<String>) -> Self {
        self.character.alignment = alignment.into();
        self
    }

    /// Current ability scores.
    pub fn scores(&self) -> &AbilityScores {
        &self.character.abilities
    }
}

impl CharacterBuilder<Unrolled> {
    /// Start a new character.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            character: Character::new(name),
            race: None,
            _stage: PhantomData,
        }
    }

    /// Roll each ability as 4d6, dropping the lowest die.
    pub fn roll_abilities<R: Rng + ?Sized>(
        mut self,
        rng: &mut R,
    ) -> (CharacterBuilder<Rolled>, Vec<(Ability, AbilityRoll)>) {
        let (scores, rolls) = roll_ability_scores(rng);
        self.character.abilities = scores;
        (self.into_stage(), rolls)
    }

    /// Use fixed scores instead of rolling.
    pub fn with_scores(mut self, scores: AbilityScores) -> CharacterBuilder<Rolled> {
        self.character.abilities = scores;
        self.into_stage()
    }
}

impl CharacterBuilder<Rolled> {
    /// Apply racial bonuses by name.
    ///
    /// An unrecognized race is kept as the character's race with no
    /// bonuses, so creation always completes.
    pub fn apply_race(mut self, race_name: &str) -> CharacterBuilder<RaceApplied> {
        self.character.race = race_name.trim().to_string();
        match race_name.parse::<Race>() {
            Ok(race) => {
                for &(ability, bonus) in race.bonuses() {
                    self.character.abilities.add(ability, bonus);
                }
                self.character.racial_traits = race.traits().iter().map(|t| t.to_string()).collect();
                self.race = Some(race);
            }
            Err(_) => {
                tracing::warn!(race = race_name, "unrecognized race, no bonuses applied");
            }
        }
        self.character.update_derived_stats();
        self.into_stage()
    }
}

impl CharacterBuilder<RaceApplied> {
    /// The recognized race, if any.
    pub fn race(&self) -> Option<Race> {
        self.race
    }

    /// How many flexible +1 increases the race still grants.
    pub fn pending_choices(&self) -> usize {
        self.race.map_or(0, Race::flexible_increases)
    }

    /// Check flexible increase choices without applying them.
    ///
    /// Choices must be distinct, must not include excluded abilities, and
    /// must match the number the race grants.
    pub fn check_increases(&self, choices: &[Ability]) -> MechResult<()> {
        let Some(race) = self.race else {
            return Err(MechError::InvalidChoice(
                "this race has no ability choices".to_string(),
            ));
        };
        let expected = race.flexible_increases();
        if choices.len() != expected {
            return Err(MechError::InvalidChoice(format!(
                "{race} chooses exactly {expected} abilities, got {}",
                choices.len()
            )));
        }
        for (i, ability) in choices.iter().enumerate() {
            if race.excluded_from_choice().contains(ability) {
                return Err(MechError::InvalidChoice(format!(
                    "{race} cannot choose {ability}"
                )));
            }
            if choices[..i].contains(ability) {
                return Err(MechError::InvalidChoice(format!(
                    "{ability} chosen more than once"
                )));
            }
        }
        Ok(())
    }

    /// Assign the race's flexible +1 increases (half-elf).
    pub fn choose_increases(mut self, choices: &[Ability]) -> MechResult<Self> {
        self.check_increases(choices)?;
        for &ability in choices {
            self.character.abilities.add(ability, 1);
        }
        self.character.update_derived_stats();
        Ok(self)
    }

    /// Compute derived statistics and hit points, producing the character.
    pub fn finish(mut self) -> Character {
        self.character.update_derived_stats();
        self.character.calculate_hp();
        self.character
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn full_sequence_with_fixed_scores() {
        let c = CharacterBuilder::new("Thorin")
            .class("Fighter")
            .background("Soldier")
            .alignment("Lawful Good")
            .with_scores(AbilityScores::standard_array())
            .apply_race("dwarf")
            .finish();

        assert_eq!(c.race, "dwarf");
        assert_eq!(c.abilities.constitution, 15);
        assert_eq!(c.max_hit_points, 12);
        assert_eq!(c.hit_points, 12);
        assert_eq!(c.armor_class, 12);
        assert_eq!(c.background, "Soldier");
        assert!(c.racial_traits.contains(&"Stonecunning".to_string()));
    }

    #[test]
    fn human_bonus_applies_everywhere() {
        let c = CharacterBuilder::new("Ann")
            .with_scores(AbilityScores::default())
            .apply_race("Human")
            .finish();
        for ability in Ability::ALL {
            assert_eq!(c.abilities.get(ability), 11);
        }
    }

    #[test]
    fn unknown_race_keeps_scores() {
        let c = CharacterBuilder::new("Zed")
            .with_scores(AbilityScores::standard_array())
            .apply_race("warforged")
            .finish();
        assert_eq!(c.race, "warforged");
        assert_eq!(c.abilities, AbilityScores::standard_array());
        assert!(c.racial_traits.is_empty());
    }

    #[test]
    fn unknown_class_uses_d8() {
        let c = CharacterBuilder::new("Pip")
            .class("artificer")
            .with_scores(AbilityScores::default())
            .apply_race("gnome")
            .finish();
        assert_eq!(c.max_hit_points, 8);
    }

    #[test]
    fn rolled_scores_carry_through() {
        let mut rng = StdRng::seed_from_u64(11);
        let (builder, rolls) = CharacterBuilder::new("Rolled").roll_abilities(&mut rng);
        assert_eq!(rolls.len(), 6);
        let before = *builder.scores();
        let c = builder.apply_race("elf").finish();
        assert_eq!(c.abilities.dexterity, before.dexterity + 2);
        assert_eq!(c.abilities.strength, before.strength);
    }

    #[test]
    fn half_elf_choices() {
        let builder = CharacterBuilder::new("Lia")
            .with_scores(AbilityScores::default())
            .apply_race("half-elf");
        assert_eq!(builder.pending_choices(), 2);
        let c = builder
            .choose_increases(&[Ability::Dexterity, Ability::Wisdom])
            .unwrap()
            .finish();
        assert_eq!(c.abilities.charisma, 12);
        assert_eq!(c.abilities.dexterity, 11);
        assert_eq!(c.abilities.wisdom, 11);
    }

    #[test]
    fn half_elf_rejects_bad_choices() {
        let make = || {
            CharacterBuilder::new("Lia")
                .with_scores(AbilityScores::default())
                .apply_race("half-elf")
        };
        assert!(make().choose_increases(&[Ability::Dexterity]).is_err());
        assert!(
            make()
                .choose_increases(&[Ability::Charisma, Ability::Wisdom])
                .is_err()
        );
        assert!(
            make()
                .choose_increases(&[Ability::Wisdom, Ability::Wisdom])
                .is_err()
        );
    }

    #[test]
    fn no_choices_for_other_races() {
        let builder = CharacterBuilder::new("Eli")
            .with_scores(AbilityScores::default())
            .apply_race("elf");
        assert_eq!(builder.pending_choices(), 0);
        assert!(builder.choose_increases(&[]).is_ok());
    }

    #[test]
    fn check_leaves_builder_usable() {
        let builder = CharacterBuilder::new("Lia")
            .with_scores(AbilityScores::default())
            .apply_race("half-elf");
        assert!(builder.check_increases(&[Ability::Charisma]).is_err());
        assert!(
            builder
                .check_increases(&[Ability::Strength, Ability::Intelligence])
                .is_ok()
        );
        let c = builder
            .choose_increases(&[Ability::Strength, Ability::Intelligence])
            .unwrap()
            .finish();
        assert_eq!(c.abilities.strength, 11);
        assert_eq!(c.abilities.charisma, 12);
    }
}
