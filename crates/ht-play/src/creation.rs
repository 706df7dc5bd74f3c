//! The interactive character creation wizard.

use std::io::{BufRead, Write};

use ht_mechanics::ability::parse_abilities;
use ht_mechanics::{Character, CharacterBuilder, CharacterClass, Race, Skill};
use rand::Rng;
use tracing::info;

use crate::console::Console;
use crate::error::{PlayError, PlayResult};
use crate::sheet::render_sheet;

/// Walk the player through creating a character.
///
/// Asks for name, race, class, background and alignment, rolls abilities,
/// applies racial bonuses (asking for half-elf choices), computes hit
/// points, grants Perception, and prints the finished sheet.
pub fn create_character<I, O, R>(console: &mut Console<I, O>, rng: &mut R) -> PlayResult<Character>
where
    I: BufRead,
    O: Write,
    R: Rng + ?Sized,
{
    console.say("\n--- Character Creation ---")?;

    let name = loop {
        let name = require(console, "Enter your character's name: ")?;
        if !name.is_empty() {
            break name;
        }
        console.say("Your character needs a name.")?;
    };

    let race_names: Vec<&str> = Race::ALL.iter().map(|r| r.name()).collect();
    console.say(format!("Available races: {}", race_names.join(", ")))?;
    let race = loop {
        let answer = require(console, "Choose your race: ")?;
        match answer.parse::<Race>() {
            Ok(race) => break race,
            Err(_) => console.say(format!(
                "Invalid race '{answer}'. Please choose from: {}",
                race_names.join(", ")
            ))?,
        }
    };

    let class_names: Vec<&str> = CharacterClass::ALL.iter().map(|c| c.name()).collect();
    console.say(format!("Classes: {}", class_names.join(", ")))?;
    let class = require(console, "Enter your class: ")?;
    if class.parse::<CharacterClass>().is_err() {
        console.say(format!("Unrecognized class '{class}', using a d8 hit die."))?;
    }
    let background = require(console, "Enter your background: ")?;
    let alignment = require(console, "Enter your alignment: ")?;

    console.say("\nRolling abilities (4d6, drop the lowest)...")?;
    let (rolled, rolls) = CharacterBuilder::new(name)
        .class(class)
        .background(background)
        .alignment(alignment)
        .roll_abilities(rng);
    for (ability, roll) in &rolls {
        console.say(format!(
            "  {:<13} {:?} -> {}",
            ability.title(),
            roll.rolls,
            roll.kept
        ))?;
    }

    let mut builder = rolled.apply_race(race.name());
    let bonuses: Vec<String> = race
        .bonuses()
        .iter()
        .map(|(ability, bonus)| format!("{bonus:+} {}", ability.title()))
        .collect();
    console.say(format!("\n{race} bonuses: {}", bonuses.join(", ")))?;
    console.say(format!("Traits: {}", race.traits().join(", ")))?;

    if builder.pending_choices() > 0 {
        let excluded: Vec<&str> = race
            .excluded_from_choice()
            .iter()
            .map(|a| a.title())
            .collect();
        let question = format!(
            "Choose {} different abilities for +1 (not {}), e.g. 'str, dex': ",
            builder.pending_choices(),
            excluded.join(", ")
        );
        let choices = loop {
            let answer = require(console, &question)?;
            match parse_abilities(&answer).and_then(|c| builder.check_increases(&c).map(|()| c)) {
                Ok(choices) => break choices,
                Err(e) => console.say(format!("{e}"))?,
            }
        };
        builder = builder.choose_increases(&choices)?;
    }

    let mut character = builder.finish();
    character.add_skill_proficiency(Skill::Perception);
    info!(name = %character.name, summary = %character.summary(), "character created");

    console.say("")?;
    console.say(render_sheet(&character))?;
    Ok(character)
}

fn require<I: BufRead, O: Write>(console: &mut Console<I, O>, prompt: &str) -> PlayResult<String> {
    console.ask(prompt)?.ok_or(PlayError::InputClosed)
}
