//! Stateless combat resolution: initiative, attack rolls, and damage.
//!
//! Nothing here keeps state between calls. Callers own the participants
//! and feed in whatever modifiers apply.

pub mod attack;

pub use attack::{AttackMode, AttackRoll, DamageRoll, make_attack_roll, roll_damage};

use rand::Rng;

use crate::ability::Ability;
use crate::character::Character;
use crate::dice::roll_die;

/// Anything that can be targeted by an attack.
pub trait Target {
    /// The armor class an attack must meet or beat.
    fn armor_class(&self) -> i32;
}

impl Target for Character {
    fn armor_class(&self) -> i32 {
        self.armor_class
    }
}

/// A non-player opponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Foe {
    /// Display name.
    pub name: String,
    /// Armor class.
    pub armor_class: i32,
    /// Dexterity modifier used for initiative.
    pub dex_modifier: i32,
}

impl Foe {
    /// Create a foe.
    pub fn new(name: impl Into<String>, armor_class: i32, dex_modifier: i32) -> Self {
        Self {
            name: name.into(),
            armor_class,
            dex_modifier,
        }
    }
}

impl Target for Foe {
    fn armor_class(&self) -> i32 {
        self.armor_class
    }
}

/// A participant entering initiative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combatant {
    /// Display name.
    pub name: String,
    /// Dexterity modifier added to the initiative roll.
    pub dex_modifier: i32,
}

impl Combatant {
    /// Create a combatant.
    pub fn new(name: impl Into<String>, dex_modifier: i32) -> Self {
        Self {
            name: name.into(),
            dex_modifier,
        }
    }
}

impl From<&Character> for Combatant {
    fn from(character: &Character) -> Self {
        Self::new(
            character.name.clone(),
            character.ability_modifier(Ability::Dexterity),
        )
    }
}

impl From<&Foe> for Combatant {
    fn from(foe: &Foe) -> Self {
        Self::new(foe.name.clone(), foe.dex_modifier)
    }
}

/// One participant's place in the initiative order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiativeEntry {
    /// Participant name.
    pub name: String,
    /// The natural d20.
    pub roll: u32,
    /// Dexterity modifier.
    pub modifier: i32,
    /// `roll + modifier`.
    pub total: i32,
}

/// Roll initiative for each participant and sort highest first.
///
/// Equal totals keep their input order.
pub fn roll_initiative<R: Rng + ?Sized>(
    participants: &[Combatant],
    rng: &mut R,
) -> Vec<InitiativeEntry> {
    let rolls: Vec<u32> = participants.iter().map(|_| roll_die(20, rng)).collect();
    order_initiative(participants, &rolls)
}

/// Build initiative order from pre-rolled d20s, one per participant.
pub fn order_initiative(participants: &[Combatant], rolls: &[u32]) -> Vec<InitiativeEntry> {
    let mut order: Vec<InitiativeEntry> = participants
        .iter()
        .zip(rolls)
        .map(|(p, &roll)| InitiativeEntry {
            name: p.name.clone(),
            roll,
            modifier: p.dex_modifier,
            total: roll as i32 + p.dex_modifier,
        })
        .collect();
    // sort_by is stable
    order.sort_by(|a, b| b.total.cmp(&a.total));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn sorted_descending() {
        let participants = vec![
            Combatant::new("Alice", 0),
            Combatant::new("Bob", 2),
            Combatant::new("Charlie", -1),
        ];
        let order = order_initiative(&participants, &[15, 5, 20]);
        let names: Vec<&str> = order.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Charlie", "Alice", "Bob"]);
        assert_eq!(order[0].total, 19);
        assert_eq!(order[2].total, 7);
    }

    #[test]
    fn ties_keep_input_order() {
        let participants = vec![
            Combatant::new("First", 1),
            Combatant::new("Second", 0),
            Combatant::new("Third", 2),
        ];
        let order = order_initiative(&participants, &[10, 11, 9]);
        let names: Vec<&str> = order.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn rolled_initiative_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let participants = vec![Combatant::new("A", 3), Combatant::new("B", -2)];
        let order = roll_initiative(&participants, &mut rng);
        assert_eq!(order.len(), 2);
        assert!(order[0].total >= order[1].total);
        for e in order {
            assert!((1..=20).contains(&e.roll));
            assert_eq!(e.total, e.roll as i32 + e.modifier);
        }
    }

    #[test]
    fn combatant_from_character() {
        let mut c = Character::new("Mira");
        c.abilities.dexterity = 16;
        let combatant = Combatant::from(&c);
        assert_eq!(combatant.dex_modifier, 3);
        assert_eq!(Combatant::from(&Foe::new("Goblin", 15, 2)).dex_modifier, 2);
    }

    #[test]
    fn empty_initiative() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(roll_initiative(&[], &mut rng).is_empty());
    }
}
