//! Tabletop rules engine for Hearthtale.
//!
//! Provides dice-notation parsing and rolling, ability scores and the
//! statistics derived from them, race and class tables, a staged
//! character builder, and stateless combat resolution.

pub mod ability;
pub mod builder;
pub mod character;
pub mod class;
pub mod combat;
pub mod dice;
pub mod error;
pub mod race;
pub mod skill;

pub use ability::{Ability, AbilityRoll, AbilityScores, modifier};
pub use builder::CharacterBuilder;
pub use character::{Character, Coin, EquipSlot, Equipment, Purse};
pub use class::{CharacterClass, hit_die_for};
pub use combat::{
    AttackMode, AttackRoll, Combatant, DamageRoll, Foe, InitiativeEntry, Target, make_attack_roll,
    roll_damage, roll_initiative,
};
pub use dice::{DiceExpression, RollResult};
pub use error::{MechError, MechResult};
pub use race::Race;
pub use skill::Skill;
