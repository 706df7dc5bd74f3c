//! Attack and damage rolls.

use rand::Rng;

use crate::ability::Ability;
use crate::character::Character;
use crate::dice::{DiceExpression, RollResult, roll_die};
use crate::error::MechResult;

use super::Target;

/// Whether an attack uses strength or dexterity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttackMode {
    /// Strength-based.
    #[default]
    Melee,
    /// Dexterity-based.
    Ranged,
}

impl AttackMode {
    /// The ability this mode adds.
    pub fn ability(self) -> Ability {
        match self {
            Self::Melee => Ability::Strength,
            Self::Ranged => Ability::Dexterity,
        }
    }
}

/// A resolved attack roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackRoll {
    /// The natural d20.
    pub natural: u32,
    /// Strength or dexterity modifier.
    pub ability_modifier: i32,
    /// Attacker's proficiency bonus.
    pub proficiency_bonus: i32,
    /// `natural + ability_modifier + proficiency_bonus`.
    pub total: i32,
    /// Defender's armor class.
    pub target_ac: i32,
    /// True when `total >= target_ac`.
    pub hit: bool,
}

impl AttackRoll {
    /// Resolve an attack from an already-rolled d20.
    pub fn resolve(natural: u32, ability_modifier: i32, proficiency_bonus: i32, target_ac: i32) -> Self {
        let total = natural as i32 + ability_modifier + proficiency_bonus;
        Self {
            natural,
            ability_modifier,
            proficiency_bonus,
            total,
            target_ac,
            hit: total >= target_ac,
        }
    }
}

/// Roll a d20 attack from `attacker` against `defender`.
///
/// Proficiency is always added; weapons are not tracked individually.
pub fn make_attack_roll<T, R>(
    attacker: &Character,
    defender: &T,
    mode: AttackMode,
    rng: &mut R,
) -> AttackRoll
where
    T: Target + ?Sized,
    R: Rng + ?Sized,
{
    let natural = roll_die(20, rng);
    let roll = AttackRoll::resolve(
        natural,
        attacker.ability_modifier(mode.ability()),
        attacker.proficiency_bonus,
        defender.armor_class(),
    );
    tracing::debug!(
        attacker = %attacker.name,
        total = roll.total,
        ac = roll.target_ac,
        hit = roll.hit,
        "attack roll"
    );
    roll
}

/// A resolved damage roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DamageRoll {
    /// The dice rolled.
    pub roll: RollResult,
    /// Extra modifier on top of the expression.
    pub ability_modifier: i32,
    /// Damage dealt, never below 1.
    pub total: i32,
}

impl DamageRoll {
    /// Apply a modifier to an existing roll, clamping to at least 1.
    pub fn from_roll(roll: RollResult, ability_modifier: i32) -> Self {
        let total = roll.total.saturating_add(ability_modifier).max(1);
        Self {
            roll,
            ability_modifier,
            total,
        }
    }
}

/// Roll weapon damage plus a modifier. Damage is always at least 1.
pub fn roll_damage<R: Rng + ?Sized>(
    notation: &str,
    ability_modifier: i32,
    rng: &mut R,
) -> MechResult<DamageRoll> {
    let expression = DiceExpression::parse(notation)?;
    Ok(DamageRoll::from_roll(expression.roll(rng), ability_modifier))
}
