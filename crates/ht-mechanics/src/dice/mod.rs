//! Dice notation and rolling.
//!
//! Notation has the form `<count>d<sides>[(+|-)<modifier>]`, for example
//! `1d20`, `2d6+3` or `1d8-1`. Parsing is case-insensitive and ignores all
//! whitespace. Each die is an independent uniform draw over `1..=sides`
//! from a caller-supplied RNG.

pub mod roll;

pub use roll::{RollResult, roll, roll_die, roll_notation};

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Largest number of dice a single expression may roll.
pub const MAX_COUNT: u32 = 1_000;

/// Largest number of sides a die may have.
pub const MAX_SIDES: u32 = 10_000;

/// Largest flat modifier, in either direction.
pub const MAX_MODIFIER: i32 = 10_000;

/// A parsed dice expression such as `2d6+3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceExpression {
    /// Number of dice to roll (at least 1).
    pub count: u32,
    /// Sides per die (at least 1).
    pub sides: u32,
    /// Flat modifier added to the sum (at most [`MAX_MODIFIER`] either way).
    pub modifier: i32,
}

impl DiceExpression {
    /// Create an expression, validating count, sides and modifier.
    pub fn new(count: u32, sides: u32, modifier: i32) -> MechResult<Self> {
        let expr = Self {
            count,
            sides,
            modifier,
        };
        expr.validate()?;
        Ok(expr)
    }

    /// A single twenty-sided die with no modifier.
    pub fn d20() -> Self {
        Self {
            count: 1,
            sides: 20,
            modifier: 0,
        }
    }

    /// Parse dice notation.
    pub fn parse(notation: &str) -> MechResult<Self> {
        let normalized: String = notation
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        let has_plus = normalized.contains('+');
        let has_minus = normalized.contains('-');

        let (dice_part, modifier) = match (has_plus, has_minus) {
            (true, true) => return Err(MechError::AmbiguousModifier(normalized)),
            (true, false) => split_modifier(&normalized, '+')?,
            (false, true) => {
                let (dice, magnitude) = split_modifier(&normalized, '-')?;
                (dice, -magnitude)
            }
            (false, false) => (normalized.as_str(), 0),
        };

        let mut halves = dice_part.split('d');
        let (Some(count_str), Some(sides_str)) = (halves.next(), halves.next()) else {
            return Err(MechError::MissingSeparator(normalized.clone()));
        };
        if halves.next().is_some() {
            return Err(MechError::MultipleSeparators(normalized.clone()));
        }

        let count = parse_unsigned(&normalized, count_str)?;
        let sides = parse_unsigned(&normalized, sides_str)?;

        let expr = Self {
            count,
            sides,
            modifier,
        };
        expr.validate().map_err(|e| match e {
            MechError::ZeroDice(_) => MechError::ZeroDice(normalized.clone()),
            MechError::ZeroSides(_) => MechError::ZeroSides(normalized.clone()),
            _ => MechError::TooLarge(normalized.clone()),
        })?;
        Ok(expr)
    }

    /// The smallest possible total.
    pub fn min(&self) -> i32 {
        (self.count as i32).saturating_add(self.modifier)
    }

    /// The largest possible total.
    pub fn max(&self) -> i32 {
        let dice = self.count.saturating_mul(self.sides).min(i32::MAX as u32) as i32;
        dice.saturating_add(self.modifier)
    }

    fn validate(&self) -> MechResult<()> {
        if self.count == 0 {
            return Err(MechError::ZeroDice(self.to_string()));
        }
        if self.sides == 0 {
            return Err(MechError::ZeroSides(self.to_string()));
        }
        if self.count > MAX_COUNT
            || self.sides > MAX_SIDES
            || !(-MAX_MODIFIER..=MAX_MODIFIER).contains(&self.modifier)
        {
            return Err(MechError::TooLarge(self.to_string()));
        }
        Ok(())
    }
}

/// Split off a modifier at the first `sign`, returning the dice segment
/// and the unsigned modifier magnitude.
fn split_modifier(normalized: &str, sign: char) -> MechResult<(&str, i32)> {
    let Some((dice, magnitude)) = normalized.split_once(sign) else {
        return Ok((normalized, 0));
    };
    if magnitude.is_empty() || !magnitude.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MechError::InvalidNumber {
            notation: normalized.to_string(),
            part: magnitude.to_string(),
        });
    }
    let value = magnitude.parse::<i32>().map_err(|_| MechError::InvalidNumber {
        notation: normalized.to_string(),
        part: magnitude.to_string(),
    })?;
    Ok((dice, value))
}

fn parse_unsigned(notation: &str, part: &str) -> MechResult<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MechError::InvalidNumber {
            notation: notation.to_string(),
            part: part.to_string(),
        });
    }
    part.parse::<u32>().map_err(|_| MechError::InvalidNumber {
        notation: notation.to_string(),
        part: part.to_string(),
    })
}

impl FromStr for DiceExpression {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.modifier {
            0 => write!(f, "{}d{}", self.count, self.sides),
            m if m > 0 => write!(f, "{}d{}+{m}", self.count, self.sides),
            m => write!(f, "{}d{}{m}", self.count, self.sides),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain() {
        let e = DiceExpression::parse("2d6").unwrap();
        assert_eq!((e.count, e.sides, e.modifier), (2, 6, 0));
    }

    #[test]
    fn parse_with_modifiers() {
        assert_eq!(DiceExpression::parse("1d8+3").unwrap().modifier, 3);
        assert_eq!(DiceExpression::parse("1d4-3").unwrap().modifier, -3);
    }

    #[test]
    fn parse_ignores_case_and_whitespace() {
        let e = DiceExpression::parse(" 3 D 6 + 2 ").unwrap();
        assert_eq!(e, DiceExpression::new(3, 6, 2).unwrap());
    }

    #[test]
    fn parse_single_sided_die() {
        let e = DiceExpression::parse("4d1").unwrap();
        assert_eq!(e.min(), 4);
        assert_eq!(e.max(), 4);
    }

    #[test]
    fn missing_separator() {
        assert!(matches!(
            DiceExpression::parse("20"),
            Err(MechError::MissingSeparator(_))
        ));
        assert!(matches!(
            DiceExpression::parse("20+3"),
            Err(MechError::MissingSeparator(_))
        ));
    }

    #[test]
    fn multiple_separators() {
        assert!(matches!(
            DiceExpression::parse("1d6d6"),
            Err(MechError::MultipleSeparators(_))
        ));
    }

    #[test]
    fn both_signs_are_ambiguous() {
        let err = DiceExpression::parse("1d20+2-1").unwrap_err();
        assert!(matches!(err, MechError::AmbiguousModifier(_)));
        assert!(err.is_notation_error());
    }

    #[test]
    fn invalid_numbers() {
        for bad in ["xd6", "1dx", "d20", "1d", "1d6+", "1d6+x", "1d6++2", "1.5d6"] {
            let err = DiceExpression::parse(bad).unwrap_err();
            assert!(err.is_notation_error(), "{bad}: {err}");
        }
    }

    #[test]
    fn zero_count_and_sides() {
        assert!(matches!(
            DiceExpression::parse("0d6"),
            Err(MechError::ZeroDice(_))
        ));
        assert!(matches!(
            DiceExpression::parse("1d0"),
            Err(MechError::ZeroSides(_))
        ));
    }

    #[test]
    fn too_large() {
        assert!(matches!(
            DiceExpression::parse("5000d6"),
            Err(MechError::TooLarge(_))
        ));
        assert!(matches!(
            DiceExpression::parse("1d100000"),
            Err(MechError::TooLarge(_))
        ));
    }

    #[test]
    fn modifier_bounds() {
        assert_eq!(DiceExpression::parse("1d6+10000").unwrap().modifier, 10_000);
        assert_eq!(DiceExpression::parse("1d6-10000").unwrap().modifier, -10_000);
        for bad in ["1d6+10001", "2d6+2147483647", "1d6-2147483647"] {
            assert!(
                matches!(DiceExpression::parse(bad), Err(MechError::TooLarge(_))),
                "{bad}"
            );
        }
        assert!(DiceExpression::new(1, 6, i32::MIN).is_err());
    }

    #[test]
    fn min_max_saturate_on_unchecked_fields() {
        let e = DiceExpression {
            count: 2,
            sides: 6,
            modifier: i32::MAX,
        };
        assert_eq!(e.min(), i32::MAX);
        assert_eq!(e.max(), i32::MAX);
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!(DiceExpression::parse("2D6 + 3").unwrap().to_string(), "2d6+3");
        assert_eq!(DiceExpression::parse("1d8-1").unwrap().to_string(), "1d8-1");
        assert_eq!(DiceExpression::d20().to_string(), "1d20");
    }

    #[test]
    fn from_str_trait() {
        let e: DiceExpression = "1d12+1".parse().unwrap();
        assert_eq!(e.sides, 12);
    }

    #[test]
    fn min_max() {
        let e = DiceExpression::parse("2d6+3").unwrap();
        assert_eq!(e.min(), 5);
        assert_eq!(e.max(), 15);
    }
}
