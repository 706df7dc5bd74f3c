//! Rolling dice expressions and the results they produce.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::DiceExpression;
use crate::error::MechResult;

/// The outcome of rolling a [`DiceExpression`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// The expression that was rolled.
    pub expression: DiceExpression,
    /// Individual die values in roll order.
    pub values: Vec<u32>,
    /// Sum of all die values.
    pub sum: i32,
    /// The flat modifier.
    pub modifier: i32,
    /// `sum + modifier`.
    pub total: i32,
}

impl RollResult {
    /// Build a result from already-rolled die values.
    pub fn from_values(expression: DiceExpression, values: Vec<u32>) -> Self {
        let sum = values
            .iter()
            .fold(0i32, |acc, &v| acc.saturating_add(i32::try_from(v).unwrap_or(i32::MAX)));
        Self {
            expression,
            values,
            sum,
            modifier: expression.modifier,
            total: sum.saturating_add(expression.modifier),
        }
    }

    /// The highest single die value, or 0 if empty.
    pub fn highest(&self) -> u32 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    /// The lowest single die value, or 0 if empty.
    pub fn lowest(&self) -> u32 {
        self.values.iter().copied().min().unwrap_or(0)
    }

    /// Number of dice rolled.
    pub fn count(&self) -> usize {
        self.values.len()
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        match self.modifier {
            0 => write!(f, "[{}] = {}", values.join(", "), self.total),
            m if m > 0 => write!(f, "[{}] + {m} = {}", values.join(", "), self.total),
            m => write!(f, "[{}] - {} = {}", values.join(", "), -m, self.total),
        }
    }
}

/// Roll one die with the given number of sides.
pub fn roll_die<R: Rng + ?Sized>(sides: u32, rng: &mut R) -> u32 {
    rng.random_range(1..=sides.max(1))
}

/// Roll every die in an expression.
pub fn roll<R: Rng + ?Sized>(expression: &DiceExpression, rng: &mut R) -> RollResult {
    let values = (0..expression.count)
        .map(|_| roll_die(expression.sides, rng))
        .collect();
    RollResult::from_values(*expression, values)
}

/// Parse and roll dice notation in one step.
pub fn roll_notation<R: Rng + ?Sized>(notation: &str, rng: &mut R) -> MechResult<RollResult> {
    let expression = DiceExpression::parse(notation)?;
    let result = roll(&expression, rng);
    tracing::debug!(%expression, total = result.total, "rolled dice");
    Ok(result)
}

impl DiceExpression {
    /// Roll this expression.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> RollResult {
        roll(self, rng)
    }
}
