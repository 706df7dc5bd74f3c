//! Error types for the rules engine.

/// Errors that can occur during mechanics operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MechError {
    /// The notation has no `d` between count and sides.
    #[error("invalid dice notation '{0}': expected <count>d<sides>, e.g. 1d20 or 2d6+3")]
    MissingSeparator(String),

    /// The notation has more than one `d`.
    #[error("invalid dice notation '{0}': more than one 'd'")]
    MultipleSeparators(String),

    /// Both `+` and `-` appear in the notation.
    #[error("invalid dice notation '{0}': use either + or -, not both")]
    AmbiguousModifier(String),

    /// A count, side, or modifier segment is not a valid integer.
    #[error("invalid dice notation '{notation}': '{part}' is not a valid number")]
    InvalidNumber {
        /// The normalized notation.
        notation: String,
        /// The offending segment.
        part: String,
    },

    /// The dice count is zero.
    #[error("invalid dice notation '{0}': roll at least one die")]
    ZeroDice(String),

    /// The side count is zero.
    #[error("invalid dice notation '{0}': a die needs at least one side")]
    ZeroSides(String),

    /// Too many dice, too many sides, or too large a modifier.
    #[error(
        "invalid dice notation '{0}': at most {max_count} dice of at most {max_sides} sides, modifier within ±{max_mod}",
        max_count = crate::dice::MAX_COUNT,
        max_sides = crate::dice::MAX_SIDES,
        max_mod = crate::dice::MAX_MODIFIER
    )]
    TooLarge(String),

    /// An ability name was not recognized.
    #[error("unknown ability: {0}")]
    UnknownAbility(String),

    /// A skill name was not recognized.
    #[error("unknown skill: {0}")]
    UnknownSkill(String),

    /// A race name was not recognized.
    #[error("unknown race: {0}")]
    UnknownRace(String),

    /// A class name was not recognized.
    #[error("unknown class: {0}")]
    UnknownClass(String),

    /// An item is not in the character's inventory.
    #[error("{0} is not in inventory")]
    NotInInventory(String),

    /// An item is not equipped in the given slot.
    #[error("{item} is not equipped in {slot}")]
    NotEquipped {
        /// The item name.
        item: String,
        /// The slot it was expected in.
        slot: String,
    },

    /// The purse does not hold enough coin.
    #[error("insufficient funds: need {needed} {coin}, have {available}")]
    InsufficientFunds {
        /// The coin denomination.
        coin: String,
        /// Amount required.
        needed: u32,
        /// Amount held.
        available: u32,
    },

    /// A racial ability choice was invalid.
    #[error("invalid choice: {0}")]
    InvalidChoice(String),
}

impl MechError {
    /// Returns true if this error came from parsing dice notation.
    pub fn is_notation_error(&self) -> bool {
        matches!(
            self,
            Self::MissingSeparator(_)
                | Self::MultipleSeparators(_)
                | Self::AmbiguousModifier(_)
                | Self::InvalidNumber { .. }
                | Self::ZeroDice(_)
                | Self::ZeroSides(_)
                | Self::TooLarge(_)
        )
    }
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
