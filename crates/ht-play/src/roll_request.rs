//! Spotting dice requests in narration.

use std::sync::LazyLock;

use ht_mechanics::DiceExpression;
use regex::Regex;

static ROLL_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\broll\b").expect("valid regex"));

static DICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d*)d(\d+)(?:\s*([+-])\s*(\d+))?\b").expect("valid regex")
});

/// The narrator asked the player to roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollRequest {
    /// Dice named in the reply, used as the default answer.
    pub suggested: Option<DiceExpression>,
}

impl RollRequest {
    /// Inspect a narrator reply.
    ///
    /// A reply asks for a roll when it contains the word "roll". The first
    /// valid dice notation in the reply becomes the suggestion; a bare
    /// `d20` is read as `1d20`.
    pub fn detect(reply: &str) -> Option<Self> {
        if !ROLL_WORD.is_match(reply) {
            return None;
        }
        let suggested = DICE.captures_iter(reply).find_map(|caps| {
            let count = caps.get(1).map_or("", |m| m.as_str());
            let count = if count.is_empty() { "1" } else { count };
            let sides = &caps[2];
            let notation = match (caps.get(3), caps.get(4)) {
                (Some(sign), Some(amount)) => {
                    format!("{count}d{sides}{}{}", sign.as_str(), amount.as_str())
                }
                _ => format!("{count}d{sides}"),
            };
            DiceExpression::parse(&notation).ok()
        });
        tracing::debug!(?suggested, "narrator requested a roll");
        Some(Self { suggested })
    }
}
