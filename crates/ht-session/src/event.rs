//! Session history events.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of a history event.
///
/// Unknown tags read from older save files are kept verbatim so that a
/// load-then-save cycle does not rewrite them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    /// The adventure was created.
    GameStart,
    /// Something the player did or said.
    Action,
    /// Narration returned by the narrator.
    DmResponse,
    /// A dice roll made during play.
    DiceRoll,
    /// The narrated outcome of a roll.
    Outcome,
    /// A free-form note.
    Note,
    /// Any other tag.
    Other(String),
}

impl EventKind {
    /// The tag written to save files.
    pub fn as_str(&self) -> &str {
        match self {
            Self::GameStart => "game_start",
            Self::Action => "action",
            Self::DmResponse => "dm_response",
            Self::DiceRoll => "dice_roll",
            Self::Outcome => "outcome",
            Self::Note => "note",
            Self::Other(tag) => tag,
        }
    }

    /// Short human label used in exports.
    pub fn label(&self) -> &str {
        match self {
            Self::GameStart => "Start",
            Self::Action => "Player",
            Self::DmResponse => "DM",
            Self::DiceRoll => "Roll",
            Self::Outcome => "Outcome",
            Self::Note => "Note",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for EventKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "game_start" => Self::GameStart,
            "action" => Self::Action,
            "dm_response" => Self::DmResponse,
            "dice_roll" => Self::DiceRoll,
            "outcome" => Self::Outcome,
            "note" => Self::Note,
            _ => Self::Other(tag),
        }
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single timestamped entry in the session history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// When the event was recorded.
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub timestamp: DateTime<Utc>,
    /// What kind of event this is.
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Free text describing the event.
    pub description: String,
}

impl Event {
    /// Create an event stamped with the current time.
    pub fn now(kind: EventKind, description: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_round_trip() {
        for tag in ["game_start", "action", "dm_response", "dice_roll", "outcome", "note"] {
            let kind = EventKind::from(tag.to_string());
            assert!(!matches!(kind, EventKind::Other(_)), "{tag}");
            assert_eq!(kind.as_str(), tag);
        }
    }

    #[test]
    fn unknown_tag_preserved() {
        let json = r#"{"timestamp":"2024-05-01T09:00:00","type":"level_up","description":"Reached level 2"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind, EventKind::Other("level_up".into()));

        let out = serde_json::to_string(&event).unwrap();
        assert!(out.contains(r#""type":"level_up""#));
    }

    #[test]
    fn serializes_type_key() {
        let event = Event::now(EventKind::DiceRoll, "Rolled 1d20: 14");
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "dice_roll");
        assert_eq!(value["description"], "Rolled 1d20: 14");
        assert!(value["timestamp"].is_string());
    }
}
