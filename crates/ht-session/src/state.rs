//! The in-memory campaign state.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ht_mechanics::Character;
use serde::{Deserialize, Serialize};

use crate::event::{Event, EventKind};
use crate::log::EventLog;
use crate::quest::QuestLog;

/// Location every new adventure starts in.
pub const STARTING_LOCATION: &str = "Starting Village";

/// Number of history events included in a narration context.
pub const CONTEXT_EVENTS: usize = 5;

/// Everything persisted about one campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    /// Identifier, also the save file stem.
    pub session_id: String,
    /// The player character.
    pub player: Character,
    /// Where the character currently is.
    pub current_location: String,
    /// Free-form facts about the world.
    pub world_state: BTreeMap<String, serde_json::Value>,
    /// Chronological event history.
    pub history: EventLog,
    /// Quests taken on during play.
    pub quests: QuestLog,
    /// When the session was last written to disk.
    #[serde(deserialize_with = "crate::timestamp::deserialize_option")]
    pub last_saved: Option<DateTime<Utc>>,
}

impl SessionState {
    /// Start a new campaign for `player`.
    pub fn new(player: Character) -> Self {
        Self::started_at(player, Utc::now())
    }

    /// Start a new campaign with an explicit creation time.
    pub fn started_at(player: Character, now: DateTime<Utc>) -> Self {
        let mut state = Self {
            session_id: format!("session_{}", now.format("%Y%m%d_%H%M%S")),
            current_location: STARTING_LOCATION.to_string(),
            player,
            ..Self::default()
        };
        let opening = format!("New adventure begins with {}", state.player.name);
        state.history.append(Event {
            timestamp: now,
            kind: EventKind::GameStart,
            description: opening,
        });
        state
    }

    /// Append an event to the history.
    pub fn add_event(&mut self, kind: EventKind, description: impl Into<String>) {
        self.history.record(kind, description);
    }

    /// Move the character somewhere else.
    pub fn set_location(&mut self, location: impl Into<String>) {
        self.current_location = location.into();
    }

    /// Snapshot of the state handed to prompt builders.
    pub fn context(&self) -> NarrationContext {
        NarrationContext {
            character_name: self.player.name.clone(),
            level: self.player.level,
            race: self.player.race.clone(),
            class: self.player.character_class.clone(),
            hp: self.player.hp_display(),
            location: self.current_location.clone(),
            recent_events: self.history.recent(CONTEXT_EVENTS).to_vec(),
            active_quests: self
                .quests
                .active()
                .into_iter()
                .map(|q| q.title.clone())
                .collect(),
        }
    }
}

/// Summary of the session used when composing narrator prompts.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrationContext {
    /// Character name.
    pub character_name: String,
    /// Character level.
    pub level: u32,
    /// Race name.
    pub race: String,
    /// Class name.
    pub class: String,
    /// Hit points as `current/max`.
    pub hp: String,
    /// Current location.
    pub location: String,
    /// The most recent history events, oldest first.
    pub recent_events: Vec<Event>,
    /// Titles of active quests.
    pub active_quests: Vec<String>,
}
