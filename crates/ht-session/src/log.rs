//! The append-only session history.

use serde::{Deserialize, Serialize};

use crate::event::{Event, EventKind};

/// Chronological record of everything that happened in a session.
///
/// Serializes as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    entries: Vec<Event>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn append(&mut self, event: Event) {
        self.entries.push(event);
    }

    /// Record a new event stamped with the current time.
    pub fn record(&mut self, kind: EventKind, description: impl Into<String>) {
        self.append(Event::now(kind, description));
    }

    /// All events, oldest first.
    pub fn entries(&self) -> &[Event] {
        &self.entries
    }

    /// The last `n` events, oldest first.
    pub fn recent(&self, n: usize) -> &[Event] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the log as markdown.
    pub fn export_markdown(&self, title: &str) -> String {
        let mut out = format!("# {title}\n\n");
        for event in &self.entries {
            let when = event.timestamp.format("%Y-%m-%d %H:%M");
            match event.kind {
                EventKind::GameStart => {
                    out.push_str(&format!("## {}\n\n*{when}*\n\n", event.description));
                }
                EventKind::Action => {
                    out.push_str(&format!("**You**: {}\n\n", event.description));
                }
                EventKind::DmResponse | EventKind::Outcome => {
                    out.push_str(&format!("{}\n\n", event.description));
                }
                EventKind::DiceRoll => {
                    out.push_str(&format!("> *{}*\n\n", event.description));
                }
                _ => {
                    out.push_str(&format!("*{}*: {}\n\n", event.kind.label(), event.description));
                }
            }
        }
        out
    }

    /// Export the log as plain text, one event per line.
    pub fn export_text(&self) -> String {
        let mut out = String::new();
        for event in &self.entries {
            out.push_str(&format!(
                "[{}] {}: {}\n",
                event.timestamp.format("%Y-%m-%d %H:%M:%S"),
                event.kind.label(),
                event.description
            ));
        }
        out
    }
}
