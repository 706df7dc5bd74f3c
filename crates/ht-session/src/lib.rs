//! Campaign sessions for Hearthtale.
//!
//! A session owns one character, an append-only event log, a quest log,
//! and a free-form world-state map. Sessions persist as one pretty-printed
//! JSON document per session identifier.

pub mod error;
pub mod event;
pub mod log;
pub mod quest;
pub mod state;
pub mod store;
mod timestamp;

pub use error::{SessionError, SessionResult};
pub use event::{Event, EventKind};
pub use log::EventLog;
pub use quest::{Quest, QuestLog, QuestStatus};
pub use state::{NarrationContext, SessionState};
pub use store::{SessionStore, SessionSummary};
