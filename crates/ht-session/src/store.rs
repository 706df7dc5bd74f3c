//! JSON persistence for sessions.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::{SessionError, SessionResult};
use crate::state::SessionState;

/// Default directory for save files.
pub const DEFAULT_SAVES_DIR: &str = "saves";

/// Reads and writes one JSON document per session in a directory.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

/// A short description of a saved session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    /// Session identifier.
    pub session_id: String,
    /// Character name.
    pub character_name: String,
    /// e.g. `Level 1 elf wizard`.
    pub description: String,
    /// Current location.
    pub location: String,
    /// Number of history events.
    pub events: usize,
    /// When the session was last saved.
    pub last_saved: Option<DateTime<Utc>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SAVES_DIR)
    }
}

impl SessionStore {
    /// Create a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding save files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save file path for a session identifier.
    pub fn path_for(&self, session_id: &str) -> SessionResult<PathBuf> {
        validate_id(session_id)?;
        Ok(self.dir.join(format!("{session_id}.json")))
    }

    /// Write `state` to disk, stamping `last_saved`. Returns the file path.
    ///
    /// The document is written to a temporary sibling and renamed into
    /// place, so an interrupted save never truncates an existing file.
    pub fn save(&self, state: &mut SessionState) -> SessionResult<PathBuf> {
        let path = self.path_for(&state.session_id)?;
        fs::create_dir_all(&self.dir).map_err(|e| {
            SessionError::io(format!("failed to create {}", self.dir.display()), e)
        })?;

        let previous = state.last_saved.replace(Utc::now());
        let json = match serde_json::to_string_pretty(state) {
            Ok(json) => json,
            Err(e) => {
                state.last_saved = previous;
                return Err(SessionError::Serialize(e));
            }
        };

        let tmp = path.with_extension("json.tmp");
        let written = fs::write(&tmp, json)
            .map_err(|e| SessionError::io(format!("failed to write {}", tmp.display()), e))
            .and_then(|()| {
                fs::rename(&tmp, &path).map_err(|e| {
                    SessionError::io(format!("failed to move save into {}", path.display()), e)
                })
            });
        if let Err(e) = written {
            state.last_saved = previous;
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        info!(path = %path.display(), "session saved");
        Ok(path)
    }

    /// Load a session by identifier.
    pub fn load(&self, session_id: &str) -> SessionResult<SessionState> {
        let path = self.path_for(session_id)?;
        Self::load_path(&path)
    }

    /// Load a session from an explicit file path.
    pub fn load_path(path: &Path) -> SessionResult<SessionState> {
        let raw = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SessionError::NotFound(path.to_path_buf())
            } else {
                SessionError::io(format!("failed to read {}", path.display()), e)
            }
        })?;
        let mut state: SessionState =
            serde_json::from_str(&raw).map_err(|source| SessionError::Corrupt {
                path: path.to_path_buf(),
                source,
            })?;
        state.player.update_derived_stats();
        debug!(path = %path.display(), events = state.history.len(), "session loaded");
        Ok(state)
    }

    /// Summaries of every readable save in the directory, sorted by id.
    ///
    /// A missing directory yields an empty list. Unreadable files are
    /// skipped with a warning.
    pub fn list(&self) -> SessionResult<Vec<SessionSummary>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(SessionError::io(
                    format!("failed to read {}", self.dir.display()),
                    e,
                ));
            }
        };

        let mut summaries = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| SessionError::io(format!("failed to read {}", self.dir.display()), e))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match Self::load_path(&path) {
                Ok(state) => summaries.push(SessionSummary {
                    session_id: state.session_id.clone(),
                    character_name: state.player.name.clone(),
                    description: state.player.summary(),
                    location: state.current_location.clone(),
                    events: state.history.len(),
                    last_saved: state.last_saved,
                }),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable save"),
            }
        }
        summaries.sort_by(|a, b| a.session_id.cmp(&b.session_id));
        Ok(summaries)
    }
}

fn validate_id(session_id: &str) -> SessionResult<()> {
    let ok = !session_id.is_empty()
        && session_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(SessionError::InvalidSessionId(session_id.to_string()))
    }
}
