//! Error types for session persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while saving or loading a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No save file exists at the path.
    #[error("save file {0} not found")]
    NotFound(PathBuf),

    /// The save file exists but is not a valid session document.
    #[error("error reading save file {path}: {source}")]
    Corrupt {
        /// The offending file.
        path: PathBuf,
        /// The JSON error.
        source: serde_json::Error,
    },

    /// The session identifier cannot be used as a file name.
    #[error("invalid session id '{0}'")]
    InvalidSessionId(String),

    /// Serializing the session failed.
    #[error("failed to serialize session: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A filesystem error.
    #[error("{context}: {source}")]
    Io {
        /// What was being attempted.
        context: String,
        /// The underlying error.
        source: std::io::Error,
    },
}

impl SessionError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
