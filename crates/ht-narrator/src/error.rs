//! Error types for the narration client.

use thiserror::Error;

/// Result type for narrator operations.
pub type NarratorResult<T> = Result<T, NarratorError>;

/// Errors that can occur while talking to the narrator endpoint.
#[derive(Debug, Error)]
pub enum NarratorError {
    /// Transport failure: connect, timeout, TLS, body read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The response body did not match the expected wire format.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The response carried no narration text.
    #[error("endpoint returned an empty response")]
    EmptyResponse,

    /// The model is still being loaded by the server.
    #[error("model is still loading")]
    ModelLoading,

    /// The stream broke after some text had already been delivered.
    #[error("stream interrupted: {0}")]
    StreamInterrupted(#[source] std::io::Error),

    /// Every attempt failed with a retryable error.
    #[error("failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Number of attempts made.
        attempts: u32,
        /// The error from the final attempt.
        last: Box<NarratorError>,
    },
}

impl NarratorError {
    /// Whether another attempt might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_connect() || e.is_timeout(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::ModelLoading => true,
            Self::Decode(_)
            | Self::EmptyResponse
            | Self::StreamInterrupted(_)
            | Self::RetriesExhausted { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        let status = |status| NarratorError::Status {
            status,
            body: String::new(),
        };
        assert!(status(500).is_retryable());
        assert!(status(503).is_retryable());
        assert!(status(429).is_retryable());
        assert!(!status(400).is_retryable());
        assert!(!status(404).is_retryable());
    }

    #[test]
    fn loading_retries_decode_does_not() {
        assert!(NarratorError::ModelLoading.is_retryable());
        assert!(!NarratorError::Decode("bad".into()).is_retryable());
        assert!(!NarratorError::EmptyResponse.is_retryable());
    }

    #[test]
    fn exhausted_message_includes_cause() {
        let err = NarratorError::RetriesExhausted {
            attempts: 3,
            last: Box::new(NarratorError::Status {
                status: 502,
                body: "bad gateway".into(),
            }),
        };
        assert_eq!(
            err.to_string(),
            "failed after 3 attempts: endpoint returned 502: bad gateway"
        );
    }
}
