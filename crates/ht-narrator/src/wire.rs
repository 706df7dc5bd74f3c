//! Request and response bodies for both API flavours.

use serde::{Deserialize, Serialize};

use crate::config::ApiFlavor;
use crate::error::{NarratorError, NarratorResult};

/// `done_reason` reported while the server is still loading the model.
const LOADING: &str = "load";

/// Body of a generate request.
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    /// Model identifier.
    pub model: &'a str,
    /// System prompt.
    pub system: &'a str,
    /// Player turn.
    pub prompt: &'a str,
    /// Whether to stream.
    pub stream: bool,
}

/// A generate response, or one line of a generate stream.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateResponse {
    /// Text produced so far (a fragment when streaming).
    pub response: String,
    /// Whether generation has finished.
    pub done: bool,
    /// Why generation stopped.
    pub done_reason: Option<String>,
}

/// One chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `system`, `user` or `assistant`.
    pub role: String,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// A system message.
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    /// A user message.
    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

/// Body of a chat completion request.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    /// Model identifier.
    pub model: &'a str,
    /// System then user message.
    pub messages: Vec<ChatMessage>,
    /// Whether to stream.
    pub stream: bool,
}

/// A chat completion response or stream event.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChatResponse {
    /// Completion choices; only the first is used.
    pub choices: Vec<ChatChoice>,
}

/// One completion choice.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChatChoice {
    /// Whole message, in a non-streamed reply.
    pub message: Option<ChatMessage>,
    /// Incremental text, in a stream event.
    pub delta: Option<ChatDelta>,
    /// Set on the final event, e.g. "stop".
    pub finish_reason: Option<String>,
}

/// The new text carried by a stream event.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChatDelta {
    /// Text fragment, absent on role-only events.
    pub content: Option<String>,
}

/// A decoded piece of a streamed reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamChunk {
    /// Text fragment, possibly empty.
    pub text: String,
    /// The stream has finished.
    pub done: bool,
    /// The server reported the model is still loading.
    pub loading: bool,
}

/// Decode one line of a streamed body.
///
/// Blank lines, SSE comments and undecodable lines yield `None` and are
/// skipped by the caller.
pub fn parse_stream_line(flavor: ApiFlavor, line: &str) -> Option<StreamChunk> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match flavor {
        ApiFlavor::Generate => {
            let chunk: GenerateResponse = serde_json::from_str(line).ok()?;
            let loading = chunk.done_reason.as_deref() == Some(LOADING);
            Some(StreamChunk {
                text: chunk.response,
                done: chunk.done,
                loading,
            })
        }
        ApiFlavor::ChatCompletions => {
            let payload = line.strip_prefix("data:")?.trim();
            if payload == "[DONE]" {
                return Some(StreamChunk {
                    done: true,
                    ..StreamChunk::default()
                });
            }
            let event: ChatResponse = serde_json::from_str(payload).ok()?;
            let choice = event.choices.into_iter().next()?;
            Some(StreamChunk {
                text: choice.delta.and_then(|d| d.content).unwrap_or_default(),
                done: choice.finish_reason.is_some(),
                loading: false,
            })
        }
    }
}

/// Decode a complete non-streamed body into the reply text.
pub fn parse_full_body(flavor: ApiFlavor, body: &str) -> NarratorResult<String> {
    let text = match flavor {
        ApiFlavor::Generate => {
            let response: GenerateResponse =
                serde_json::from_str(body).map_err(|e| NarratorError::Decode(e.to_string()))?;
            if response.done_reason.as_deref() == Some(LOADING) {
                return Err(NarratorError::ModelLoading);
            }
            response.response
        }
        ApiFlavor::ChatCompletions => {
            let response: ChatResponse =
                serde_json::from_str(body).map_err(|e| NarratorError::Decode(e.to_string()))?;
            response
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message)
                .map(|m| m.content)
                .ok_or_else(|| NarratorError::Decode("no choices in response".into()))?
        }
    };
    if text.trim().is_empty() {
        return Err(NarratorError::EmptyResponse);
    }
    Ok(text)
}
