//! The narrator trait and its HTTP implementation.

use std::io::{BufRead, BufReader};
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use tracing::{debug, warn};

use crate::config::{ApiFlavor, NarratorConfig};
use crate::error::{NarratorError, NarratorResult};
use crate::wire::{self, ChatMessage, ChatRequest, GenerateRequest};

/// A composed request: the narrator's standing instructions and the turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Standing instructions and style.
    pub system: String,
    /// The player's turn.
    pub user: String,
}

impl Prompt {
    /// Create a prompt.
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Something that can narrate a turn.
pub trait Narrator {
    /// Produce a reply to `prompt`.
    ///
    /// `on_text` receives the reply as it arrives, in one or more
    /// fragments. The full reply is also returned.
    fn narrate(
        &mut self,
        prompt: &Prompt,
        on_text: &mut dyn FnMut(&str),
    ) -> NarratorResult<String>;
}

/// Render a narrator outcome as text the player can read.
///
/// Errors become narration rather than ending the game.
pub fn degrade(result: NarratorResult<String>) -> String {
    match result {
        Ok(text) => text,
        Err(e) => format!("Error communicating with the narrator: {e}"),
    }
}

/// Narrator backed by a remote text-generation endpoint.
#[derive(Debug)]
pub struct HttpNarrator {
    config: NarratorConfig,
    client: Client,
}

impl HttpNarrator {
    /// Build a client for `config`.
    pub fn new(config: NarratorConfig) -> NarratorResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// The active configuration.
    pub fn config(&self) -> &NarratorConfig {
        &self.config
    }

    fn send(&self, prompt: &Prompt) -> NarratorResult<Response> {
        let config = &self.config;
        let mut request = self.client.post(config.endpoint());
        if let Some(key) = &config.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }
        request = match config.flavor {
            ApiFlavor::Generate => request.json(&GenerateRequest {
                model: &config.model,
                system: &prompt.system,
                prompt: &prompt.user,
                stream: config.stream,
            }),
            ApiFlavor::ChatCompletions => request.json(&ChatRequest {
                model: &config.model,
                messages: vec![
                    ChatMessage::system(&prompt.system),
                    ChatMessage::user(&prompt.user),
                ],
                stream: config.stream,
            }),
        };

        debug!(endpoint = config.endpoint(), model = %config.model, stream = config.stream, "sending narrator request");
        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!("narrator endpoint error: {status} - {body}");
            return Err(NarratorError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    fn attempt(&self, prompt: &Prompt, on_text: &mut dyn FnMut(&str)) -> NarratorResult<String> {
        let response = self.send(prompt)?;
        if !self.config.stream {
            let body = response.text()?;
            let text = wire::parse_full_body(self.config.flavor, &body)?;
            on_text(&text);
            return Ok(text);
        }

        let mut text = String::new();
        for line in BufReader::new(response).lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) if text.is_empty() => {
                    return Err(NarratorError::Decode(format!("failed to read stream: {e}")));
                }
                Err(e) => return Err(NarratorError::StreamInterrupted(e)),
            };
            let Some(chunk) = wire::parse_stream_line(self.config.flavor, &line) else {
                continue;
            };
            if chunk.loading && text.is_empty() {
                return Err(NarratorError::ModelLoading);
            }
            if !chunk.text.is_empty() {
                on_text(&chunk.text);
                text.push_str(&chunk.text);
            }
            if chunk.done {
                break;
            }
        }
        if text.trim().is_empty() {
            return Err(NarratorError::EmptyResponse);
        }
        Ok(text)
    }
}

impl Narrator for HttpNarrator {
    fn narrate(
        &mut self,
        prompt: &Prompt,
        on_text: &mut dyn FnMut(&str),
    ) -> NarratorResult<String> {
        let policy = self.config.retry;
        policy.run(|_| self.attempt(prompt, on_text), sleep)
    }
}

fn sleep(delay: Duration) {
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }
}
