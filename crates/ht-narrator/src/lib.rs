//! Narration client for Hearthtale.
//!
//! Sends a system prompt and a player turn to a text-generation endpoint
//! and returns the narrator's reply, streaming partial text to a callback
//! as it arrives. Transient failures are retried with doubling backoff.
//!
//! Two wire flavours are supported: the local `/api/generate` style
//! (newline-delimited JSON stream) and OpenAI-style chat completions
//! (server-sent events).

pub mod client;
pub mod config;
pub mod error;
pub mod retry;
pub mod wire;

pub use client::{HttpNarrator, Narrator, Prompt, degrade};
pub use config::{ApiFlavor, ExampleStyle, NarratorConfig};
pub use error::{NarratorError, NarratorResult};
pub use retry::RetryPolicy;
