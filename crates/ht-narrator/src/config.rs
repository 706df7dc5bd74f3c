//! Narrator configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Default model name.
pub const DEFAULT_MODEL: &str = "llama3.2:3b";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Environment variable holding the API key for hosted endpoints.
pub const ENV_API_KEY: &str = "HEARTHTALE_API_KEY";
/// Environment variable overriding the endpoint URL.
pub const ENV_ENDPOINT: &str = "HEARTHTALE_ENDPOINT";
/// Environment variable overriding the model name.
pub const ENV_MODEL: &str = "HEARTHTALE_MODEL";

/// Wire protocol spoken by the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiFlavor {
    /// `{model, system, prompt, stream}` with an NDJSON stream.
    #[default]
    Generate,
    /// OpenAI-style `{model, messages, stream}` with an SSE stream.
    ChatCompletions,
}

impl ApiFlavor {
    /// Endpoint used when none is configured.
    pub fn default_endpoint(self) -> &'static str {
        match self {
            Self::Generate => "http://localhost:11434/api/generate",
            Self::ChatCompletions => "http://localhost:11434/v1/chat/completions",
        }
    }
}

/// A canned passage appended to the system prompt to steer tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleStyle {
    /// An odd little shop.
    Shop,
    /// A cosy bakery.
    Food,
    /// A travelling scavenger-merchant.
    Merchant,
}

impl ExampleStyle {
    /// All styles.
    pub const ALL: [ExampleStyle; 3] = [Self::Shop, Self::Food, Self::Merchant];

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Shop => "shop",
            Self::Food => "food",
            Self::Merchant => "merchant",
        }
    }
}

impl FromStr for ExampleStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|style| style.name() == lower)
            .ok_or_else(|| format!("unknown example style '{s}' (expected shop, food or merchant)"))
    }
}

impl fmt::Display for ExampleStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for [`HttpNarrator`](crate::HttpNarrator).
#[derive(Debug, Clone)]
pub struct NarratorConfig {
    /// Explicit endpoint URL. `None` uses the flavour default.
    pub endpoint: Option<String>,
    /// Wire protocol.
    pub flavor: ApiFlavor,
    /// Model identifier sent with every request.
    pub model: String,
    /// Bearer token for hosted endpoints.
    pub api_key: Option<String>,
    /// Request a streamed response.
    pub stream: bool,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retry behaviour.
    pub retry: RetryPolicy,
    /// Optional tone example for the system prompt.
    pub example: Option<ExampleStyle>,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            flavor: ApiFlavor::default(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            stream: true,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            example: None,
        }
    }
}

impl NarratorConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with `HEARTHTALE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`. Empty values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();
        if let Some(endpoint) = get(ENV_ENDPOINT) {
            config.endpoint = Some(endpoint);
        }
        if let Some(model) = get(ENV_MODEL) {
            config.model = model;
        }
        config.api_key = get(ENV_API_KEY);
        config
    }

    /// The URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or_else(|| self.flavor.default_endpoint())
    }

    /// Set the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the wire flavour.
    pub fn with_flavor(mut self, flavor: ApiFlavor) -> Self {
        self.flavor = flavor;
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Enable or disable streaming.
    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of attempts per request.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.retry.max_attempts = attempts;
        self
    }

    /// Set the delay before the first retry.
    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.retry.initial_backoff = backoff;
        self
    }

    /// Set the tone example.
    pub fn with_example(mut self, example: ExampleStyle) -> Self {
        self.example = Some(example);
        self
    }
}
