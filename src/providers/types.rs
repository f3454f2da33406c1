// Request type for the completion capability
//
// One system prompt, one user prompt, sampling temperature and an optional
// structured-output flag. Each adapter maps this onto its own wire format.

use serde::Serialize;

use crate::config::constants::DEFAULT_MAX_TOKENS;

/// Provider-agnostic completion request
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    /// Which engine component issued the call ("writer", "selector", "critic").
    /// Only used for logging and routing in test doubles.
    pub caller: String,

    /// System prompt
    pub system: String,

    /// User prompt
    pub user: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Ask the service to return a single JSON object
    pub structured: bool,

    /// Model override; adapters fall back to their default when `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Maximum tokens to generate
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(caller: impl Into<String>, system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            caller: caller.into(),
            system: system.into(),
            user: user.into(),
            temperature: 0.7,
            structured: false,
            model: None,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Request structured (JSON object) output
    pub fn structured(mut self) -> Self {
        self.structured = true;
        self
    }

    /// Set the model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}
