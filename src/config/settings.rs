// Configuration structs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::constants::{DEFAULT_MAX_ITERATIONS, DEFAULT_TIMEOUT_SECS, MAX_DRAFTS, MIN_DRAFTS};
use crate::errors::EngineError;

/// OpenAI-compatible completion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// API key (falls back to `OPENAI_API_KEY`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL without the `/v1/...` path
    pub base_url: String,

    /// Model for writing and critique
    pub model: String,

    /// Cheaper model for draft selection
    pub selector_model: String,

    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o".to_string(),
            selector_model: "gpt-4o-mini".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Writer behaviour flags
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Generate several first drafts in parallel and pick the best
    pub multi_draft_enabled: bool,

    /// Number of parallel first drafts (clamped to 2..=5 at use)
    pub multi_draft_count: usize,

    /// Pick reference examples by keyword overlap instead of at random
    pub semantic_matching_enabled: bool,

    /// Mine lessons from past critiques of the same subject
    pub learn_from_feedback: bool,

    /// How many past results the miner looks at
    pub feedback_history_count: usize,

    /// Hard ceiling on writer/critic round trips
    pub max_iterations: usize,

    /// Target platform named in prompts
    pub platform: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            multi_draft_enabled: true,
            multi_draft_count: 3,
            semantic_matching_enabled: true,
            learn_from_feedback: true,
            feedback_history_count: 10,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            platform: "LinkedIn".to_string(),
        }
    }
}

impl WriterConfig {
    /// Draft count actually used for the fan-out
    pub fn effective_draft_count(&self) -> usize {
        self.multi_draft_count.clamp(MIN_DRAFTS, MAX_DRAFTS)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,

    /// Force debug output regardless of `level`
    pub debug: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            debug: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub writer: WriterConfig,
    pub logging: LoggingConfig,

    /// Directory for the per-subject JSONL history
    pub history_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            writer: WriterConfig::default(),
            logging: LoggingConfig::default(),
            history_dir: default_history_dir(),
        }
    }
}

fn default_history_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".draftloop").join("history"))
        .unwrap_or_else(|| PathBuf::from(".draftloop/history"))
}

impl Config {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.writer.max_iterations == 0 {
            return Err(EngineError::InvalidConfig(
                "writer.max_iterations must be at least 1".to_string(),
            ));
        }

        if self.provider.model.trim().is_empty() {
            return Err(EngineError::InvalidConfig(
                "provider.model must not be empty".to_string(),
            ));
        }

        if self.writer.learn_from_feedback && self.writer.feedback_history_count == 0 {
            return Err(EngineError::InvalidConfig(
                "writer.feedback_history_count must be positive when learn_from_feedback is on"
                    .to_string(),
            ));
        }

        Ok(())
    }
}
