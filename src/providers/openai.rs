// OpenAI-compatible completion adapter
//
// Works for OpenAI and any endpoint that speaks the same chat-completions
// format (Grok, Mistral, Groq, local gateways).

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::retry::{with_retry, HttpStatusError};
use super::types::CompletionRequest;
use super::CompletionService;
use crate::config::ProviderConfig;
use crate::errors::EngineError;

/// OpenAI chat-completions adapter
#[derive(Clone)]
pub struct OpenAiCompletion {
    client: Client,
    api_key: String,
    base_url: String,
    default_model: String,
    provider_name: String,
}

impl OpenAiCompletion {
    /// Create an adapter for api.openai.com with the default model
    pub fn new_openai(api_key: String) -> Result<Self> {
        Self::new(
            api_key,
            "https://api.openai.com".to_string(),
            "gpt-4o".to_string(),
            Duration::from_secs(crate::config::constants::DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create an adapter from the `[provider]` config section
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .context("No API key configured. Set OPENAI_API_KEY or [provider].api_key")?;
        Self::new(
            api_key,
            config.base_url.clone(),
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Set custom model for this adapter
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    fn new(api_key: String, base_url: String, default_model: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            default_model,
            provider_name: "openai".to_string(),
        })
    }

    /// Convert a CompletionRequest to OpenAI API format
    fn to_openai_request(&self, request: &CompletionRequest) -> OpenAIRequest {
        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.default_model.clone());

        // System prompt goes first as a {"role":"system"} message (OpenAI convention)
        let messages = vec![
            OpenAIMessage {
                role: "system".to_string(),
                content: request.system.clone(),
            },
            OpenAIMessage {
                role: "user".to_string(),
                content: request.user.clone(),
            },
        ];

        OpenAIRequest {
            model,
            messages,
            max_tokens: Some(request.max_tokens),
            temperature: Some(request.temperature),
            response_format: request.structured.then(|| ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        }
    }

    /// Send a single request (no retry)
    async fn complete_once(&self, request: &CompletionRequest) -> Result<String> {
        let openai_request = self.to_openai_request(request);
        let url = format!("{}/v1/chat/completions", self.base_url);

        tracing::info!(
            "[{}] Calling {} ({})",
            request.caller,
            self.provider_name,
            openai_request.model
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&openai_request)
            .send()
            .await
            .context("Failed to send request to OpenAI API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HttpStatusError {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI API response")?;

        let text = openai_response
            .choices
            .into_iter()
            .next()
            .context("OpenAI returned no choices in response")?
            .message
            .content
            .unwrap_or_default();

        tracing::debug!(
            "[{}] Received response (length: {})",
            request.caller,
            text.len()
        );

        Ok(text)
    }
}

#[async_trait]
impl CompletionService for OpenAiCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let text = with_retry(|| self.complete_once(request)).await?;
        // null or blank content is a completed call, not a transient failure
        if text.trim().is_empty() {
            return Err(EngineError::EmptyCompletion {
                caller: request.caller.clone(),
            }
            .into());
        }
        Ok(text)
    }

    fn name(&self) -> &str {
        &self.provider_name
    }
}

// OpenAI API types

#[derive(Debug, Clone, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Clone, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}
