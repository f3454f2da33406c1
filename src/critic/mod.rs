// Critic / scorer: evaluates one draft against the style profile and brief

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::constants::CRITIC_TEMPERATURE;
use crate::content::{Brief, ReferenceExample, StyleProfile};
use crate::providers::{CompletionRequest, CompletionService};

pub mod prompts;
pub mod types;

pub use prompts::IterationPhase;
pub use types::{parse_critic_response, CriticResult, ScoreBreakdown, SpecificChange};

pub struct Critic {
    service: Arc<dyn CompletionService>,
    model: Option<String>,
    platform: String,
}

impl Critic {
    pub fn new(service: Arc<dyn CompletionService>, platform: impl Into<String>) -> Self {
        Self {
            service,
            model: None,
            platform: platform.into(),
        }
    }

    /// Use a specific model instead of the service default
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Score `draft`. Service failures and malformed output are both fatal.
    pub async fn evaluate(
        &self,
        draft: &str,
        brief: &Brief,
        profile: &StyleProfile,
        examples: &[ReferenceExample],
        iteration: usize,
        max_iterations: usize,
    ) -> Result<CriticResult> {
        tracing::info!(
            "[critic] Scoring draft (iteration {}/{})",
            iteration,
            max_iterations
        );

        let mut request = CompletionRequest::new(
            "critic",
            prompts::system_prompt(profile, examples, &self.platform, iteration, max_iterations),
            prompts::user_prompt(draft, brief, &self.platform, iteration, max_iterations),
        )
        .with_temperature(CRITIC_TEMPERATURE)
        .structured();
        if let Some(model) = &self.model {
            request = request.with_model(model.clone());
        }

        let response = self
            .service
            .complete(&request)
            .await
            .context("Completion service failed during critique")?;

        let result = parse_critic_response(&response)?;

        let (_, advisory) = result.partition_changes(draft);
        if !advisory.is_empty() {
            tracing::warn!(
                "[critic] {} of {} specific changes do not quote the draft verbatim",
                advisory.len(),
                result.specific_changes.len()
            );
        }

        tracing::info!(
            "[critic] Score {}/100 ({})",
            result.overall_score,
            if result.approved { "approved" } else { "needs revision" }
        );
        Ok(result)
    }
}
