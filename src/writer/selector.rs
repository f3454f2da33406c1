// Draft selector: picks the best of several parallel drafts
//
// Fail-soft: any problem with the judgment falls back to the first candidate.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::constants::SELECTOR_TEMPERATURE;
use crate::content::{Brief, StyleProfile};
use crate::errors::EngineError;
use crate::providers::{parse_json_object, CompletionRequest, CompletionService};

use super::Draft;

/// Per-candidate scores on the four selection axes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateScore {
    pub draft: usize,
    pub hook_score: f64,
    pub style_score: f64,
    pub value_score: f64,
    pub natural_score: f64,
    pub total: f64,
    pub notes: String,
}

/// Structured judgment returned by the selector call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorJudgment {
    #[serde(default)]
    pub analysis: Vec<CandidateScore>,
    /// Draft index of the winner
    pub winner: usize,
    #[serde(default)]
    pub reason: String,
}

pub fn parse_judgment(text: &str) -> Result<SelectorJudgment, EngineError> {
    parse_json_object::<SelectorJudgment>(text).map_err(EngineError::MalformedJudgment)
}

pub struct DraftSelector {
    service: Arc<dyn CompletionService>,
    model: Option<String>,
    platform: String,
}

impl DraftSelector {
    pub fn new(service: Arc<dyn CompletionService>, platform: impl Into<String>) -> Self {
        Self {
            service,
            model: None,
            platform: platform.into(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Choose one of `candidates` (at least one required).
    ///
    /// Returns `None` only for an empty candidate list.
    pub async fn select(
        &self,
        mut candidates: Vec<Draft>,
        brief: &Brief,
        profile: &StyleProfile,
    ) -> Option<Draft> {
        match candidates.len() {
            0 => return None,
            1 => return candidates.pop(),
            _ => {}
        }

        let mut request = CompletionRequest::new(
            "selector",
            format!(
                "You are a content editor who scores {} posts and picks the best one.",
                self.platform
            ),
            selection_prompt(&candidates, brief, profile, &self.platform),
        )
        .with_temperature(SELECTOR_TEMPERATURE)
        .structured();
        if let Some(model) = &self.model {
            request = request.with_model(model.clone());
        }

        let judgment = match self.service.complete(&request).await {
            Ok(text) => parse_judgment(&text),
            Err(e) => {
                tracing::warn!("[selector] Selection call failed, using first draft: {:#}", e);
                return Some(candidates.swap_remove(0));
            }
        };

        let judgment = match judgment {
            Ok(j) => j,
            Err(e) => {
                tracing::warn!("[selector] {}, using first draft", e);
                return Some(candidates.swap_remove(0));
            }
        };

        match candidates.iter().position(|d| d.index == judgment.winner) {
            Some(pos) => {
                let winner = candidates.swap_remove(pos);
                tracing::info!(
                    "[selector] Selected draft {} ({}): {}",
                    winner.index,
                    winner.approach,
                    judgment.reason
                );
                for score in &judgment.analysis {
                    tracing::debug!(
                        "[selector] draft {}: hook {} style {} value {} natural {} total {} {}",
                        score.draft,
                        score.hook_score,
                        score.style_score,
                        score.value_score,
                        score.natural_score,
                        score.total,
                        score.notes
                    );
                }
                Some(winner)
            }
            None => {
                tracing::warn!(
                    "[selector] Winner {} matches no candidate, using first draft",
                    judgment.winner
                );
                Some(candidates.swap_remove(0))
            }
        }
    }
}

fn selection_prompt(
    candidates: &[Draft],
    brief: &Brief,
    profile: &StyleProfile,
    platform: &str,
) -> String {
    let mut drafts = String::new();
    for draft in candidates {
        drafts.push_str(&format!(
            "\n\n=== DRAFT {} ({}) ===\n{}\n=== END DRAFT ===",
            draft.index, draft.approach, draft.text
        ));
    }

    let hooks: Vec<&str> = profile
        .phrase_library
        .hook_phrases
        .iter()
        .take(3)
        .map(String::as_str)
        .collect();

    format!(
        "You are an experienced {platform} content editor. Pick the BEST draft.\n\n\
         TOPIC OF THE POST:\n{title}\n\n\
         STYLE REQUIREMENTS:\n\
         - Tone: {tone}\n\
         - Energy level: {energy}/10\n\
         - Form of address: {address}\n\
         - Typical hook phrases: {hooks}\n\n\
         THE DRAFTS:{drafts}\n\n\
         SCORING CRITERIA:\n\
         1. Hook quality (30%): how attention-grabbing is the first sentence?\n\
         2. Style match (25%): how well does the draft fit the described style?\n\
         3. Value (25%): how much concrete benefit does the post offer?\n\
         4. Naturalness (20%): how authentic and human does it sound?\n\n\
         TASK:\n\
         Briefly analyse each draft and pick the best. Answer in JSON:\n\n\
         {{\n\
         \x20 \"analysis\": [\n\
         \x20   {{\"draft\": 1, \"hook_score\": 8, \"style_score\": 7, \"value_score\": 8, \"natural_score\": 7, \"total\": 30, \"notes\": \"Short reasoning\"}}\n\
         \x20 ],\n\
         \x20 \"winner\": 1,\n\
         \x20 \"reason\": \"Short reasoning for the choice\"\n\
         }}",
        platform = platform,
        title = brief.title,
        tone = profile.tone.primary_tone,
        energy = profile.linguistic.energy_level,
        address = profile.writing_style.form_of_address,
        hooks = hooks.join(", "),
        drafts = drafts,
    )
}
