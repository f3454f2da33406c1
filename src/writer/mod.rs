// Draft generator: single drafts, parallel multi-draft exploration, revisions

use anyhow::{Context, Result};
use futures::future::join_all;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::constants::SINGLE_DRAFT_TEMPERATURE;
use crate::content::{Brief, ReferenceExample, StyleProfile};
use crate::critic::CriticResult;
use crate::errors::EngineError;
use crate::feedback::FeedbackLessons;
use crate::providers::{CompletionRequest, CompletionService};

pub mod examples;
pub mod palette;
pub mod prompts;
pub mod selector;

pub use examples::{select_examples, usable_examples};
pub use palette::{DraftApproach, DraftPalette};
pub use selector::{CandidateScore, DraftSelector, SelectorJudgment};

/// Approach label for single-draft generation
pub const SINGLE_APPROACH: &str = "single";
/// Approach label for revisions
pub const REVISION_APPROACH: &str = "revision";

/// One candidate text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    /// 1-based position among the drafts of its round
    pub index: usize,
    pub approach: String,
    pub temperature: f32,
    pub text: String,
}

impl Draft {
    pub fn new(
        index: usize,
        approach: impl Into<String>,
        temperature: f32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            index,
            approach: approach.into(),
            temperature,
            text: text.into(),
        }
    }
}

/// Request-scoped inputs shared by every writer call
#[derive(Debug, Clone, Copy)]
pub struct WriterInputs<'a> {
    pub brief: &'a Brief,
    pub profile: &'a StyleProfile,
    pub examples: &'a [ReferenceExample],
    pub lessons: &'a FeedbackLessons,
}

pub struct DraftGenerator {
    service: Arc<dyn CompletionService>,
    selector: DraftSelector,
    palette: DraftPalette,
    model: Option<String>,
    platform: String,
}

impl DraftGenerator {
    pub fn new(
        service: Arc<dyn CompletionService>,
        selector: DraftSelector,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            service,
            selector,
            palette: DraftPalette::default(),
            model: None,
            platform: platform.into(),
        }
    }

    pub fn with_palette(mut self, palette: DraftPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    fn request(&self, system: &str, user: String, temperature: f32) -> CompletionRequest {
        let request =
            CompletionRequest::new("writer", system, user).with_temperature(temperature);
        match &self.model {
            Some(model) => request.with_model(model.clone()),
            None => request,
        }
    }

    /// Run one completion and return its trimmed, non-empty text
    async fn complete_text(&self, request: &CompletionRequest) -> Result<String> {
        let text = self
            .service
            .complete(request)
            .await
            .context("Completion service failed during draft generation")?;
        let text = text.trim();
        if text.is_empty() {
            return Err(EngineError::EmptyCompletion {
                caller: request.caller.clone(),
            }
            .into());
        }
        Ok(text.to_string())
    }

    /// One draft at the fixed single-draft temperature. Any failure is fatal.
    pub async fn single_draft<R: Rng + ?Sized + Send>(
        &self,
        inputs: WriterInputs<'_>,
        rng: &mut R,
    ) -> Result<Draft> {
        tracing::info!("[writer] Writing single draft for '{}'", inputs.brief.title);
        let system = prompts::system_prompt(
            inputs.profile,
            inputs.examples,
            inputs.lessons,
            &self.platform,
            rng,
        );
        let user = prompts::initial_prompt(inputs.brief, &self.platform, None);
        let request = self.request(&system, user, SINGLE_DRAFT_TEMPERATURE);

        let text = self.complete_text(&request).await?;
        Ok(Draft::new(1, SINGLE_APPROACH, SINGLE_DRAFT_TEMPERATURE, text))
    }

    /// `count` concurrent drafts, one per palette approach, then selection.
    ///
    /// Failed or empty tasks are dropped. Fails only when every task fails.
    pub async fn multi_draft<R: Rng + ?Sized + Send>(
        &self,
        inputs: WriterInputs<'_>,
        count: usize,
        rng: &mut R,
    ) -> Result<Draft> {
        let approaches = self.palette.pick(count);
        tracing::info!(
            "[writer] Generating {} drafts in parallel for '{}'",
            approaches.len(),
            inputs.brief.title
        );

        let system = prompts::system_prompt(
            inputs.profile,
            inputs.examples,
            inputs.lessons,
            &self.platform,
            rng,
        );

        let tasks = approaches.iter().enumerate().map(|(i, approach)| {
            let index = i + 1;
            let request = self.request(
                &system,
                prompts::initial_prompt(inputs.brief, &self.platform, Some(approach)),
                approach.temperature,
            );
            async move {
                match self.complete_text(&request).await {
                    Ok(text) => Some(Draft::new(
                        index,
                        approach.label.clone(),
                        approach.temperature,
                        text,
                    )),
                    Err(e) => {
                        tracing::warn!(
                            "[writer] Draft {} ({}) failed and is dropped: {:#}",
                            index,
                            approach.label,
                            e
                        );
                        None
                    }
                }
            }
        });

        let drafts: Vec<Draft> = join_all(tasks).await.into_iter().flatten().collect();

        let attempted = approaches.len();
        match drafts.len() {
            0 => tracing::error!("[writer] All {} drafts failed", attempted),
            1 => tracing::warn!("[writer] Only one draft succeeded, using it directly"),
            n => tracing::info!("[writer] {} of {} drafts succeeded, selecting", n, attempted),
        }

        // the selector returns a lone candidate as-is and None for no candidates
        self.selector
            .select(drafts, inputs.brief, inputs.profile)
            .await
            .ok_or_else(|| EngineError::AllDraftsFailed { attempted }.into())
    }

    /// Revise `previous` according to `critique`. Any failure is fatal.
    pub async fn revise<R: Rng + ?Sized + Send>(
        &self,
        inputs: WriterInputs<'_>,
        previous: &Draft,
        critique: &CriticResult,
        rng: &mut R,
    ) -> Result<Draft> {
        tracing::info!(
            "[writer] Revising draft (previous score {})",
            critique.overall_score
        );
        let system = prompts::system_prompt(
            inputs.profile,
            inputs.examples,
            inputs.lessons,
            &self.platform,
            rng,
        );
        let user = prompts::revision_prompt(&previous.text, critique);
        let request = self.request(&system, user, SINGLE_DRAFT_TEMPERATURE);

        let text = self.complete_text(&request).await?;
        Ok(Draft::new(1, REVISION_APPROACH, SINGLE_DRAFT_TEMPERATURE, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::critic::ScoreBreakdown;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Mutex;

    /// Writer replies keyed by approach label found in the prompt; "FAIL" errors, "" is empty.
    struct ByApproach {
        replies: Vec<(&'static str, &'static str)>,
        selector_reply: &'static str,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    #[async_trait::async_trait]
    impl CompletionService for ByApproach {
        async fn complete(&self, request: &CompletionRequest) -> Result<String> {
            self.seen.lock().unwrap().push(request.clone());
            if request.caller == "selector" {
                return Ok(self.selector_reply.to_string());
            }
            for (label, reply) in &self.replies {
                if request.user.contains(&format!("({})", label)) {
                    if *reply == "FAIL" {
                        anyhow::bail!("upstream 500");
                    }
                    return Ok(reply.to_string());
                }
            }
            Ok("  plain draft  ".to_string())
        }

        fn name(&self) -> &str {
            "by-approach"
        }
    }

    fn generator(service: Arc<ByApproach>) -> DraftGenerator {
        DraftGenerator::new(
            service.clone(),
            DraftSelector::new(service, "LinkedIn"),
            "LinkedIn",
        )
    }

    fn service(replies: Vec<(&'static str, &'static str)>, selector_reply: &'static str) -> Arc<ByApproach> {
        Arc::new(ByApproach {
            replies,
            selector_reply,
            seen: Mutex::new(Vec::new()),
        })
    }

    struct Fixture {
        brief: Brief,
        profile: StyleProfile,
        lessons: FeedbackLessons,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                brief: Brief::new("Topic"),
                profile: StyleProfile::default(),
                lessons: FeedbackLessons::default(),
            }
        }

        fn inputs(&self) -> WriterInputs<'_> {
            WriterInputs {
                brief: &self.brief,
                profile: &self.profile,
                examples: &[],
                lessons: &self.lessons,
            }
        }
    }

    #[tokio::test]
    async fn test_single_draft_trims() {
        let svc = service(vec![], "");
        let gen = generator(svc.clone());
        let fixture = Fixture::new();
        let inputs = fixture.inputs();
        let draft = gen
            .single_draft(inputs, &mut StdRng::seed_from_u64(1))
            .await
            .unwrap();
        assert_eq!(draft.text, "plain draft");
        assert_eq!(draft.approach, SINGLE_APPROACH);

        let seen = svc.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!((seen[0].temperature - SINGLE_DRAFT_TEMPERATURE).abs() < f32::EPSILON);
        assert!(!seen[0].structured);
    }

    #[tokio::test]
    async fn test_multi_draft_drops_failures_and_selects() {
        let svc = service(
            vec![
                ("hook-first", "FAIL"),
                ("story-first", "Story draft"),
                ("value-first", ""),
                ("emotion-first", "Emotion draft"),
                ("provocation-first", "Provocation draft"),
            ],
            r#"{"winner": 4, "reason": "warmest"}"#,
        );
        let gen = generator(svc.clone());
        let fixture = Fixture::new();
        let inputs = fixture.inputs();

        let draft = gen
            .multi_draft(inputs, 5, &mut StdRng::seed_from_u64(1))
            .await
            .unwrap();
        assert_eq!(draft.text, "Emotion draft");
        assert_eq!(draft.index, 4);
        assert!((draft.temperature - 0.8).abs() < f32::EPSILON);

        let seen = svc.seen.lock().unwrap();
        let selector_call = seen.iter().find(|r| r.caller == "selector").unwrap();
        assert!(selector_call.user.contains("=== DRAFT 2 (story-first) ==="));
        assert!(!selector_call.user.contains("=== DRAFT 1 "));
        assert!(!selector_call.user.contains("=== DRAFT 3 "));
    }

    #[tokio::test]
    async fn test_multi_draft_single_survivor_skips_selector() {
        let svc = service(
            vec![("hook-first", "FAIL"), ("story-first", "Only survivor")],
            r#"{"winner": 1}"#,
        );
        let gen = generator(svc.clone());
        let fixture = Fixture::new();
        let draft = gen
            .multi_draft(fixture.inputs(), 2, &mut StdRng::seed_from_u64(1))
            .await
            .unwrap();
        assert_eq!(draft.text, "Only survivor");
        assert!(svc.seen.lock().unwrap().iter().all(|r| r.caller != "selector"));
    }

    #[tokio::test]
    async fn test_multi_draft_all_failed() {
        let svc = service(vec![("hook-first", "FAIL"), ("story-first", "")], "");
        let gen = generator(svc);
        let fixture = Fixture::new();
        let inputs = fixture.inputs();
        let err = gen
            .multi_draft(inputs, 2, &mut StdRng::seed_from_u64(1))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::AllDraftsFailed { attempted: 2 })
        ));
    }

    #[tokio::test]
    async fn test_revise_uses_critique() {
        let svc = service(vec![], "");
        let gen = generator(svc.clone());
        let fixture = Fixture::new();
        let inputs = fixture.inputs();
        let mut critique = CriticResult::new(70, ScoreBreakdown::default());
        critique.feedback = "Needs a sharper hook".into();

        let draft = gen
            .revise(
                inputs,
                &Draft::new(1, SINGLE_APPROACH, 0.6, "Old text"),
                &critique,
                &mut StdRng::seed_from_u64(1),
            )
            .await
            .unwrap();
        assert_eq!(draft.approach, REVISION_APPROACH);

        let seen = svc.seen.lock().unwrap();
        assert!(seen[0].user.contains("Old text"));
        assert!(seen[0].user.contains("Needs a sharper hook"));
    }

    #[tokio::test]
    async fn test_empty_single_draft_is_error() {
        struct Empty;

        #[async_trait::async_trait]
        impl CompletionService for Empty {
            async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
                Ok("   ".to_string())
            }
            fn name(&self) -> &str {
                "empty"
            }
        }

        let svc: Arc<dyn CompletionService> = Arc::new(Empty);
        let gen = DraftGenerator::new(svc.clone(), DraftSelector::new(svc, "LinkedIn"), "LinkedIn");
        let fixture = Fixture::new();
        let inputs = fixture.inputs();
        let err = gen
            .single_draft(inputs, &mut StdRng::seed_from_u64(1))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::EmptyCompletion { .. })
        ));
    }
}
