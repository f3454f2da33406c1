// Refinement loop: writer/critic iteration until approval or budget exhaustion

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

use crate::config::constants::AUTO_APPROVE_THRESHOLD;
use crate::config::{Config, WriterConfig};
use crate::critic::Critic;
use crate::feedback::{FeedbackLessons, FeedbackMiner};
use crate::history::HistorySource;
use crate::providers::CompletionService;
use crate::writer::{
    select_examples, usable_examples, DraftGenerator, DraftPalette, DraftSelector, WriterInputs,
};

use super::progress::{ProgressEvent, ProgressReporter};
use super::types::{GenerationRequest, GenerationResult, IterationRecord, Termination};

/// The refinement loop.
///
/// Runs GENERATING → SCORING round trips until one of:
/// - the critic approves (score >= 85)
/// - the final iteration scores >= 80 (auto-approved)
/// - the iteration budget is used up (best-effort draft returned)
///
/// Writer, selector and critic calls all go through one `CompletionService`.
/// Nothing is persisted here; storing the result is the caller's job.
pub struct RefinementLoop {
    service: Arc<dyn CompletionService>,
    writer: WriterConfig,
    history: Option<Arc<dyn HistorySource>>,
    palette: DraftPalette,
    model: Option<String>,
    selector_model: Option<String>,
    seed: Option<u64>,
}

impl RefinementLoop {
    pub fn new(service: Arc<dyn CompletionService>, writer: WriterConfig) -> Self {
        Self {
            service,
            writer,
            history: None,
            palette: DraftPalette::default(),
            model: None,
            selector_model: None,
            seed: None,
        }
    }

    /// Engine wired from a loaded `Config` (models included)
    pub fn from_config(service: Arc<dyn CompletionService>, config: &Config) -> Self {
        Self::new(service, config.writer.clone()).with_models(
            config.provider.model.clone(),
            config.provider.selector_model.clone(),
        )
    }

    /// Source of past results for lesson mining
    pub fn with_history(mut self, history: Arc<dyn HistorySource>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn with_palette(mut self, palette: DraftPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Writer/critic model and the cheaper selector model
    pub fn with_models(mut self, model: impl Into<String>, selector_model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self.selector_model = Some(selector_model.into());
        self
    }

    /// Seed every random choice (example picks, phrase sampling)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Effective iteration ceiling (never below 1)
    pub fn max_iterations(&self) -> usize {
        self.writer.max_iterations.max(1)
    }

    pub async fn run(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        self.run_with_progress(request, None).await
    }

    /// Run one request, reporting progress to `progress` if given.
    ///
    /// Fatal errors (writer or critic failure, malformed critique, every
    /// parallel draft failing) abort immediately.
    pub async fn run_with_progress(
        &self,
        request: &GenerationRequest,
        progress: Option<UnboundedSender<ProgressEvent>>,
    ) -> Result<GenerationResult> {
        let progress = ProgressReporter::new(progress);
        let max_iterations = self.max_iterations();
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        tracing::info!(
            "[engine] Generating post '{}' for {} (max {} iterations)",
            request.brief.title,
            request.subject_id,
            max_iterations
        );

        // ── START ──────────────────────────────────────────────────────────────
        let pool = usable_examples(&request.examples);
        let examples = select_examples(
            &request.brief,
            &pool,
            self.writer.semantic_matching_enabled,
            &mut rng,
        );
        tracing::info!(
            "[engine] Using {} of {} reference examples",
            examples.len(),
            request.examples.len()
        );

        let lessons = self.lessons_for(&request.subject_id).await;

        let inputs = WriterInputs {
            brief: &request.brief,
            profile: &request.profile,
            examples: &examples,
            lessons: &lessons,
        };
        let generator = self.generator();
        let critic = self.critic();

        let mut records: Vec<IterationRecord> = Vec::new();
        let mut termination = Termination::Exhausted;

        for iteration in 1..=max_iterations {
            // ── GENERATING ─────────────────────────────────────────────────────
            progress.report(ProgressEvent::GenerationStarted {
                iteration,
                max_iterations,
            });
            let draft = match records.last() {
                None if self.writer.multi_draft_enabled => {
                    generator
                        .multi_draft(inputs, self.writer.effective_draft_count(), &mut rng)
                        .await
                }
                None => generator.single_draft(inputs, &mut rng).await,
                Some(previous) => {
                    generator
                        .revise(inputs, &previous.draft, &previous.critique, &mut rng)
                        .await
                }
            }
            .with_context(|| format!("Draft generation failed on iteration {}", iteration))?;

            // ── SCORING ────────────────────────────────────────────────────────
            progress.report(ProgressEvent::ScoringStarted { iteration });
            let critique = critic
                .evaluate(
                    &draft.text,
                    &request.brief,
                    &request.profile,
                    &examples,
                    iteration,
                    max_iterations,
                )
                .await
                .with_context(|| format!("Critique failed on iteration {}", iteration))?;

            let score = critique.overall_score;
            let approved = critique.approved;
            records.push(IterationRecord {
                iteration,
                draft,
                critique,
            });
            progress.report(ProgressEvent::IterationComplete {
                iteration,
                score,
                approved,
            });

            // ── Transition ─────────────────────────────────────────────────────
            if approved {
                termination = Termination::Approved;
                tracing::info!("[engine] Approved on iteration {} with {}/100", iteration, score);
                break;
            }
            if iteration == max_iterations {
                termination = final_termination(score);
                tracing::info!(
                    "[engine] Budget exhausted at {}/100: {:?}",
                    score,
                    termination
                );
                break;
            }
            tracing::info!(
                "[engine] Score {}/100 on iteration {}/{}, revising",
                score,
                iteration,
                max_iterations
            );
        }

        let result = GenerationResult::from_records(
            request.subject_id.clone(),
            request.brief.title.clone(),
            termination,
            records,
        )
        .context("Refinement loop finished without any iteration")?;

        progress.report(ProgressEvent::Finished {
            termination: result.termination,
            iterations: result.iterations,
            final_score: result.final_score,
        });
        tracing::info!(
            "[engine] Done after {} iterations: status {}, score {}",
            result.iterations,
            result.status,
            result.final_score
        );
        Ok(result)
    }

    // ── Private helpers ────────────────────────────────────────────────────────

    async fn lessons_for(&self, subject_id: &str) -> FeedbackLessons {
        match &self.history {
            Some(history) => {
                FeedbackMiner::new(history.clone(), self.writer.feedback_history_count)
                    .with_enabled(self.writer.learn_from_feedback)
                    .lessons_for(subject_id)
                    .await
            }
            None => FeedbackLessons::default(),
        }
    }

    fn generator(&self) -> DraftGenerator {
        let mut selector = DraftSelector::new(self.service.clone(), self.writer.platform.clone());
        if let Some(model) = &self.selector_model {
            selector = selector.with_model(model.clone());
        }
        let generator =
            DraftGenerator::new(self.service.clone(), selector, self.writer.platform.clone())
                .with_palette(self.palette.clone());
        match &self.model {
            Some(model) => generator.with_model(model.clone()),
            None => generator,
        }
    }

    fn critic(&self) -> Critic {
        let critic = Critic::new(self.service.clone(), self.writer.platform.clone());
        match &self.model {
            Some(model) => critic.with_model(model.clone()),
            None => critic,
        }
    }
}

/// Terminal state when the last permitted iteration was not approved
fn final_termination(score: u8) -> Termination {
    if score >= AUTO_APPROVE_THRESHOLD {
        Termination::AutoApproved
    } else {
        Termination::Exhausted
    }
}
