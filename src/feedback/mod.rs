// Cross-request learning from past critic feedback

use std::sync::Arc;

use crate::history::HistorySource;

pub mod miner;

pub use miner::{mine_lessons, normalize_improvement, FeedbackLessons, Lesson, LessonKind, PatternStats};

/// Reads a subject's recent results and mines lessons from them
pub struct FeedbackMiner {
    history: Arc<dyn HistorySource>,
    history_count: usize,
    enabled: bool,
}

impl FeedbackMiner {
    pub fn new(history: Arc<dyn HistorySource>, history_count: usize) -> Self {
        Self {
            history,
            history_count,
            enabled: true,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Lessons for `subject_id`. Never fails: read errors degrade to no lessons.
    pub async fn lessons_for(&self, subject_id: &str) -> FeedbackLessons {
        if !self.enabled || self.history_count == 0 {
            return FeedbackLessons::default();
        }

        match self
            .history
            .recent_results(subject_id, self.history_count)
            .await
        {
            Ok(results) => mine_lessons(&results),
            Err(e) => {
                tracing::warn!(
                    "[feedback] Could not read history for {}: {:#}; continuing without lessons",
                    subject_id,
                    e
                );
                FeedbackLessons::default()
            }
        }
    }
}
