// Progress events emitted while a request runs

use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

use super::types::Termination;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// Writer started on `iteration` (a revision when `iteration > 1`)
    GenerationStarted { iteration: usize, max_iterations: usize },
    ScoringStarted { iteration: usize },
    IterationComplete {
        iteration: usize,
        score: u8,
        approved: bool,
    },
    Finished {
        termination: Termination,
        iterations: usize,
        final_score: u8,
    },
}

/// Optional sink; sending never fails the request
#[derive(Debug, Clone, Default)]
pub struct ProgressReporter {
    sender: Option<UnboundedSender<ProgressEvent>>,
}

impl ProgressReporter {
    pub fn new(sender: Option<UnboundedSender<ProgressEvent>>) -> Self {
        Self { sender }
    }

    pub fn report(&self, event: ProgressEvent) {
        if let Some(sender) = &self.sender {
            if sender.send(event).is_err() {
                tracing::debug!("Progress receiver dropped; event discarded");
            }
        }
    }
}
