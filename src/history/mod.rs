// History read interface
//
// The engine only reads past results (for lesson mining). Writing them is the
// caller's job; `JsonlHistory` is the store the runner binary uses.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::engine::GenerationResult;

pub mod jsonl;

pub use jsonl::JsonlHistory;

/// Source of a subject's past generation results
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Up to `limit` results for `subject_id`, newest first
    async fn recent_results(&self, subject_id: &str, limit: usize) -> Result<Vec<GenerationResult>>;
}

/// In-process history, keyed by subject
#[derive(Default)]
pub struct InMemoryHistory {
    results: Mutex<HashMap<String, Vec<GenerationResult>>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a result under its own `subject_id`
    pub fn push(&self, result: GenerationResult) {
        let mut results = match self.results.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        results
            .entry(result.subject_id.clone())
            .or_default()
            .push(result);
    }

    pub fn len(&self, subject_id: &str) -> usize {
        self.results
            .lock()
            .map(|r| r.get(subject_id).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

#[async_trait]
impl HistorySource for InMemoryHistory {
    async fn recent_results(&self, subject_id: &str, limit: usize) -> Result<Vec<GenerationResult>> {
        let results = self
            .results
            .lock()
            .map_err(|_| anyhow::anyhow!("history lock poisoned"))?;
        Ok(results
            .get(subject_id)
            .map(|all| all.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}
