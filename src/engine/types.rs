// Engine types: request, iteration records, terminal states, result

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::constants::AUTO_APPROVE_THRESHOLD;
use crate::content::{Brief, ReferenceExample, StyleProfile};
use crate::critic::CriticResult;
use crate::writer::Draft;

/// Everything one generation request needs
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Owner of the profile and history (customer, author, account)
    pub subject_id: String,
    pub brief: Brief,
    pub profile: StyleProfile,
    /// Full pool; the engine filters and selects from it
    pub examples: Vec<ReferenceExample>,
}

impl GenerationRequest {
    pub fn new(subject_id: impl Into<String>, brief: Brief, profile: StyleProfile) -> Self {
        Self {
            subject_id: subject_id.into(),
            brief,
            profile,
            examples: Vec::new(),
        }
    }

    pub fn with_examples(mut self, examples: Vec<ReferenceExample>) -> Self {
        self.examples = examples;
        self
    }
}

/// One writer/critic round trip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationRecord {
    pub iteration: usize,
    pub draft: Draft,
    pub critique: CriticResult,
}

/// How the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The critic approved (score >= 85)
    Approved,
    /// Final iteration scored >= 80 without critic approval
    AutoApproved,
    /// Budget used up below the auto-approve bar
    Exhausted,
}

impl Termination {
    pub fn is_approved(&self) -> bool {
        matches!(self, Termination::Approved | Termination::AutoApproved)
    }
}

/// Publication status handed to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Approved,
    /// Unapproved, for caller review
    Draft,
}

impl PostStatus {
    pub fn derive(termination: Termination, final_score: u8) -> Self {
        if termination.is_approved() && final_score >= AUTO_APPROVE_THRESHOLD {
            PostStatus::Approved
        } else {
            PostStatus::Draft
        }
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostStatus::Approved => write!(f, "approved"),
            PostStatus::Draft => write!(f, "draft"),
        }
    }
}

/// Final artifact of one request, including the full audit trail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub id: Uuid,
    pub subject_id: String,
    pub brief_title: String,
    pub final_text: String,
    /// Round trips executed; always equals `records.len()`
    pub iterations: usize,
    pub approved: bool,
    pub auto_approved: bool,
    pub termination: Termination,
    pub status: PostStatus,
    pub final_score: u8,
    pub records: Vec<IterationRecord>,
    pub created_at: DateTime<Utc>,
}

impl GenerationResult {
    /// Assemble a result from a non-empty record sequence.
    ///
    /// Returns `None` when `records` is empty.
    pub fn from_records(
        subject_id: impl Into<String>,
        brief_title: impl Into<String>,
        termination: Termination,
        records: Vec<IterationRecord>,
    ) -> Option<Self> {
        let last = records.last()?;
        let final_text = last.draft.text.clone();
        let final_score = last.critique.overall_score;

        Some(Self {
            id: Uuid::new_v4(),
            subject_id: subject_id.into(),
            brief_title: brief_title.into(),
            final_text,
            iterations: records.len(),
            approved: termination.is_approved(),
            auto_approved: termination == Termination::AutoApproved,
            termination,
            status: PostStatus::derive(termination, final_score),
            final_score,
            records,
            created_at: Utc::now(),
        })
    }

    /// Critique of the last iteration
    pub fn final_critique(&self) -> Option<&CriticResult> {
        self.records.last().map(|r| &r.critique)
    }
}
