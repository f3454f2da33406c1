// Critic result types and boundary parsing

use serde::{Deserialize, Serialize};

use crate::config::constants::APPROVAL_THRESHOLD;
use crate::errors::EngineError;
use crate::providers::parse_json_object;

/// Maximum points per rubric axis
pub const AUTHENTICITY_MAX: u8 = 40;
pub const CONTENT_QUALITY_MAX: u8 = 35;
pub const TECHNICAL_EXECUTION_MAX: u8 = 25;

/// Weighted sub-scores of the 100-point rubric
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Natural voice, tone match, no AI clichés (0–40)
    pub authenticity: u8,
    /// Hook, value, structure, CTA (0–35)
    pub content_quality: u8,
    /// Perspective, address, length, formatting (0–25)
    pub technical_execution: u8,
}

impl ScoreBreakdown {
    /// Build a breakdown, clamping each axis to its maximum.
    pub fn new(authenticity: u8, content_quality: u8, technical_execution: u8) -> Self {
        Self {
            authenticity: authenticity.min(AUTHENTICITY_MAX),
            content_quality: content_quality.min(CONTENT_QUALITY_MAX),
            technical_execution: technical_execution.min(TECHNICAL_EXECUTION_MAX),
        }
    }

    pub fn total(&self) -> u8 {
        self.authenticity + self.content_quality + self.technical_execution
    }
}

/// A literal edit requested by the critic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecificChange {
    /// Span that should appear verbatim in the critiqued draft
    pub original: String,
    pub replacement: String,
    #[serde(default)]
    pub reason: String,
}

impl SpecificChange {
    /// True when `original` is a non-empty exact substring of `draft`
    pub fn applies_to(&self, draft: &str) -> bool {
        !self.original.is_empty() && draft.contains(&self.original)
    }
}

/// Evaluation of one draft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticResult {
    pub overall_score: u8,
    pub scores: ScoreBreakdown,
    /// `overall_score >= APPROVAL_THRESHOLD`, recomputed on parse
    pub approved: bool,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    /// Short free-text summary
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub specific_changes: Vec<SpecificChange>,
}

impl CriticResult {
    /// Build a result, deriving `approved` from the score.
    pub fn new(overall_score: u8, scores: ScoreBreakdown) -> Self {
        let overall_score = overall_score.min(100);
        Self {
            overall_score,
            scores,
            approved: overall_score >= APPROVAL_THRESHOLD,
            strengths: Vec::new(),
            improvements: Vec::new(),
            feedback: String::new(),
            specific_changes: Vec::new(),
        }
    }

    /// Split specific changes into (literal, advisory) by whether `original`
    /// occurs verbatim in `draft`.
    pub fn partition_changes(&self, draft: &str) -> (Vec<&SpecificChange>, Vec<&SpecificChange>) {
        self.specific_changes
            .iter()
            .partition(|change| change.applies_to(draft))
    }
}

// ── Boundary parsing ───────────────────────────────────────────────────────────

/// Raw JSON shape from the completion service; everything but the score is optional
#[derive(Debug, Deserialize)]
struct RawCriticResult {
    overall_score: f64,
    #[serde(default)]
    scores: RawScores,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    improvements: Vec<String>,
    #[serde(default)]
    feedback: String,
    #[serde(default)]
    specific_changes: Vec<RawSpecificChange>,
}

#[derive(Debug, Default, Deserialize)]
struct RawScores {
    #[serde(default, alias = "authenticity")]
    authenticity_and_style: f64,
    #[serde(default)]
    content_quality: f64,
    #[serde(default)]
    technical_execution: f64,
}

#[derive(Debug, Deserialize)]
struct RawSpecificChange {
    #[serde(default)]
    original: String,
    #[serde(default)]
    replacement: String,
    #[serde(default)]
    reason: String,
}

/// Fractional points round down so that 84.5 stays below the approval cut
fn to_points(value: f64) -> u8 {
    value.floor().clamp(0.0, 255.0) as u8
}

impl From<RawCriticResult> for CriticResult {
    fn from(raw: RawCriticResult) -> Self {
        let scores = ScoreBreakdown::new(
            to_points(raw.scores.authenticity_and_style),
            to_points(raw.scores.content_quality),
            to_points(raw.scores.technical_execution),
        );
        let mut result = CriticResult::new(to_points(raw.overall_score), scores);
        result.strengths = raw.strengths;
        result.improvements = raw.improvements;
        result.feedback = raw.feedback.trim().to_string();
        result.specific_changes = raw
            .specific_changes
            .into_iter()
            .filter(|c| !c.original.is_empty() || !c.replacement.is_empty())
            .map(|c| SpecificChange {
                original: c.original,
                replacement: c.replacement,
                reason: c.reason,
            })
            .collect();
        result
    }
}

/// Parse the critic's structured output.
///
/// Fences are stripped and the first JSON object is used. A missing or
/// non-numeric `overall_score` is `MalformedCritique`.
pub fn parse_critic_response(text: &str) -> Result<CriticResult, EngineError> {
    parse_json_object::<RawCriticResult>(text)
        .map(CriticResult::from)
        .map_err(EngineError::MalformedCritique)
}
