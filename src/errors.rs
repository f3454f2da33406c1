// Typed engine failures
//
// Most of the crate propagates `anyhow::Error`; these variants mark the cases a
// caller may want to tell apart via `err.downcast_ref::<EngineError>()`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Every task of a multi-draft fan-out failed
    #[error("all {attempted} draft generations failed")]
    AllDraftsFailed { attempted: usize },

    /// The completion service answered with nothing usable
    #[error("{caller} received an empty completion")]
    EmptyCompletion { caller: String },

    /// The critic's structured output could not be validated
    #[error("malformed critic response: {0}")]
    MalformedCritique(String),

    /// The selector's structured output could not be validated
    #[error("malformed selector judgment: {0}")]
    MalformedJudgment(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
