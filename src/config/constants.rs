// Project-wide constants
//
// Centralised here so scoring thresholds and other magic values have one
// source of truth. Import via `use crate::config::constants::*;`.

/// Critic score at which a draft is accepted outright.
pub const APPROVAL_THRESHOLD: u8 = 85;

/// Relaxed score accepted on the final permitted iteration.
///
/// Distinct from `APPROVAL_THRESHOLD`; never derive one from the other.
pub const AUTO_APPROVE_THRESHOLD: u8 = 80;

/// Default writer/critic round-trips per request.
pub const DEFAULT_MAX_ITERATIONS: usize = 3;

/// Bounds for parallel drafts in multi-draft mode.
pub const MIN_DRAFTS: usize = 2;
pub const MAX_DRAFTS: usize = 5;

/// Number of reference examples passed to the writer.
pub const EXAMPLES_PER_PROMPT: usize = 3;

/// Reference examples shorter than this are not worth imitating.
pub const MIN_EXAMPLE_CHARS: usize = 100;

/// Upper bound on keywords returned by the extractor.
pub const MAX_KEYWORDS: usize = 15;

/// Sampling temperatures per caller.
pub const SINGLE_DRAFT_TEMPERATURE: f32 = 0.6;
pub const SELECTOR_TEMPERATURE: f32 = 0.2;
pub const CRITIC_TEMPERATURE: f32 = 0.3;

/// Default maximum tokens for completion requests.
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Default request timeout for the HTTP completion adapter.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
