// Completion capability
//
// The engine never talks to an LLM API directly; it goes through
// `CompletionService`, so tests and embedding callers can supply their own
// implementation.

use anyhow::Result;
use async_trait::async_trait;

pub mod openai;
pub mod retry;
pub mod structured;
pub mod types;

pub use openai::OpenAiCompletion;
pub use structured::{extract_json_object, parse_json_object, strip_markdown_fences};
pub use types::CompletionRequest;

/// Trait for text completion services
///
/// `complete` returns the raw completion text. When `request.structured` is
/// set the service must return a single JSON object; parsing is done by the
/// caller. Timeouts and rate limiting are the implementation's concern.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Run one completion and return its text
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;

    /// Service name (e.g. "openai") for logging
    fn name(&self) -> &str;
}
