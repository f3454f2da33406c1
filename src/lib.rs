// Draftloop - iterative writer/critic engine for short social posts
// Library exports

pub mod cli;
pub mod config;
pub mod content;
pub mod critic;
pub mod engine;
pub mod errors;
pub mod feedback;
pub mod history;
pub mod logging;
pub mod providers;
pub mod text;
pub mod writer;

pub use config::Config;
pub use engine::{GenerationRequest, GenerationResult, RefinementLoop};
pub use errors::EngineError;
pub use providers::{CompletionRequest, CompletionService};
