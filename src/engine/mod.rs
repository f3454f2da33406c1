// Refinement engine
//
// START → GENERATING → SCORING → {APPROVED | REVISING} → ... → TERMINAL

mod loop_runner;
pub mod progress;
pub mod types;

pub use loop_runner::RefinementLoop;
pub use progress::{ProgressEvent, ProgressReporter};
pub use types::{
    GenerationRequest, GenerationResult, IterationRecord, PostStatus, Termination,
};
