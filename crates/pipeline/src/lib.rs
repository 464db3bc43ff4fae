//! Generation orchestration: validate, resolve, prompt, generate, promote,
//! record.

pub mod error;
pub mod outcome;
pub mod pipeline;

pub use error::PipelineError;
pub use outcome::{GarmentSummary, SceneSummary, TryOnOutcome};
pub use pipeline::{Stage, TryOnPipeline};
