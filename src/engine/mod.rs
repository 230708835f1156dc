mod errors;
mod pipeline;
mod stats;

pub use errors::PipelineError;
pub use pipeline::Pipeline;
pub use stats::{ExportOutcome, RunStats, RunSummary};
