//! Pipeline Module
//!
//! Splits a video into an audio track plus numbered frames and puts them back
//! together again, delegating all media work to an external tool.

// Module declarations
pub mod types;
pub mod config;
pub mod layout;
pub mod command;
pub mod runner;
pub mod stats;
pub mod preprocess;
pub mod postprocess;


// Re-export commonly used items for convenience
pub use types::{PipelineError, Step};
pub use config::{PostprocessRequest, PreprocessRequest, RunOptions, ToolConfig};
pub use layout::{FrameNaming, FrameScan};
pub use command::ToolCommand;
pub use runner::{CommandRunner, DryRunRunner, SystemRunner};
pub use stats::RunReport;
pub use preprocess::preprocess;
pub use postprocess::postprocess;

fn runner_for(options: &RunOptions) -> Box<dyn CommandRunner> {
    if options.dry_run {
        Box::new(DryRunRunner::default())
    } else {
        Box::new(SystemRunner)
    }
}

/// Run the preprocessor with the runner selected by `options`.
pub fn run_preprocess(
    request: &PreprocessRequest,
    options: &RunOptions,
) -> Result<RunReport, PipelineError> {
    let mut runner = runner_for(options);
    preprocess(request, &options.tool, runner.as_mut())
}

/// Run the postprocessor with the runner selected by `options`.
pub fn run_postprocess(
    request: &PostprocessRequest,
    options: &RunOptions,
) -> Result<RunReport, PipelineError> {
    let mut runner = runner_for(options);
    postprocess(request, &options.tool, runner.as_mut())
}
