pub mod pipeline;

pub use pipeline::{
    run_postprocess, run_preprocess, PipelineError, PostprocessRequest, PreprocessRequest,
    RunOptions, RunReport, ToolConfig,
};
