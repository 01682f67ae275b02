//! Options and process plumbing shared by both binaries.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use log::{error, info};
use media_core::{PipelineError, RunOptions, RunReport, ToolConfig};

#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// JSON file overriding the media tool program and extra arguments
    #[arg(long, value_name = "FILE")]
    pub tool_config: Option<PathBuf>,

    /// Print the commands that would run without creating or running anything
    #[arg(long)]
    pub dry_run: bool,
}

impl CommonArgs {
    pub fn run_options(&self) -> Result<RunOptions, PipelineError> {
        Ok(RunOptions {
            tool: ToolConfig::load(self.tool_config.as_deref())?,
            dry_run: self.dry_run,
        })
    }
}

/// Log at `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
}

pub fn exit_with(result: Result<RunReport, PipelineError>) -> ExitCode {
    match result {
        Ok(report) => {
            info!("Done: {}", report.summary());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
