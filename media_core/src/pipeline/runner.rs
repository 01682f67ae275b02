use std::process::Stdio;
use std::time::Instant;

use log::{debug, info};

use crate::pipeline::command::ToolCommand;
use crate::pipeline::stats::RunReport;
use crate::pipeline::types::PipelineError;

/// Executes tool commands. Each call blocks until the command finishes.
pub trait CommandRunner {
    fn run(&mut self, command: &ToolCommand) -> Result<(), PipelineError>;

    /// True when commands are only printed; callers then skip directory creation too.
    fn is_dry_run(&self) -> bool {
        false
    }
}

/// Runs commands as child processes, sharing this process's stdio so the
/// tool's own diagnostics reach the user.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, command: &ToolCommand) -> Result<(), PipelineError> {
        let status = command
            .to_command()
            .stdin(Stdio::null())
            .status()
            .map_err(|source| PipelineError::Spawn {
                program: command.program.to_string_lossy().into_owned(),
                source,
            })?;

        debug!("{} exited with {}", command.step.name(), status);

        if status.success() {
            Ok(())
        } else {
            Err(PipelineError::ToolFailed {
                step: command.step.name(),
                code: status.code(),
            })
        }
    }
}

/// Prints each command instead of running it.
#[derive(Debug, Default)]
pub struct DryRunRunner {
    pub commands: Vec<String>,
}

impl CommandRunner for DryRunRunner {
    fn run(&mut self, command: &ToolCommand) -> Result<(), PipelineError> {
        println!("{}", command);
        self.commands.push(command.to_string());
        Ok(())
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}

/// Run one step, logging it and recording its duration on success.
pub fn run_step(
    runner: &mut dyn CommandRunner,
    command: &ToolCommand,
    report: &mut RunReport,
) -> Result<(), PipelineError> {
    info!("Running {}: {}", command.step.name(), command);
    let started = Instant::now();
    runner.run(command)?;
    let elapsed = started.elapsed();
    info!("Finished {} in {:.2?}", command.step.name(), elapsed);
    report.add_step(command.step, elapsed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::command;
    use crate::pipeline::config::ToolConfig;
    use std::path::Path;

    #[test]
    fn test_system_runner_missing_program() {
        let tool = ToolConfig {
            program: "definitely-not-a-real-media-tool-7f3a".to_string(),
            extra_input_args: Vec::new(),
        };
        let cmd = command::extract_audio(&tool, Path::new("in.mp4"), Path::new("audio"));

        let err = SystemRunner.run(&cmd).unwrap_err();
        assert!(matches!(err, PipelineError::Spawn { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_propagates_exit_code() {
        let tool = ToolConfig {
            program: "sh".to_string(),
            extra_input_args: vec!["-c".to_string(), "exit 7".to_string()],
        };
        let cmd = command::extract_audio(&tool, Path::new("in.mp4"), Path::new("audio"));

        let err = SystemRunner.run(&cmd).unwrap_err();
        match err {
            PipelineError::ToolFailed { step, code } => {
                assert_eq!(step, "audio extraction");
                assert_eq!(code, Some(7));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_success() {
        let tool = ToolConfig {
            program: "true".to_string(),
            extra_input_args: Vec::new(),
        };
        let cmd = command::extract_audio(&tool, Path::new("in.mp4"), Path::new("audio"));
        assert!(SystemRunner.run(&cmd).is_ok());
    }

    #[test]
    fn test_dry_run_records_commands() {
        let mut runner = DryRunRunner::default();
        let cmd = command::extract_audio(&ToolConfig::default(), Path::new("in.mp4"), Path::new("audio"));
        runner.run(&cmd).unwrap();
        assert!(runner.is_dry_run());
        assert_eq!(runner.commands, vec!["ffmpeg -i in.mp4 audio/audio.aac"]);
    }
}
