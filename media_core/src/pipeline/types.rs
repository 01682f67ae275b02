use std::io;
use std::path::PathBuf;

/// Pipeline error types
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{step} failed with {}", describe_code(.code))]
    ToolFailed {
        step: &'static str,
        code: Option<i32>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PipelineError {
    /// Process exit code for this error.
    ///
    /// A tool that exited with a usable status passes it through unchanged;
    /// everything else (signals, out-of-range codes, local failures) maps to 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::ToolFailed { code: Some(code), .. } if (1..=255).contains(code) => {
                *code as u8
            }
            _ => 1,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// External tool steps, in the order the two programs run them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ExtractAudio,
    ExtractFrames,
    AssembleFrames,
    MuxAudio,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::ExtractAudio => "audio extraction",
            Step::ExtractFrames => "frame extraction",
            Step::AssembleFrames => "frame assembly",
            Step::MuxAudio => "audio mux",
        }
    }
}
