use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::pipeline::types::PipelineError;

/// External tool settings, optionally loaded from a JSON file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Executable to invoke, resolved through the search path when bare.
    pub program: String,
    /// Arguments placed right after the program name in every invocation.
    pub extra_input_args: Vec<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_string(),
            extra_input_args: Vec::new(),
        }
    }
}

impl ToolConfig {
    pub fn from_json_str(data: &str) -> Result<Self, PipelineError> {
        Self::parse(data).map_err(PipelineError::Config)
    }

    pub fn from_file(path: &Path) -> Result<Self, PipelineError> {
        let data = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("Unable to read {}: {}", path.display(), e))
        })?;
        Self::parse(&data)
            .map_err(|e| PipelineError::Config(format!("{} in {}", e, path.display())))
    }

    fn parse(data: &str) -> Result<Self, String> {
        let mut deserializer = serde_json::Deserializer::from_str(data);
        let config: ToolConfig = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|e| format!("Error parsing tool config at '{}': {}", e.path(), e.inner()))?;
        deserializer
            .end()
            .map_err(|e| format!("Error parsing tool config: {}", e))?;

        if config.program.trim().is_empty() {
            return Err("program cannot be empty".to_string());
        }
        Ok(config)
    }

    /// Load from `path` when given, otherwise use the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, PipelineError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// Arguments of one preprocessor run.
#[derive(Debug, Clone)]
pub struct PreprocessRequest {
    pub input_video: PathBuf,
    pub output_audio: PathBuf,
    pub output_images: PathBuf,
}

/// Arguments of one postprocessor run.
#[derive(Debug, Clone)]
pub struct PostprocessRequest {
    /// Base name of the final video, without extension.
    pub video_name: Option<String>,
    pub images_dir: PathBuf,
    pub input_audio: PathBuf,
    pub output_dir: PathBuf,
}

/// Settings shared by both programs.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub tool: ToolConfig,
    /// Log the commands without creating directories or running anything.
    pub dry_run: bool,
}
