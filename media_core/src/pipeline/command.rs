//! Argument-vector builders for every external tool invocation.
//!
//! Paths are passed as discrete arguments; nothing here goes through a shell.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;

use crate::pipeline::config::ToolConfig;
use crate::pipeline::layout::{self, FRAME_RATE};
use crate::pipeline::types::Step;

/// One external tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCommand {
    pub step: Step,
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl ToolCommand {
    fn new(step: Step, tool: &ToolConfig) -> Self {
        Self {
            step,
            program: OsString::from(&tool.program),
            args: tool.extra_input_args.iter().map(OsString::from).collect(),
        }
    }

    fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn to_command(&self) -> std::process::Command {
        let mut cmd = std::process::Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {:?}", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// `-i <video> <audio_dir>/audio.aac`
pub fn extract_audio(tool: &ToolConfig, input_video: &Path, audio_dir: &Path) -> ToolCommand {
    ToolCommand::new(Step::ExtractAudio, tool)
        .arg("-i")
        .arg(input_video)
        .arg(layout::audio_file(audio_dir))
}

/// `-i <video> <images_dir>/%05d_video.jpg -hide_banner`
pub fn extract_frames(tool: &ToolConfig, input_video: &Path, images_dir: &Path) -> ToolCommand {
    ToolCommand::new(Step::ExtractFrames, tool)
        .arg("-i")
        .arg(input_video)
        .arg(layout::frame_pattern(images_dir))
        .arg("-hide_banner")
}

/// Encode the numbered frames into the silent intermediate video.
pub fn assemble_frames(tool: &ToolConfig, images_dir: &Path, output_dir: &Path) -> ToolCommand {
    ToolCommand::new(Step::AssembleFrames, tool)
        .arg("-framerate")
        .arg(FRAME_RATE.to_string())
        .arg("-i")
        .arg(layout::frame_pattern(images_dir))
        .args([
            "-c:v", "libx264",
            "-profile:v", "high",
            "-crf", "20",
            "-pix_fmt", "yuv420p",
            "-y",
        ])
        .arg(layout::silent_video(output_dir))
}

/// Stream-copy the silent video and the audio track into the final file.
pub fn mux_audio(
    tool: &ToolConfig,
    output_dir: &Path,
    audio_dir: &Path,
    base_name: &str,
) -> ToolCommand {
    ToolCommand::new(Step::MuxAudio, tool)
        .arg("-i")
        .arg(layout::silent_video(output_dir))
        .arg("-i")
        .arg(layout::audio_file(audio_dir))
        .args([
            "-map", "0:0",
            "-map", "1:0",
            "-vcodec", "copy",
            "-acodec", "copy",
            "-y",
        ])
        .arg(layout::final_video(output_dir, base_name))
}
