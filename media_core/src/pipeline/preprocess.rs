//! Split a video into `audio.aac` and a numbered frame sequence.

use log::info;

use crate::pipeline::command;
use crate::pipeline::config::{PreprocessRequest, ToolConfig};
use crate::pipeline::layout;
use crate::pipeline::runner::{run_step, CommandRunner};
use crate::pipeline::stats::RunReport;
use crate::pipeline::types::PipelineError;

/// Create the output directories, then extract the audio track and every frame.
///
/// Stops at the first failing step; files already written are left in place.
pub fn preprocess(
    request: &PreprocessRequest,
    tool: &ToolConfig,
    runner: &mut dyn CommandRunner,
) -> Result<RunReport, PipelineError> {
    let mut report = RunReport::new();

    let input_video = layout::require_path(&request.input_video, "input video")?;
    let audio_dir = layout::require_path(&request.output_audio, "audio output directory")?;
    let images_dir = layout::require_path(&request.output_images, "image output directory")?;

    if runner.is_dry_run() {
        info!(
            "[dry run] would create {} and {}",
            audio_dir.display(),
            images_dir.display()
        );
    } else {
        layout::ensure_dir(audio_dir)?;
        layout::ensure_dir(images_dir)?;
    }

    run_step(
        runner,
        &command::extract_audio(tool, input_video, audio_dir),
        &mut report,
    )?;
    run_step(
        runner,
        &command::extract_frames(tool, input_video, images_dir),
        &mut report,
    )?;

    report.finalize();
    info!(
        "Preprocessed {} into {} and {}",
        input_video.display(),
        layout::audio_file(audio_dir).display(),
        images_dir.display()
    );
    Ok(report)
}
