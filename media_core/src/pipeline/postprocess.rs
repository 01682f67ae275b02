//! Reassemble a frame sequence and an audio track into one video.

use std::path::Path;

use log::{info, warn};

use crate::pipeline::command;
use crate::pipeline::config::{PostprocessRequest, ToolConfig};
use crate::pipeline::layout::{self, FrameNaming};
use crate::pipeline::runner::{run_step, CommandRunner};
use crate::pipeline::stats::RunReport;
use crate::pipeline::types::PipelineError;

/// Encode the frames into the silent intermediate video, then mux in the audio.
///
/// The mux step never runs if encoding fails. The intermediate video is kept.
pub fn postprocess(
    request: &PostprocessRequest,
    tool: &ToolConfig,
    runner: &mut dyn CommandRunner,
) -> Result<RunReport, PipelineError> {
    let mut report = RunReport::new();

    let images_dir = layout::require_path(&request.images_dir, "images directory")?;
    let audio_dir = layout::require_path(&request.input_audio, "audio directory")?;
    let output_dir = layout::require_path(&request.output_dir, "output directory")?;

    if runner.is_dry_run() {
        info!("[dry run] would create {}", output_dir.display());
    } else {
        layout::ensure_dir(output_dir)?;
    }

    log_frame_scan(images_dir);

    run_step(
        runner,
        &command::assemble_frames(tool, images_dir, output_dir),
        &mut report,
    )?;

    let base_name = layout::video_base_name(request.video_name.as_deref());
    run_step(
        runner,
        &command::mux_audio(tool, output_dir, audio_dir, base_name),
        &mut report,
    )?;

    report.finalize();
    info!(
        "Wrote {}",
        layout::final_video(output_dir, base_name).display()
    );
    Ok(report)
}

// Diagnostics only: the encoder decides whether the frames are usable.
fn log_frame_scan(images_dir: &Path) {
    match layout::scan_frames(images_dir) {
        Ok(scan) if scan.is_empty() => warn!(
            "No frames matching {} found in {}",
            FrameNaming::tool_pattern(),
            images_dir.display()
        ),
        Ok(scan) if scan.is_contiguous() => {
            info!("Found {} frames in {}", scan.count, images_dir.display())
        }
        Ok(scan) => warn!(
            "Found {} frames in {} but {} indices are missing (first missing: {})",
            scan.count,
            images_dir.display(),
            scan.missing_count,
            scan.first_missing
                .map(FrameNaming::file_name)
                .unwrap_or_default()
        ),
        Err(e) => warn!("Unable to read {}: {}", images_dir.display(), e),
    }
}
