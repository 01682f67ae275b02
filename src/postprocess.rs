mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use media_core::{run_postprocess, PostprocessRequest};

use crate::cli::CommonArgs;

/// Stitch a directory of numbered frames and an audio track back into a video.
#[derive(Parser, Debug)]
#[command(name = "postprocess_video", version)]
struct Cli {
    /// Name of the output video (excluding ext); defaults to "video"
    #[arg(long, value_name = "NAME")]
    video: Option<String>,

    /// Input directory of frames to stitch together
    #[arg(long, value_name = "DIR")]
    images_dir: PathBuf,

    /// Input directory containing the audio file
    #[arg(long, value_name = "DIR")]
    input_audio: PathBuf,

    /// Output directory to save the stitched-together video into
    #[arg(long, value_name = "DIR")]
    output_dir: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

impl Cli {
    fn request(&self) -> PostprocessRequest {
        PostprocessRequest {
            video_name: self.video.clone(),
            images_dir: self.images_dir.clone(),
            input_audio: self.input_audio.clone(),
            output_dir: self.output_dir.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::init_logging();

    let result = cli
        .common
        .run_options()
        .and_then(|options| run_postprocess(&cli.request(), &options));
    cli::exit_with(result)
}
