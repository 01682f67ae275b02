mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use media_core::{run_preprocess, PreprocessRequest};

use crate::cli::CommonArgs;

/// Split a video into an audio track and a numbered sequence of frame images.
#[derive(Parser, Debug)]
#[command(name = "preprocess_video", version)]
struct Cli {
    /// Path to the input video file (include ext)
    #[arg(long, value_name = "PATH")]
    input_video: PathBuf,

    /// Folder to store the audio clip in
    #[arg(long, value_name = "DIR")]
    output_audio: PathBuf,

    /// Folder to store the output frames in
    #[arg(long, value_name = "DIR")]
    output_images: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

impl Cli {
    fn request(&self) -> PreprocessRequest {
        PreprocessRequest {
            input_video: self.input_video.clone(),
            output_audio: self.output_audio.clone(),
            output_images: self.output_images.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::init_logging();

    let result = cli
        .common
        .run_options()
        .and_then(|options| run_preprocess(&cli.request(), &options));
    cli::exit_with(result)
}
