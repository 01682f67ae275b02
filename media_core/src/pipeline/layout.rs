//! On-disk layout shared by the preprocessor and the postprocessor.
//!
//! The frame file naming and the audio file name are the only contract between
//! the two programs, so every path either program touches is derived here.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::pipeline::types::PipelineError;

/// Audio track written by the preprocessor and read by the postprocessor.
pub const AUDIO_FILE_NAME: &str = "audio.aac";

/// Intermediate video holding the re-encoded frames without audio.
pub const SILENT_VIDEO_FILE_NAME: &str = "video_without_audio.mp4";

/// Base name used for the final video when none is given.
pub const DEFAULT_VIDEO_NAME: &str = "video";

/// Suffix appended to the base name of the final video.
pub const FINAL_VIDEO_SUFFIX: &str = "_processed.mp4";

/// Frame rate used when reassembling frames.
pub const FRAME_RATE: u32 = 30;

/// Naming scheme for extracted frame images: `{index:05}_video.jpg`, 1-based.
pub struct FrameNaming;

impl FrameNaming {
    pub const INDEX_WIDTH: usize = 5;
    pub const SUFFIX: &'static str = "_video.jpg";
    pub const FIRST_INDEX: u32 = 1;

    /// printf-style pattern understood by the tool's image sequence muxer/demuxer.
    pub fn tool_pattern() -> String {
        format!("%0{}d{}", Self::INDEX_WIDTH, Self::SUFFIX)
    }

    pub fn file_name(index: u32) -> String {
        format!("{:0width$}{}", index, Self::SUFFIX, width = Self::INDEX_WIDTH)
    }

    /// Parse a frame file name back into its index.
    ///
    /// Only canonical names are accepted, i.e. names `file_name` would produce.
    pub fn parse_index(file_name: &str) -> Option<u32> {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = PATTERN.get_or_init(|| {
            Regex::new(r"^(\d{5,})_video\.jpg$").expect("frame name pattern is valid")
        });

        let caps = pattern.captures(file_name)?;
        let index: u32 = caps[1].parse().ok()?;
        if index >= Self::FIRST_INDEX && Self::file_name(index) == file_name {
            Some(index)
        } else {
            None
        }
    }
}

/// Summary of the frame images present in a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameScan {
    pub count: usize,
    pub first: Option<u32>,
    pub last: Option<u32>,
    /// Number of indices between 1 and `last` with no matching file.
    pub missing_count: u64,
    pub first_missing: Option<u32>,
}

impl FrameScan {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// True when frames run from 1 to `last` with no gaps.
    pub fn is_contiguous(&self) -> bool {
        self.count > 0 && self.first == Some(FrameNaming::FIRST_INDEX) && self.missing_count == 0
    }
}

/// Scan `dir` for frame images named by [`FrameNaming`].
pub fn scan_frames(dir: &Path) -> io::Result<FrameScan> {
    let mut indices: Vec<u32> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| {
            entry
                .file_name()
                .to_str()
                .and_then(FrameNaming::parse_index)
        })
        .collect();
    indices.sort_unstable();

    let (first, last) = match (indices.first(), indices.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Ok(FrameScan::default()),
    };

    // Gaps are counted from adjacent indices; nothing is stored per missing frame.
    let mut missing_count = u64::from(first.saturating_sub(FrameNaming::FIRST_INDEX));
    let mut first_missing = (first > FrameNaming::FIRST_INDEX).then_some(FrameNaming::FIRST_INDEX);
    for pair in indices.windows(2) {
        let gap = pair[1].saturating_sub(pair[0]).saturating_sub(1);
        if gap > 0 {
            missing_count += u64::from(gap);
            first_missing = first_missing.or_else(|| pair[0].checked_add(1));
        }
    }

    Ok(FrameScan {
        count: indices.len(),
        first: Some(first),
        last: Some(last),
        missing_count,
        first_missing,
    })
}

/// Create `dir` and any missing parents. Succeeds if it already exists.
pub fn ensure_dir(dir: &Path) -> Result<(), PipelineError> {
    fs::create_dir_all(dir).map_err(|source| PipelineError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Reject an empty user-supplied path. Other paths are used exactly as given.
pub fn require_path<'a>(path: &'a Path, what: &str) -> Result<&'a Path, PipelineError> {
    if path.as_os_str().is_empty() {
        return Err(PipelineError::InvalidInput(format!("{} cannot be empty", what)));
    }
    Ok(path)
}

pub fn audio_file(audio_dir: &Path) -> PathBuf {
    audio_dir.join(AUDIO_FILE_NAME)
}

pub fn frame_pattern(images_dir: &Path) -> PathBuf {
    images_dir.join(FrameNaming::tool_pattern())
}

pub fn silent_video(output_dir: &Path) -> PathBuf {
    output_dir.join(SILENT_VIDEO_FILE_NAME)
}

/// Base name for the final video: the caller's choice unless missing or empty.
pub fn video_base_name(video_name: Option<&str>) -> &str {
    video_name
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_VIDEO_NAME)
}

pub fn final_video(output_dir: &Path, base_name: &str) -> PathBuf {
    output_dir.join(format!("{}{}", base_name, FINAL_VIDEO_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn test_frame_file_name() {
        assert_eq!(FrameNaming::file_name(1), "00001_video.jpg");
        assert_eq!(FrameNaming::file_name(42), "00042_video.jpg");
        assert_eq!(FrameNaming::file_name(99999), "99999_video.jpg");
        assert_eq!(FrameNaming::tool_pattern(), "%05d_video.jpg");
    }

    #[test]
    fn test_parse_frame_index() {
        assert_eq!(FrameNaming::parse_index("00001_video.jpg"), Some(1));
        assert_eq!(FrameNaming::parse_index("01234_video.jpg"), Some(1234));
        assert_eq!(FrameNaming::parse_index("123456_video.jpg"), Some(123456));

        assert_eq!(FrameNaming::parse_index("1_video.jpg"), None);
        assert_eq!(FrameNaming::parse_index("0001_video.jpg"), None);
        assert_eq!(FrameNaming::parse_index("000001_video.jpg"), None);
        assert_eq!(FrameNaming::parse_index("00000_video.jpg"), None);
        assert_eq!(FrameNaming::parse_index("00001_video.png"), None);
        assert_eq!(FrameNaming::parse_index("00001_frame.jpg"), None);
        assert_eq!(FrameNaming::parse_index(""), None);
    }

    #[test]
    fn test_scan_frames_contiguous() {
        let dir = tempfile::tempdir().unwrap();
        for index in 1..=3 {
            File::create(dir.path().join(FrameNaming::file_name(index))).unwrap();
        }
        File::create(dir.path().join("notes.txt")).unwrap();

        let scan = scan_frames(dir.path()).unwrap();
        assert_eq!(scan.count, 3);
        assert_eq!(scan.first, Some(1));
        assert_eq!(scan.last, Some(3));
        assert_eq!(scan.missing_count, 0);
        assert_eq!(scan.first_missing, None);
        assert!(scan.is_contiguous());
    }

    #[test]
    fn test_scan_frames_reports_gaps() {
        let dir = tempfile::tempdir().unwrap();
        for index in [2, 3, 6] {
            File::create(dir.path().join(FrameNaming::file_name(index))).unwrap();
        }

        let scan = scan_frames(dir.path()).unwrap();
        assert_eq!(scan.count, 3);
        assert_eq!(scan.missing_count, 3);
        assert_eq!(scan.first_missing, Some(1));
        assert!(!scan.is_contiguous());
    }

    #[test]
    fn test_scan_frames_gap_after_first_frame() {
        let dir = tempfile::tempdir().unwrap();
        for index in [1, 2, 5] {
            File::create(dir.path().join(FrameNaming::file_name(index))).unwrap();
        }

        let scan = scan_frames(dir.path()).unwrap();
        assert_eq!(scan.missing_count, 2);
        assert_eq!(scan.first_missing, Some(3));
    }

    #[test]
    fn test_scan_frames_stray_max_index() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("00001_video.jpg")).unwrap();
        File::create(dir.path().join("4294967295_video.jpg")).unwrap();

        let scan = scan_frames(dir.path()).unwrap();
        assert_eq!(scan.count, 2);
        assert_eq!(scan.last, Some(u32::MAX));
        assert_eq!(scan.missing_count, u64::from(u32::MAX) - 2);
        assert_eq!(scan.first_missing, Some(2));
        assert!(!scan.is_contiguous());
    }

    #[test]
    fn test_scan_frames_only_max_index() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("4294967295_video.jpg")).unwrap();

        let scan = scan_frames(dir.path()).unwrap();
        assert_eq!(scan.missing_count, u64::from(u32::MAX) - 1);
        assert_eq!(scan.first_missing, Some(1));
    }

    #[test]
    fn test_scan_frames_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let scan = scan_frames(dir.path()).unwrap();
        assert!(scan.is_empty());
        assert!(!scan.is_contiguous());
    }

    #[test]
    fn test_scan_frames_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_frames(&dir.path().join("absent")).is_err());
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_ensure_dir_over_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("taken");
        File::create(&file).unwrap();

        let err = ensure_dir(&file.join("sub")).unwrap_err();
        assert!(matches!(err, PipelineError::CreateDir { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_output_names() {
        let out = Path::new("out");
        assert_eq!(silent_video(out), Path::new("out/video_without_audio.mp4"));
        assert_eq!(
            final_video(out, video_base_name(None)),
            Path::new("out/video_processed.mp4")
        );
        assert_eq!(
            final_video(out, video_base_name(Some("clip"))),
            Path::new("out/clip_processed.mp4")
        );
        assert_eq!(
            final_video(out, video_base_name(Some(""))),
            Path::new("out/video_processed.mp4")
        );
        assert_eq!(audio_file(Path::new("audio")), Path::new("audio/audio.aac"));
        assert_eq!(frame_pattern(Path::new("frames")), Path::new("frames/%05d_video.jpg"));
    }

    #[test]
    fn test_require_path_keeps_path_as_given() {
        assert_eq!(
            require_path(Path::new("link/../out"), "output dir").unwrap(),
            Path::new("link/../out")
        );
        assert_eq!(
            require_path(Path::new("./out//frames/"), "images dir").unwrap().as_os_str(),
            "./out//frames/"
        );
        assert!(matches!(
            require_path(Path::new(""), "images dir"),
            Err(PipelineError::InvalidInput(_))
        ));
    }
}
