//! Thumbnail extraction.

use std::path::Path;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// FFmpeg filter that picks the most representative frame of a batch.
pub const THUMBNAIL_FILTER: &str = "thumbnail";

/// Build the single-frame thumbnail command.
pub fn thumbnail_command(video_path: &Path, output_path: &Path) -> FfmpegCommand {
    FfmpegCommand::new(video_path, output_path)
        .video_filter(THUMBNAIL_FILTER)
        .single_frame()
        .log_level("error")
}

/// Extract one representative frame of a clip as an image.
pub async fn extract_thumbnail(
    runner: &FfmpegRunner,
    video_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> MediaResult<()> {
    let video_path = video_path.as_ref();

    if !video_path.exists() {
        return Err(MediaError::FileNotFound(video_path.to_path_buf()));
    }

    runner
        .run(&thumbnail_command(video_path, output_path.as_ref()))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_command() {
        let args = thumbnail_command(Path::new("0.mp4"), Path::new("0.jpg")).build_args();
        assert!(args.windows(2).any(|w| w[0] == "-vf" && w[1] == "thumbnail"));
        assert!(args.windows(2).any(|w| w[0] == "-frames:v" && w[1] == "1"));
        assert_eq!(args.last().unwrap(), "0.jpg");
    }
}
