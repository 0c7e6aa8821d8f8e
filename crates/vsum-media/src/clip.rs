//! Segment trimming.

use std::path::Path;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Build the stream-copy trim command for a time range.
pub fn trim_command(
    input: &Path,
    output: &Path,
    start_secs: f64,
    duration_secs: f64,
) -> MediaResult<FfmpegCommand> {
    if !start_secs.is_finite()
        || !duration_secs.is_finite()
        || start_secs < 0.0
        || duration_secs <= 0.0
    {
        return Err(MediaError::InvalidRange {
            start: start_secs,
            duration: duration_secs,
        });
    }

    Ok(FfmpegCommand::new(input, output)
        .start_at(start_secs)
        .duration(duration_secs)
        .codec_copy())
}

/// Cut a time range out of a video without re-encoding.
///
/// Audio and video are stream-copied, so the cut snaps to the nearest
/// keyframes FFmpeg can honour.
pub async fn trim_segment(
    runner: &FfmpegRunner,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    start_secs: f64,
    duration_secs: f64,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    info!(
        "Trimming segment: {} -> {} (start: {:.3}s, duration: {:.3}s)",
        input.display(),
        output.display(),
        start_secs,
        duration_secs
    );

    let cmd = trim_command(input, output, start_secs, duration_secs)?;
    runner.run(&cmd).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_duration() {
        let err = trim_command(Path::new("a.mp4"), Path::new("b.mp4"), 1.0, 0.0).unwrap_err();
        assert!(matches!(err, MediaError::InvalidRange { .. }));
    }

    #[test]
    fn test_rejects_negative_start() {
        assert!(trim_command(Path::new("a.mp4"), Path::new("b.mp4"), -0.5, 2.0).is_err());
    }

    #[test]
    fn test_command_uses_stream_copy() {
        let args = trim_command(Path::new("a.mp4"), Path::new("0.mp4"), 0.0, 4.2)
            .unwrap()
            .build_args();
        assert!(args.contains(&"copy".to_string()));
        assert!(args.windows(2).any(|w| w[0] == "-ss" && w[1] == "0.000"));
        assert!(args.windows(2).any(|w| w[0] == "-t" && w[1] == "4.200"));
    }

    #[tokio::test]
    async fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let runner = FfmpegRunner::new("ffmpeg");
        let err = trim_segment(
            &runner,
            dir.path().join("missing.mp4"),
            dir.path().join("0.mp4"),
            0.0,
            1.0,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }
}
