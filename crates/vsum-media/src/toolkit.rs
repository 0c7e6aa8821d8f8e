//! The media operations the clip stage depends on, behind one port.

use async_trait::async_trait;
use std::path::Path;

use crate::clip::trim_segment;
use crate::command::{FfmpegBinaries, FfmpegRunner};
use crate::error::MediaResult;
use crate::probe::{probe_streams, StreamManifest};
use crate::thumbnail::extract_thumbnail;

/// Trim, probe and thumbnail operations on local files.
#[async_trait]
pub trait MediaToolkit: Send + Sync {
    /// Stream-copy `[start, start + duration)` of `input` into `output`.
    async fn trim_clip(
        &self,
        input: &Path,
        output: &Path,
        start_secs: f64,
        duration_secs: f64,
    ) -> MediaResult<()>;

    async fn probe_streams(&self, path: &Path) -> MediaResult<StreamManifest>;

    async fn extract_thumbnail(&self, video: &Path, output: &Path) -> MediaResult<()>;
}

/// `MediaToolkit` backed by the `ffmpeg` and `ffprobe` executables.
#[derive(Debug, Clone)]
pub struct FfmpegToolkit {
    binaries: FfmpegBinaries,
    runner: FfmpegRunner,
}

impl FfmpegToolkit {
    pub fn new(binaries: FfmpegBinaries) -> Self {
        let runner = FfmpegRunner::new(binaries.ffmpeg.clone());
        Self { binaries, runner }
    }

    /// Resolve the executables from the environment.
    pub fn from_env() -> MediaResult<Self> {
        Ok(Self::new(FfmpegBinaries::from_env()?))
    }

    pub fn binaries(&self) -> &FfmpegBinaries {
        &self.binaries
    }
}

#[async_trait]
impl MediaToolkit for FfmpegToolkit {
    async fn trim_clip(
        &self,
        input: &Path,
        output: &Path,
        start_secs: f64,
        duration_secs: f64,
    ) -> MediaResult<()> {
        trim_segment(&self.runner, input, output, start_secs, duration_secs).await
    }

    async fn probe_streams(&self, path: &Path) -> MediaResult<StreamManifest> {
        probe_streams(&self.binaries.ffprobe, path).await
    }

    async fn extract_thumbnail(&self, video: &Path, output: &Path) -> MediaResult<()> {
        extract_thumbnail(&self.runner, video, output).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_uses_configured_ffmpeg() {
        let toolkit = FfmpegToolkit::new(FfmpegBinaries::new("/opt/bin/ffmpeg", "/opt/bin/ffprobe"));
        assert_eq!(toolkit.binaries().ffprobe, Path::new("/opt/bin/ffprobe"));
    }

    #[tokio::test]
    async fn test_probe_missing_clip() {
        let dir = tempfile::tempdir().unwrap();
        let toolkit = FfmpegToolkit::new(FfmpegBinaries::new("ffmpeg", "ffprobe"));
        assert!(toolkit
            .probe_streams(&dir.path().join("nope.mp4"))
            .await
            .is_err());
    }
}
