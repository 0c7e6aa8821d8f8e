//! FFmpeg command builder and runner.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::error::{MediaError, MediaResult};

/// Directory where the Lambda layer installs static FFmpeg builds.
const LAYER_BIN_DIR: &str = "/opt/bin";

/// Maximum number of stderr bytes kept in error messages.
const STDERR_TAIL_BYTES: usize = 2048;

/// Resolved paths of the `ffmpeg` and `ffprobe` executables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfmpegBinaries {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
}

impl FfmpegBinaries {
    /// Use explicit executable paths.
    pub fn new(ffmpeg: impl Into<PathBuf>, ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    /// Resolve executables from `FFMPEG_PATH`/`FFPROBE_PATH`, the layer
    /// directory, then `PATH`, in that order.
    pub fn from_env() -> MediaResult<Self> {
        let ffmpeg = resolve("FFMPEG_PATH", "ffmpeg").ok_or(MediaError::FfmpegNotFound)?;
        let ffprobe = resolve("FFPROBE_PATH", "ffprobe").ok_or(MediaError::FfprobeNotFound)?;
        Ok(Self { ffmpeg, ffprobe })
    }
}

fn resolve(env_var: &str, name: &str) -> Option<PathBuf> {
    if let Ok(path) = std::env::var(env_var) {
        return Some(PathBuf::from(path));
    }

    let layer = Path::new(LAYER_BIN_DIR).join(name);
    if layer.exists() {
        return Some(layer);
    }

    which::which(name).ok()
}

/// Builder for FFmpeg commands.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    /// Input file path
    input: PathBuf,
    /// Output file path
    output: PathBuf,
    /// Output arguments (after -i)
    output_args: Vec<String>,
    /// Whether to overwrite output
    overwrite: bool,
    /// Log level
    log_level: String,
}

impl FfmpegCommand {
    /// Create a new FFmpeg command.
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            output_args: Vec::new(),
            overwrite: true,
            log_level: "error".to_string(),
        }
    }

    /// Add output arguments (after -i).
    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    /// Start the output at an offset into the input (decoded seek, after -i).
    pub fn start_at(self, seconds: f64) -> Self {
        self.output_arg("-ss").output_arg(format_seconds(seconds))
    }

    /// Limit the output duration.
    pub fn duration(self, seconds: f64) -> Self {
        self.output_arg("-t").output_arg(format_seconds(seconds))
    }

    /// Copy audio and video streams without re-encoding.
    pub fn codec_copy(self) -> Self {
        self.output_arg("-c:v")
            .output_arg("copy")
            .output_arg("-c:a")
            .output_arg("copy")
    }

    /// Set video filter.
    pub fn video_filter(self, filter: impl Into<String>) -> Self {
        self.output_arg("-vf").output_arg(filter)
    }

    /// Extract single frame.
    pub fn single_frame(self) -> Self {
        self.output_arg("-frames:v").output_arg("1")
    }

    /// Set log level.
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Build the command arguments.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.overwrite {
            args.push("-y".to_string());
        }

        args.push("-v".to_string());
        args.push(self.log_level.clone());

        args.push("-i".to_string());
        args.push(self.input.to_string_lossy().to_string());

        args.extend(self.output_args.iter().cloned());

        args.push(self.output.to_string_lossy().to_string());

        args
    }
}

/// Millisecond-precision seconds, the resolution the segment timestamps carry.
pub fn format_seconds(seconds: f64) -> String {
    format!("{:.3}", seconds)
}

/// Runner for FFmpeg commands.
#[derive(Debug, Clone)]
pub struct FfmpegRunner {
    binary: PathBuf,
}

impl FfmpegRunner {
    /// Create a runner for the given `ffmpeg` executable.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Run an FFmpeg command to completion.
    pub async fn run(&self, cmd: &FfmpegCommand) -> MediaResult<()> {
        let args = cmd.build_args();
        debug!("Running FFmpeg: {} {}", self.binary.display(), args.join(" "));

        let output = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => MediaError::FfmpegNotFound,
                _ => MediaError::Io(e),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(MediaError::ffmpeg_failed(
                "FFmpeg exited with non-zero status",
                Some(stderr_tail(&output.stderr)),
                output.status.code(),
            ))
        }
    }
}

/// Last few kilobytes of a process's stderr, lossily decoded.
pub(crate) fn stderr_tail(stderr: &[u8]) -> String {
    let start = stderr.len().saturating_sub(STDERR_TAIL_BYTES);
    String::from_utf8_lossy(&stderr[start..]).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_command_layout() {
        let cmd = FfmpegCommand::new("/tmp/in.mp4", "/tmp/0.mp4")
            .start_at(1.5)
            .duration(2.25)
            .codec_copy();

        let args = cmd.build_args();
        let input_pos = args.iter().position(|a| a == "-i").unwrap();
        let seek_pos = args.iter().position(|a| a == "-ss").unwrap();

        assert!(seek_pos > input_pos, "seek is applied to the output");
        assert_eq!(args[seek_pos + 1], "1.500");
        assert!(args.windows(2).any(|w| w[0] == "-t" && w[1] == "2.250"));
        assert!(args.windows(2).any(|w| w[0] == "-c:v" && w[1] == "copy"));
        assert!(args.windows(2).any(|w| w[0] == "-c:a" && w[1] == "copy"));
        assert_eq!(args.last().unwrap(), "/tmp/0.mp4");
        assert_eq!(args[0], "-y");
    }

    #[test]
    fn test_format_seconds_keeps_millis() {
        assert_eq!(format_seconds(12345.0 / 1000.0), "12.345");
        assert_eq!(format_seconds(0.0), "0.000");
    }

    #[test]
    fn test_stderr_tail_truncates() {
        let noisy = vec![b'x'; STDERR_TAIL_BYTES * 2];
        assert_eq!(stderr_tail(&noisy).len(), STDERR_TAIL_BYTES);
    }

    #[tokio::test]
    async fn test_missing_binary_maps_to_not_found() {
        let runner = FfmpegRunner::new("/nonexistent/ffmpeg-binary");
        let cmd = FfmpegCommand::new("in.mp4", "out.mp4");
        let err = runner.run(&cmd).await.unwrap_err();
        assert!(matches!(err, MediaError::FfmpegNotFound));
    }
}
