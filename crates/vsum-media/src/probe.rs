//! FFprobe stream manifest.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::command::stderr_tail;
use crate::error::{MediaError, MediaResult};

/// Which kinds of streams a media file carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamManifest {
    pub has_audio: bool,
    pub has_video: bool,
    pub stream_count: usize,
}

impl StreamManifest {
    /// Both an audio and a video stream are present.
    pub fn has_audio_and_video(&self) -> bool {
        self.has_audio && self.has_video
    }

    /// Parse the output of `ffprobe -print_format json -show_streams`.
    pub fn from_ffprobe_json(bytes: &[u8]) -> MediaResult<Self> {
        let probe: FfprobeOutput = serde_json::from_slice(bytes)?;

        let mut manifest = StreamManifest {
            stream_count: probe.streams.len(),
            ..Default::default()
        };
        for stream in &probe.streams {
            match stream.codec_type.as_deref() {
                Some("audio") => manifest.has_audio = true,
                Some("video") => manifest.has_video = true,
                _ => {}
            }
        }

        Ok(manifest)
    }
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
}

/// Probe a media file for its stream manifest.
pub async fn probe_streams(
    ffprobe: impl AsRef<Path>,
    path: impl AsRef<Path>,
) -> MediaResult<StreamManifest> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    let output = Command::new(ffprobe.as_ref())
        .args(["-v", "quiet", "-print_format", "json", "-show_streams"])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => MediaError::FfprobeNotFound,
            _ => MediaError::Io(e),
        })?;

    if !output.status.success() {
        return Err(MediaError::ffprobe_failed(
            "FFprobe failed",
            Some(stderr_tail(&output.stderr)),
        ));
    }

    StreamManifest::from_ffprobe_json(&output.stdout)
}
