//! Deterministic artifact keys.
//!
//! Every artifact a segment produces lives at a key derived only from the
//! video name and the segment index, so re-running a stage overwrites its
//! previous output instead of accumulating copies.

/// Key prefixes for the three artifact families.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    /// Clips and transcripts
    staging_prefix: String,
    /// Thumbnails and summaries
    summary_prefix: String,
    /// Finished reports
    report_prefix: String,
}

impl ArtifactLayout {
    pub fn new(
        staging_prefix: impl Into<String>,
        summary_prefix: impl Into<String>,
        report_prefix: impl Into<String>,
    ) -> Self {
        Self {
            staging_prefix: normalize(staging_prefix.into()),
            summary_prefix: normalize(summary_prefix.into()),
            report_prefix: normalize(report_prefix.into()),
        }
    }

    pub fn clip_file_name(index: u64) -> String {
        format!("{}.mp4", index)
    }

    pub fn thumbnail_file_name(index: u64) -> String {
        format!("{}.jpg", index)
    }

    /// `{staging}/{video}/{index}.mp4`
    pub fn clip_key(&self, video_name: &str, index: u64) -> String {
        format!("{}/{}/{}", self.staging_prefix, video_name, Self::clip_file_name(index))
    }

    /// `{staging}/{video}/{index}.json`
    pub fn transcript_key(&self, video_name: &str, index: u64) -> String {
        format!("{}/{}/{}.json", self.staging_prefix, video_name, index)
    }

    /// `{summary}/{video}/{index}.jpg`
    pub fn thumbnail_key(&self, video_name: &str, index: u64) -> String {
        format!(
            "{}/{}/{}",
            self.summary_prefix,
            video_name,
            Self::thumbnail_file_name(index)
        )
    }

    /// `{summary}/{video}/{index}.txt`
    pub fn summary_key(&self, video_name: &str, index: u64) -> String {
        format!("{}/{}/{}.txt", self.summary_prefix, video_name, index)
    }

    /// `{report}/{video}.pdf`
    pub fn report_key(&self, video_name: &str) -> String {
        format!("{}/{}.pdf", self.report_prefix, video_name)
    }

    /// `s3://{bucket}/{clip key}`, the media URI handed to the transcription service.
    pub fn clip_uri(&self, bucket: &str, video_name: &str, index: u64) -> String {
        format!("s3://{}/{}", bucket, self.clip_key(video_name, index))
    }
}

fn normalize(prefix: String) -> String {
    prefix.trim_end_matches('/').to_string()
}
