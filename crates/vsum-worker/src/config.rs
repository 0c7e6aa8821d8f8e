//! Pipeline configuration.

use std::path::PathBuf;
use std::time::Duration;

use vsum_models::ArtifactLayout;

use crate::error::{WorkerError, WorkerResult};

/// Default lifetime of report links, in seconds.
pub const DEFAULT_PRESIGNED_URL_EXPIRATION_SECS: u64 = 3600;
/// Default report table name.
pub const DEFAULT_TABLE_NAME: &str = vsum_table::DEFAULT_TABLE_NAME;
/// Default scratch directory root.
pub const DEFAULT_WORK_DIR: &str = "/tmp";

/// Artifact key prefixes, each backed by an environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    /// Clips and transcripts.
    Staging,
    /// Thumbnails and summaries.
    Summary,
    /// Rendered reports.
    Report,
}

impl Prefix {
    pub fn env_var(&self) -> &'static str {
        match self {
            Prefix::Staging => "VIDEO_PROCESSING_STAGING_PREFIX",
            Prefix::Summary => "VIDEO_SUMMARY_FILES_PREFIX",
            Prefix::Report => "VIDEO_PDF_REPORT_FILES_PREFIX",
        }
    }
}

/// Configuration shared by all stage handlers.
///
/// Values only one handler uses are optional here and checked by the
/// accessor that handler calls.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub staging_prefix: Option<String>,
    pub summary_prefix: Option<String>,
    pub report_prefix: Option<String>,
    /// Lifetime of presigned report links
    pub presigned_url_expiration: Duration,
    /// Report table name
    pub table_name: String,
    pub bedrock_model_id: Option<String>,
    pub sns_topic_arn: Option<String>,
    pub rekognition_role_arn: Option<String>,
    pub state_machine_arn: Option<String>,
    /// Root for per-invocation scratch directories
    pub work_dir: PathBuf,
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> WorkerResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> WorkerResult<Self> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let presigned_url_expiration = match non_empty("PRESIGNED_URL_EXPIRATION") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                WorkerError::config_error(format!(
                    "PRESIGNED_URL_EXPIRATION must be a whole number of seconds, got {:?}",
                    raw
                ))
            })?,
            None => DEFAULT_PRESIGNED_URL_EXPIRATION_SECS,
        };

        Ok(Self {
            staging_prefix: non_empty(Prefix::Staging.env_var()),
            summary_prefix: non_empty(Prefix::Summary.env_var()),
            report_prefix: non_empty(Prefix::Report.env_var()),
            presigned_url_expiration: Duration::from_secs(presigned_url_expiration),
            table_name: non_empty("VIDEO_SUMMARY_TABLE")
                .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
            bedrock_model_id: non_empty("BEDROCK_MODEL_ID"),
            sns_topic_arn: non_empty("SNS_TOPIC_ARN"),
            rekognition_role_arn: non_empty("REKOGNITION_ROLE_ARN"),
            state_machine_arn: non_empty("STATE_MACHINE_VIDEO_PROCESSING_ARN"),
            work_dir: non_empty("WORKER_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_WORK_DIR)),
        })
    }

    fn prefix(&self, prefix: Prefix) -> Option<&str> {
        match prefix {
            Prefix::Staging => self.staging_prefix.as_deref(),
            Prefix::Summary => self.summary_prefix.as_deref(),
            Prefix::Report => self.report_prefix.as_deref(),
        }
    }

    /// Build the artifact layout, requiring the prefixes a handler writes or reads.
    ///
    /// Prefixes not listed in `required` are left empty.
    pub fn artifact_layout(&self, required: &[Prefix]) -> WorkerResult<ArtifactLayout> {
        for prefix in required {
            if self.prefix(*prefix).is_none() {
                return Err(WorkerError::config_error(format!(
                    "{} not set",
                    prefix.env_var()
                )));
            }
        }

        Ok(ArtifactLayout::new(
            self.prefix(Prefix::Staging).unwrap_or_default(),
            self.prefix(Prefix::Summary).unwrap_or_default(),
            self.prefix(Prefix::Report).unwrap_or_default(),
        ))
    }

    pub fn bedrock_model_id(&self) -> WorkerResult<&str> {
        require(&self.bedrock_model_id, "BEDROCK_MODEL_ID")
    }

    pub fn sns_topic_arn(&self) -> WorkerResult<&str> {
        require(&self.sns_topic_arn, "SNS_TOPIC_ARN")
    }

    pub fn rekognition_role_arn(&self) -> WorkerResult<&str> {
        require(&self.rekognition_role_arn, "REKOGNITION_ROLE_ARN")
    }

    pub fn state_machine_arn(&self) -> WorkerResult<&str> {
        require(&self.state_machine_arn, "STATE_MACHINE_VIDEO_PROCESSING_ARN")
    }
}

fn require<'a>(value: &'a Option<String>, name: &str) -> WorkerResult<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| WorkerError::config_error(format!("{} not set", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> WorkerResult<PipelineConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PipelineConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.presigned_url_expiration, Duration::from_secs(3600));
        assert_eq!(config.table_name, "VideoSummaryTable");
        assert_eq!(config.work_dir, PathBuf::from("/tmp"));
        assert!(config.bedrock_model_id().is_err());
    }

    #[test]
    fn test_layout_requires_listed_prefixes() {
        let config = config(&[("VIDEO_PROCESSING_STAGING_PREFIX", "staging")]).unwrap();

        let layout = config.artifact_layout(&[Prefix::Staging]).unwrap();
        assert_eq!(layout.clip_key("talk", 3), "staging/talk/3.mp4");

        let err = config
            .artifact_layout(&[Prefix::Staging, Prefix::Summary])
            .unwrap_err();
        assert!(err.to_string().contains("VIDEO_SUMMARY_FILES_PREFIX"));
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("PRESIGNED_URL_EXPIRATION", "600"),
            ("VIDEO_SUMMARY_TABLE", "Reports"),
            ("BEDROCK_MODEL_ID", "ai21.j2-ultra-v1"),
            ("WORKER_WORK_DIR", "/var/scratch"),
        ])
        .unwrap();
        assert_eq!(config.presigned_url_expiration, Duration::from_secs(600));
        assert_eq!(config.table_name, "Reports");
        assert_eq!(config.bedrock_model_id().unwrap(), "ai21.j2-ultra-v1");
        assert_eq!(config.work_dir, PathBuf::from("/var/scratch"));
    }

    #[test]
    fn test_bad_expiration() {
        assert!(config(&[("PRESIGNED_URL_EXPIRATION", "an hour")]).is_err());
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = config(&[("SNS_TOPIC_ARN", "  ")]).unwrap();
        assert!(config.sns_topic_arn().is_err());
    }
}
