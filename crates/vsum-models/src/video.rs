//! Source video location.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Bucket/key pair identifying an object in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Object {
    #[serde(rename = "Bucket")]
    pub bucket: String,
    #[serde(rename = "Name")]
    pub name: String,
}

/// Source video reference, shaped the way the segmentation service reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRef {
    #[serde(rename = "S3Object")]
    pub s3_object: S3Object,
}

impl VideoRef {
    /// Create a reference from bucket and key.
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            s3_object: S3Object {
                bucket: bucket.into(),
                name: key.into(),
            },
        }
    }

    /// Bucket holding the video and every derived artifact.
    pub fn bucket(&self) -> &str {
        &self.s3_object.bucket
    }

    /// Object key of the source video.
    pub fn key(&self) -> &str {
        &self.s3_object.name
    }

    /// File component of the key (`uploads/talk.mp4` -> `talk.mp4`).
    pub fn file_name(&self) -> ModelResult<&str> {
        let file = self
            .key()
            .rsplit('/')
            .next()
            .map(str::trim)
            .unwrap_or_default();
        if file.is_empty() {
            return Err(ModelError::invalid_key(self.key()));
        }
        Ok(file)
    }

    /// Video name stem shared by every artifact path (`talk.v2.mp4` -> `talk`).
    pub fn video_name(&self) -> ModelResult<&str> {
        let file = self.file_name()?;
        let stem = file.split('.').next().unwrap_or_default();
        if stem.is_empty() {
            return Err(ModelError::invalid_key(self.key()));
        }
        Ok(stem)
    }
}
