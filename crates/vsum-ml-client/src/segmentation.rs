//! Shot segmentation jobs.

use async_trait::async_trait;
use aws_sdk_rekognition::types::{NotificationChannel, S3Object, SegmentType, Video};
use aws_sdk_rekognition::Client;
use tracing::info;

use crate::error::{MlError, MlResult};

/// Where the segmentation service announces job completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationTarget {
    pub topic_arn: String,
    pub role_arn: String,
}

/// Starts asynchronous shot segmentation of a stored video.
#[async_trait]
pub trait SegmentDetector: Send + Sync {
    /// Start a shot-only segmentation job; returns the job id.
    async fn start_shot_detection(&self, bucket: &str, key: &str) -> MlResult<String>;
}

/// `SegmentDetector` backed by Amazon Rekognition Video.
#[derive(Clone)]
pub struct RekognitionSegmentDetector {
    client: Client,
    notification: NotificationTarget,
}

impl RekognitionSegmentDetector {
    pub fn new(client: Client, notification: NotificationTarget) -> Self {
        Self {
            client,
            notification,
        }
    }

    pub fn from_sdk_config(config: &aws_config::SdkConfig, notification: NotificationTarget) -> Self {
        Self::new(Client::new(config), notification)
    }
}

#[async_trait]
impl SegmentDetector for RekognitionSegmentDetector {
    async fn start_shot_detection(&self, bucket: &str, key: &str) -> MlResult<String> {
        let video = Video::builder()
            .s3_object(S3Object::builder().bucket(bucket).name(key).build())
            .build();

        let channel = NotificationChannel::builder()
            .sns_topic_arn(&self.notification.topic_arn)
            .role_arn(&self.notification.role_arn)
            .build()
            .map_err(|e| MlError::InvalidRequest(e.to_string()))?;

        let response = self
            .client
            .start_segment_detection()
            .video(video)
            .segment_types(SegmentType::Shot)
            .notification_channel(channel)
            .send()
            .await
            .map_err(|e| MlError::segment_detection(format!("s3://{}/{}: {}", bucket, key, e)))?;

        let job_id = response
            .job_id()
            .ok_or(MlError::MissingField("JobId"))?
            .to_string();

        info!("Started segment detection job {} for s3://{}/{}", job_id, bucket, key);
        Ok(job_id)
    }
}
