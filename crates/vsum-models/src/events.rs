//! Trigger events delivered by the platform.
//!
//! Only the fields the handlers read are modelled; everything else in the
//! platform payload is ignored.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::video::VideoRef;

/// Object-store upload notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<UploadRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRecord {
    pub s3: UploadEntity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadEntity {
    pub bucket: UploadBucket,
    pub object: UploadObject,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadBucket {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadObject {
    pub key: String,
}

impl UploadRecord {
    /// Object key with the notification's URL encoding removed.
    ///
    /// Keys arrive form-encoded: spaces as `+`, everything else percent-encoded.
    pub fn object_key(&self) -> ModelResult<String> {
        let raw = self.s3.object.key.replace('+', " ");
        urlencoding::decode(&raw)
            .map(|key| key.into_owned())
            .map_err(|_| ModelError::invalid_key(&self.s3.object.key))
    }

    /// The uploaded video as a bucket/key reference.
    pub fn video(&self) -> ModelResult<VideoRef> {
        Ok(VideoRef::new(self.s3.bucket.name.clone(), self.object_key()?))
    }
}

impl UploadEvent {
    pub fn ensure_records(&self) -> ModelResult<()> {
        if self.records.is_empty() {
            return Err(ModelError::EmptyEvent);
        }
        Ok(())
    }
}

/// Messaging notification carrying the segmentation completion message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<NotificationRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRecord {
    #[serde(rename = "Sns")]
    pub sns: NotificationMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationMessage {
    #[serde(rename = "MessageId", default)]
    pub message_id: Option<String>,
    #[serde(rename = "Message")]
    pub message: String,
}

impl NotificationEvent {
    pub fn ensure_records(&self) -> ModelResult<()> {
        if self.records.is_empty() {
            return Err(ModelError::EmptyEvent);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upload_key_is_decoded() {
        let event: UploadEvent = serde_json::from_value(json!({
            "Records": [{
                "eventName": "ObjectCreated:Put",
                "s3": {
                    "bucket": {"name": "media", "arn": "arn:aws:s3:::media"},
                    "object": {"key": "uploads/team+sync%282%29.mp4", "size": 10}
                }
            }]
        }))
        .unwrap();

        let video = event.records[0].video().unwrap();
        assert_eq!(video.bucket(), "media");
        assert_eq!(video.key(), "uploads/team sync(2).mp4");
    }

    #[test]
    fn test_notification_message_passthrough() {
        let message = r#"{"JobId":"j-1","Status":"SUCCEEDED","API":"StartSegmentDetection"}"#;
        let event: NotificationEvent = serde_json::from_value(json!({
            "Records": [{"EventSource": "aws:sns", "Sns": {"MessageId": "m-1", "Message": message}}]
        }))
        .unwrap();

        assert_eq!(event.records[0].sns.message, message);
        assert!(event.ensure_records().is_ok());
    }

    #[test]
    fn test_empty_event_rejected() {
        let event: UploadEvent = serde_json::from_value(json!({"Records": []})).unwrap();
        assert!(matches!(event.ensure_records(), Err(ModelError::EmptyEvent)));
    }
}
