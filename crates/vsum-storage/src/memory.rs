//! In-process object store.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::client::ObjectStore;
use crate::error::{StorageError, StorageResult};

/// A stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// `ObjectStore` kept in a map, for tests and local runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<BTreeMap<(String, String), StoredObject>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object.
    pub async fn insert(&self, bucket: &str, key: &str, data: impl Into<Vec<u8>>) {
        self.objects.write().await.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                data: data.into(),
                content_type: "application/octet-stream".to_string(),
            },
        );
    }

    pub async fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .read()
            .await
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// All keys stored under a bucket, sorted.
    pub async fn keys(&self, bucket: &str) -> Vec<String> {
        self.objects
            .read()
            .await
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, k)| k.clone())
            .collect()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn download_bytes(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        self.get(bucket, key)
            .await
            .map(|o| o.data)
            .ok_or_else(|| StorageError::not_found(bucket, key))
    }

    async fn download_file(&self, bucket: &str, key: &str, path: &Path) -> StorageResult<()> {
        let bytes = self.download_bytes(bucket, key).await?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, bytes).await?;
        Ok(())
    }

    async fn upload_file(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        content_type: &str,
    ) -> StorageResult<()> {
        let data = tokio::fs::read(path).await?;
        self.upload_bytes(bucket, key, data, content_type).await
    }

    async fn upload_bytes(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()> {
        self.objects.write().await.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        Ok(format!(
            "https://{}.s3.amazonaws.com/{}?X-Amz-Expires={}",
            bucket,
            key,
            expires_in.as_secs()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_object_is_not_found() {
        let store = MemoryStore::new();
        let err = store.download_bytes("bucket", "nope.jpg").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_upload_overwrites() {
        let store = MemoryStore::new();
        store
            .upload_bytes("b", "summary/v/0.txt", b"first".to_vec(), "text/plain")
            .await
            .unwrap();
        store
            .upload_bytes("b", "summary/v/0.txt", b"second".to_vec(), "text/plain")
            .await
            .unwrap();

        assert_eq!(store.download_bytes("b", "summary/v/0.txt").await.unwrap(), b"second");
        assert_eq!(store.keys("b").await, vec!["summary/v/0.txt".to_string()]);
    }

    #[tokio::test]
    async fn test_file_round_trip_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new();
        store.insert("b", "videos/talk.mp4", b"mp4".to_vec()).await;

        let local = dir.path().join("nested/talk.mp4");
        store.download_file("b", "videos/talk.mp4", &local).await.unwrap();
        store
            .upload_file("b", "staging/talk/0.mp4", &local, "video/mp4")
            .await
            .unwrap();

        let stored = store.get("b", "staging/talk/0.mp4").await.unwrap();
        assert_eq!(stored.data, b"mp4");
        assert_eq!(stored.content_type, "video/mp4");
    }

    #[tokio::test]
    async fn test_presign_carries_lifetime() {
        let store = MemoryStore::new();
        let url = store
            .presign_get("b", "report/talk.pdf", Duration::from_secs(3600))
            .await
            .unwrap();
        assert!(url.contains("report/talk.pdf"));
        assert!(url.contains("3600"));
    }
}
