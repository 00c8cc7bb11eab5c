//! Object storage adapter for the ContentStore trait
//!
//! Bridges an external object-storage client (an S3-style SDK wrapper owned
//! by the application) to [`ContentStore`]. The adapter owns the bucket and
//! key prefix; the client only moves bytes.

use crate::core::error::{ContentResult, StorageError};
use crate::storage::{ContentDescriptor, ContentStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

const BACKEND: &str = "object-storage";

/// Metadata reported by an object-storage backend for one object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMetadata {
    pub size: u64,
    pub content_type: Option<String>,
    pub last_modified: DateTime<Utc>,
}

/// Minimal object-storage client capability
///
/// Implementations return `Ok(None)` for missing objects and reserve `Err`
/// for transport or service failures.
#[async_trait]
pub trait ObjectStorageClient: Send + Sync {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> anyhow::Result<ObjectMetadata>;

    async fn get_object(&self, bucket: &str, key: &str) -> anyhow::Result<Option<Vec<u8>>>;

    async fn head_object(&self, bucket: &str, key: &str) -> anyhow::Result<Option<ObjectMetadata>>;

    async fn delete_object(&self, bucket: &str, key: &str) -> anyhow::Result<()>;
}

/// Content store writing into one bucket of an object-storage service
pub struct ObjectStorageContentStore<C: ObjectStorageClient> {
    client: C,
    bucket: String,
    prefix: Option<String>,
}

impl<C: ObjectStorageClient> ObjectStorageContentStore<C> {
    /// Create a store over a bucket
    pub fn new(client: C, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix: None,
        }
    }

    /// Place every key under a fixed prefix inside the bucket
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let trimmed = prefix.trim_matches('/');
        self.prefix = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The object key a content key maps to
    pub fn object_key(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}/{}", prefix, key),
            None => key.to_string(),
        }
    }

    fn backend_error(&self, key: &str, err: anyhow::Error) -> StorageError {
        StorageError::Backend {
            backend: BACKEND.to_string(),
            key: key.to_string(),
            message: format!("{:#}", err),
        }
    }

    fn descriptor(key: &str, meta: ObjectMetadata) -> ContentDescriptor {
        ContentDescriptor {
            key: key.to_string(),
            length: meta.size,
            mime_type: meta.content_type,
            last_modified: meta.last_modified,
        }
    }
}

#[async_trait]
impl<C: ObjectStorageClient + 'static> ContentStore for ObjectStorageContentStore<C> {
    fn backend(&self) -> &str {
        BACKEND
    }

    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        mime_type: Option<&str>,
    ) -> ContentResult<ContentDescriptor> {
        let object_key = self.object_key(key);
        tracing::debug!(bucket = %self.bucket, key = %object_key, bytes = data.len(), "Putting object");

        let meta = self
            .client
            .put_object(&self.bucket, &object_key, data, mime_type)
            .await
            .map_err(|e| self.backend_error(key, e))?;

        Ok(Self::descriptor(key, meta))
    }

    async fn get(&self, key: &str) -> ContentResult<Option<Vec<u8>>> {
        let object_key = self.object_key(key);
        let body = self
            .client
            .get_object(&self.bucket, &object_key)
            .await
            .map_err(|e| self.backend_error(key, e))?;
        Ok(body)
    }

    async fn head(&self, key: &str) -> ContentResult<Option<ContentDescriptor>> {
        let object_key = self.object_key(key);
        let meta = self
            .client
            .head_object(&self.bucket, &object_key)
            .await
            .map_err(|e| self.backend_error(key, e))?;
        Ok(meta.map(|m| Self::descriptor(key, m)))
    }

    async fn delete(&self, key: &str) -> ContentResult<()> {
        let object_key = self.object_key(key);
        tracing::debug!(bucket = %self.bucket, key = %object_key, "Deleting object");
        self.client
            .delete_object(&self.bucket, &object_key)
            .await
            .map_err(|e| self.backend_error(key, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ContentError;
    use anyhow::anyhow;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Records objects per (bucket, key)
    #[derive(Clone, Default)]
    struct FakeClient {
        objects: Arc<Mutex<HashMap<(String, String), (Vec<u8>, ObjectMetadata)>>>,
        fail: bool,
    }

    #[async_trait]
    impl ObjectStorageClient for FakeClient {
        async fn put_object(
            &self,
            bucket: &str,
            key: &str,
            body: Vec<u8>,
            content_type: Option<&str>,
        ) -> anyhow::Result<ObjectMetadata> {
            if self.fail {
                return Err(anyhow!("service unavailable"));
            }
            let meta = ObjectMetadata {
                size: body.len() as u64,
                content_type: content_type.map(str::to_string),
                last_modified: Utc::now(),
            };
            self.objects
                .lock()
                .unwrap()
                .insert((bucket.to_string(), key.to_string()), (body, meta.clone()));
            Ok(meta)
        }

        async fn get_object(&self, bucket: &str, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
            Ok(self
                .objects
                .lock()
                .unwrap()
                .get(&(bucket.to_string(), key.to_string()))
                .map(|(body, _)| body.clone()))
        }

        async fn head_object(
            &self,
            bucket: &str,
            key: &str,
        ) -> anyhow::Result<Option<ObjectMetadata>> {
            Ok(self
                .objects
                .lock()
                .unwrap()
                .get(&(bucket.to_string(), key.to_string()))
                .map(|(_, meta)| meta.clone()))
        }

        async fn delete_object(&self, bucket: &str, key: &str) -> anyhow::Result<()> {
            self.objects
                .lock()
                .unwrap()
                .remove(&(bucket.to_string(), key.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_prefix_is_applied() {
        let client = FakeClient::default();
        let store = ObjectStorageContentStore::new(client.clone(), "media").with_prefix("/tenant-a/");

        let descriptor = store
            .put("abc", b"data".to_vec(), Some("image/png"))
            .await
            .unwrap();

        assert_eq!(descriptor.key, "abc");
        assert_eq!(descriptor.length, 4);
        assert!(client
            .objects
            .lock()
            .unwrap()
            .contains_key(&("media".to_string(), "tenant-a/abc".to_string())));
        assert_eq!(store.get("abc").await.unwrap(), Some(b"data".to_vec()));
        assert_eq!(
            store.head("abc").await.unwrap().unwrap().mime_type.as_deref(),
            Some("image/png")
        );
    }

    #[tokio::test]
    async fn test_empty_prefix_is_ignored() {
        let store = ObjectStorageContentStore::new(FakeClient::default(), "media").with_prefix("/");
        assert_eq!(store.object_key("abc"), "abc");
    }

    #[tokio::test]
    async fn test_delete_and_exists() {
        let store = ObjectStorageContentStore::new(FakeClient::default(), "media");
        store.put("abc", b"data".to_vec(), None).await.unwrap();
        assert!(store.exists("abc").await.unwrap());

        store.delete("abc").await.unwrap();
        assert!(!store.exists("abc").await.unwrap());
        assert_eq!(store.get("abc").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_client_failure_maps_to_storage_error() {
        let client = FakeClient {
            fail: true,
            ..FakeClient::default()
        };
        let store = ObjectStorageContentStore::new(client, "media");

        let err = store.put("abc", b"data".to_vec(), None).await.unwrap_err();
        match err {
            ContentError::Storage(StorageError::Backend { backend, key, message }) => {
                assert_eq!(backend, "object-storage");
                assert_eq!(key, "abc");
                assert!(message.contains("service unavailable"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
