//! In-memory implementation of ContentStore for testing and development

use crate::core::error::{ContentResult, StorageError};
use crate::storage::{ContentDescriptor, ContentStore};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Clone)]
struct StoredBlob {
    data: Vec<u8>,
    descriptor: ContentDescriptor,
}

/// In-memory content store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryContentStore {
    blobs: Arc<RwLock<HashMap<String, StoredBlob>>>,
}

impl InMemoryContentStore {
    /// Create a new in-memory content store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs
    pub fn len(&self) -> ContentResult<usize> {
        let blobs = self
            .blobs
            .read()
            .map_err(|_| StorageError::Poisoned("read"))?;
        Ok(blobs.len())
    }

    pub fn is_empty(&self) -> ContentResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    fn backend(&self) -> &str {
        "in-memory"
    }

    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        mime_type: Option<&str>,
    ) -> ContentResult<ContentDescriptor> {
        let descriptor = ContentDescriptor {
            key: key.to_string(),
            length: data.len() as u64,
            mime_type: mime_type.map(str::to_string),
            last_modified: Utc::now(),
        };

        let mut blobs = self
            .blobs
            .write()
            .map_err(|_| StorageError::Poisoned("write"))?;

        blobs.insert(
            key.to_string(),
            StoredBlob {
                data,
                descriptor: descriptor.clone(),
            },
        );

        Ok(descriptor)
    }

    async fn get(&self, key: &str) -> ContentResult<Option<Vec<u8>>> {
        let blobs = self
            .blobs
            .read()
            .map_err(|_| StorageError::Poisoned("read"))?;

        Ok(blobs.get(key).map(|blob| blob.data.clone()))
    }

    async fn head(&self, key: &str) -> ContentResult<Option<ContentDescriptor>> {
        let blobs = self
            .blobs
            .read()
            .map_err(|_| StorageError::Poisoned("read"))?;

        Ok(blobs.get(key).map(|blob| blob.descriptor.clone()))
    }

    async fn delete(&self, key: &str) -> ContentResult<()> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|_| StorageError::Poisoned("write"))?;

        blobs.remove(key);

        Ok(())
    }
}
