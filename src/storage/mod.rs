//! Content store backends and the repository façade over them

pub mod in_memory;
pub mod object;
pub mod repository;

use crate::core::error::ContentResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use in_memory::InMemoryContentStore;
pub use object::{ObjectMetadata, ObjectStorageClient, ObjectStorageContentStore};
pub use repository::ContentRepository;

/// What a store knows about a stored blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDescriptor {
    /// Storage key the blob lives under
    pub key: String,

    /// Length in bytes
    pub length: u64,

    /// Mime type recorded at write time
    pub mime_type: Option<String>,

    /// When the blob was last written
    pub last_modified: DateTime<Utc>,
}

/// Uniform interface over content storage backends
///
/// Keys are opaque strings produced by a placement strategy. Reads of
/// missing keys return `Ok(None)` and deletes of missing keys succeed.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Backend name used in logs and errors (e.g. "in-memory")
    fn backend(&self) -> &str;

    /// Store a blob, replacing any previous blob under the same key
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        mime_type: Option<&str>,
    ) -> ContentResult<ContentDescriptor>;

    /// Read a blob
    async fn get(&self, key: &str) -> ContentResult<Option<Vec<u8>>>;

    /// Read a blob's descriptor without its bytes
    async fn head(&self, key: &str) -> ContentResult<Option<ContentDescriptor>>;

    /// Remove a blob
    async fn delete(&self, key: &str) -> ContentResult<()>;

    /// Whether a blob exists
    async fn exists(&self, key: &str) -> ContentResult<bool> {
        Ok(self.head(key).await?.is_some())
    }
}
