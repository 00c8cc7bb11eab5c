//! Per-entity-type content repository
//!
//! Ties together an entity type's metadata, its placement strategy and the
//! content store holding its blobs.

use crate::core::entity::ContentEntity;
use crate::core::error::{ContentResult, MetadataError, StorageError};
use crate::core::field::FieldValue;
use crate::core::metadata::{ContentPropertyDescriptor, EntityMetadata};
use crate::placement::PlacementStrategy;
use crate::storage::{ContentDescriptor, ContentStore};
use std::sync::Arc;

/// Content operations for one entity type
#[derive(Clone)]
pub struct ContentRepository {
    metadata: Arc<EntityMetadata>,
    store: Arc<dyn ContentStore>,
    placement: Arc<dyn PlacementStrategy>,
}

impl ContentRepository {
    pub fn new(
        metadata: Arc<EntityMetadata>,
        store: Arc<dyn ContentStore>,
        placement: Arc<dyn PlacementStrategy>,
    ) -> Self {
        Self {
            metadata,
            store,
            placement,
        }
    }

    pub fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    pub fn placement(&self) -> &Arc<dyn PlacementStrategy> {
        &self.placement
    }

    /// Store content for a property and record it on the entity
    ///
    /// The existing content id is reused as the storage key when the slot is
    /// already populated; otherwise the placement strategy picks the key.
    /// The content id, length and mime type fields are updated on success.
    ///
    /// Every declared field must exist on the entity before anything is
    /// stored. If the entity still refuses a write, its fields are restored
    /// and a newly placed blob is deleted again.
    pub async fn set_content(
        &self,
        entity: &mut dyn ContentEntity,
        property: &str,
        data: Vec<u8>,
        mime_type: Option<&str>,
    ) -> ContentResult<ContentDescriptor> {
        let descriptor = self.metadata.require_property(property)?;
        let previous = self.read_fields(entity, descriptor)?;

        let existing = descriptor.content_id(entity);
        let placed = existing.is_none();
        let key = match existing {
            Some(existing) => existing,
            None => self.placement.locate(entity, &self.metadata, descriptor)?,
        };

        let stored = self.store.put(&key, data, mime_type).await?;

        if let Err(err) = self.write_fields(entity, descriptor, Some(&stored)) {
            for (field, value) in previous {
                entity.set_field_value(field, value);
            }
            if placed {
                if let Err(cleanup) = self.store.delete(&stored.key).await {
                    tracing::warn!(
                        entity_type = %self.metadata.singular,
                        key = %stored.key,
                        error = %cleanup,
                        "Failed to remove content after a rejected field write"
                    );
                }
            }
            return Err(err);
        }

        tracing::debug!(
            entity_type = %self.metadata.singular,
            entity_id = %entity.id(),
            property,
            key = %stored.key,
            length = stored.length,
            backend = self.store.backend(),
            "Stored content"
        );

        self.write_fields(entity, descriptor, Some(&stored))?;
        Ok(stored)
    }

    /// Read the content of a property, `None` when the slot is empty
    ///
    /// A populated slot whose blob is missing from the store is a
    /// [`StorageError::NotFound`].
    pub async fn get_content(
        &self,
        entity: &dyn ContentEntity,
        property: &str,
    ) -> ContentResult<Option<Vec<u8>>> {
        let descriptor = self.metadata.require_property(property)?;
        let Some(key) = descriptor.content_id(entity) else {
            return Ok(None);
        };
        match self.store.get(&key).await? {
            Some(data) => Ok(Some(data)),
            None => Err(StorageError::NotFound { key }.into()),
        }
    }

    /// Describe the stored content of a property without reading it
    pub async fn content_descriptor(
        &self,
        entity: &dyn ContentEntity,
        property: &str,
    ) -> ContentResult<Option<ContentDescriptor>> {
        let descriptor = self.metadata.require_property(property)?;
        let Some(key) = descriptor.content_id(entity) else {
            return Ok(None);
        };
        match self.store.head(&key).await? {
            Some(stored) => Ok(Some(stored)),
            None => Err(StorageError::NotFound { key }.into()),
        }
    }

    /// Remove a property's content and clear its fields on the entity
    pub async fn unset_content(
        &self,
        entity: &mut dyn ContentEntity,
        property: &str,
    ) -> ContentResult<()> {
        let descriptor = self.metadata.require_property(property)?;
        let Some(key) = descriptor.content_id(entity) else {
            return Ok(());
        };

        self.store.delete(&key).await?;
        self.write_fields(entity, descriptor, None)?;
        Ok(())
    }

    /// Current values of every field the property writes
    fn read_fields<'d>(
        &self,
        entity: &dyn ContentEntity,
        descriptor: &'d ContentPropertyDescriptor,
    ) -> Result<Vec<(&'d str, FieldValue)>, MetadataError> {
        std::iter::once(&descriptor.content_id_field)
            .chain(descriptor.content_length_field.as_ref())
            .chain(descriptor.mime_type_field.as_ref())
            .map(|field| {
                entity
                    .field_value(field)
                    .map(|value| (field.as_str(), value))
                    .ok_or_else(|| MetadataError::UnknownField {
                        entity_type: self.metadata.singular.clone(),
                        field: field.clone(),
                    })
            })
            .collect()
    }

    fn write_fields(
        &self,
        entity: &mut dyn ContentEntity,
        descriptor: &ContentPropertyDescriptor,
        stored: Option<&ContentDescriptor>,
    ) -> ContentResult<()> {
        let content_id = stored.map_or(FieldValue::Null, |s| FieldValue::String(s.key.clone()));
        self.write_field(entity, &descriptor.content_id_field, content_id)?;

        if let Some(field) = &descriptor.content_length_field {
            let length = stored.map_or(FieldValue::Null, |s| FieldValue::Integer(s.length as i64));
            self.write_field(entity, field, length)?;
        }

        if let Some(field) = &descriptor.mime_type_field {
            let mime = stored
                .and_then(|s| s.mime_type.clone())
                .map_or(FieldValue::Null, FieldValue::String);
            self.write_field(entity, field, mime)?;
        }

        Ok(())
    }

    fn write_field(
        &self,
        entity: &mut dyn ContentEntity,
        field: &str,
        value: FieldValue,
    ) -> Result<(), MetadataError> {
        if entity.set_field_value(field, value) {
            Ok(())
        } else {
            Err(MetadataError::UnknownField {
                entity_type: self.metadata.singular.clone(),
                field: field.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ContentError;
    use crate::placement::{EntityIdPlacementStrategy, UuidPlacementStrategy};
    use crate::storage::InMemoryContentStore;

    #[derive(Default)]
    struct Photo {
        id: i64,
        content_id: Option<String>,
        content_length: Option<i64>,
        mime_type: Option<String>,
    }

    impl ContentEntity for Photo {
        fn entity_type(&self) -> &str {
            "photo"
        }

        fn id(&self) -> String {
            self.id.to_string()
        }

        fn field_value(&self, field: &str) -> Option<FieldValue> {
            match field {
                "contentId" => Some(self.content_id.clone().into()),
                "contentLength" => Some(self.content_length.into()),
                "mimeType" => Some(self.mime_type.clone().into()),
                // Computed on read, never written
                "checksum" => Some(FieldValue::Null),
                _ => None,
            }
        }

        fn set_field_value(&mut self, field: &str, value: FieldValue) -> bool {
            match field {
                "contentId" => self.content_id = value.as_content_id(),
                "contentLength" => self.content_length = value.as_integer(),
                "mimeType" => self.mime_type = value.as_string().map(str::to_string),
                _ => return false,
            }
            true
        }
    }

    fn metadata() -> Arc<EntityMetadata> {
        Arc::new(
            EntityMetadata::new("photo").with_property(
                ContentPropertyDescriptor::default_slot("contentId")
                    .with_length_field("contentLength")
                    .with_mime_type_field("mimeType"),
            ),
        )
    }

    fn repository(placement: Arc<dyn PlacementStrategy>) -> (ContentRepository, InMemoryContentStore) {
        let store = InMemoryContentStore::new();
        let repo = ContentRepository::new(metadata(), Arc::new(store.clone()), placement);
        (repo, store)
    }

    #[tokio::test]
    async fn test_set_content_records_fields() {
        let (repo, store) = repository(Arc::new(UuidPlacementStrategy));
        let mut photo = Photo {
            id: 1,
            ..Photo::default()
        };

        let stored = repo
            .set_content(&mut photo, "content", b"jpeg".to_vec(), Some("image/jpeg"))
            .await
            .unwrap();

        assert_eq!(photo.content_id.as_deref(), Some(stored.key.as_str()));
        assert_eq!(photo.content_length, Some(4));
        assert_eq!(photo.mime_type.as_deref(), Some("image/jpeg"));
        assert!(store.exists(&stored.key).await.unwrap());
        assert_eq!(
            repo.get_content(&photo, "content").await.unwrap(),
            Some(b"jpeg".to_vec())
        );
    }

    #[tokio::test]
    async fn test_set_content_reuses_existing_key() {
        let (repo, store) = repository(Arc::new(UuidPlacementStrategy));
        let mut photo = Photo::default();

        let first = repo
            .set_content(&mut photo, "content", b"v1".to_vec(), None)
            .await
            .unwrap();
        let second = repo
            .set_content(&mut photo, "content", b"version2".to_vec(), None)
            .await
            .unwrap();

        assert_eq!(first.key, second.key);
        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(photo.content_length, Some(8));
        assert_eq!(photo.mime_type, None);
    }

    #[tokio::test]
    async fn test_entity_id_placement_key() {
        let (repo, _) = repository(Arc::new(EntityIdPlacementStrategy));
        let mut photo = Photo {
            id: 77,
            ..Photo::default()
        };

        let stored = repo
            .set_content(&mut photo, "content", b"x".to_vec(), None)
            .await
            .unwrap();
        assert_eq!(stored.key, "photos/77/content");
    }

    #[tokio::test]
    async fn test_unset_content_clears_fields() {
        let (repo, store) = repository(Arc::new(UuidPlacementStrategy));
        let mut photo = Photo::default();
        repo.set_content(&mut photo, "content", b"x".to_vec(), Some("text/plain"))
            .await
            .unwrap();

        repo.unset_content(&mut photo, "content").await.unwrap();

        assert!(photo.content_id.is_none());
        assert!(photo.content_length.is_none());
        assert!(photo.mime_type.is_none());
        assert!(store.is_empty().unwrap());

        // Unsetting an empty slot is a no-op.
        repo.unset_content(&mut photo, "content").await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_slot_reads_none() {
        let (repo, _) = repository(Arc::new(UuidPlacementStrategy));
        let photo = Photo::default();
        assert_eq!(repo.get_content(&photo, "content").await.unwrap(), None);
        assert!(repo.content_descriptor(&photo, "content").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_property_is_error() {
        let (repo, _) = repository(Arc::new(UuidPlacementStrategy));
        let mut photo = Photo::default();

        let err = repo
            .set_content(&mut photo, "thumbnail", b"x".to_vec(), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ContentError::Metadata(MetadataError::UnknownProperty { .. })
        ));
    }

    #[tokio::test]
    async fn test_unwritable_field_is_error() {
        let metadata = Arc::new(
            EntityMetadata::new("photo").with_property(
                ContentPropertyDescriptor::default_slot("contentId").with_length_field("size"),
            ),
        );
        let store = InMemoryContentStore::new();
        let repo = ContentRepository::new(
            metadata,
            Arc::new(store.clone()),
            Arc::new(UuidPlacementStrategy),
        );
        let mut photo = Photo::default();

        let err = repo
            .set_content(&mut photo, "content", b"x".to_vec(), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ContentError::Metadata(MetadataError::UnknownField { .. })
        ));
        assert!(store.is_empty().unwrap());
        assert!(photo.content_id.is_none());
    }

    #[tokio::test]
    async fn test_rejected_field_write_rolls_back() {
        let metadata = Arc::new(
            EntityMetadata::new("photo").with_property(
                ContentPropertyDescriptor::default_slot("contentId")
                    .with_mime_type_field("checksum"),
            ),
        );
        let store = InMemoryContentStore::new();
        let repo = ContentRepository::new(
            metadata,
            Arc::new(store.clone()),
            Arc::new(UuidPlacementStrategy),
        );
        let mut photo = Photo::default();

        let err = repo
            .set_content(&mut photo, "content", b"x".to_vec(), Some("text/plain"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ContentError::Metadata(MetadataError::UnknownField { ref field, .. }) if field == "checksum"
        ));
        assert!(store.is_empty().unwrap());
        assert!(photo.content_id.is_none());
    }

    #[tokio::test]
    async fn test_dangling_content_id_is_not_found() {
        let (repo, store) = repository(Arc::new(UuidPlacementStrategy));
        let mut photo = Photo::default();
        let stored = repo
            .set_content(&mut photo, "content", b"x".to_vec(), None)
            .await
            .unwrap();

        store.delete(&stored.key).await.unwrap();

        let err = repo.get_content(&photo, "content").await.unwrap_err();
        assert!(matches!(
            err,
            ContentError::Storage(StorageError::NotFound { ref key }) if *key == stored.key
        ));
        assert!(matches!(
            repo.content_descriptor(&photo, "content").await,
            Err(ContentError::Storage(StorageError::NotFound { .. }))
        ));
    }
}
