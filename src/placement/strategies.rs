//! Built-in placement strategy variants

use crate::core::entity::ContentEntity;
use crate::core::error::{ContentResult, MetadataError};
use crate::core::metadata::{ContentPropertyDescriptor, EntityMetadata};
use crate::placement::PlacementStrategy;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Fresh random v4 UUID per call
///
/// Keys depend on neither entity identity nor entity state, so two calls
/// never collide (up to UUID collision probability).
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidPlacementStrategy;

impl UuidPlacementStrategy {
    pub const NAME: &'static str = "uuid";
}

impl PlacementStrategy for UuidPlacementStrategy {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn locate(
        &self,
        _entity: &dyn ContentEntity,
        _metadata: &EntityMetadata,
        _property: &ContentPropertyDescriptor,
    ) -> ContentResult<String> {
        Ok(Uuid::new_v4().to_string())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Deterministic `{collection}/{id}/{property}` keys
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityIdPlacementStrategy;

impl EntityIdPlacementStrategy {
    pub const NAME: &'static str = "entity-id";
}

impl PlacementStrategy for EntityIdPlacementStrategy {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn locate(
        &self,
        entity: &dyn ContentEntity,
        metadata: &EntityMetadata,
        property: &ContentPropertyDescriptor,
    ) -> ContentResult<String> {
        let id = entity.id();
        if id.is_empty() {
            return Err(MetadataError::MissingId {
                entity_type: metadata.singular.clone(),
            }
            .into());
        }
        Ok(format!("{}/{}/{}", metadata.plural, id, property.name))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

type LocateFn = dyn Fn(&dyn ContentEntity, &EntityMetadata, &ContentPropertyDescriptor) -> ContentResult<String>
    + Send
    + Sync;

/// Placement backed by an application-supplied function
#[derive(Clone)]
pub struct CustomPlacementStrategy {
    name: String,
    locate: Arc<LocateFn>,
}

impl CustomPlacementStrategy {
    pub fn new<F>(name: impl Into<String>, locate: F) -> Self
    where
        F: Fn(&dyn ContentEntity, &EntityMetadata, &ContentPropertyDescriptor) -> ContentResult<String>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            locate: Arc::new(locate),
        }
    }
}

impl fmt::Debug for CustomPlacementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomPlacementStrategy")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl PlacementStrategy for CustomPlacementStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn locate(
        &self,
        entity: &dyn ContentEntity,
        metadata: &EntityMetadata,
        property: &ContentPropertyDescriptor,
    ) -> ContentResult<String> {
        (self.locate)(entity, metadata, property)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
