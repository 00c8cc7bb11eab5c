//! Placement strategies: where a content blob lives in a store
//!
//! A strategy maps an entity and one of its content properties onto an
//! opaque storage key. Stores and repositories only depend on
//! `Arc<dyn PlacementStrategy>`, never on a concrete variant.

pub mod registry;
pub mod strategies;

use crate::core::entity::ContentEntity;
use crate::core::error::ContentResult;
use crate::core::metadata::{ContentPropertyDescriptor, EntityMetadata};
use std::any::Any;

pub use registry::PlacementRegistry;
pub use strategies::{CustomPlacementStrategy, EntityIdPlacementStrategy, UuidPlacementStrategy};

/// Computes storage keys for content properties
pub trait PlacementStrategy: Any + Send + Sync {
    /// Name under which the strategy is registered (e.g. "uuid")
    fn name(&self) -> &str;

    /// Produce the storage key for a property of an entity
    fn locate(
        &self,
        entity: &dyn ContentEntity,
        metadata: &EntityMetadata,
        property: &ContentPropertyDescriptor,
    ) -> ContentResult<String>;

    /// Upcast used for lookups by concrete type
    fn as_any(&self) -> &dyn Any;
}
