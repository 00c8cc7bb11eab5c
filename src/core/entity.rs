//! Entity traits used by link resolution, placement and content stores

use crate::core::field::FieldValue;
use crate::core::metadata::EntityMetadata;

/// An application entity that may carry content properties.
///
/// The trait is object safe: the resolver, placement strategies and stores
/// only ever see `&dyn ContentEntity` and read content fields by name,
/// as declared in the entity's [`EntityMetadata`].
pub trait ContentEntity: Send + Sync {
    /// The singular entity type name (e.g., "testEntity4")
    fn entity_type(&self) -> &str;

    /// The entity identifier rendered as a URI path segment
    fn id(&self) -> String;

    /// Read a field by name
    ///
    /// Returns `None` when the entity has no such field.
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Write a field by name
    ///
    /// Returns `false` when the entity has no such field or the value does
    /// not fit its type.
    fn set_field_value(&mut self, field: &str, value: FieldValue) -> bool;

    /// JSON representation of the entity's own properties
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "id": self.id() })
    }
}

/// Compile-time registration of an entity type's content metadata
pub trait EntityDescriptor: ContentEntity + Sized {
    /// Build the metadata descriptor for this entity type
    fn describe() -> EntityMetadata;
}
