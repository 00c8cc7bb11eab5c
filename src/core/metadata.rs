//! Content metadata descriptors for entity types
//!
//! A descriptor is built once at startup, by hand, from YAML configuration or
//! through [`impl_content_entity!`](crate::impl_content_entity), and is then
//! consumed as plain data by the link resolver, placement strategies and
//! content repositories.

use crate::core::entity::ContentEntity;
use crate::core::error::MetadataError;
use crate::core::pluralize::Pluralizer;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

/// Name of the default content slot
pub const DEFAULT_CONTENT_PROPERTY: &str = "content";

/// A named content slot on an entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentPropertyDescriptor {
    /// Slot name, used both as link relation and as URI path segment
    pub name: String,

    /// Entity field holding the content identifier
    pub content_id_field: String,

    /// Entity field receiving the content length, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_length_field: Option<String>,

    /// Entity field receiving the mime type, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type_field: Option<String>,
}

impl ContentPropertyDescriptor {
    /// Create a slot with an explicit name
    pub fn new(name: impl Into<String>, content_id_field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content_id_field: content_id_field.into(),
            content_length_field: None,
            mime_type_field: None,
        }
    }

    /// Create a slot whose name is derived from its content-id field
    ///
    /// `renditionId` becomes `rendition`, `thumbnail_id` becomes `thumbnail`.
    pub fn from_field(content_id_field: impl Into<String>) -> Self {
        let field = content_id_field.into();
        Self::new(Self::slot_name_for(&field), field)
    }

    /// The default `content` slot backed by the given field
    pub fn default_slot(content_id_field: impl Into<String>) -> Self {
        Self::new(DEFAULT_CONTENT_PROPERTY, content_id_field)
    }

    /// Attach a content length field
    pub fn with_length_field(mut self, field: impl Into<String>) -> Self {
        self.content_length_field = Some(field.into());
        self
    }

    /// Attach a mime type field
    pub fn with_mime_type_field(mut self, field: impl Into<String>) -> Self {
        self.mime_type_field = Some(field.into());
        self
    }

    /// Whether this is the default `content` slot
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_CONTENT_PROPERTY
    }

    /// Read the slot's content identifier from an entity
    pub fn content_id(&self, entity: &dyn ContentEntity) -> Option<String> {
        entity
            .field_value(&self.content_id_field)
            .and_then(|value| value.as_content_id())
    }

    fn slot_name_for(field: &str) -> String {
        let stripped = field
            .strip_suffix("_id")
            .or_else(|| field.strip_suffix("Id"))
            .unwrap_or(field);

        if stripped.is_empty() {
            field.to_string()
        } else {
            stripped.to_string()
        }
    }
}

/// Content metadata for one entity type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityMetadata {
    /// Singular type name, used for shortcut link relations
    pub singular: String,

    /// Collection name, used as the route segment
    pub plural: String,

    /// Declared content slots, in declaration order
    #[serde(default)]
    pub content_properties: Vec<ContentPropertyDescriptor>,
}

impl EntityMetadata {
    /// Metadata with the collection name derived from the singular name
    pub fn new(singular: impl Into<String>) -> Self {
        let singular = singular.into();
        Self {
            plural: Pluralizer::pluralize(&singular),
            singular,
            content_properties: Vec::new(),
        }
    }

    /// Metadata built from a list of content-id fields
    ///
    /// A single field maps onto the default `content` slot; with several
    /// fields each slot is named after its field.
    pub fn from_content_id_fields(singular: impl Into<String>, fields: &[&str]) -> Self {
        let properties = match fields {
            [single] => vec![ContentPropertyDescriptor::default_slot(*single)],
            many => many
                .iter()
                .map(|field| ContentPropertyDescriptor::from_field(*field))
                .collect(),
        };

        Self::new(singular).with_properties(properties)
    }

    /// Override the collection name
    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = plural.into();
        self
    }

    /// Add a content slot
    pub fn with_property(mut self, property: ContentPropertyDescriptor) -> Self {
        self.content_properties.push(property);
        self
    }

    /// Add several content slots
    pub fn with_properties(
        mut self,
        properties: impl IntoIterator<Item = ContentPropertyDescriptor>,
    ) -> Self {
        self.content_properties.extend(properties);
        self
    }

    /// Find a content slot by name
    pub fn property(&self, name: &str) -> Option<&ContentPropertyDescriptor> {
        self.content_properties.iter().find(|p| p.name == name)
    }

    /// Find a content slot by name, or fail with [`MetadataError::UnknownProperty`]
    pub fn require_property(&self, name: &str) -> Result<&ContentPropertyDescriptor, MetadataError> {
        self.property(name)
            .ok_or_else(|| MetadataError::UnknownProperty {
                entity_type: self.singular.clone(),
                name: name.to_string(),
            })
    }

    /// Whether the entity declares any content slot
    pub fn has_content(&self) -> bool {
        !self.content_properties.is_empty()
    }

    /// Check that the metadata can be used to build links and keys
    pub fn validate(&self) -> Result<(), MetadataError> {
        if self.singular.is_empty() {
            return Err(MetadataError::EmptyName {
                entity_type: self.singular.clone(),
                what: "singular name".to_string(),
            });
        }
        if self.plural.is_empty() {
            return Err(MetadataError::EmptyName {
                entity_type: self.singular.clone(),
                what: "collection name".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for property in &self.content_properties {
            if property.content_id_field.is_empty() {
                return Err(MetadataError::EmptyName {
                    entity_type: self.singular.clone(),
                    what: format!("content-id field of '{}'", property.name),
                });
            }
            if !segment_regex().is_match(&property.name) {
                return Err(MetadataError::InvalidPropertyName {
                    entity_type: self.singular.clone(),
                    name: property.name.clone(),
                });
            }
            if !seen.insert(property.name.as_str()) {
                return Err(MetadataError::DuplicateProperty {
                    entity_type: self.singular.clone(),
                    name: property.name.clone(),
                });
            }
        }

        Ok(())
    }
}

fn segment_regex() -> &'static Regex {
    static SEGMENT_REGEX: OnceLock<Regex> = OnceLock::new();
    SEGMENT_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").unwrap())
}
