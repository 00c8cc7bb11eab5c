//! Registry of entity content metadata, keyed by entity type

use crate::config::ContentConfig;
use crate::core::error::MetadataError;
use crate::core::metadata::EntityMetadata;
use std::collections::HashMap;
use std::sync::Arc;

/// Lookup table from singular entity type name to its content metadata
///
/// Every descriptor is validated on registration, so malformed metadata is
/// reported while the host is being assembled rather than during resolution.
#[derive(Debug, Default, Clone)]
pub struct MetadataRegistry {
    by_type: HashMap<String, Arc<EntityMetadata>>,
}

impl MetadataRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from every entity in a configuration
    pub fn from_config(config: &ContentConfig) -> Result<Self, MetadataError> {
        let mut registry = Self::new();
        for entity in &config.entities {
            registry.register(entity.to_metadata())?;
        }
        Ok(registry)
    }

    /// Register (or replace) the metadata of an entity type
    pub fn register(&mut self, metadata: EntityMetadata) -> Result<(), MetadataError> {
        metadata.validate()?;
        self.by_type
            .insert(metadata.singular.clone(), Arc::new(metadata));
        Ok(())
    }

    /// Metadata of an entity type
    pub fn get(&self, entity_type: &str) -> Option<Arc<EntityMetadata>> {
        self.by_type.get(entity_type).cloned()
    }

    /// All registered entity types
    pub fn entity_types(&self) -> Vec<&str> {
        self.by_type.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}
