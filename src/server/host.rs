//! Composition root holding everything content links and stores need
//!
//! The host is transport agnostic: a REST, GraphQL or any other exposure
//! asks it for a link contributor, a repository or a configuration handle.

use crate::config::SharedRestConfiguration;
use crate::core::entity::ContentEntity;
use crate::core::error::ConfigError;
use crate::core::link::EntityResource;
use crate::links::{ContentLinksProcessor, LinkContributor, MetadataRegistry};
use crate::placement::PlacementRegistry;
use crate::storage::{ContentRepository, ContentStore};
use std::collections::HashMap;
use std::sync::Arc;

/// Host context assembled by [`ContentHostBuilder`](crate::server::ContentHostBuilder)
pub struct ContentHost {
    pub(crate) config: SharedRestConfiguration,
    pub(crate) registry: Arc<MetadataRegistry>,
    pub(crate) processor: ContentLinksProcessor,
    pub(crate) contributors: Vec<Arc<dyn LinkContributor>>,
    pub(crate) placements: Arc<PlacementRegistry>,
    pub(crate) stores: HashMap<String, Arc<dyn ContentStore>>,
    pub(crate) repositories: HashMap<String, ContentRepository>,
}

impl ContentHost {
    /// Handle on the process-wide REST configuration
    pub fn rest_configuration(&self) -> &SharedRestConfiguration {
        &self.config
    }

    /// Registered entity metadata
    pub fn registry(&self) -> &MetadataRegistry {
        &self.registry
    }

    /// The content link processor
    pub fn processor(&self) -> &ContentLinksProcessor {
        &self.processor
    }

    /// Placement strategies in effect
    pub fn placements(&self) -> &PlacementRegistry {
        &self.placements
    }

    /// A registered store by name
    pub fn store(&self, name: &str) -> Option<Arc<dyn ContentStore>> {
        self.stores.get(name).cloned()
    }

    /// The content repository of an entity type
    pub fn repository(&self, entity_type: &str) -> Result<&ContentRepository, ConfigError> {
        self.repositories
            .get(entity_type)
            .ok_or_else(|| ConfigError::NoRepository {
                entity_type: entity_type.to_string(),
            })
    }

    /// Entity types backed by a content store
    pub fn repository_types(&self) -> Vec<&str> {
        self.repositories.keys().map(String::as_str).collect()
    }

    /// Wrap an entity and run every link contributor over it
    pub fn represent<'a>(&self, entity: &'a dyn ContentEntity) -> EntityResource<'a> {
        let mut resource = EntityResource::new(entity);
        self.processor.contribute(&mut resource);
        for contributor in &self.contributors {
            contributor.contribute(&mut resource);
        }
        resource
    }
}
