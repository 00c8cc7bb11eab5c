//! Builder wiring metadata, stores and placement strategies into a host
//!
//! Every reference between the pieces is checked in [`ContentHostBuilder::build`]:
//! an entity naming a store or placement strategy that was never registered
//! fails the build instead of failing later at request time.

use crate::config::{ContentConfig, RestConfiguration, SharedRestConfiguration};
use crate::core::entity::EntityDescriptor;
use crate::core::error::{ConfigError, ContentResult};
use crate::core::metadata::EntityMetadata;
use crate::links::{ContentLinksProcessor, LinkContributor, MetadataRegistry};
use crate::placement::{PlacementRegistry, PlacementStrategy};
use crate::server::host::ContentHost;
use crate::storage::{ContentRepository, ContentStore};
use std::collections::HashMap;
use std::sync::Arc;

/// One entity type and the names it is wired to
#[derive(Debug, Clone)]
struct EntityBinding {
    metadata: EntityMetadata,
    store: Option<String>,
    placement: Option<String>,
}

/// Builder for [`ContentHost`]
///
/// # Example
///
/// ```rust,ignore
/// let host = ContentHostBuilder::new()
///     .with_config(ContentConfig::from_yaml_file("content.yaml")?)
///     .with_store("memory", Arc::new(InMemoryContentStore::new()))
///     .build()?;
///
/// let resource = host.represent(&document);
/// ```
pub struct ContentHostBuilder {
    rest: RestConfiguration,
    entities: Vec<EntityBinding>,
    stores: HashMap<String, Arc<dyn ContentStore>>,
    placements: PlacementRegistry,
    default_placement: Option<String>,
    placement_overrides: HashMap<String, String>,
    contributors: Vec<Arc<dyn LinkContributor>>,
}

impl Default for ContentHostBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentHostBuilder {
    pub fn new() -> Self {
        Self {
            rest: RestConfiguration::default(),
            entities: Vec::new(),
            stores: HashMap::new(),
            placements: PlacementRegistry::new(),
            default_placement: None,
            placement_overrides: HashMap::new(),
            contributors: Vec::new(),
        }
    }

    /// Apply a loaded configuration: REST settings and entity bindings
    ///
    /// Only the REST settings present in the document replace the current ones.
    pub fn with_config(mut self, config: ContentConfig) -> Self {
        self.rest = config.rest.apply_to(self.rest);
        for entity in config.entities {
            self.bind(EntityBinding {
                metadata: entity.to_metadata(),
                store: entity.store,
                placement: entity.placement,
            });
        }
        self
    }

    /// Set the REST link configuration
    pub fn with_rest_configuration(mut self, rest: RestConfiguration) -> Self {
        self.rest = rest;
        self
    }

    /// Register entity metadata used for links only
    pub fn register_entity(mut self, metadata: EntityMetadata) -> Self {
        self.bind(EntityBinding {
            metadata,
            store: None,
            placement: None,
        });
        self
    }

    /// Register entity metadata backed by a named store
    pub fn register_entity_with_store(
        mut self,
        metadata: EntityMetadata,
        store: impl Into<String>,
    ) -> Self {
        self.bind(EntityBinding {
            metadata,
            store: Some(store.into()),
            placement: None,
        });
        self
    }

    /// Register an entity type through its compile-time descriptor
    pub fn register_entity_type<E: EntityDescriptor>(self, store: Option<&str>) -> Self {
        match store {
            Some(store) => self.register_entity_with_store(E::describe(), store),
            None => self.register_entity(E::describe()),
        }
    }

    /// Use a named placement strategy for one entity type
    ///
    /// May be called before or after the entity is registered. Overrides
    /// take precedence over a placement named in the configuration; an
    /// override for an entity type that is never registered fails the build.
    pub fn with_entity_placement(
        mut self,
        entity_type: impl Into<String>,
        placement: impl Into<String>,
    ) -> Self {
        self.placement_overrides
            .insert(entity_type.into(), placement.into());
        self
    }

    /// Register a content store under a name
    pub fn with_store(mut self, name: impl Into<String>, store: Arc<dyn ContentStore>) -> Self {
        self.stores.insert(name.into(), store);
        self
    }

    /// Register a placement strategy under its own name
    pub fn with_placement(mut self, strategy: Arc<dyn PlacementStrategy>) -> Self {
        self.placements.register(strategy);
        self
    }

    /// Select the placement strategy used when an entity names none
    pub fn with_default_placement(mut self, name: impl Into<String>) -> Self {
        self.default_placement = Some(name.into());
        self
    }

    /// Run an additional contributor after the content links processor
    pub fn with_link_contributor(mut self, contributor: Arc<dyn LinkContributor>) -> Self {
        self.contributors.push(contributor);
        self
    }

    fn bind(&mut self, binding: EntityBinding) {
        match self
            .entities
            .iter_mut()
            .find(|b| b.metadata.singular == binding.metadata.singular)
        {
            Some(existing) => *existing = binding,
            None => self.entities.push(binding),
        }
    }

    /// Validate every reference and assemble the host
    pub fn build(self) -> ContentResult<ContentHost> {
        let mut registry = MetadataRegistry::new();
        for binding in &self.entities {
            registry.register(binding.metadata.clone())?;
        }

        let mut placements = self.placements;
        if let Some(name) = &self.default_placement {
            placements.set_default(name)?;
        }
        for (entity_type, name) in &self.placement_overrides {
            if registry.get(entity_type).is_none() {
                return Err(ConfigError::UnknownEntity {
                    entity_type: entity_type.clone(),
                    what: format!("placement override '{}'", name),
                }
                .into());
            }
        }
        for binding in &self.entities {
            let singular = &binding.metadata.singular;
            let name = self
                .placement_overrides
                .get(singular)
                .or(binding.placement.as_ref());
            if let Some(name) = name {
                placements.assign(singular, name)?;
            }
        }

        let mut repositories = HashMap::new();
        for binding in &self.entities {
            let Some(store_name) = &binding.store else {
                continue;
            };
            let store = self.stores.get(store_name).cloned().ok_or_else(|| {
                ConfigError::StoreNotRegistered {
                    entity_type: binding.metadata.singular.clone(),
                    store: store_name.clone(),
                }
            })?;
            let Some(metadata) = registry.get(&binding.metadata.singular) else {
                continue;
            };
            let placement = placements.strategy_for(&binding.metadata.singular);

            tracing::info!(
                entity_type = %binding.metadata.singular,
                store = %store_name,
                placement = placement.name(),
                "Registered content repository"
            );

            repositories.insert(
                binding.metadata.singular.clone(),
                ContentRepository::new(metadata, store, placement),
            );
        }

        let registry = Arc::new(registry);
        let config = SharedRestConfiguration::new(self.rest);
        let processor = ContentLinksProcessor::new(registry.clone(), config.clone());

        tracing::info!(
            entities = registry.len(),
            repositories = repositories.len(),
            stores = self.stores.len(),
            "Content host ready"
        );

        Ok(ContentHost {
            config,
            registry,
            processor,
            contributors: self.contributors,
            placements: Arc::new(placements),
            stores: self.stores,
            repositories,
        })
    }
}
