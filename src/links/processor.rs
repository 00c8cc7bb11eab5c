//! Link contribution hook for host serializers

use crate::config::SharedRestConfiguration;
use crate::core::link::EntityResource;
use crate::links::registry::MetadataRegistry;
use crate::links::resolver::ContentLinksResolver;
use std::sync::Arc;

/// Capability a host serializer calls before rendering an entity
///
/// Implementations add links to the resource; they never remove links
/// contributed by others and must not fail.
pub trait LinkContributor: Send + Sync {
    fn contribute(&self, resource: &mut EntityResource<'_>);
}

/// Contributes content links using registered metadata and the current
/// REST configuration
#[derive(Clone)]
pub struct ContentLinksProcessor {
    registry: Arc<MetadataRegistry>,
    config: SharedRestConfiguration,
}

impl ContentLinksProcessor {
    pub fn new(registry: Arc<MetadataRegistry>, config: SharedRestConfiguration) -> Self {
        Self { registry, config }
    }

    /// The configuration holder read on every call
    pub fn rest_configuration(&self) -> &SharedRestConfiguration {
        &self.config
    }

    /// The metadata registry consulted for entity types
    pub fn registry(&self) -> &MetadataRegistry {
        &self.registry
    }

    /// Add content links to a resource
    pub fn process(&self, resource: &mut EntityResource<'_>) {
        let entity = resource.entity();
        let Some(metadata) = self.registry.get(entity.entity_type()) else {
            tracing::debug!(
                entity_type = %entity.entity_type(),
                "No content metadata registered, skipping"
            );
            return;
        };

        let snapshot = self.config.snapshot();
        let links = ContentLinksResolver::resolve_links(entity, &metadata, &snapshot);
        resource.links_mut().extend(links.iter());
    }
}

impl LinkContributor for ContentLinksProcessor {
    fn contribute(&self, resource: &mut EntityResource<'_>) {
        self.process(resource);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RestConfiguration;
    use crate::core::entity::ContentEntity;
    use crate::core::field::FieldValue;
    use crate::core::link::Link;
    use crate::core::metadata::EntityMetadata;

    struct Report {
        content_id: Option<String>,
    }

    impl ContentEntity for Report {
        fn entity_type(&self) -> &str {
            "report"
        }

        fn id(&self) -> String {
            "12".to_string()
        }

        fn field_value(&self, field: &str) -> Option<FieldValue> {
            (field == "contentId").then(|| self.content_id.clone().into())
        }

        fn set_field_value(&mut self, _field: &str, _value: FieldValue) -> bool {
            false
        }
    }

    fn processor() -> ContentLinksProcessor {
        let mut registry = MetadataRegistry::new();
        registry
            .register(EntityMetadata::from_content_id_fields("report", &["contentId"]))
            .unwrap();
        ContentLinksProcessor::new(
            Arc::new(registry),
            SharedRestConfiguration::new(RestConfiguration::new("http://localhost")),
        )
    }

    #[test]
    fn test_process_adds_links() {
        let report = Report {
            content_id: Some("abc".to_string()),
        };
        let mut resource = EntityResource::new(&report);
        processor().process(&mut resource);

        assert!(resource
            .links()
            .contains("content", "http://localhost/reports/12/content"));
        assert!(resource.links().contains("reports", "http://localhost/reports/12"));
    }

    #[test]
    fn test_process_keeps_existing_links_and_is_idempotent() {
        let report = Report {
            content_id: Some("abc".to_string()),
        };
        let mut resource = EntityResource::new(&report);
        resource
            .links_mut()
            .add(Link::new("self", "http://localhost/reports/12"));

        let processor = processor();
        processor.contribute(&mut resource);
        let after_first = resource.links().len();
        processor.contribute(&mut resource);

        assert_eq!(resource.links().len(), after_first);
        assert!(resource.links().has_rel("self"));
    }

    #[test]
    fn test_reads_configuration_on_every_call() {
        let report = Report {
            content_id: Some("abc".to_string()),
        };
        let processor = processor();
        processor.rest_configuration().update(|c| {
            c.fully_qualified_links = false;
            c.shortcut_links = false;
        });

        let mut resource = EntityResource::new(&report);
        processor.process(&mut resource);

        assert!(!resource.links().has_rel("reports"));
        assert!(!resource.links().has_rel("report"));
        assert!(resource.links().has_rel("content"));
    }

    #[test]
    fn test_unregistered_entity_is_noop() {
        let processor = ContentLinksProcessor::new(
            Arc::new(MetadataRegistry::new()),
            SharedRestConfiguration::default(),
        );
        let report = Report { content_id: None };
        let mut resource = EntityResource::new(&report);
        processor.process(&mut resource);
        assert!(resource.links().is_empty());
    }
}
