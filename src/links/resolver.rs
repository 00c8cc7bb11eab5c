//! Content link resolution
//!
//! Computes the hypermedia links exposed for an entity's content properties.
//! Resolution is a pure function of the entity, its metadata and one
//! configuration snapshot, so it can run concurrently without locking.

use crate::config::RestConfiguration;
use crate::core::entity::ContentEntity;
use crate::core::link::{Link, Links};
use crate::core::metadata::EntityMetadata;

/// Resolves content links for entities
pub struct ContentLinksResolver;

impl ContentLinksResolver {
    /// Compute the links for one entity
    ///
    /// - every content property with a content id yields one link under its
    ///   own relation, at `{base}/{collection}/{id}/{property}`;
    /// - the entity link `{base}/{collection}/{id}` is emitted under the
    ///   collection relation when either fully-qualified or shortcut links are
    ///   enabled, and under the singular relation when shortcut links are
    ///   enabled.
    ///
    /// Entities without content properties get no links at all.
    pub fn resolve_links(
        entity: &dyn ContentEntity,
        metadata: &EntityMetadata,
        config: &RestConfiguration,
    ) -> Links {
        let mut links = Links::new();

        if !metadata.has_content() {
            return links;
        }

        let id = entity.id();
        if id.is_empty() {
            tracing::warn!(
                entity_type = %metadata.singular,
                "Skipping content links for entity without id"
            );
            return links;
        }

        let entity_href = Self::entity_href(config, metadata, &id);

        if config.fully_qualified_links || config.shortcut_links {
            links.add(Link::new(&metadata.plural, &entity_href));
        }
        if config.shortcut_links {
            links.add(Link::new(&metadata.singular, &entity_href));
        }

        for property in &metadata.content_properties {
            if property.content_id(entity).is_none() {
                continue;
            }
            links.add(Link::new(
                &property.name,
                format!("{}/{}", entity_href, property.name),
            ));
        }

        tracing::debug!(
            entity_type = %metadata.singular,
            entity_id = %id,
            links = links.len(),
            "Resolved content links"
        );

        links
    }

    /// The canonical entity URI: `{base}/{collection}/{id}`
    pub fn entity_href(config: &RestConfiguration, metadata: &EntityMetadata, id: &str) -> String {
        format!("{}/{}/{}", config.base(), metadata.plural, id)
    }
}
