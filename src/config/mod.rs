//! Configuration loading and management

use crate::core::error::ConfigError;
use crate::core::metadata::{ContentPropertyDescriptor, EntityMetadata};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

/// REST link settings read by the link resolver on every call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RestConfiguration {
    /// Prefix prepended to every generated href (e.g. "http://localhost/contentApi")
    pub base_uri: String,

    /// Emit the canonical entity link under the collection relation
    pub fully_qualified_links: bool,

    /// Emit entity links under the singular type relation as well
    pub shortcut_links: bool,
}

impl Default for RestConfiguration {
    fn default() -> Self {
        Self {
            base_uri: String::new(),
            fully_qualified_links: true,
            shortcut_links: true,
        }
    }
}

impl RestConfiguration {
    /// Default settings with the given base URI
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            ..Self::default()
        }
    }

    pub fn with_fully_qualified_links(mut self, enabled: bool) -> Self {
        self.fully_qualified_links = enabled;
        self
    }

    pub fn with_shortcut_links(mut self, enabled: bool) -> Self {
        self.shortcut_links = enabled;
        self
    }

    /// The base URI without a trailing slash
    pub fn base(&self) -> &str {
        self.base_uri.trim_end_matches('/')
    }
}

/// The `rest:` section of a configuration document
///
/// Every setting is optional so that documents can be layered: a setting
/// left out of a later document keeps the value of an earlier one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RestSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_links: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut_links: Option<bool>,
}

impl RestSettings {
    /// True when the section sets nothing
    pub fn is_empty(&self) -> bool {
        self.base_uri.is_none()
            && self.fully_qualified_links.is_none()
            && self.shortcut_links.is_none()
    }

    /// Take every setting present in `later`, keep the rest
    pub fn overlay(&mut self, later: RestSettings) {
        if later.base_uri.is_some() {
            self.base_uri = later.base_uri;
        }
        if later.fully_qualified_links.is_some() {
            self.fully_qualified_links = later.fully_qualified_links;
        }
        if later.shortcut_links.is_some() {
            self.shortcut_links = later.shortcut_links;
        }
    }

    /// Apply the settings present here on top of `base`
    pub fn apply_to(&self, mut base: RestConfiguration) -> RestConfiguration {
        if let Some(base_uri) = &self.base_uri {
            base.base_uri = base_uri.clone();
        }
        if let Some(enabled) = self.fully_qualified_links {
            base.fully_qualified_links = enabled;
        }
        if let Some(enabled) = self.shortcut_links {
            base.shortcut_links = enabled;
        }
        base
    }
}

impl From<RestConfiguration> for RestSettings {
    fn from(config: RestConfiguration) -> Self {
        Self {
            base_uri: Some(config.base_uri),
            fully_qualified_links: Some(config.fully_qualified_links),
            shortcut_links: Some(config.shortcut_links),
        }
    }
}

/// Process-wide holder of the current [`RestConfiguration`]
///
/// Readers take an `Arc` snapshot and use it for a whole resolution. Writers
/// never mutate a published snapshot; they swap in a new one.
#[derive(Debug, Clone, Default)]
pub struct SharedRestConfiguration {
    current: Arc<RwLock<Arc<RestConfiguration>>>,
}

impl SharedRestConfiguration {
    pub fn new(config: RestConfiguration) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(config))),
        }
    }

    /// The configuration in effect right now
    pub fn snapshot(&self) -> Arc<RestConfiguration> {
        // A poisoned lock still guards a complete snapshot: writers only swap Arcs.
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Publish a new configuration
    pub fn replace(&self, config: RestConfiguration) {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *current = Arc::new(config);
    }

    /// Publish a modified copy of the current configuration
    pub fn update(&self, change: impl FnOnce(&mut RestConfiguration)) {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let mut next = RestConfiguration::clone(&current);
        change(&mut next);
        *current = Arc::new(next);
    }
}

/// Content configuration of one entity type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityContentConfig {
    /// Singular form (e.g., "document")
    pub singular: String,

    /// Plural form; derived from `singular` when absent
    #[serde(default)]
    pub plural: Option<String>,

    /// Shorthand: content-id field names, slots named as in
    /// [`EntityMetadata::from_content_id_fields`]
    #[serde(default)]
    pub content_id_fields: Vec<String>,

    /// Explicit content slots, appended after the shorthand ones
    #[serde(default)]
    pub content: Vec<ContentPropertyDescriptor>,

    /// Name of the registered content store backing this entity
    #[serde(default)]
    pub store: Option<String>,

    /// Name of the registered placement strategy; UUID placement when absent
    #[serde(default)]
    pub placement: Option<String>,
}

impl EntityContentConfig {
    /// Build the metadata descriptor for this entity type
    pub fn to_metadata(&self) -> EntityMetadata {
        let fields: Vec<&str> = self.content_id_fields.iter().map(String::as_str).collect();
        let mut metadata = EntityMetadata::from_content_id_fields(self.singular.clone(), &fields)
            .with_properties(self.content.iter().cloned());

        if let Some(plural) = &self.plural {
            metadata = metadata.with_plural(plural.clone());
        }

        metadata
    }
}

/// Complete configuration for content links and stores
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Link generation settings set by this document
    #[serde(default, skip_serializing_if = "RestSettings::is_empty")]
    pub rest: RestSettings,

    /// Entity types carrying content
    #[serde(default)]
    pub entities: Vec<EntityContentConfig>,
}

impl ContentConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })?;
        Ok(config)
    }

    /// The REST configuration described by this document, defaults filled in
    pub fn rest_configuration(&self) -> RestConfiguration {
        self.rest.apply_to(RestConfiguration::default())
    }

    /// Find the configuration of an entity type
    pub fn find_entity(&self, singular: &str) -> Option<&EntityContentConfig> {
        self.entities.iter().find(|e| e.singular == singular)
    }

    /// Merge several configurations
    ///
    /// Entity entries with the same singular name are replaced by the later
    /// configuration. REST settings are merged one by one: a later document
    /// only overrides the settings it actually sets.
    pub fn merge(configs: Vec<ContentConfig>) -> Self {
        let mut merged = ContentConfig::default();

        for config in configs {
            merged.rest.overlay(config.rest);
            for entity in config.entities {
                match merged
                    .entities
                    .iter_mut()
                    .find(|e| e.singular == entity.singular)
                {
                    Some(existing) => *existing = entity,
                    None => merged.entities.push(entity),
                }
            }
        }

        merged
    }
}
