//! Placement strategy registry with per-entity overrides

use crate::core::error::ConfigError;
use crate::placement::{EntityIdPlacementStrategy, PlacementStrategy, UuidPlacementStrategy};
use std::collections::HashMap;
use std::sync::Arc;

/// Strategies by name, per-entity assignments and a default
///
/// The built-in `uuid` and `entity-id` strategies are always registered and
/// UUID placement is the default until another is selected.
#[derive(Clone)]
pub struct PlacementRegistry {
    by_name: HashMap<String, Arc<dyn PlacementStrategy>>,
    assignments: HashMap<String, Arc<dyn PlacementStrategy>>,
    default: Arc<dyn PlacementStrategy>,
}

impl Default for PlacementRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementRegistry {
    pub fn new() -> Self {
        let uuid: Arc<dyn PlacementStrategy> = Arc::new(UuidPlacementStrategy);
        let mut registry = Self {
            by_name: HashMap::new(),
            assignments: HashMap::new(),
            default: uuid.clone(),
        };
        registry.register(uuid);
        registry.register(Arc::new(EntityIdPlacementStrategy));
        registry
    }

    /// Register (or replace) a strategy under its own name
    pub fn register(&mut self, strategy: Arc<dyn PlacementStrategy>) {
        self.by_name.insert(strategy.name().to_string(), strategy);
    }

    /// Strategy registered under a name
    pub fn get(&self, name: &str) -> Option<Arc<dyn PlacementStrategy>> {
        self.by_name.get(name).cloned()
    }

    /// First registered strategy of a concrete type
    pub fn get_typed<T: PlacementStrategy>(&self) -> Option<&T> {
        self.by_name
            .values()
            .find_map(|strategy| strategy.as_any().downcast_ref::<T>())
    }

    /// Make a registered strategy the default for unassigned entity types
    pub fn set_default(&mut self, name: &str) -> Result<(), ConfigError> {
        self.default = self.require(name, "*")?;
        Ok(())
    }

    /// Use a registered strategy for one entity type
    pub fn assign(&mut self, entity_type: &str, name: &str) -> Result<(), ConfigError> {
        let strategy = self.require(name, entity_type)?;
        tracing::debug!(entity_type, placement = name, "Assigned placement strategy");
        self.assignments.insert(entity_type.to_string(), strategy);
        Ok(())
    }

    /// The strategy in effect for an entity type
    pub fn strategy_for(&self, entity_type: &str) -> Arc<dyn PlacementStrategy> {
        self.assignments
            .get(entity_type)
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }

    /// The default strategy
    pub fn default_strategy(&self) -> Arc<dyn PlacementStrategy> {
        self.default.clone()
    }

    fn require(&self, name: &str, entity_type: &str) -> Result<Arc<dyn PlacementStrategy>, ConfigError> {
        self.get(name)
            .ok_or_else(|| ConfigError::PlacementNotRegistered {
                entity_type: entity_type.to_string(),
                placement: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::CustomPlacementStrategy;

    #[test]
    fn test_default_is_uuid() {
        let registry = PlacementRegistry::new();
        assert_eq!(registry.strategy_for("anything").name(), "uuid");
        assert!(registry.get_typed::<UuidPlacementStrategy>().is_some());
        assert!(registry.get_typed::<EntityIdPlacementStrategy>().is_some());
    }

    #[test]
    fn test_assignment_overrides_default() {
        let mut registry = PlacementRegistry::new();
        registry.assign("document", "entity-id").unwrap();

        assert_eq!(registry.strategy_for("document").name(), "entity-id");
        assert_eq!(registry.strategy_for("invoice").name(), "uuid");
    }

    #[test]
    fn test_unknown_strategy_fails() {
        let mut registry = PlacementRegistry::new();
        let err = registry.assign("document", "sharded").unwrap_err();
        assert!(matches!(err, ConfigError::PlacementNotRegistered { .. }));
        assert!(registry.set_default("sharded").is_err());
    }

    #[test]
    fn test_custom_strategy_as_default() {
        let mut registry = PlacementRegistry::new();
        registry.register(Arc::new(CustomPlacementStrategy::new(
            "flat",
            |entity, _meta, _property| Ok(entity.id()),
        )));
        registry.set_default("flat").unwrap();

        assert_eq!(registry.strategy_for("document").name(), "flat");
        assert!(registry.get_typed::<CustomPlacementStrategy>().is_some());
    }
}
