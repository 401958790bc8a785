//! Connector registry for runtime connector lookup
//!
//! Hosts create a registry and register the sources they need. The
//! type-erased [`AnySource`] surface lets the host dispatch raw config
//! values without knowing the concrete connector types.

use super::catalog::{Catalog, ConfiguredCatalog};
use super::event::SourceEvent;
use super::source::CheckResult;
use super::spec::ConnectorSpec;
use super::state::State;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Tracked state of a connector within a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorRunState {
    /// Registered but not yet started.
    Registered,
    /// Currently running.
    Running,
    /// Stopped (graceful shutdown).
    Stopped,
    /// Failed with an error.
    Failed,
}

/// Factory trait for creating source instances
pub trait SourceFactory: Send + Sync {
    /// Get the connector specification
    fn spec(&self) -> ConnectorSpec;

    /// Create a boxed source instance for runtime dispatch
    fn create(&self) -> Box<dyn AnySource>;
}

/// Type-erased source for runtime dispatch
///
/// Raw configs are validated against the connector's typed config struct
/// before any remote call is made.
#[async_trait]
pub trait AnySource: Send + Sync {
    /// Check connectivity with raw config
    async fn check_raw(&self, config: &serde_yaml::Value) -> Result<CheckResult>;

    /// Discover streams with raw config
    async fn discover_raw(&self, config: &serde_yaml::Value) -> Result<Catalog>;

    /// Read events with raw config
    async fn read_raw(
        &self,
        config: &serde_yaml::Value,
        catalog: &ConfiguredCatalog,
        state: Option<State>,
    ) -> Result<futures::stream::BoxStream<'static, Result<SourceEvent>>>;
}

/// Registry of available source connectors
///
/// Each entry tracks the connector's runtime state so callers can query
/// which sources are running, stopped, or failed.
pub struct SourceRegistry {
    sources: HashMap<String, SourceRegistryEntry>,
}

/// A source registry entry with factory and tracked state.
pub struct SourceRegistryEntry {
    pub factory: Arc<dyn SourceFactory>,
    pub state: ConnectorRunState,
}

impl SourceRegistry {
    /// Create an empty source registry
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
        }
    }

    /// Register a source factory
    pub fn register(&mut self, name: &str, factory: Arc<dyn SourceFactory>) {
        self.sources.insert(
            name.to_string(),
            SourceRegistryEntry {
                factory,
                state: ConnectorRunState::Registered,
            },
        );
    }

    /// Get a source factory by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn SourceFactory>> {
        self.sources.get(name).map(|e| &e.factory)
    }

    /// Get the run-state of a registered source connector.
    pub fn get_state(&self, name: &str) -> Option<ConnectorRunState> {
        self.sources.get(name).map(|e| e.state)
    }

    /// Update the run-state of a registered source connector.
    pub fn set_state(&mut self, name: &str, state: ConnectorRunState) {
        if let Some(entry) = self.sources.get_mut(name) {
            entry.state = state;
        }
    }

    /// List available source types with their specs
    pub fn list(&self) -> Vec<(&str, ConnectorSpec)> {
        self.sources
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.factory.spec()))
            .collect()
    }

    /// Check if a source is registered
    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    /// Number of registered sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper macro to implement AnySource for a typed Source wrapper
///
/// Reduces boilerplate: deserializes and validates the raw config, then
/// dispatches to the typed implementation.
#[macro_export]
macro_rules! impl_any_source {
    ($wrapper:ty, $source:ty, $config:ty) => {
        #[async_trait::async_trait]
        impl $crate::traits::registry::AnySource for $wrapper {
            async fn check_raw(
                &self,
                config: &serde_yaml::Value,
            ) -> $crate::error::Result<$crate::traits::source::CheckResult> {
                let typed: $config = serde_yaml::from_value(config.clone())
                    .map_err(|e| $crate::error::ConnectorError::Config(e.to_string()))?;
                validator::Validate::validate(&typed)
                    .map_err(|e| $crate::error::ConnectorError::Config(e.to_string()))?;
                <$source as $crate::traits::source::Source>::check(&self.0, &typed).await
            }

            async fn discover_raw(
                &self,
                config: &serde_yaml::Value,
            ) -> $crate::error::Result<$crate::traits::catalog::Catalog> {
                let typed: $config = serde_yaml::from_value(config.clone())
                    .map_err(|e| $crate::error::ConnectorError::Config(e.to_string()))?;
                validator::Validate::validate(&typed)
                    .map_err(|e| $crate::error::ConnectorError::Config(e.to_string()))?;
                <$source as $crate::traits::source::Source>::discover(&self.0, &typed).await
            }

            async fn read_raw(
                &self,
                config: &serde_yaml::Value,
                catalog: &$crate::traits::catalog::ConfiguredCatalog,
                state: Option<$crate::traits::state::State>,
            ) -> $crate::error::Result<
                futures::stream::BoxStream<
                    'static,
                    $crate::error::Result<$crate::traits::event::SourceEvent>,
                >,
            > {
                let typed: $config = serde_yaml::from_value(config.clone())
                    .map_err(|e| $crate::error::ConnectorError::Config(e.to_string()))?;
                validator::Validate::validate(&typed)
                    .map_err(|e| $crate::error::ConnectorError::Config(e.to_string()))?;
                <$source as $crate::traits::source::Source>::read(&self.0, &typed, catalog, state)
                    .await
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_registry_empty() {
        let registry = SourceRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(!registry.contains("apify-dataset"));
    }
}
