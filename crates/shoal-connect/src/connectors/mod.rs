//! Bundled connector implementations
//!
//! Each connector lives in its own module and registers through
//! [`create_source_registry`]. The registry pattern keeps the host decoupled
//! from concrete connector types; hosts that only need a subset can build
//! their own registry from the factories directly.

pub mod apify_dataset;
pub mod pinterest;
pub mod smartsheets;

// Re-export registry types from the SDK
pub use super::traits::registry::{AnySource, SourceFactory, SourceRegistry};

use std::sync::Arc;

/// Create a source registry with all bundled sources
pub fn create_source_registry() -> SourceRegistry {
    let mut registry = SourceRegistry::new();

    registry.register(
        "apify-dataset",
        Arc::new(apify_dataset::ApifyDatasetSourceFactory),
    );
    registry.register(
        "smartsheets",
        Arc::new(smartsheets::SmartsheetsSourceFactory),
    );

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_registry() {
        let registry = create_source_registry();
        let sources = registry.list();

        assert!(sources.iter().any(|(name, _)| *name == "apify-dataset"));
        assert!(sources.iter().any(|(name, _)| *name == "smartsheets"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_registry_specs_have_schemas() {
        let registry = create_source_registry();
        for (_, spec) in registry.list() {
            assert!(spec.config_schema.is_some());
        }
    }
}
