//! Connector specification types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Connector specification describing its capabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorSpec {
    /// Unique connector type identifier (e.g., "apify-dataset")
    pub connector_type: String,

    /// Semantic version
    pub version: String,

    /// Human-readable description
    pub description: Option<String>,

    /// Documentation URL
    pub documentation_url: Option<String>,

    /// JSON Schema for the connector's configuration
    pub config_schema: Option<serde_json::Value>,

    /// Supported sync modes
    pub supported_sync_modes: Vec<SyncModeSpec>,

    /// Custom metadata
    pub metadata: HashMap<String, String>,
}

impl ConnectorSpec {
    /// Create a new connector spec
    pub fn new(connector_type: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            connector_type: connector_type.into(),
            version: version.into(),
            description: None,
            documentation_url: None,
            config_schema: None,
            supported_sync_modes: vec![SyncModeSpec::FullRefresh],
            metadata: HashMap::new(),
        }
    }

    /// Create a builder for fluent construction
    pub fn builder(
        connector_type: impl Into<String>,
        version: impl Into<String>,
    ) -> ConnectorSpecBuilder {
        ConnectorSpecBuilder::new(connector_type, version)
    }
}

/// Builder for ConnectorSpec
#[derive(Debug)]
pub struct ConnectorSpecBuilder {
    spec: ConnectorSpec,
}

impl ConnectorSpecBuilder {
    /// Create a new builder
    pub fn new(connector_type: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            spec: ConnectorSpec::new(connector_type, version),
        }
    }

    /// Set description
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.spec.description = Some(desc.into());
        self
    }

    /// Set documentation URL
    pub fn documentation_url(mut self, url: impl Into<String>) -> Self {
        self.spec.documentation_url = Some(url.into());
        self
    }

    /// Set config schema from a type implementing JsonSchema
    pub fn config_schema<T: JsonSchema>(mut self) -> Self {
        let schema = schemars::schema_for!(T);
        self.spec.config_schema = Some(serde_json::to_value(schema).unwrap_or_default());
        self
    }

    /// Set supported sync modes
    pub fn sync_modes(mut self, modes: Vec<SyncModeSpec>) -> Self {
        self.spec.supported_sync_modes = modes;
        self
    }

    /// Add metadata
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec.metadata.insert(key.into(), value.into());
        self
    }

    /// Build the spec
    pub fn build(self) -> ConnectorSpec {
        self.spec
    }
}

/// Sync mode specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncModeSpec {
    /// Full refresh: re-read all data each sync
    FullRefresh,
    /// Incremental: read only new/changed data since last sync
    Incremental,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connector_spec_builder() {
        let spec = ConnectorSpec::builder("apify-dataset", "1.0.0")
            .description("Reads items from an Apify dataset")
            .build();

        assert_eq!(spec.connector_type, "apify-dataset");
        assert_eq!(spec.version, "1.0.0");
        assert_eq!(
            spec.description,
            Some("Reads items from an Apify dataset".to_string())
        );
        assert_eq!(spec.supported_sync_modes, vec![SyncModeSpec::FullRefresh]);
    }
}
