//! Catalog types for describing available streams

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Catalog of available streams from a source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Available streams
    pub streams: Vec<Stream>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog with a single stream
    pub fn single_stream(name: impl Into<String>, schema: serde_json::Value) -> Self {
        Self {
            streams: vec![Stream::new(name, schema)],
        }
    }

    /// Add a stream to the catalog
    pub fn add_stream(mut self, stream: Stream) -> Self {
        self.streams.push(stream);
        self
    }

    /// Find a stream by name
    pub fn find_stream(&self, name: &str) -> Option<&Stream> {
        self.streams.iter().find(|s| s.name == name)
    }
}

/// A stream represents a collection of records (e.g., a dataset, a sheet)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    /// Unique name of the stream (e.g., "DatasetItems", a sheet name)
    pub name: String,

    /// Namespace (e.g., workspace or folder name)
    pub namespace: Option<String>,

    /// JSON Schema of the stream's records
    pub json_schema: serde_json::Value,

    /// Supported sync modes for this stream
    pub supported_sync_modes: Vec<SyncMode>,
}

impl Stream {
    /// Create a new stream, full-refresh by default
    pub fn new(name: impl Into<String>, json_schema: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            json_schema,
            supported_sync_modes: vec![SyncMode::FullRefresh],
        }
    }

    /// Set namespace
    pub fn namespace(mut self, ns: impl Into<String>) -> Self {
        self.namespace = Some(ns.into());
        self
    }

    /// Set supported sync modes
    pub fn sync_modes(mut self, modes: Vec<SyncMode>) -> Self {
        self.supported_sync_modes = modes;
        self
    }

    /// Get fully qualified name
    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns, self.name),
            None => self.name.clone(),
        }
    }
}

/// Sync mode for a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Full refresh: re-read all data each sync
    #[default]
    FullRefresh,
    /// Incremental: read only new/changed data
    Incremental,
}

/// Configured catalog (user's selection of streams and sync modes)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfiguredCatalog {
    /// Configured streams
    pub streams: Vec<ConfiguredStream>,
}

impl ConfiguredCatalog {
    /// Create an empty configured catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a catalog, selecting all streams with default settings
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            streams: catalog
                .streams
                .iter()
                .map(ConfiguredStream::from_stream)
                .collect(),
        }
    }

    /// Add a configured stream
    pub fn add_stream(mut self, stream: ConfiguredStream) -> Self {
        self.streams.push(stream);
        self
    }

    /// Find a configured stream by name
    pub fn find_stream(&self, name: &str) -> Option<&ConfiguredStream> {
        self.streams.iter().find(|s| s.stream.name == name)
    }
}

/// A stream configured by the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfiguredStream {
    /// The stream definition
    pub stream: Stream,

    /// Selected sync mode
    pub sync_mode: SyncMode,
}

impl ConfiguredStream {
    /// Create from a stream with default settings
    pub fn from_stream(stream: &Stream) -> Self {
        let sync_mode = stream
            .supported_sync_modes
            .first()
            .copied()
            .unwrap_or(SyncMode::FullRefresh);

        Self {
            stream: stream.clone(),
            sync_mode,
        }
    }

    /// Set sync mode
    pub fn sync_mode(mut self, mode: SyncMode) -> Self {
        self.sync_mode = mode;
        self
    }
}
