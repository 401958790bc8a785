//! Core connector traits and types
//!
//! The fundamental building blocks for Shoal source connectors:
//! - `Source` - check/discover/read against an external system
//! - `Catalog` - available streams and their schemas
//! - `SourceEvent` - the record envelope handed to the host
//! - `ConnectorSpec` - connector capabilities and config schema
//! - `State` - sync state (accepted, ignored by full-refresh sources)
//! - `registry` - type-erased runtime dispatch
//! - `testing` - in-memory stores for connector tests

pub mod catalog;
pub mod event;
pub mod registry;
pub mod source;
pub mod spec;
pub mod state;
pub mod testing;

// Re-export source types
pub use source::{CheckDetail, CheckResult, CheckResultBuilder, Source, SourceConfig, SourceExt};

// Re-export event types
pub use event::{LogLevel, SourceEvent, SourceEventType};

// Re-export catalog types
pub use catalog::{Catalog, ConfiguredCatalog, ConfiguredStream, Stream, SyncMode};

// Re-export state types
pub use state::{State, StreamState};

// Re-export spec types
pub use spec::{ConnectorSpec, ConnectorSpecBuilder, SyncModeSpec};

// Re-export registry types
pub use registry::{AnySource, ConnectorRunState, SourceFactory, SourceRegistry};

// Re-export testing utilities
pub use testing::{MockDatasetStore, MockSheetStore};
