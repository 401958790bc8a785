//! shoal-connect - Source connector SDK and built-in connectors for Shoal
//!
//! This crate provides both the SDK (traits for building source connectors)
//! and the bundled connectors the Shoal ingestion runtime ships with.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      shoal-connect (SDK)                        │
//! │  Source, SourceEvent, Catalog, ConnectorSpec, Registry, State   │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                      Built-in Connectors                        │
//! │  ├── apify-dataset  (paginated parallel fetch)                  │
//! │  ├── smartsheets    (per-row spreadsheet read)                  │
//! │  └── pinterest      (analytics report helpers)                  │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                      Clients                                    │
//! │  └── thin reqwest wrappers behind DatasetStore / SheetStore     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # SDK Usage
//!
//! ```rust,ignore
//! use shoal_connect::{
//!     Source, SourceEvent, CheckResult, Catalog, ConfiguredCatalog, State,
//! };
//!
//! // Implement a custom source
//! #[async_trait::async_trait]
//! impl Source for MySource {
//!     type Config = MySourceConfig;
//!
//!     async fn read(&self, config: &Self::Config, catalog: &ConfiguredCatalog, state: Option<State>)
//!         -> Result<BoxStream<'static, Result<SourceEvent>>> {
//!         // ...
//!     }
//! }
//! ```
//!
//! There is no CLI surface: the host runtime invokes `check`, `discover`, and
//! `read` as library calls, usually through the type-erased registry.

// Core SDK traits
pub mod traits;

// Common types (SensitiveString, etc.)
pub mod types;

// Error types
pub mod error;

// Paginated parallel fetch
pub mod pagination;

// External API clients
pub mod clients;

// Built-in connectors
pub mod connectors;

// Re-export SensitiveString at crate root for convenience
pub use types::SensitiveString;

// Re-export core traits at crate root for ergonomic use
pub use traits::{
    AnySource,
    // Catalog
    Catalog,
    CheckDetail,
    CheckResult,
    CheckResultBuilder,
    ConfiguredCatalog,
    ConfiguredStream,
    ConnectorRunState,
    // Spec
    ConnectorSpec,
    ConnectorSpecBuilder,
    LogLevel,
    // Core connector traits
    Source,
    SourceConfig,
    // Event types
    SourceEvent,
    SourceEventType,
    SourceExt,
    SourceFactory,
    // Registry
    SourceRegistry,
    // State management
    State,
    Stream,
    StreamState,
    SyncMode,
    SyncModeSpec,
};

// Re-export the pagination core
pub use pagination::{Page, PageFetcher, ParallelPaginator, DEFAULT_BATCH_SIZE};

// Re-export error types
pub use error::{ConnectError, ConnectorError, ConnectorResult, ConnectorStatus, Result};

// Re-export commonly used dependencies for connector implementations
pub use async_trait::async_trait;
pub use futures::stream::BoxStream;
pub use serde::{Deserialize, Serialize};
pub use serde_json::Value as JsonValue;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        // Re-exports
        async_trait,
        AnySource,
        BoxStream,
        // Catalog & State
        Catalog,
        CheckDetail,
        CheckResult,
        CheckResultBuilder,
        ConfiguredCatalog,
        ConfiguredStream,
        ConnectError,
        // Errors
        ConnectorError,
        ConnectorResult,
        // Spec
        ConnectorSpec,
        ConnectorSpecBuilder,
        Deserialize,
        JsonValue,
        LogLevel,
        // Pagination
        Page,
        PageFetcher,
        ParallelPaginator,
        Result,
        SensitiveString,
        Serialize,
        // Core traits
        Source,
        SourceConfig,
        // Events
        SourceEvent,
        SourceEventType,
        SourceExt,
        SourceFactory,
        SourceRegistry,
        State,
        Stream,
        StreamState,
        SyncMode,
        SyncModeSpec,
        DEFAULT_BATCH_SIZE,
    };

    // Re-export validation and schema traits
    pub use schemars::JsonSchema;
    pub use validator::Validate;

    // Re-export testing helpers
    pub use crate::traits::testing::{events, MockDatasetStore, MockSheetStore};
}

/// Convenience macro for creating a record event
///
/// # Example
/// ```rust,ignore
/// use shoal_connect::{record, prelude::*};
///
/// let event = record!("DatasetItems", {"id": 1, "name": "Alice"});
/// ```
#[macro_export]
macro_rules! record {
    ($stream:expr, $data:tt) => {
        $crate::SourceEvent::record($stream, serde_json::json!($data))
    };
}
