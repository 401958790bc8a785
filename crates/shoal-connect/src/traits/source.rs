//! Source connector trait
//!
//! This module provides the core `Source` trait for implementing data source
//! connectors: connectivity check, schema discovery, and record read.

use super::catalog::{Catalog, ConfiguredCatalog};
use super::event::SourceEvent;
use super::spec::ConnectorSpec;
use super::state::State;
use crate::error::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use std::fmt;
use validator::Validate;

/// Trait for source connector configuration
pub trait SourceConfig: DeserializeOwned + Validate + JsonSchema + Send + Sync {}

// Blanket implementation
impl<T> SourceConfig for T where T: DeserializeOwned + Validate + JsonSchema + Send + Sync {}

/// Result of a connection check with detailed status information
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Whether the check succeeded
    pub success: bool,
    /// Error message if failed
    pub message: Option<String>,
    /// Individual check details
    pub checks: Vec<CheckDetail>,
}

/// A single check detail
#[derive(Debug, Clone)]
pub struct CheckDetail {
    /// Name of the check (e.g., "connectivity", "auth")
    pub name: String,
    /// Whether this check passed
    pub passed: bool,
    /// Description or error message
    pub message: Option<String>,
}

impl CheckDetail {
    /// Create a passed check
    pub fn passed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            message: None,
        }
    }

    /// Create a failed check
    pub fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            message: Some(message.into()),
        }
    }
}

impl CheckResult {
    /// Create a successful check result
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
            checks: Vec::new(),
        }
    }

    /// Create a failed check result
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            checks: Vec::new(),
        }
    }

    /// Check if successful
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Create a builder for detailed checks
    pub fn builder() -> CheckResultBuilder {
        CheckResultBuilder::new()
    }

    /// Get all failed checks
    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckDetail> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            write!(f, "✓ Connection check passed")?;
        } else {
            write!(f, "✗ Connection check failed")?;
            if let Some(ref msg) = self.message {
                write!(f, ": {}", msg)?;
            }
        }

        if !self.checks.is_empty() {
            writeln!(f)?;
            for check in &self.checks {
                let status = if check.passed { "✓" } else { "✗" };
                write!(f, "  {} {}", status, check.name)?;
                if let Some(ref msg) = check.message {
                    write!(f, ": {}", msg)?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Builder for creating CheckResult with multiple validation checks
pub struct CheckResultBuilder {
    checks: Vec<CheckDetail>,
}

impl CheckResultBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Add a passed check
    pub fn check_passed(mut self, name: impl Into<String>) -> Self {
        self.checks.push(CheckDetail::passed(name));
        self
    }

    /// Add a failed check
    pub fn check_failed(mut self, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.checks.push(CheckDetail::failed(name, message));
        self
    }

    /// Build the final CheckResult
    pub fn build(self) -> CheckResult {
        let all_passed = self.checks.iter().all(|c| c.passed);
        let message = if all_passed {
            None
        } else {
            let failed: Vec<_> = self
                .checks
                .iter()
                .filter(|c| !c.passed)
                .filter_map(|c| c.message.clone())
                .collect();
            if failed.is_empty() {
                Some("One or more checks failed".to_string())
            } else {
                Some(failed.join("; "))
            }
        };

        CheckResult {
            success: all_passed,
            message,
            checks: self.checks,
        }
    }
}

impl Default for CheckResultBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for source connectors
///
/// Source connectors read data from external systems and produce events.
///
/// # Example
///
/// ```rust,ignore
/// use shoal_connect::prelude::*;
///
/// #[derive(Debug, Deserialize, Validate, JsonSchema)]
/// pub struct MySourceConfig {
///     #[validate(length(min = 1))]
///     pub resource_id: String,
/// }
///
/// pub struct MySource;
///
/// #[async_trait]
/// impl Source for MySource {
///     type Config = MySourceConfig;
///
///     fn spec() -> ConnectorSpec {
///         ConnectorSpec::new("my-source", "1.0.0")
///     }
///
///     async fn check(&self, config: &Self::Config) -> Result<CheckResult> {
///         Ok(CheckResult::success())
///     }
///
///     async fn discover(&self, config: &Self::Config) -> Result<Catalog> {
///         Ok(Catalog::default())
///     }
///
///     async fn read(
///         &self,
///         config: &Self::Config,
///         catalog: &ConfiguredCatalog,
///         state: Option<State>,
///     ) -> Result<BoxStream<'static, Result<SourceEvent>>> {
///         todo!()
///     }
/// }
/// ```
#[async_trait]
pub trait Source: Send + Sync {
    /// Configuration type for this source
    type Config: SourceConfig;

    /// Return the connector specification
    ///
    /// This describes the connector's capabilities and configuration schema.
    fn spec() -> ConnectorSpec;

    /// Check connectivity and configuration
    ///
    /// Connectivity problems are reported through the returned
    /// [`CheckResult`], not as errors: a bad resource id or expired token
    /// yields `Ok(CheckResult::failure(..))` with a human-readable message.
    async fn check(&self, config: &Self::Config) -> Result<CheckResult>;

    /// Discover available streams
    ///
    /// Returns a catalog of all streams available to sync from the source.
    /// Unlike `check`, discovery failures propagate as errors.
    async fn discover(&self, config: &Self::Config) -> Result<Catalog>;

    /// Read data from the source
    ///
    /// Returns a lazy stream of events for the configured streams. Errors
    /// encountered mid-read are logged and yielded as `Err`, terminating the
    /// stream (no skip-and-continue).
    ///
    /// # Arguments
    ///
    /// * `config` - Source configuration
    /// * `catalog` - User's configured streams and sync modes
    /// * `state` - Previous state; accepted and ignored by full-refresh sources
    async fn read(
        &self,
        config: &Self::Config,
        catalog: &ConfiguredCatalog,
        state: Option<State>,
    ) -> Result<BoxStream<'static, Result<SourceEvent>>>;
}

/// Extension trait for source operations
#[async_trait]
pub trait SourceExt: Source {
    /// Validate configuration
    fn validate_config(config: &Self::Config) -> crate::error::ConnectorResult<()> {
        config
            .validate()
            .map_err(|e| crate::error::ConnectorError::Config(e.to_string()))
    }

    /// Get configuration schema as JSON
    fn config_schema_json() -> serde_json::Value {
        let schema = schemars::schema_for!(Self::Config);
        serde_json::to_value(schema).unwrap_or_default()
    }
}

// Blanket implementation
impl<T: Source> SourceExt for T {}
