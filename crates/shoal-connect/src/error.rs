//! Error types for shoal-connect
//!
//! Provides structured error handling for both the host-facing surface and
//! individual connectors.

use std::fmt;
use thiserror::Error;

/// Result type alias for shoal-connect operations
pub type Result<T> = std::result::Result<T, ConnectError>;

/// Result type alias for connector-internal operations
pub type ConnectorResult<T> = std::result::Result<T, ConnectorError>;

/// Main error type surfaced to the host runtime
#[derive(Error, Debug)]
pub enum ConnectError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source connector error
    #[error("Source '{name}' error: {message}")]
    Source { name: String, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Connector error (from individual connectors)
    #[error(transparent)]
    Connector(#[from] ConnectorError),
}

impl ConnectError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a source error
    pub fn source(name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Source {
            name: name.into(),
            message: msg.into(),
        }
    }
}

/// Errors that can occur in connector operations
///
/// The taxonomy distinguishes missing resources from transport failures so
/// callers can tell "the dataset id is wrong" apart from "the network is
/// down" without parsing messages.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Configuration validation failed
    #[error("configuration error: {0}")]
    Config(String),

    /// Connection to external system failed
    #[error("connection error: {0}")]
    Connection(String),

    /// Authentication failed
    #[error("authentication error: {0}")]
    Auth(String),

    /// Resource not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limited by external system
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Timeout waiting for response
    #[error("timeout: {0}")]
    Timeout(String),

    /// Data serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Schema mismatch or malformed remote data
    #[error("schema error: {0}")]
    Schema(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl ConnectorError {
    /// Check if this error is worth retrying by the host
    ///
    /// The connectors themselves never retry; this classification exists for
    /// the ingestion runtime that owns resilience policy.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::RateLimited(_) | Self::Timeout(_)
        )
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a not-found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a schema error
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }
}

/// Connector status for health reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorStatus {
    /// Starting up
    Starting,
    /// Running normally
    Running,
    /// Stopped (graceful shutdown)
    Stopped,
    /// Failed permanently
    Failed,
}

impl fmt::Display for ConnectorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Starting => write!(f, "starting"),
            Self::Running => write!(f, "running"),
            Self::Stopped => write!(f, "stopped"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConnectError::source("apify-dataset", "connection timeout");
        assert_eq!(
            err.to_string(),
            "Source 'apify-dataset' error: connection timeout"
        );
    }

    #[test]
    fn test_connector_error_retryable() {
        assert!(ConnectorError::connection("timeout").is_retryable());
        assert!(ConnectorError::RateLimited("slow down".to_string()).is_retryable());
        assert!(ConnectorError::Timeout("30s".to_string()).is_retryable());
        assert!(!ConnectorError::config("bad config").is_retryable());
        assert!(!ConnectorError::not_found("dataset abc").is_retryable());
    }

    #[test]
    fn test_not_found_vs_connection() {
        let missing = ConnectorError::not_found("dataset deadbeef does not exist");
        let transport = ConnectorError::connection("dns failure");
        assert!(missing.to_string().contains("deadbeef"));
        assert!(matches!(missing, ConnectorError::NotFound(_)));
        assert!(matches!(transport, ConnectorError::Connection(_)));
    }
}
