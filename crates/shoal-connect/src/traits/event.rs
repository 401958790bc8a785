//! Source event types
//!
//! Events are the envelope handed to the host pipeline: a stream name, the
//! raw record payload, and the moment the record was emitted (not fetched).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An event produced by a source connector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEvent {
    /// Event type
    #[serde(rename = "type")]
    pub event_type: SourceEventType,

    /// Stream name this event belongs to
    pub stream: String,

    /// Event data (the record payload for `Record` events)
    pub data: serde_json::Value,

    /// Emission timestamp, captured when the event is created.
    ///
    /// Serialized as epoch milliseconds, matching the host protocol's
    /// `emitted_at` field.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub emitted_at: DateTime<Utc>,
}

impl SourceEvent {
    /// Create a record event, stamping the current time
    pub fn record(stream: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: SourceEventType::Record,
            stream: stream.into(),
            data,
            emitted_at: Utc::now(),
        }
    }

    /// Create a log event
    pub fn log(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            event_type: SourceEventType::Log,
            stream: "_log".to_string(),
            data: serde_json::json!({
                "level": level,
                "message": message.into(),
            }),
            emitted_at: Utc::now(),
        }
    }

    /// Create a state event
    pub fn state(data: serde_json::Value) -> Self {
        Self {
            event_type: SourceEventType::State,
            stream: "_state".to_string(),
            data,
            emitted_at: Utc::now(),
        }
    }

    /// Set the timestamp (builder-style)
    pub fn with_timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.emitted_at = ts;
        self
    }

    /// Emission time as epoch milliseconds
    pub fn emitted_at_millis(&self) -> i64 {
        self.emitted_at.timestamp_millis()
    }

    /// Check if this is a data record
    pub fn is_record(&self) -> bool {
        self.event_type == SourceEventType::Record
    }
}

/// Type of source event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceEventType {
    /// A data record
    Record,
    /// State/checkpoint information
    State,
    /// Log message
    Log,
}

impl SourceEventType {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Record => "record",
            Self::State => "state",
            Self::Log => "log",
        }
    }
}

impl std::fmt::Display for SourceEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Log level for log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level
    Trace,
    /// Debug level
    Debug,
    /// Info level
    Info,
    /// Warning level
    Warn,
    /// Error level
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}
