//! State passed to `read` by the host
//!
//! All bundled connectors are full-refresh: they accept a `State` argument
//! for protocol compatibility and ignore it. The type is kept so hosts that
//! persist state for other sources can use one call shape everywhere.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// State for tracking sync progress
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct State {
    /// Per-stream state
    pub streams: HashMap<String, StreamState>,

    /// Global state (shared across streams)
    pub global: HashMap<String, serde_json::Value>,
}

impl State {
    /// Create empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get state for a specific stream
    pub fn get_stream(&self, stream_name: &str) -> Option<&StreamState> {
        self.streams.get(stream_name)
    }

    /// Set state for a specific stream
    pub fn set_stream(&mut self, stream_name: impl Into<String>, state: StreamState) {
        self.streams.insert(stream_name.into(), state);
    }

    /// Get global value
    pub fn get_global(&self, key: &str) -> Option<&serde_json::Value> {
        self.global.get(key)
    }

    /// Set global value
    pub fn set_global(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.global.insert(key.into(), value);
    }

    /// Check if state is empty
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty() && self.global.is_empty()
    }
}

/// State for a single stream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamState {
    /// Stream name
    pub stream_name: String,

    /// Cursor field name (unused by full-refresh sources)
    pub cursor_field: Option<String>,

    /// Last cursor value
    pub cursor_value: Option<serde_json::Value>,
}

impl StreamState {
    /// Create new stream state
    pub fn new(stream_name: impl Into<String>) -> Self {
        Self {
            stream_name: stream_name.into(),
            cursor_field: None,
            cursor_value: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_operations() {
        let mut state = State::new();
        assert!(state.is_empty());

        state.set_stream("items", StreamState::new("items"));
        state.set_global("last_sync", json!("2026-08-06T10:00:00Z"));

        assert!(!state.is_empty());
        assert!(state.get_stream("items").is_some());
        assert_eq!(
            state.get_global("last_sync"),
            Some(&json!("2026-08-06T10:00:00Z"))
        );
    }
}
