//! Testing utilities for connectors
//!
//! In-memory store implementations and helpers for exercising connectors
//! without external systems.
//!
//! # Example
//!
//! ```rust,ignore
//! use shoal_connect::testing::*;
//!
//! #[tokio::test]
//! async fn test_read() {
//!     let store = Arc::new(MockDatasetStore::numbered("ds1", 51_500));
//!     let source = ApifyDatasetSource::with_store(store);
//!     // ...
//! }
//! ```

use crate::clients::apify::{DatasetMetadata, DatasetStore};
use crate::clients::smartsheet::{Sheet, SheetStore};
use crate::error::{ConnectorError, ConnectorResult};
use crate::pagination::Page;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

// ============================================================================
// Mock dataset store
// ============================================================================

/// An in-memory dataset store holding one dataset
pub struct MockDatasetStore {
    dataset_id: String,
    items: Vec<serde_json::Value>,
    fail_at_offset: Mutex<Option<u64>>,
    fetch_calls: AtomicUsize,
}

impl MockDatasetStore {
    /// Create a store holding `items` under `dataset_id`
    pub fn new(dataset_id: impl Into<String>, items: Vec<serde_json::Value>) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            items,
            fail_at_offset: Mutex::new(None),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    /// Create a store with `count` numbered items (`{"n": 0}`, `{"n": 1}`, ...)
    pub fn numbered(dataset_id: impl Into<String>, count: u64) -> Self {
        let items = (0..count).map(|i| serde_json::json!({ "n": i })).collect();
        Self::new(dataset_id, items)
    }

    /// Make `list_items` fail at the given offset
    pub fn fail_at_offset(self, offset: u64) -> Self {
        *self.fail_at_offset.lock() = Some(offset);
        self
    }

    /// Number of `list_items` calls issued so far
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatasetStore for MockDatasetStore {
    async fn get_dataset(&self, dataset_id: &str) -> ConnectorResult<DatasetMetadata> {
        if dataset_id != self.dataset_id {
            return Err(ConnectorError::not_found(format!(
                "dataset {dataset_id} does not exist or is not accessible"
            )));
        }
        Ok(DatasetMetadata {
            id: self.dataset_id.clone(),
            name: None,
            item_count: self.items.len() as u64,
            clean_item_count: None,
        })
    }

    async fn list_items(
        &self,
        dataset_id: &str,
        _clean: bool,
        offset: u64,
        limit: u64,
    ) -> ConnectorResult<Page> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        if dataset_id != self.dataset_id {
            return Err(ConnectorError::not_found(format!(
                "dataset {dataset_id} does not exist or is not accessible"
            )));
        }
        if *self.fail_at_offset.lock() == Some(offset) {
            return Err(ConnectorError::connection(format!(
                "injected failure at offset {offset}"
            )));
        }

        let start = (offset as usize).min(self.items.len());
        let end = ((offset + limit) as usize).min(self.items.len());
        Ok(Page::new(offset, self.items[start..end].to_vec()))
    }
}

// ============================================================================
// Mock sheet store
// ============================================================================

/// An in-memory sheet store holding one sheet
pub struct MockSheetStore {
    spreadsheet_id: String,
    sheet: Sheet,
    fail_message: Mutex<Option<String>>,
}

impl MockSheetStore {
    /// Create a store serving `sheet` under `spreadsheet_id`
    pub fn new(spreadsheet_id: impl Into<String>, sheet: Sheet) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            sheet,
            fail_message: Mutex::new(None),
        }
    }

    /// Make every `get_sheet` fail with a connection error
    pub fn fail_with(self, message: impl Into<String>) -> Self {
        *self.fail_message.lock() = Some(message.into());
        self
    }
}

#[async_trait]
impl SheetStore for MockSheetStore {
    async fn get_sheet(&self, _access_token: &str, spreadsheet_id: &str) -> ConnectorResult<Sheet> {
        if let Some(msg) = self.fail_message.lock().clone() {
            return Err(ConnectorError::connection(msg));
        }
        if spreadsheet_id != self.spreadsheet_id {
            return Err(ConnectorError::not_found(format!(
                "sheet {spreadsheet_id}: Not Found | Check your spreadsheet ID."
            )));
        }
        Ok(self.sheet.clone())
    }
}

// ============================================================================
// Event helpers
// ============================================================================

/// Helpers for draining read streams in tests
pub mod events {
    use crate::error::Result;
    use crate::traits::event::SourceEvent;
    use futures::stream::BoxStream;
    use futures::StreamExt;

    /// Drain a read stream, stopping after the first error (the connectors
    /// abort on first error, so nothing follows it).
    pub async fn drain(
        mut stream: BoxStream<'static, Result<SourceEvent>>,
    ) -> Vec<Result<SourceEvent>> {
        let mut out = Vec::new();
        while let Some(item) = stream.next().await {
            let failed = item.is_err();
            out.push(item);
            if failed {
                break;
            }
        }
        out
    }
}
