//! Thin API clients for the bundled connectors
//!
//! Each client is a small typed wrapper over the remote HTTP API, behind an
//! object-safe trait so connectors and tests share one seam. The clients
//! carry no retry or backoff logic; resilience belongs to the host.

pub mod apify;
pub mod smartsheet;

pub use apify::{ApifyClient, DatasetMetadata, DatasetStore};
pub use smartsheet::{Cell, Column, Row, Sheet, SheetStore, SmartsheetClient};
