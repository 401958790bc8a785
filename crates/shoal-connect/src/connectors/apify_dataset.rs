//! Apify dataset source connector
//!
//! Reads every item of an Apify dataset as a single `DatasetItems` stream.
//! The dataset's item count drives a paginated parallel fetch; pages are
//! unpacked into record events as they complete.
//!
//! # Example Configuration
//!
//! ```yaml
//! sources:
//!   crawl-results:
//!     connector: apify-dataset
//!     config:
//!       dataset_id: WkzbQMuFYuamGv3YF
//!       clean: true
//! ```

use crate::clients::apify::{ApifyClient, DatasetStore};
use crate::error::Result;
use crate::pagination::{Page, PageFetcher, ParallelPaginator, DEFAULT_BATCH_SIZE};
use crate::traits::catalog::{Catalog, ConfiguredCatalog, Stream, SyncMode};
use crate::traits::event::SourceEvent;
use crate::traits::registry::{AnySource, SourceFactory};
use crate::traits::source::{CheckResult, Source};
use crate::traits::spec::ConnectorSpec;
use crate::traits::state::State;
use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// Name of the single stream this source exposes
pub const DATASET_ITEMS_STREAM_NAME: &str = "DatasetItems";

/// Apify dataset source configuration
#[derive(Debug, Clone, Deserialize, Serialize, Validate, JsonSchema)]
pub struct ApifyDatasetConfig {
    /// Id of the dataset to read
    #[validate(length(min = 1))]
    pub dataset_id: String,

    /// Fetch only clean items (non-empty items with hidden fields stripped)
    #[serde(default)]
    pub clean: bool,
}

/// Apify dataset source implementation
pub struct ApifyDatasetSource {
    store: Arc<dyn DatasetStore>,
    paginator: ParallelPaginator,
}

impl ApifyDatasetSource {
    /// Create a source backed by the public Apify API
    pub fn new() -> Self {
        Self::with_store(Arc::new(ApifyClient::new()))
    }

    /// Create a source backed by a custom dataset store
    pub fn with_store(store: Arc<dyn DatasetStore>) -> Self {
        Self {
            store,
            paginator: ParallelPaginator::new(DEFAULT_BATCH_SIZE),
        }
    }

    /// Override the paginator (batch size, concurrency)
    pub fn with_paginator(mut self, paginator: ParallelPaginator) -> Self {
        self.paginator = paginator;
        self
    }

    /// Dataset items carry arbitrary fields; the stream schema is a
    /// passthrough object.
    fn items_schema() -> serde_json::Value {
        serde_json::json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
        })
    }
}

impl Default for ApifyDatasetSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetches one dataset page per call, delegating to the store
struct DatasetPageFetcher {
    store: Arc<dyn DatasetStore>,
    dataset_id: String,
    clean: bool,
}

#[async_trait]
impl PageFetcher for DatasetPageFetcher {
    async fn fetch(&self, offset: u64, limit: u64) -> crate::error::ConnectorResult<Page> {
        self.store
            .list_items(&self.dataset_id, self.clean, offset, limit)
            .await
    }
}

#[async_trait]
impl Source for ApifyDatasetSource {
    type Config = ApifyDatasetConfig;

    fn spec() -> ConnectorSpec {
        ConnectorSpec::builder("apify-dataset", env!("CARGO_PKG_VERSION"))
            .description("Reads all items of an Apify dataset as a single stream")
            .documentation_url("https://docs.apify.com/storage/dataset")
            .config_schema::<ApifyDatasetConfig>()
            .build()
    }

    async fn check(&self, config: &Self::Config) -> Result<CheckResult> {
        match self.store.get_dataset(&config.dataset_id).await {
            Ok(_) => Ok(CheckResult::success()),
            Err(e) => Ok(CheckResult::failure(format!("An exception occurred: {e}"))),
        }
    }

    async fn discover(&self, _config: &Self::Config) -> Result<Catalog> {
        let stream = Stream::new(DATASET_ITEMS_STREAM_NAME, Self::items_schema())
            .sync_modes(vec![SyncMode::FullRefresh]);
        Ok(Catalog::new().add_stream(stream))
    }

    async fn read(
        &self,
        config: &Self::Config,
        _catalog: &ConfiguredCatalog,
        _state: Option<State>,
    ) -> Result<BoxStream<'static, Result<SourceEvent>>> {
        tracing::info!(dataset_id = %config.dataset_id, "reading data from dataset");

        let metadata = self.store.get_dataset(&config.dataset_id).await?;
        let total_count = metadata.count_for(config.clean);

        let fetcher: Arc<dyn PageFetcher> = Arc::new(DatasetPageFetcher {
            store: Arc::clone(&self.store),
            dataset_id: config.dataset_id.clone(),
            clean: config.clean,
        });
        let mut pages = self.paginator.fetch_all(fetcher, total_count);

        let stream = async_stream::stream! {
            while let Some(result) = pages.next().await {
                match result {
                    Ok(page) => {
                        for event in page.into_events(DATASET_ITEMS_STREAM_NAME) {
                            yield Ok(event);
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "page fetch failed, aborting read");
                        yield Err(e.into());
                        return;
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}

/// Factory for creating ApifyDatasetSource instances
pub struct ApifyDatasetSourceFactory;

impl SourceFactory for ApifyDatasetSourceFactory {
    fn spec(&self) -> ConnectorSpec {
        ApifyDatasetSource::spec()
    }

    fn create(&self) -> Box<dyn AnySource> {
        Box::new(ApifyDatasetSourceWrapper(ApifyDatasetSource::new()))
    }
}

/// Wrapper for type-erased source operations
pub struct ApifyDatasetSourceWrapper(ApifyDatasetSource);

crate::impl_any_source!(
    ApifyDatasetSourceWrapper,
    ApifyDatasetSource,
    ApifyDatasetConfig
);
