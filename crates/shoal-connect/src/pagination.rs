//! Paginated parallel fetch
//!
//! Large remote collections are read page by page: one fetch task per offset,
//! driven concurrently, with completed pages handed to the consumer as they
//! arrive. Pages may complete out of submission order; every submitted offset
//! yields exactly one page before the stream ends.

use crate::error::ConnectorResult;
use crate::traits::event::SourceEvent;
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Default number of records requested per page
pub const DEFAULT_BATCH_SIZE: u64 = 50_000;

/// One bounded batch of raw records fetched at a given offset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Offset this page was fetched at
    pub offset: u64,

    /// Raw records, in the order the remote returned them
    pub items: Vec<serde_json::Value>,
}

impl Page {
    /// Create a page
    pub fn new(offset: u64, items: Vec<serde_json::Value>) -> Self {
        Self { offset, items }
    }

    /// Number of records in this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the page holds no records
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Wrap each record into a [`SourceEvent`], lazily and in page order.
    ///
    /// The emission timestamp is captured per record as the iterator is
    /// advanced, not at fetch time.
    pub fn into_events(self, stream: impl Into<String>) -> impl Iterator<Item = SourceEvent> {
        let stream = stream.into();
        self.items
            .into_iter()
            .map(move |item| SourceEvent::record(stream.clone(), item))
    }
}

/// Fetches one page of a remote collection
///
/// Implementations delegate straight to an external client: no retries, no
/// error mapping beyond the client's own, one outbound request per call.
#[async_trait]
pub trait PageFetcher: Send + Sync + 'static {
    /// Fetch `limit` records starting at `offset`.
    ///
    /// An empty page is permissible at or past the end of the collection.
    async fn fetch(&self, offset: u64, limit: u64) -> ConnectorResult<Page>;
}

/// Ordered offsets `0, batch_size, 2*batch_size, ...` below `total_count`
pub fn page_offsets(total_count: u64, batch_size: u64) -> impl Iterator<Item = u64> {
    (0..total_count).step_by(batch_size.max(1) as usize)
}

/// Number of pages needed to cover `total_count` records
pub fn page_count(total_count: u64, batch_size: u64) -> u64 {
    total_count.div_ceil(batch_size.max(1))
}

/// Drives a [`PageFetcher`] across the full offset range of a collection
/// with bounded concurrency.
#[derive(Debug, Clone)]
pub struct ParallelPaginator {
    batch_size: u64,
    concurrency: usize,
}

impl ParallelPaginator {
    /// Create a paginator with the given batch size and default concurrency
    /// (the host's available parallelism).
    pub fn new(batch_size: u64) -> Self {
        let concurrency = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(4);
        Self {
            batch_size: batch_size.max(1),
            concurrency,
        }
    }

    /// Override the number of in-flight fetches
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Configured batch size
    pub fn batch_size(&self) -> u64 {
        self.batch_size
    }

    /// Fetch every page of a collection, yielding pages as they complete.
    ///
    /// No ordering guarantee across pages: the stream yields each page when
    /// its fetch finishes, which may differ from offset order. A failed fetch
    /// is yielded as `Err` as soon as it completes; dropping the stream
    /// cancels any in-flight fetches. `total_count == 0` yields an empty
    /// stream.
    pub fn fetch_all(
        &self,
        fetcher: Arc<dyn PageFetcher>,
        total_count: u64,
    ) -> BoxStream<'static, ConnectorResult<Page>> {
        let limit = self.batch_size;
        let offsets: Vec<u64> = page_offsets(total_count, limit).collect();

        stream::iter(offsets)
            .map(move |offset| {
                let fetcher = Arc::clone(&fetcher);
                async move { fetcher.fetch(offset, limit).await }
            })
            .buffer_unordered(self.concurrency)
            .boxed()
    }
}

impl Default for ParallelPaginator {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConnectorError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Fetcher over a synthetic collection of `total` numbered records.
    struct SyntheticFetcher {
        total: u64,
        calls: AtomicUsize,
        fail_at: Option<u64>,
        /// Delay later offsets less so completion order inverts submission order
        invert_completion: bool,
    }

    impl SyntheticFetcher {
        fn new(total: u64) -> Self {
            Self {
                total,
                calls: AtomicUsize::new(0),
                fail_at: None,
                invert_completion: false,
            }
        }

        fn failing_at(mut self, offset: u64) -> Self {
            self.fail_at = Some(offset);
            self
        }

        fn inverted(mut self) -> Self {
            self.invert_completion = true;
            self
        }
    }

    #[async_trait]
    impl PageFetcher for SyntheticFetcher {
        async fn fetch(&self, offset: u64, limit: u64) -> ConnectorResult<Page> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if self.invert_completion {
                let remaining = (self.total.saturating_sub(offset)) / limit.max(1);
                tokio::time::sleep(Duration::from_millis(remaining * 5)).await;
            }

            if self.fail_at == Some(offset) {
                return Err(ConnectorError::connection(format!(
                    "fetch at offset {offset} failed"
                )));
            }

            let end = (offset + limit).min(self.total);
            let items = (offset..end).map(|i| json!({ "n": i })).collect();
            Ok(Page::new(offset, items))
        }
    }

    #[test]
    fn test_page_count_ceil() {
        assert_eq!(page_count(0, 50_000), 0);
        assert_eq!(page_count(1, 50_000), 1);
        assert_eq!(page_count(50_000, 50_000), 1);
        assert_eq!(page_count(50_001, 50_000), 2);
        assert_eq!(page_count(51_500, 50_000), 2);
        assert_eq!(page_count(150_000, 50_000), 3);
    }

    #[test]
    fn test_page_offsets_no_gaps_no_overlaps() {
        let offsets: Vec<u64> = page_offsets(51_500, 50_000).collect();
        assert_eq!(offsets, vec![0, 50_000]);

        let offsets: Vec<u64> = page_offsets(150_000, 50_000).collect();
        assert_eq!(offsets, vec![0, 50_000, 100_000]);

        assert_eq!(page_offsets(0, 50_000).count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_all_covers_every_offset_exactly_once() {
        let fetcher = Arc::new(SyntheticFetcher::new(51_500));
        let paginator = ParallelPaginator::new(50_000).with_concurrency(4);

        let pages: Vec<Page> = paginator
            .fetch_all(fetcher.clone(), 51_500)
            .map(|p| p.unwrap())
            .collect()
            .await;

        assert_eq!(pages.len(), 2);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);

        let mut sizes: Vec<usize> = pages.iter().map(Page::len).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![1_500, 50_000]);

        let total_items: usize = pages.iter().map(Page::len).sum();
        assert_eq!(total_items, 51_500);
    }

    #[tokio::test]
    async fn test_fetch_all_zero_total_is_empty() {
        let fetcher = Arc::new(SyntheticFetcher::new(0));
        let paginator = ParallelPaginator::new(50_000);

        let pages: Vec<_> = paginator.fetch_all(fetcher.clone(), 0).collect().await;
        assert!(pages.is_empty());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_all_out_of_order_completion() {
        // Later offsets finish first; every offset must still appear exactly once.
        let fetcher = Arc::new(SyntheticFetcher::new(500).inverted());
        let paginator = ParallelPaginator::new(100).with_concurrency(5);

        let pages: Vec<Page> = paginator
            .fetch_all(fetcher, 500)
            .map(|p| p.unwrap())
            .collect()
            .await;

        let mut offsets: Vec<u64> = pages.iter().map(|p| p.offset).collect();
        offsets.sort_unstable();
        assert_eq!(offsets, vec![0, 100, 200, 300, 400]);
    }

    #[tokio::test]
    async fn test_fetch_all_propagates_first_error() {
        let fetcher = Arc::new(SyntheticFetcher::new(300).failing_at(100));
        let paginator = ParallelPaginator::new(100).with_concurrency(1);

        let mut pages = paginator.fetch_all(fetcher, 300);
        let mut saw_error = false;
        while let Some(result) = pages.next().await {
            match result {
                Ok(_) => {}
                Err(e) => {
                    assert!(e.to_string().contains("offset 100"));
                    saw_error = true;
                    break;
                }
            }
        }
        assert!(saw_error);
    }

    #[tokio::test]
    async fn test_early_drop_stops_fetching() {
        let fetcher = Arc::new(SyntheticFetcher::new(1_000));
        let paginator = ParallelPaginator::new(100).with_concurrency(1);

        let mut pages = paginator.fetch_all(fetcher.clone(), 1_000);
        let first = pages.next().await;
        assert!(first.is_some());
        drop(pages);

        // Sequential concurrency: only the consumed page (plus at most the one
        // in flight) was ever requested.
        assert!(fetcher.calls.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_into_events_preserves_page_order() {
        let page = Page::new(0, vec![json!({"n": 0}), json!({"n": 1}), json!({"n": 2})]);
        let events: Vec<SourceEvent> = page.into_events("DatasetItems").collect();

        assert_eq!(events.len(), 3);
        for (i, event) in events.iter().enumerate() {
            assert_eq!(event.stream, "DatasetItems");
            assert_eq!(event.data["n"], i);
            assert!(event.is_record());
        }
    }

    #[tokio::test]
    async fn test_into_events_timestamps_at_emission() {
        let page = Page::new(0, vec![json!({"n": 0})]);
        let before = chrono::Utc::now().timestamp_millis();
        let events: Vec<SourceEvent> = page.into_events("s").collect();
        let after = chrono::Utc::now().timestamp_millis();

        assert!(events[0].emitted_at_millis() >= before);
        assert!(events[0].emitted_at_millis() <= after);
    }
}
