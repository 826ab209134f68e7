//! Paginated collection fetcher
//!
//! Drives a [`PageSource`] through the count-then-iterate sequence.

use super::strategies::OffsetPaginator;
use super::types::{PageRequest, PaginationState};
use crate::error::Result;
use crate::types::JsonValue;
use async_trait::async_trait;
use tracing::debug;

/// A remote collection that can report its size and serve pages
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Total number of records matching the source's filters
    async fn total(&self) -> Result<u64>;

    /// Records for one page, in service order
    async fn page(&self, request: PageRequest) -> Result<Vec<JsonValue>>;
}

/// Fetches an entire collection page by page
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionFetcher {
    paginator: OffsetPaginator,
}

impl CollectionFetcher {
    /// Create a fetcher using the given paginator
    pub fn new(paginator: OffsetPaginator) -> Self {
        Self { paginator }
    }

    /// Retrieve every record of `source`
    ///
    /// Requests run strictly one after another. The first failing
    /// request aborts the fetch; records from earlier pages are dropped.
    pub async fn fetch<S>(&self, source: &S) -> Result<Vec<JsonValue>>
    where
        S: PageSource + ?Sized,
    {
        let total = source.total().await?;
        let mut state = PaginationState::with_total(total);
        let mut records = Vec::new();

        debug!(
            total,
            pages = self.paginator.page_count(total),
            "Starting paginated fetch"
        );

        for request in self.paginator.pages(total) {
            let page = source.page(request).await?;
            state.record_page(page.len());
            debug!(
                offset = request.offset,
                received = page.len(),
                accumulated = state.total_fetched,
                "Fetched page"
            );
            records.extend(page);
        }

        if state.total_fetched != total {
            debug!(
                expected = total,
                received = state.total_fetched,
                pages = state.pages_fetched,
                "Record count differs from reported total"
            );
        }

        Ok(records)
    }
}
