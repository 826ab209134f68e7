//! Pagination types
//!
//! Defines the page request and the per-fetch bookkeeping state.

/// Largest page the service will return for a single list request
pub const MAX_PAGE_SIZE: u64 = 100;

/// One bounded slice of a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Index of the first record in the page
    pub offset: u64,
    /// Maximum number of records in the page
    pub count: u64,
}

impl PageRequest {
    /// Create a page request
    pub fn new(offset: u64, count: u64) -> Self {
        Self { offset, count }
    }

    /// Query parameters selecting this page
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("count", self.count.to_string()),
            ("offset", self.offset.to_string()),
        ]
    }
}

/// Tracks progress through one fetch
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Total reported by the count query
    pub total: u64,
    /// Number of list requests completed
    pub pages_fetched: u64,
    /// Records accumulated so far
    pub total_fetched: u64,
}

impl PaginationState {
    /// Create state for a result set of the given size
    pub fn with_total(total: u64) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    /// Record a completed page
    pub fn record_page(&mut self, records: usize) {
        self.pages_fetched += 1;
        self.total_fetched += records as u64;
    }
}
