//! Offset pagination strategy
//!
//! Turns a known total into the sequence of page requests covering it.

use super::types::{PageRequest, MAX_PAGE_SIZE};

/// Offset-based pagination with a fixed page size
///
/// Produces `?count=P&offset=0`, `?count=P&offset=P`, … until the
/// offset reaches the total. The final page is simply shorter when the
/// total is not a multiple of the page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetPaginator {
    /// Number of records per page
    pub page_size: u64,
}

impl OffsetPaginator {
    /// Create a paginator, clamping the page size to `1..=MAX_PAGE_SIZE`
    pub fn new(page_size: u64) -> Self {
        Self {
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of list requests needed for `total` records
    pub fn page_count(&self, total: u64) -> u64 {
        total.div_ceil(self.page_size)
    }

    /// Page requests covering `[0, total)`
    pub fn pages(&self, total: u64) -> PagePlan {
        PagePlan {
            next_offset: 0,
            total,
            page_size: self.page_size,
        }
    }
}

impl Default for OffsetPaginator {
    fn default() -> Self {
        Self::new(MAX_PAGE_SIZE)
    }
}

/// Iterator over the page requests for one fetch
#[derive(Debug, Clone)]
pub struct PagePlan {
    next_offset: u64,
    total: u64,
    page_size: u64,
}

impl Iterator for PagePlan {
    type Item = PageRequest;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_offset >= self.total {
            return None;
        }
        let request = PageRequest::new(self.next_offset, self.page_size);
        self.next_offset = self.next_offset.saturating_add(self.page_size);
        Some(request)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .total
            .saturating_sub(self.next_offset)
            .div_ceil(self.page_size) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PagePlan {}
