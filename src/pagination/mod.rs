//! Pagination module
//!
//! Supports: count-then-offset pagination
//!
//! # Overview
//!
//! Backlog caps list endpoints at 100 records per request and exposes a
//! separate count endpoint. A fetch first asks a [`PageSource`] for the
//! total, then walks offsets `0, P, 2P, …` below that total, appending
//! each page to an accumulator in arrival order. Any failure aborts the
//! whole fetch and the accumulated records are dropped.

mod fetcher;
mod strategies;
mod types;

pub use fetcher::{CollectionFetcher, PageSource};
pub use strategies::{OffsetPaginator, PagePlan};
pub use types::{PageRequest, PaginationState, MAX_PAGE_SIZE};
