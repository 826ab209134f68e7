//! Backlog API client
//!
//! Wraps the Backlog v2 REST endpoints used by the monitor and exporter:
//! project, user and status listings, and the issue count/list pair that
//! drives paginated issue retrieval.

mod client;
mod filter;
mod models;

pub use client::{BacklogClient, IssueSource};
pub use filter::FilterSet;
pub use models::{parse_timestamp, IssueSummary, Project, Status, User, UserRef};
