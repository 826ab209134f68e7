//! # backlog-monitor
//!
//! Watch a [Backlog](https://backlog.com) project from the terminal.
//!
//! ## Features
//!
//! - **Monitor mode**: poll the issue API on an interval and show the issues
//!   matching a project/assignee/status filter
//! - **Export mode**: dump project, user and status listings to JSON files
//!   to look up the ids the settings file needs
//! - **Paginated fetch**: count first, then walk the list endpoint 100
//!   records at a time
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use backlog_monitor::{BacklogClient, FilterSet, Result};
//! use backlog_monitor::auth::ApiKey;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = BacklogClient::new("myspace", ApiKey::new("..."))?;
//!     let filter = FilterSet::project("12345").statuses(["1", "2"]);
//!
//!     for issue in client.fetch_issues(&filter).await? {
//!         println!("{}", issue["summary"]);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  cli: menus, init, export mode, monitor mode         │
//! └──────────────────────────────────────────────────────┘
//!          │                    │                  │
//! ┌────────┴───────┐  ┌─────────┴────────┐  ┌──────┴──────┐
//! │ engine         │  │ output           │  │ config      │
//! │ poll loop      │  │ JSON export      │  │ settings    │
//! │                │  │ terminal render  │  │ file        │
//! └────────┬───────┘  └─────────┬────────┘  └─────────────┘
//!          │                    │
//! ┌────────┴────────────────────┴────────────────────────┐
//! │ backlog: endpoints, filters, typed views             │
//! ├──────────────┬─────────────────┬─────────────────────┤
//! │ pagination   │ http            │ auth                │
//! │ count+offset │ status mapping  │ apiKey query param  │
//! └──────────────┴─────────────────┴─────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// API key authentication
pub mod auth;

/// HTTP client
pub mod http;

/// Count-then-offset pagination
pub mod pagination;

/// Backlog API client
pub mod backlog;

/// Settings file
pub mod config;

/// Monitor polling loop
pub mod engine;

/// JSON export and terminal rendering
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use backlog::{BacklogClient, FilterSet};
pub use config::Settings;
pub use engine::MonitorEngine;
pub use pagination::CollectionFetcher;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
