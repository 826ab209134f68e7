//! Output module
//!
//! Everything that leaves the program goes through here.
//!
//! # Overview
//!
//! This module provides:
//! - JSON export of raw project/user/status listings, used to look up the
//!   ids that go into the settings file
//! - Terminal rendering of the monitor view

mod render;
mod writer;

pub use render::{IssueLine, MonitorHeader, MonitorRenderer};
pub use writer::{export_file_name, JsonExporter};

#[cfg(test)]
mod tests;
