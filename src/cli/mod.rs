//! CLI module
//!
//! Command-line interface for the monitor.
//!
//! # Commands
//!
//! - `monitor` - Poll the configured project and show matching issues
//! - `export` - Dump project/user/status listings to JSON files
//! - `init` - Create the settings file interactively
//!
//! Without a subcommand an interactive menu chooses the mode.

mod commands;
mod menu;
mod runner;

pub use commands::{Cli, Commands};
pub use menu::{ExportChoice, MainChoice, Prompter};
pub use runner::Runner;
