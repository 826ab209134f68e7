//! CLI commands and argument parsing

use crate::config::DEFAULT_SETTINGS_FILE;
use crate::types::MetadataKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Backlog issue monitor
#[derive(Parser, Debug)]
#[command(name = "backlog-monitor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (JSON)
    #[arg(short, long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,

    /// Directory export files are written to (default: current directory)
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Space root URL, for spaces not hosted on backlog.jp
    /// (e.g. https://example.backlog.com)
    #[arg(long, global = true)]
    pub space_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Poll the configured project and show matching issues
    Monitor,

    /// Write a metadata listing to a JSON file
    Export {
        /// Listing to export
        #[arg(value_enum)]
        kind: MetadataKind,
    },

    /// Create the settings file interactively
    Init,
}
