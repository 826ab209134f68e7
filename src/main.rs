//! backlog-monitor CLI
//!
//! Watches a Backlog project from the terminal

use backlog_monitor::cli::{Cli, Runner};
use clap::Parser;

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging; the terminal is the UI, so stay quiet by default
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
