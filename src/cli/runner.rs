//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::cli::menu::{ExportChoice, MainChoice, Prompter};
use crate::config::{parse_id_list, Settings};
use crate::engine::MonitorEngine;
use crate::error::{Error, Result};
use crate::output::JsonExporter;
use crate::types::MetadataKind;
use std::future::Future;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// CLI runner
#[derive(Debug)]
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command against the terminal
    pub async fn run(&self) -> Result<()> {
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());

        match &self.cli.command {
            Some(Commands::Init) => {
                self.initialize(&mut prompter).await?;
                Ok(())
            }
            Some(Commands::Monitor) => {
                let settings = self.load_or_initialize(&mut prompter).await?;
                self.monitor(&settings, &mut io::stdout()).await
            }
            Some(Commands::Export { kind }) => {
                let settings = self.load_or_initialize(&mut prompter).await?;
                let path = self.export(&settings, *kind).await?;
                prompter.say(format!("Wrote {kind} to {}", path.display()))
            }
            None => {
                let settings = self.load_or_initialize(&mut prompter).await?;
                self.main_menu(&mut prompter, &settings).await
            }
        }
    }

    /// Settings file path
    pub fn settings_path(&self) -> Result<PathBuf> {
        Ok(std::path::absolute(&self.cli.settings)?)
    }

    fn exporter(&self) -> Result<JsonExporter> {
        match &self.cli.output_dir {
            Some(dir) => Ok(JsonExporter::new(dir)),
            None => JsonExporter::in_current_dir(),
        }
    }

    /// Load settings, running first-time setup when the file is missing
    pub async fn load_or_initialize<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<Settings> {
        let path = self.settings_path()?;
        let settings = match Settings::load_optional(&path)? {
            Some(settings) => settings,
            None => {
                prompter.say("Settings file not found. Starting initial setup.")?;
                self.initialize(prompter).await?
            }
        };
        let mut settings = settings.with_env_overrides();
        if let Some(url) = &self.cli.space_url {
            settings.space_url = Some(url.clone());
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Interactive first-time setup
    ///
    /// Each listing is exported before the matching prompt so the ids can
    /// be looked up in the written file.
    pub async fn initialize<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<Settings> {
        let api_key = require(prompter.ask("Enter your API key: ")?, "api_key")?;
        let space_id = require(prompter.ask("Enter your space id: ")?, "space_id")?;
        let mut settings = Settings::new(api_key, space_id, "");
        settings.space_url.clone_from(&self.cli.space_url);
        settings.validate()?;

        self.export_and_report(prompter, &settings, MetadataKind::Projects)
            .await?;
        settings.monitor_project_id = require(
            prompter.ask("Enter the project id (see the exported list): ")?,
            "monitor_project_id",
        )?;

        self.export_and_report(prompter, &settings, MetadataKind::Users)
            .await?;
        settings.monitor_user_ids = parse_id_list(
            &prompter
                .ask("Enter user ids, comma separated (see the exported list): ")?
                .unwrap_or_default(),
        );

        self.export_and_report(prompter, &settings, MetadataKind::Statuses)
            .await?;
        settings.monitor_status_ids = parse_id_list(
            &prompter
                .ask("Enter status ids, comma separated (see the exported list): ")?
                .unwrap_or_default(),
        );

        settings.validate_for_monitor()?;
        let path = self.settings_path()?;
        settings.save(&path)?;
        prompter.say(format!("Saved settings to {}", path.display()))?;
        Ok(settings)
    }

    /// Main mode selection
    pub async fn main_menu<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
        settings: &Settings,
    ) -> Result<()> {
        let choice = prompter.choose(
            "Select a mode:",
            MainChoice::MENU,
            MainChoice::parse,
            MainChoice::Quit,
        )?;

        match choice {
            MainChoice::Monitor => self.monitor(settings, prompter.output()).await,
            MainChoice::Export => self.export_menu(prompter, settings).await,
            MainChoice::Quit => prompter.say("Cancelled."),
        }
    }

    /// Export mode: export listings until the user backs out
    ///
    /// A failed export is reported and the menu is shown again.
    pub async fn export_menu<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
        settings: &Settings,
    ) -> Result<()> {
        loop {
            let choice = prompter.choose(
                "Select what to export:",
                ExportChoice::MENU,
                ExportChoice::parse,
                ExportChoice::Back,
            )?;

            match choice {
                ExportChoice::Export(kind) => {
                    if let Err(e) = self.export_and_report(prompter, settings, kind).await {
                        warn!(%kind, error = %e, "Export failed");
                        prompter.say(format!("Export failed: {e}"))?;
                    }
                }
                ExportChoice::Back => return prompter.say("Leaving export mode."),
            }
        }
    }

    async fn export_and_report<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
        settings: &Settings,
        kind: MetadataKind,
    ) -> Result<PathBuf> {
        let path = self.export(settings, kind).await?;
        prompter.say(format!("Wrote {kind} to {}", path.display()))?;
        Ok(path)
    }

    /// Export one listing for the configured space
    pub async fn export(&self, settings: &Settings, kind: MetadataKind) -> Result<PathBuf> {
        let client = settings.client()?;
        self.exporter()?
            .export(
                &client,
                kind,
                export_space_name(settings),
                &settings.monitor_project_id,
            )
            .await
    }

    /// Monitor mode until Ctrl+C
    pub async fn monitor<W: Write>(&self, settings: &Settings, out: &mut W) -> Result<()> {
        let shutdown = listen_for(tokio::signal::ctrl_c());
        let mut engine = MonitorEngine::from_settings(settings)?;
        writeln!(out, "Starting monitor mode.")?;

        let stats = engine.run(out, shutdown).await?;
        debug!(polls = stats.polls, failures = stats.failures, "Monitor finished");

        writeln!(out, "Monitoring stopped.")?;
        Ok(())
    }
}

/// Space name used in export file names
fn export_space_name(settings: &Settings) -> &str {
    let space_id = settings.space_id.trim();
    if space_id.is_empty() {
        "space"
    } else {
        space_id
    }
}

fn require(answer: Option<String>, field: &str) -> Result<String> {
    match answer {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::missing_field(field)),
    }
}

/// Start waiting for `signal` in the background
///
/// The listener is spawned immediately, so a signal arriving before the
/// returned future is first polled is still seen. The future never
/// resolves if listening fails.
pub(super) fn listen_for<S>(signal: S) -> impl Future<Output = ()>
where
    S: Future<Output = io::Result<()>> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        match signal.await {
            Ok(()) => {
                let _ = tx.send(());
            }
            Err(e) => warn!(error = %e, "Cannot listen for Ctrl+C"),
        }
    });

    async move {
        if rx.await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
