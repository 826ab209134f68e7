//! Monitor engine module
//!
//! Polling loop behind monitor mode.
//!
//! # Overview
//!
//! The engine module provides:
//! - `MonitorEngine` - Resolves display labels, then polls and renders
//! - `MonitorConfig` - Interval and display settings for the loop
//! - `PollOutcome` / `MonitorStats` - What each poll did
//!
//! Polls never overlap: the next one starts only after the previous
//! fetch has finished and the interval has elapsed. Labels are resolved
//! once at startup, so they can lag behind renames made in the space
//! while the monitor is running; issues are fetched fresh every poll.

mod types;

pub use types::{MonitorConfig, MonitorStats, PollOutcome};

use crate::backlog::{BacklogClient, FilterSet, IssueSummary, Project, Status, User};
use crate::config::Settings;
use crate::error::Result;
use crate::output::{IssueLine, MonitorHeader, MonitorRenderer};
use chrono::Local;
use std::future::Future;
use std::io::Write;
use tracing::{debug, info, warn};

/// Polls the space and renders matching issues
#[derive(Debug)]
pub struct MonitorEngine {
    /// Backlog client
    client: BacklogClient,
    /// Filters for the issue fetch
    filter: FilterSet,
    /// Loop configuration
    config: MonitorConfig,
    /// Statistics
    stats: MonitorStats,
}

impl MonitorEngine {
    /// Create a new engine
    pub fn new(client: BacklogClient, filter: FilterSet, config: MonitorConfig) -> Self {
        Self {
            client,
            filter,
            config,
            stats: MonitorStats::default(),
        }
    }

    /// Create an engine for the project configured in `settings`
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate_for_monitor()?;
        Ok(Self::new(
            settings.client()?,
            settings.filter_set(),
            MonitorConfig::from_settings(settings)?,
        ))
    }

    /// Get statistics
    pub fn stats(&self) -> &MonitorStats {
        &self.stats
    }

    fn renderer(&self) -> MonitorRenderer {
        if self.config.clear_screen {
            MonitorRenderer::new()
        } else {
            MonitorRenderer::without_clear()
        }
    }

    /// Look up display names for the monitored project, users and statuses
    pub async fn resolve_header(&self) -> Result<MonitorHeader> {
        let project_id = self.filter.project_id.as_str();
        let projects: Vec<Project> = self.client.projects().await?;
        let users: Vec<User> = self.client.project_users(project_id).await?;
        let statuses: Vec<Status> = self.client.project_statuses(project_id).await?;

        MonitorHeader::from_listings(
            project_id,
            &self.filter.assignee_ids,
            &self.filter.status_ids,
            &projects,
            &users,
            &statuses,
        )
    }

    /// Fetch the monitored issues as display lines
    pub async fn fetch_lines(&self) -> Result<Vec<IssueLine>> {
        let records = self.client.fetch_issues(&self.filter).await?;
        let mut lines = Vec::with_capacity(records.len());
        for record in &records {
            let issue = IssueSummary::from_value(record)?;
            let url = self.client.issue_url(&issue.issue_key);
            lines.push(IssueLine::new(&issue, url, &self.config.display_offset));
        }
        Ok(lines)
    }

    /// Draw one frame: header, then issues or the fetch error
    ///
    /// A failed fetch is shown in place of the issue list and does not
    /// end the session; only write failures are returned.
    pub async fn poll_once<W: Write>(
        &mut self,
        out: &mut W,
        header: &MonitorHeader,
    ) -> Result<PollOutcome> {
        let renderer = self.renderer();
        renderer.clear(out)?;
        renderer.header(out, header, &Local::now())?;
        out.flush()?;

        let outcome = match self.fetch_lines().await {
            Ok(lines) => {
                renderer.issues(out, &lines)?;
                PollOutcome::Rendered {
                    issues: lines.len(),
                }
            }
            Err(e) => {
                warn!(
                    error = %e,
                    status = ?e.status(),
                    access_denied = e.is_access_denied(),
                    "Issue fetch failed"
                );
                renderer.error(out, &e)?;
                PollOutcome::Failed
            }
        };
        out.flush()?;

        self.stats.record(outcome);
        debug!(?outcome, polls = self.stats.polls, "Poll finished");
        Ok(outcome)
    }

    /// Poll until `shutdown` completes
    ///
    /// `shutdown` is only observed between polls; a fetch in progress
    /// always runs to completion.
    pub async fn run<W, F>(&mut self, out: &mut W, shutdown: F) -> Result<&MonitorStats>
    where
        W: Write,
        F: Future<Output = ()>,
    {
        let header = self.resolve_header().await?;
        info!(
            project = %self.filter.project_id,
            interval_secs = self.config.interval.as_secs(),
            "Monitoring started"
        );

        tokio::pin!(shutdown);
        loop {
            self.poll_once(out, &header).await?;

            tokio::select! {
                () = tokio::time::sleep(self.config.interval) => {}
                () = &mut shutdown => break,
            }
        }

        info!(polls = self.stats.polls, "Monitoring stopped");
        Ok(&self.stats)
    }
}
