//! Terminal rendering for the monitor view
//!
//! All output goes through a `Write` so the same code drives stdout and
//! the tests.

use crate::backlog::{IssueSummary, Project, Status, User};
use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, TimeZone};
use std::io::Write;
use tracing::warn;

const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

const HEADER_RULE: &str =
    "########################################################################";
const ISSUE_RULE: &str = "---------------------------------------------------";

/// Labels describing what is being monitored
///
/// Built once when monitoring starts. Renames made in Backlog afterwards
/// are not picked up until the monitor is restarted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorHeader {
    pub project: String,
    pub users: Vec<String>,
    pub statuses: Vec<String>,
}

impl MonitorHeader {
    /// Resolve configured ids against the listings from the space
    ///
    /// Users and statuses keep the order of the listing; configured ids
    /// that match nothing are skipped. An unknown project is an error.
    pub fn from_listings(
        project_id: &str,
        user_ids: &[String],
        status_ids: &[String],
        projects: &[Project],
        users: &[User],
        statuses: &[Status],
    ) -> Result<Self> {
        let project_id = project_id.trim();
        let project = projects
            .iter()
            .find(|p| p.id.to_string() == project_id)
            .ok_or_else(|| Error::not_found("project", project_id))?;

        let wanted = |ids: &[String], id: u64| ids.iter().any(|w| w.trim() == id.to_string());

        Ok(Self {
            project: label(project.id, &project.name),
            users: users
                .iter()
                .filter(|u| wanted(user_ids, u.id))
                .map(|u| label(u.id, &u.name))
                .collect(),
            statuses: statuses
                .iter()
                .filter(|s| wanted(status_ids, s.id))
                .map(|s| label(s.id, &s.name))
                .collect(),
        })
    }
}

fn label(id: u64, name: &str) -> String {
    format!(" - {id}({name})")
}

/// One issue, ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueLine {
    pub summary: String,
    pub url: String,
    pub assignee: String,
    pub created_user: String,
    pub created: String,
}

impl IssueLine {
    /// Build the display line, converting the creation time to `offset`
    pub fn new(issue: &IssueSummary, url: String, offset: &FixedOffset) -> Self {
        let created = match issue.created_at() {
            Ok(at) => format_local(&at.with_timezone(offset)),
            Err(e) => {
                warn!(issue = %issue.issue_key, error = %e, "Unparseable creation time");
                issue.created.clone()
            }
        };

        Self {
            summary: issue.summary.clone(),
            url,
            assignee: issue.assignee_name().unwrap_or("-").to_string(),
            created_user: issue.created_user_name().unwrap_or("-").to_string(),
            created,
        }
    }
}

fn format_local<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Draws the monitor screen
#[derive(Debug, Clone, Default)]
pub struct MonitorRenderer {
    clear: bool,
}

impl MonitorRenderer {
    /// Renderer that clears the terminal before each frame
    pub fn new() -> Self {
        Self { clear: true }
    }

    /// Renderer that never emits the clear-screen sequence
    pub fn without_clear() -> Self {
        Self { clear: false }
    }

    /// Start a new frame
    pub fn clear<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.clear {
            write!(out, "{CLEAR_SCREEN}")?;
        }
        Ok(())
    }

    /// Header block with the refresh time and monitored filters
    pub fn header<W: Write, Tz: TimeZone>(
        &self,
        out: &mut W,
        header: &MonitorHeader,
        now: &DateTime<Tz>,
    ) -> Result<()>
    where
        Tz::Offset: std::fmt::Display,
    {
        writeln!(out, "{HEADER_RULE}")?;
        writeln!(
            out,
            "Monitoring... (Ctrl+C to stop) Last updated: {}",
            now.format("%Y/%m/%d %H:%M:%S")
        )?;
        writeln!(out, "[Project]")?;
        writeln!(out, "{}", header.project)?;
        writeln!(out, "[Assignees]")?;
        for user in &header.users {
            writeln!(out, "{user}")?;
        }
        writeln!(out, "[Statuses]")?;
        for status in &header.statuses {
            writeln!(out, "{status}")?;
        }
        writeln!(out, "{HEADER_RULE}")?;
        Ok(())
    }

    /// Issue list, or a notice when nothing matches
    pub fn issues<W: Write>(&self, out: &mut W, issues: &[IssueLine]) -> Result<()> {
        if issues.is_empty() {
            writeln!(out, "{CYAN}No issues are currently being monitored.{RESET}")?;
            return Ok(());
        }

        writeln!(out, "{ISSUE_RULE}")?;
        for issue in issues {
            writeln!(out, "{GREEN}Summary: {}", issue.summary)?;
            writeln!(out, "URL: {}", issue.url)?;
            writeln!(
                out,
                "Assignee: {} Created by: {} Created: {}{RESET}",
                issue.assignee, issue.created_user, issue.created
            )?;
            writeln!(out, "{ISSUE_RULE}")?;
        }
        Ok(())
    }

    /// A failed poll
    pub fn error<W: Write>(&self, out: &mut W, error: &Error) -> Result<()> {
        writeln!(out, "{RED}Failed to fetch issues: {error}{RESET}")?;
        Ok(())
    }
}
