//! Monitor engine types

use crate::config::Settings;
use crate::error::Result;
use chrono::FixedOffset;
use std::time::Duration;

/// Configuration for the polling loop
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Wait between the end of one poll and the start of the next
    pub interval: Duration,
    /// Offset used to display issue timestamps
    pub display_offset: FixedOffset,
    /// Clear the terminal before each frame
    pub clear_screen: bool,
}

impl MonitorConfig {
    /// Config with the given interval and display offset
    pub fn new(interval: Duration, display_offset: FixedOffset) -> Self {
        Self {
            interval,
            display_offset,
            clear_screen: true,
        }
    }

    /// Take interval and display offset from settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(
            settings.poll_interval(),
            settings.display_offset()?,
        ))
    }
}

/// Result of one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Issues were fetched and shown
    Rendered { issues: usize },
    /// The fetch failed and the error was shown instead
    Failed,
}

/// Counters across a monitoring session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorStats {
    /// Polls performed
    pub polls: u64,
    /// Polls whose fetch failed
    pub failures: u64,
    /// Issues shown by the most recent successful poll
    pub last_issue_count: usize,
}

impl MonitorStats {
    /// Fold one poll into the counters
    pub fn record(&mut self, outcome: PollOutcome) {
        self.polls += 1;
        match outcome {
            PollOutcome::Rendered { issues } => self.last_issue_count = issues,
            PollOutcome::Failed => self.failures += 1,
        }
    }
}
