//! Monitor settings
//!
//! Settings live in a JSON file (`settings.json` by default) with a fixed
//! schema. The file layout keeps the keys the tool has always written, so
//! existing settings files load unchanged; newer keys are optional.

use crate::auth::ApiKey;
use crate::backlog::{BacklogClient, FilterSet};
use crate::error::{Error, Result};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Environment variable overriding the stored API key
pub const API_KEY_ENV: &str = "BACKLOG_API_KEY";

/// Default settings file name
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

// ============================================================================
// Settings
// ============================================================================

/// Settings for one monitored project
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// API key issued by the Backlog space
    pub api_key: String,

    /// Space id, the `{space}` of `{space}.backlog.jp`
    pub space_id: String,

    /// Project whose issues are monitored
    pub monitor_project_id: String,

    /// Assignees to monitor (empty = any)
    #[serde(default)]
    pub monitor_user_ids: Vec<String>,

    /// Statuses to monitor (empty = any)
    #[serde(default)]
    pub monitor_status_ids: Vec<String>,

    /// Seconds between polls
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Offset from UTC, in hours, used when showing issue timestamps
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,

    /// Space root URL, for spaces not hosted on `backlog.jp`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_url: Option<String>,
}

fn default_poll_interval_secs() -> u64 {
    10
}

fn default_utc_offset_hours() -> i32 {
    9
}

impl Settings {
    /// Create settings with default poll interval and offset
    pub fn new(
        api_key: impl Into<String>,
        space_id: impl Into<String>,
        monitor_project_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            space_id: space_id.into(),
            monitor_project_id: monitor_project_id.into(),
            monitor_user_ids: Vec::new(),
            monitor_status_ids: Vec::new(),
            poll_interval_secs: default_poll_interval_secs(),
            utc_offset_hours: default_utc_offset_hours(),
            space_url: None,
        }
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::settings(path, format!("failed to read: {e}")))?;
        let settings: Self = serde_json::from_str(&contents)
            .map_err(|e| Error::settings(path, format!("failed to parse: {e}")))?;
        debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Load settings if the file exists
    pub fn load_optional(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Write settings as pretty JSON, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| Error::settings(path, format!("failed to create directory: {e}")))?;
            }
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .map_err(|e| Error::settings(path, format!("failed to write: {e}")))?;
        debug!(path = %path.display(), "Saved settings");
        Ok(())
    }

    /// Replace the API key with `BACKLOG_API_KEY` when it is set
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                debug!("Using API key from {API_KEY_ENV}");
                self.api_key = key;
            }
        }
        self
    }

    /// Check the fields needed to talk to the space
    pub fn validate(&self) -> Result<()> {
        if self.api_key().is_empty() {
            return Err(Error::missing_field("api_key"));
        }
        if self.space_id.trim().is_empty() && self.space_url.is_none() {
            return Err(Error::missing_field("space_id"));
        }
        if self.poll_interval_secs == 0 {
            return Err(Error::invalid_value(
                "poll_interval_secs",
                "must be at least 1",
            ));
        }
        if !(-12..=14).contains(&self.utc_offset_hours) {
            return Err(Error::invalid_value(
                "utc_offset_hours",
                format!("{} is outside -12..=14", self.utc_offset_hours),
            ));
        }
        Ok(())
    }

    /// Validate the fields monitoring additionally needs
    pub fn validate_for_monitor(&self) -> Result<()> {
        self.validate()?;
        if self.monitor_project_id.trim().is_empty() {
            return Err(Error::missing_field("monitor_project_id"));
        }
        check_numeric("monitor_project_id", [&self.monitor_project_id])?;
        check_numeric("monitor_user_ids", &self.monitor_user_ids)?;
        check_numeric("monitor_status_ids", &self.monitor_status_ids)?;
        Ok(())
    }

    /// API key credential
    pub fn api_key(&self) -> ApiKey {
        ApiKey::new(self.api_key.trim())
    }

    /// Client for the configured space
    pub fn client(&self) -> Result<BacklogClient> {
        match &self.space_url {
            Some(url) => BacklogClient::with_space_url(url, self.api_key()),
            None => BacklogClient::new(self.space_id.trim(), self.api_key()),
        }
    }

    /// Filters selecting the monitored issues
    pub fn filter_set(&self) -> FilterSet {
        FilterSet::project(self.monitor_project_id.trim())
            .assignees(self.monitor_user_ids.iter().cloned())
            .statuses(self.monitor_status_ids.iter().cloned())
    }

    /// Time between polls
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Offset used to display timestamps
    pub fn display_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_hours * 3600).ok_or_else(|| {
            Error::invalid_value(
                "utc_offset_hours",
                format!("{} is not a valid offset", self.utc_offset_hours),
            )
        })
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("space_id", &self.space_id)
            .field("monitor_project_id", &self.monitor_project_id)
            .field("monitor_user_ids", &self.monitor_user_ids)
            .field("monitor_status_ids", &self.monitor_status_ids)
            .field("poll_interval_secs", &self.poll_interval_secs)
            .field("utc_offset_hours", &self.utc_offset_hours)
            .field("space_url", &self.space_url)
            .finish()
    }
}

/// Split a comma separated id list, dropping blanks
pub fn parse_id_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn check_numeric<'a>(field: &str, ids: impl IntoIterator<Item = &'a String>) -> Result<()> {
    for id in ids {
        let id = id.trim();
        if !id.is_empty() && id.parse::<u64>().is_err() {
            return Err(Error::invalid_value(field, format!("'{id}' is not a numeric id")));
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
