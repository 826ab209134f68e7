//! Typed views over Backlog API records
//!
//! Only the fields the terminal views read are modelled. Exports keep the
//! raw JSON so nothing the service returns is lost.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp layout used by the issue API
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A project in the space
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    #[serde(default)]
    pub project_key: Option<String>,
    pub name: String,
}

/// A project member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub user_id: Option<String>,
    pub name: String,
}

/// An issue status of a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub id: u64,
    pub name: String,
}

/// User reference embedded in an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub name: String,
}

/// The fields of an issue shown by the monitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueSummary {
    pub summary: String,
    pub issue_key: String,
    /// Unassigned issues carry `null`
    #[serde(default)]
    pub assignee: Option<UserRef>,
    #[serde(default)]
    pub created_user: Option<UserRef>,
    pub created: String,
}

impl IssueSummary {
    /// Decode the summary view from a raw issue record
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        Ok(Self::deserialize(value)?)
    }

    /// Creation time as UTC
    pub fn created_at(&self) -> Result<DateTime<Utc>> {
        parse_timestamp(&self.created)
    }

    /// Assignee display name, if any
    pub fn assignee_name(&self) -> Option<&str> {
        self.assignee.as_ref().map(|u| u.name.as_str())
    }

    /// Creator display name, if any
    pub fn created_user_name(&self) -> Option<&str> {
        self.created_user.as_ref().map(|u| u.name.as_str())
    }
}

/// Parse a `YYYY-MM-DDTHH:MM:SSZ` timestamp
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| Error::Timestamp {
            value: value.to_string(),
            message: e.to_string(),
        })
}
