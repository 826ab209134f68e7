//! Common types used throughout backlog-monitor
//!
//! This module contains shared type definitions and type aliases
//! used across multiple modules.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

// ============================================================================
// Metadata Kind
// ============================================================================

/// Kind of space metadata that can be exported for configuration discovery
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum MetadataKind {
    /// Projects visible to the API key
    Projects,
    /// Members of the monitored project
    Users,
    /// Issue statuses of the monitored project
    Statuses,
}

impl MetadataKind {
    /// All kinds, in menu order
    pub const ALL: [MetadataKind; 3] = [Self::Projects, Self::Users, Self::Statuses];

    /// Whether the listing is scoped to a single project
    pub fn is_project_scoped(self) -> bool {
        !matches!(self, Self::Projects)
    }

    /// Lowercase plural name used in file names
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Users => "users",
            Self::Statuses => "statuses",
        }
    }
}

impl fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
