//! Error types for backlog-monitor
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for backlog-monitor
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Remote Errors
    // ============================================================================
    #[error("Access denied by Backlog (HTTP {status})")]
    AccessDenied { status: u16 },

    #[error("Backlog returned HTTP {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Invalid timestamp '{value}': {message}")]
    Timestamp { value: String, message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Missing required setting: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Settings file {}: {message}", path.display())]
    Settings { path: PathBuf, message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a settings file error
    pub fn settings(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Settings {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a remote error from a non-success status
    pub fn remote(status: u16, body: impl Into<String>) -> Self {
        Self::Remote {
            status,
            body: body.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Map a non-success HTTP status to the matching remote error
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        if status == 403 {
            Self::AccessDenied { status }
        } else {
            Self::remote(status, body)
        }
    }

    /// Check if the service refused access
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Error::AccessDenied { .. })
    }

    /// HTTP status carried by a remote error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::AccessDenied { status } | Error::Remote { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for backlog-monitor
pub type Result<T> = std::result::Result<T, Error>;
