//! JSON metadata writer
//!
//! Dumps raw listings from the space to pretty-printed JSON files named
//! after the space and project they came from.

use crate::backlog::BacklogClient;
use crate::error::{Error, Result};
use crate::types::{JsonValue, MetadataKind};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info};

/// File name for an export
///
/// `backlog_projects_{space}.json` for the space-wide listing,
/// `backlog_{kind}_{space}_{project}.json` for project-scoped ones.
pub fn export_file_name(kind: MetadataKind, space_id: &str, project_id: &str) -> String {
    if kind.is_project_scoped() {
        format!("backlog_{kind}_{space_id}_{project_id}.json")
    } else {
        format!("backlog_{kind}_{space_id}.json")
    }
}

/// Writes metadata listings into a directory
#[derive(Debug, Clone)]
pub struct JsonExporter {
    dir: PathBuf,
}

impl JsonExporter {
    /// Exporter writing into `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Exporter writing into the current working directory
    pub fn in_current_dir() -> Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// Fetch one listing from the space and write it out
    ///
    /// Returns the absolute path of the written file.
    pub async fn export(
        &self,
        client: &BacklogClient,
        kind: MetadataKind,
        space_id: &str,
        project_id: &str,
    ) -> Result<PathBuf> {
        if kind.is_project_scoped() && project_id.trim().is_empty() {
            return Err(Error::missing_field("monitor_project_id"));
        }

        let records: Vec<JsonValue> = match kind {
            MetadataKind::Projects => client.projects().await?,
            MetadataKind::Users => client.project_users(project_id).await?,
            MetadataKind::Statuses => client.project_statuses(project_id).await?,
        };
        debug!(%kind, records = records.len(), "Fetched metadata");

        let name = export_file_name(kind, space_id, project_id.trim());
        self.write(&name, &records)
    }

    /// Write records as pretty JSON under `name`
    pub fn write<T: Serialize + ?Sized>(&self, name: &str, records: &T) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = std::path::absolute(self.dir.join(name))?;

        let mut writer = BufWriter::new(File::create(&path)?);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        records.serialize(&mut serializer)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        info!(path = %path.display(), "Wrote export");
        Ok(path)
    }
}
