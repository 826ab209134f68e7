//! Issue filter set

use crate::error::{Error, Result};

/// The (project, assignees, statuses) filters restricting an issue fetch
///
/// Empty or blank assignee and status ids are dropped before they reach the
/// query string, so an absent filter ("any assignee") never turns into a
/// filter that matches nothing. The project is mandatory: a blank one would
/// widen the fetch to the whole space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    /// Project the issues belong to
    pub project_id: String,
    /// Assignee ids (any of)
    pub assignee_ids: Vec<String>,
    /// Status ids (any of)
    pub status_ids: Vec<String>,
}

impl FilterSet {
    /// Filter on a project only
    pub fn project(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }

    /// Restrict to the given assignees
    #[must_use]
    pub fn assignees<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assignee_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict to the given statuses
    #[must_use]
    pub fn statuses<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.status_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Reject a filter set without a project
    pub fn validate(&self) -> Result<()> {
        if self.project_id.trim().is_empty() {
            return Err(Error::missing_field("project_id"));
        }
        Ok(())
    }

    /// Query parameters for the count and list endpoints
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        push_ids(&mut pairs, "projectId[]", std::iter::once(&self.project_id));
        push_ids(&mut pairs, "assigneeId[]", &self.assignee_ids);
        push_ids(&mut pairs, "statusId[]", &self.status_ids);
        pairs
    }
}

fn push_ids<'a>(
    pairs: &mut Vec<(String, String)>,
    key: &str,
    ids: impl IntoIterator<Item = &'a String>,
) {
    for id in ids {
        let id = id.trim();
        if !id.is_empty() {
            pairs.push((key.to_string(), id.to_string()));
        }
    }
}
