//! Backlog REST client
//!
//! One client per space. Every call is a single GET awaited to
//! completion; nothing is retried or cached.

use super::filter::FilterSet;
use crate::auth::ApiKey;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::pagination::{CollectionFetcher, PageRequest, PageSource};
use crate::types::JsonValue;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

/// Response body of the issue count endpoint
#[derive(Debug, Deserialize)]
struct CountResponse {
    count: u64,
}

/// Client for one Backlog space
#[derive(Debug)]
pub struct BacklogClient {
    http: HttpClient,
    space_url: Url,
    fetcher: CollectionFetcher,
}

impl BacklogClient {
    /// Client for `https://{space_id}.backlog.jp`
    pub fn new(space_id: &str, api_key: ApiKey) -> Result<Self> {
        Self::with_space_url(&format!("https://{space_id}.backlog.jp"), api_key)
    }

    /// Client for a space served from an explicit root URL
    ///
    /// Used for `backlog.com` spaces and for tests against a mock server.
    pub fn with_space_url(space_url: &str, api_key: ApiKey) -> Result<Self> {
        let mut space_url = Url::parse(space_url)?;
        if !space_url.path().ends_with('/') {
            let path = format!("{}/", space_url.path());
            space_url.set_path(&path);
        }
        let api_root = space_url.join("api/v2/")?;

        let config = HttpClientConfig::builder()
            .base_url(api_root.as_str())
            .build();
        let http = HttpClient::with_api_key(config, api_key)?;

        Ok(Self {
            http,
            space_url,
            fetcher: CollectionFetcher::default(),
        })
    }

    /// Browser URL of an issue
    pub fn issue_url(&self, issue_key: &str) -> String {
        format!("{}view/{issue_key}", self.space_url)
    }

    /// Projects visible to the API key (`GET /projects`)
    pub async fn projects<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.http.get_json("projects").await
    }

    /// Members of a project (`GET /projects/{id}/users`)
    pub async fn project_users<T: DeserializeOwned>(&self, project_id: &str) -> Result<Vec<T>> {
        self.http
            .get_json(&format!("projects/{}/users", path_segment(project_id)?))
            .await
    }

    /// Issue statuses of a project (`GET /projects/{id}/statuses`)
    pub async fn project_statuses<T: DeserializeOwned>(
        &self,
        project_id: &str,
    ) -> Result<Vec<T>> {
        self.http
            .get_json(&format!("projects/{}/statuses", path_segment(project_id)?))
            .await
    }

    /// Number of issues matching the filters (`GET /issues/count`)
    #[instrument(skip(self), fields(project = %filter.project_id))]
    pub async fn count_issues(&self, filter: &FilterSet) -> Result<u64> {
        filter.validate()?;
        let config = RequestConfig::new().queries(filter.query_pairs());
        let body: CountResponse = self.http.get_json_with_config("issues/count", config).await?;
        debug!(count = body.count, "Counted issues");
        Ok(body.count)
    }

    /// One page of issues matching the filters (`GET /issues`)
    pub async fn list_issues(
        &self,
        filter: &FilterSet,
        page: PageRequest,
    ) -> Result<Vec<JsonValue>> {
        filter.validate()?;
        let config = RequestConfig::new()
            .queries(filter.query_pairs())
            .queries(page.query_pairs());
        self.http.get_json_with_config("issues", config).await
    }

    /// Every issue matching the filters, across as many pages as needed
    ///
    /// Fails before any request is sent when the filter has no project.
    #[instrument(skip(self), fields(project = %filter.project_id))]
    pub async fn fetch_issues(&self, filter: &FilterSet) -> Result<Vec<JsonValue>> {
        let source = IssueSource::new(self, filter);
        self.fetcher.fetch(&source).await
    }
}

/// Issue collection of one filter set, served page by page
#[derive(Debug, Clone, Copy)]
pub struct IssueSource<'a> {
    client: &'a BacklogClient,
    filter: &'a FilterSet,
}

impl<'a> IssueSource<'a> {
    /// Bind a filter set to a client
    pub fn new(client: &'a BacklogClient, filter: &'a FilterSet) -> Self {
        Self { client, filter }
    }
}

#[async_trait]
impl PageSource for IssueSource<'_> {
    async fn total(&self) -> Result<u64> {
        self.client.count_issues(self.filter).await
    }

    async fn page(&self, request: PageRequest) -> Result<Vec<JsonValue>> {
        self.client.list_issues(self.filter, request).await
    }
}

/// Validate an id before it is spliced into a URL path
fn path_segment(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err(Error::invalid_value("project_id", format!("'{id}' is not a project id or key")));
    }
    Ok(id)
}
