//! HTTP client for the Backlog REST API
//!
//! Handles:
//! - URL construction against a base URL
//! - API key authentication
//! - Response status classification
//! - JSON body decoding

use crate::auth::ApiKey;
use crate::error::{Error, Result};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("backlog-monitor/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
///
/// Query parameters keep insertion order and may repeat, which the
/// `projectId[]=…&projectId[]=…` array style needs.
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: Vec<(String, String)>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add several query parameters
    #[must_use]
    pub fn queries<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

/// HTTP client bound to one API root and key
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    api_key: Option<ApiKey>,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            config,
            api_key: None,
        })
    }

    /// Create a client that sends the given API key with every request
    pub fn with_api_key(config: HttpClientConfig, api_key: ApiKey) -> Result<Self> {
        let mut client = Self::with_config(config)?;
        client.api_key = Some(api_key);
        Ok(client)
    }

    /// Send one GET request
    ///
    /// Returns the response only for `200 OK`; every other status is
    /// turned into an error carrying the response body.
    async fn get(&self, url: &str, config: RequestConfig) -> Result<Response> {
        let full_url = self.build_url(url);
        let mut req = self.client.get(&full_url);

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        if let Some(ref key) = self.api_key {
            req = key.apply(req);
        }

        debug!(url = %full_url, params = config.query.len(), "Sending request");

        let response = req.send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), url = %full_url, "Request rejected");
            return Err(Error::from_status(status.as_u16(), body));
        }

        debug!("Request succeeded: GET {}", full_url);
        Ok(response)
    }

    /// Make a GET request and parse JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.get_json_with_config(url, RequestConfig::default())
            .await
    }

    /// Make a GET request with config and parse JSON response
    ///
    /// A body that does not match `T` is reported as a JSON error, not a
    /// transport error.
    pub async fn get_json_with_config<T: DeserializeOwned>(
        &self,
        url: &str,
        config: RequestConfig,
    ) -> Result<T> {
        let body = self.get(url, config).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => path.to_string(),
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_api_key", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}
