//! API key authenticator
//!
//! Applies the static API key to outgoing requests.

use reqwest::RequestBuilder;
use std::fmt;

/// Query parameter carrying the API key
pub const API_KEY_PARAM: &str = "apiKey";

/// Static API key credential
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw key value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Check whether a key was actually provided
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Apply the key to a request builder as a query parameter
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.query(&[(API_KEY_PARAM, self.0.as_str())])
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&"<redacted>").finish()
    }
}
