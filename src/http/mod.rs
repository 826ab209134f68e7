//! HTTP client module
//!
//! Thin wrapper over `reqwest` for the Backlog REST API.
//!
//! # Behaviour
//!
//! - **One request at a time**: calls are awaited sequentially by callers
//! - **No retries**: a failed request surfaces immediately
//! - **Status classification**: 200 succeeds, 403 is `AccessDenied`,
//!   anything else is a `Remote` error
//! - **Authentication**: API key applied as a query parameter

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
