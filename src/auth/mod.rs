//! Authentication module
//!
//! Backlog authenticates API calls with a static key passed in the
//! `apiKey` query parameter. There is no token exchange or refresh.

mod authenticator;

pub use authenticator::{ApiKey, API_KEY_PARAM};

#[cfg(test)]
mod tests;
