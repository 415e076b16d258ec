//! Application state shared across handlers.
//!
//! [`AppState`] holds the startup-loaded [`Config`] and a single
//! `reqwest::Client` reused for every outbound model call. Both are cheap to
//! clone (Arc and an internal Arc respectively); there is no other shared
//! mutable state in this server.

use std::sync::Arc;

use crate::config::Config;
use crate::error::ApiError;

/// Shared state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Immutable server configuration.
    pub config: Arc<Config>,
    /// Outbound HTTP client with the configured model-call timeout.
    pub http: reqwest::Client,
}

impl AppState {
    /// Creates a new `AppState` from a startup-loaded config.
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.model_timeout)
            .build()
            .map_err(|err| {
                ApiError::InternalError(format!("failed to build HTTP client: {}", err))
            })?;

        Ok(AppState {
            config: Arc::new(config),
            http,
        })
    }
}
