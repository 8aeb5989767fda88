//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the outbound HTTP client used by the generation proxy and the
//! upstream base URL. Both are cheap to clone.

use std::sync::Arc;

use crate::config::HostConfig;

#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub upstream_url: Option<Arc<str>>,
}

impl AppState {
    /// Build state from host config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &HostConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(config.upstream_timeout).build()?;
        Ok(Self { http, upstream_url: config.upstream_url.as_deref().map(Arc::from) })
    }
}
