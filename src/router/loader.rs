//! Loading view code on demand.
//!
//! `HttpChunkLoader` fetches `{asset_base_url}/assets/{ChunkName}.js`. Any
//! other source (tests, a prebuilt bundle) plugs in through [`ViewLoader`].

#[cfg(test)]
#[path = "loader_test.rs"]
mod loader_test;

use std::time::Duration;

use crate::config::{AppConfig, ChunkTimeouts};

use super::view::{ModuleOrigin, ViewId, ViewModule};

/// Error produced while loading a view's code.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The chunk request failed before a response arrived.
    #[error("chunk request for {view} failed: {message}")]
    Request { view: ViewId, message: String },

    /// The asset host answered with a non-success status.
    #[error("chunk request for {view} returned status {status} ({url})")]
    Status { view: ViewId, status: u16, url: String },

    /// The load did not finish within the configured deadline.
    #[error("loading {view} timed out after {after:?}")]
    TimedOut { view: ViewId, after: Duration },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// Source of view code for lazy routes.
#[async_trait::async_trait]
pub trait ViewLoader: Send + Sync {
    async fn load(&self, view: ViewId) -> Result<ViewModule, LoadError>;
}

// =============================================================================
// HTTP CHUNK LOADER
// =============================================================================

pub struct HttpChunkLoader {
    http: reqwest::Client,
    asset_base_url: String,
}

impl HttpChunkLoader {
    /// # Errors
    ///
    /// Returns [`LoadError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(asset_base_url: impl Into<String>, timeouts: ChunkTimeouts) -> Result<Self, LoadError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LoadError::HttpClientBuild(e.to_string()))?;
        let asset_base_url = asset_base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { http, asset_base_url })
    }

    /// # Errors
    ///
    /// Returns [`LoadError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn from_config(config: &AppConfig) -> Result<Self, LoadError> {
        Self::new(config.asset_base_url.clone(), config.chunk_timeouts)
    }

    #[must_use]
    pub fn chunk_url(&self, view: ViewId) -> String {
        format!("{}/assets/{}.js", self.asset_base_url, view.chunk_name())
    }
}

#[async_trait::async_trait]
impl ViewLoader for HttpChunkLoader {
    async fn load(&self, view: ViewId) -> Result<ViewModule, LoadError> {
        let url = self.chunk_url(view);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| LoadError::Request { view, message: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status { view, status: status.as_u16(), url });
        }

        let source = response
            .text()
            .await
            .map_err(|e| LoadError::Request { view, message: e.to_string() })?;

        tracing::debug!(%view, %url, bytes = source.len(), "chunk fetched");
        Ok(ViewModule { view, origin: ModuleOrigin::Chunk { url, source } })
    }
}
