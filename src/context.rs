//! Application context handed to every view.
//!
//! SYSTEM CONTEXT
//! ==============
//! Built once at startup and passed down explicitly. Views that need the
//! router or the signed-in principal take an `AppContext` (or a clone of one
//! of its fields) instead of reaching for a global.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use std::sync::Arc;

use crate::config::{AppConfig, ConfigError};
use crate::router::{HttpChunkLoader, LoadError, RouteError, Router, ViewLoader};
use crate::routes;
use crate::store::TokenStore;

/// Error produced while assembling the [`AppContext`].
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Route(#[from] RouteError),
}

/// Shared handles for the page's lifetime. Cheap to clone.
#[derive(Clone, Debug)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub router: Arc<Router>,
    pub tokens: TokenStore,
}

impl AppContext {
    /// Assemble the context with an explicit view loader.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::Route`] if the route table is malformed.
    pub fn new(config: AppConfig, loader: Arc<dyn ViewLoader>) -> Result<Self, ContextError> {
        let router = routes::app_router(&config, loader)?;
        tracing::info!(
            base = router.base(),
            asset_base_url = %config.asset_base_url,
            routes = router.routes().len(),
            "app context ready"
        );
        Ok(Self { config: Arc::new(config), router: Arc::new(router), tokens: TokenStore::new() })
    }

    /// Assemble the context fetching lazy views over HTTP.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::Load`] if the HTTP client cannot be built and
    /// [`ContextError::Route`] if the route table is malformed.
    pub fn from_config(config: AppConfig) -> Result<Self, ContextError> {
        let loader = HttpChunkLoader::from_config(&config)?;
        Self::new(config, Arc::new(loader))
    }

    /// Read [`AppConfig`] from the environment and assemble the context.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::Config`] for malformed configuration, otherwise
    /// as [`AppContext::from_config`].
    pub fn from_env() -> Result<Self, ContextError> {
        Self::from_config(AppConfig::from_env()?)
    }
}
