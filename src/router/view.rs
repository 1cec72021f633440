//! View identifiers and route components.
//!
//! DESIGN
//! ======
//! A route component is either eager (bundled with the initial page, ready
//! at startup) or lazy. A lazy component is a memoized async factory: the
//! first `load` runs the loader, every later call returns the cached module.
//! Concurrent first visits wait on the same `OnceCell` initialization, so
//! the chunk is fetched once. A failed load leaves the cell empty and the
//! next visit retries.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;

use super::loader::{LoadError, ViewLoader};

/// Views the storefront can render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewId {
    About,
    SignUp,
    SignIn,
    GoodsList,
    GoodsDetail,
}

impl ViewId {
    /// Name of the view's code chunk, e.g. `GoodsListView`.
    #[must_use]
    pub fn chunk_name(self) -> &'static str {
        match self {
            Self::About => "AboutView",
            Self::SignUp => "SignUpView",
            Self::SignIn => "SignInView",
            Self::GoodsList => "GoodsListView",
            Self::GoodsDetail => "GoodsDetailView",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.chunk_name())
    }
}

/// Where a resolved view's code came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModuleOrigin {
    /// Part of the initial bundle.
    Bundled,
    /// Fetched on demand.
    Chunk { url: String, source: String },
}

/// A view whose code is available for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewModule {
    pub view: ViewId,
    pub origin: ModuleOrigin,
}

impl ViewModule {
    #[must_use]
    pub fn bundled(view: ViewId) -> Self {
        Self { view, origin: ModuleOrigin::Bundled }
    }
}

/// The component half of a route.
pub enum ViewComponent {
    Eager(Arc<ViewModule>),
    Lazy(LazyView),
}

impl ViewComponent {
    /// A view bundled with the initial page.
    #[must_use]
    pub fn eager(view: ViewId) -> Self {
        Self::Eager(Arc::new(ViewModule::bundled(view)))
    }

    /// A view fetched through `loader` on first visit.
    #[must_use]
    pub fn lazy(view: ViewId, loader: Arc<dyn ViewLoader>, timeout: Option<Duration>) -> Self {
        Self::Lazy(LazyView::new(view, loader, timeout))
    }

    #[must_use]
    pub fn view(&self) -> ViewId {
        match self {
            Self::Eager(module) => module.view,
            Self::Lazy(lazy) => lazy.view,
        }
    }

    #[must_use]
    pub fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy(_))
    }

    /// The module if it is available without waiting.
    #[must_use]
    pub fn ready(&self) -> Option<Arc<ViewModule>> {
        match self {
            Self::Eager(module) => Some(Arc::clone(module)),
            Self::Lazy(lazy) => lazy.cell.get().cloned(),
        }
    }

    /// Obtain the module, loading it first if needed.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] of a failed or timed-out lazy load.
    pub async fn resolve(&self) -> Result<Arc<ViewModule>, LoadError> {
        match self {
            Self::Eager(module) => Ok(Arc::clone(module)),
            Self::Lazy(lazy) => lazy.load().await,
        }
    }
}

impl fmt::Debug for ViewComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eager(module) => f.debug_tuple("Eager").field(&module.view).finish(),
            Self::Lazy(lazy) => f
                .debug_struct("Lazy")
                .field("view", &lazy.view)
                .field("resolved", &lazy.is_resolved())
                .finish_non_exhaustive(),
        }
    }
}

/// View loaded on first visit and cached afterwards.
pub struct LazyView {
    view: ViewId,
    loader: Arc<dyn ViewLoader>,
    timeout: Option<Duration>,
    cell: OnceCell<Arc<ViewModule>>,
}

impl LazyView {
    #[must_use]
    pub fn new(view: ViewId, loader: Arc<dyn ViewLoader>, timeout: Option<Duration>) -> Self {
        Self { view, loader, timeout, cell: OnceCell::new() }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.cell.initialized()
    }

    /// Return the cached module, running the loader on the first call.
    ///
    /// # Errors
    ///
    /// Returns the loader's error, or [`LoadError::TimedOut`] when the
    /// configured deadline passes first. Errors are not cached.
    pub async fn load(&self) -> Result<Arc<ViewModule>, LoadError> {
        self.cell.get_or_try_init(|| self.fetch()).await.map(Arc::clone)
    }

    async fn fetch(&self) -> Result<Arc<ViewModule>, LoadError> {
        tracing::debug!(view = %self.view, "loading lazy view");
        let loading = self.loader.load(self.view);
        let module = match self.timeout {
            Some(after) => tokio::time::timeout(after, loading)
                .await
                .map_err(|_| LoadError::TimedOut { view: self.view, after })??,
            None => loading.await?,
        };
        tracing::info!(view = %self.view, "lazy view loaded");
        Ok(Arc::new(module))
    }
}
