//! Client-side route table.
//!
//! DESIGN
//! ======
//! Routes are kept in declaration order and the first matching pattern
//! wins. Resolving a path is synchronous and never touches the network;
//! only [`Router::navigate`] waits, and only the first time a lazy route is
//! visited.
//!
//! ERROR HANDLING
//! ==============
//! A path with no matching route is an explicit [`RouteError::NotFound`]
//! unless a fallback route was declared. Load failures surface as
//! [`NavigationError::Load`] and are left to the caller.

pub mod loader;
pub mod pattern;
pub mod view;


use std::collections::HashSet;
use std::sync::Arc;

use crate::config::normalize_base;

pub use loader::{HttpChunkLoader, LoadError, ViewLoader};
pub use pattern::{Params, PathPattern};
pub use view::{LazyView, ModuleOrigin, ViewComponent, ViewId, ViewModule};

/// Error produced while building or querying the route table.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("duplicate route name: {0}")]
    DuplicateName(String),

    #[error("no route matches {0}")]
    NotFound(String),

    #[error("unknown route name: {0}")]
    UnknownName(String),

    #[error("route {route} needs parameter '{param}'")]
    MissingParam { route: String, param: String },

    #[error("{location} is outside the history base {base}")]
    OutsideBase { location: String, base: String },
}

/// Error produced by [`Router::navigate`].
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error(transparent)]
    Load(#[from] LoadError),
}

// =============================================================================
// ROUTE
// =============================================================================

#[derive(Debug)]
pub struct Route {
    name: String,
    pattern: PathPattern,
    component: ViewComponent,
}

impl Route {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    #[must_use]
    pub fn component(&self) -> &ViewComponent {
        &self.component
    }

    #[must_use]
    pub fn view(&self) -> ViewId {
        self.component.view()
    }
}

/// Result of [`Router::resolve`]: the route to render and its parameters.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: Params,
}

impl RouteMatch<'_> {
    #[must_use]
    pub fn name(&self) -> &str {
        self.route.name()
    }

    #[must_use]
    pub fn view(&self) -> ViewId {
        self.route.view()
    }

    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// A completed navigation with the view's code in hand.
#[derive(Clone, Debug)]
pub struct Navigation {
    pub name: String,
    pub params: Params,
    pub module: Arc<ViewModule>,
}

impl Navigation {
    #[must_use]
    pub fn view(&self) -> ViewId {
        self.module.view
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Collects route declarations; validation happens in [`RouterBuilder::build`].
pub struct RouterBuilder {
    base: String,
    routes: Vec<(String, String, ViewComponent)>,
    fallback: Option<(String, ViewComponent)>,
}

impl RouterBuilder {
    /// Declare a route. Order of calls is match order.
    #[must_use]
    pub fn route(mut self, path: &str, name: &str, component: ViewComponent) -> Self {
        self.routes.push((path.to_owned(), name.to_owned(), component));
        self
    }

    /// Declare the route used when nothing else matches.
    #[must_use]
    pub fn fallback(mut self, name: &str, component: ViewComponent) -> Self {
        self.fallback = Some((name.to_owned(), component));
        self
    }

    /// # Errors
    ///
    /// Returns [`RouteError::InvalidPattern`] for a malformed pattern and
    /// [`RouteError::DuplicateName`] when two routes share a name.
    pub fn build(self) -> Result<Router, RouteError> {
        let mut names = HashSet::new();
        let mut routes = Vec::with_capacity(self.routes.len());

        for (path, name, component) in self.routes {
            if !names.insert(name.clone()) {
                return Err(RouteError::DuplicateName(name));
            }
            let pattern = PathPattern::parse(&path)?;
            routes.push(Route { name, pattern, component });
        }

        let fallback = match self.fallback {
            Some((name, component)) => {
                if !names.insert(name.clone()) {
                    return Err(RouteError::DuplicateName(name));
                }
                let pattern = PathPattern::parse("/")?;
                Some(Route { name, pattern, component })
            }
            None => None,
        };

        tracing::debug!(base = %self.base, routes = routes.len(), fallback = fallback.is_some(), "route table built");
        Ok(Router { base: self.base, routes, fallback })
    }
}

// =============================================================================
// ROUTER
// =============================================================================

#[derive(Debug)]
pub struct Router {
    base: String,
    routes: Vec<Route>,
    fallback: Option<Route>,
}

impl Router {
    /// Start a route table mounted under the history base `base`.
    #[must_use]
    pub fn builder(base: &str) -> RouterBuilder {
        RouterBuilder { base: normalize_base(base), routes: Vec::new(), fallback: None }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Declared routes in match order, fallback excluded.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Look a route up by name, fallback included.
    #[must_use]
    pub fn route(&self, name: &str) -> Option<&Route> {
        self.routes.iter().chain(self.fallback.as_ref()).find(|r| r.name == name)
    }

    /// Match an app-relative path. Query string and fragment are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::NotFound`] when no route matches and no
    /// fallback is declared.
    pub fn resolve(&self, path: &str) -> Result<RouteMatch<'_>, RouteError> {
        let bare = strip_query_and_fragment(path);

        for route in &self.routes {
            if let Some(params) = route.pattern.matches(bare) {
                tracing::debug!(path = bare, route = %route.name, view = %route.view(), "route matched");
                return Ok(RouteMatch { route, params });
            }
        }

        match &self.fallback {
            Some(route) => {
                tracing::debug!(path = bare, route = %route.name, "fallback route used");
                Ok(RouteMatch { route, params: Params::new() })
            }
            None => Err(RouteError::NotFound(bare.to_owned())),
        }
    }

    /// Resolve a full location, removing the history base first.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::OutsideBase`] when `location` is not under the
    /// base, otherwise as [`Router::resolve`].
    pub fn resolve_location(&self, location: &str) -> Result<RouteMatch<'_>, RouteError> {
        let path = self.strip_base(location).ok_or_else(|| RouteError::OutsideBase {
            location: location.to_owned(),
            base: self.base.clone(),
        })?;
        self.resolve(path)
    }

    /// Resolve `path` and obtain its view, fetching lazy code on first visit.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::Route`] when the path does not resolve and
    /// [`NavigationError::Load`] when the view's code cannot be loaded.
    pub async fn navigate(&self, path: &str) -> Result<Navigation, NavigationError> {
        let matched = self.resolve(path)?;
        let component = matched.route.component();
        let module = match component.resolve().await {
            Ok(module) => module,
            Err(e) => {
                tracing::warn!(route = %matched.route.name, error = %e, "view load failed");
                return Err(e.into());
            }
        };

        Ok(Navigation { name: matched.route.name.clone(), params: matched.params, module })
    }

    /// [`Router::navigate`] for a full location under the history base.
    ///
    /// # Errors
    ///
    /// As [`Router::resolve_location`] and [`Router::navigate`].
    pub async fn navigate_location(&self, location: &str) -> Result<Navigation, NavigationError> {
        let path = self.strip_base(location).ok_or_else(|| RouteError::OutsideBase {
            location: location.to_owned(),
            base: self.base.clone(),
        })?;
        self.navigate(path).await
    }

    /// Whether the named route's view is available without loading.
    #[must_use]
    pub fn is_loaded(&self, name: &str) -> bool {
        self.route(name).is_some_and(|r| r.component.ready().is_some())
    }

    /// Browser URL for the named route, history base included.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::UnknownName`] or [`RouteError::MissingParam`].
    pub fn href(&self, name: &str, params: &Params) -> Result<String, RouteError> {
        let route = self.route(name).ok_or_else(|| RouteError::UnknownName(name.to_owned()))?;
        let path = route.pattern.interpolate(name, params)?;
        let prefix = self.base.trim_end_matches('/');
        Ok(if path == "/" { self.base.clone() } else { format!("{prefix}{path}") })
    }

    fn strip_base<'a>(&self, location: &'a str) -> Option<&'a str> {
        let prefix = self.base.trim_end_matches('/');
        if prefix.is_empty() {
            return Some(location);
        }
        let rest = location.strip_prefix(prefix)?;
        if rest.is_empty() {
            Some("/")
        } else if rest.starts_with(['/', '?', '#']) {
            Some(rest)
        } else {
            None
        }
    }
}

fn strip_query_and_fragment(path: &str) -> &str {
    path.find(['?', '#']).map_or(path, |idx| &path[..idx])
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    /// In-memory loader that counts calls and can fail or stall on demand.
    #[derive(Default)]
    pub struct MockLoader {
        calls: AtomicUsize,
        failures_left: AtomicUsize,
        delay: Mutex<Option<Duration>>,
    }

    impl MockLoader {
        #[must_use]
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        /// Loader whose first `n` calls fail with a 503.
        #[must_use]
        pub fn failing(n: usize) -> Arc<Self> {
            let loader = Self::default();
            loader.failures_left.store(n, Ordering::SeqCst);
            Arc::new(loader)
        }

        /// Loader that sleeps for `delay` before answering.
        #[must_use]
        pub fn slow(delay: Duration) -> Arc<Self> {
            let loader = Self::default();
            *loader.delay.lock().expect("delay mutex should lock") = Some(delay);
            Arc::new(loader)
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl ViewLoader for MockLoader {
        async fn load(&self, view: ViewId) -> Result<ViewModule, LoadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let delay = *self.delay.lock().expect("delay mutex should lock");
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            let failed = self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if failed {
                return Err(LoadError::Status { view, status: 503, url: format!("mock://{view}") });
            }
            Ok(ViewModule {
                view,
                origin: ModuleOrigin::Chunk { url: format!("mock://{view}"), source: format!("// {view}") },
            })
        }
    }
}
