//! Router
//!
//! Ties the route table and the navigation guard together: resolves a
//! location, follows static redirects, asks the guard, then either commits
//! the route to the navigation state or follows the guard's redirect.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::guard::{GuardDecision, NavigationGuard, RedirectReason};
use crate::navigation::{
    normalize_path, Location, NavigationState, ResolvedRoute, RouteEntry, RouteTable, RouteTarget,
    LOGIN_PATH,
};

/// Navigation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// No route matches the path
    #[error("No route matches {0}")]
    NotFound(String),

    /// Redirects kept bouncing without reaching a committable route
    #[error("Too many redirects navigating to {0}")]
    RedirectLoop(String),
}

/// Result type for navigation operations
pub type Result<T> = std::result::Result<T, NavigationError>;

// =============================================================================
// Configuration
// =============================================================================

/// Web-history configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Base URL the application is served under
    pub base: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { base: "/".to_string() }
    }
}

impl HistoryConfig {
    /// History rooted at `base`
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Turn a browser location into an application path
    pub fn strip_base(&self, location: &str) -> String {
        let base = normalize_path(&self.base);
        if base == "/" {
            return location.to_string();
        }
        match location.strip_prefix(&base) {
            Some("") => "/".to_string(),
            Some(rest) if rest.starts_with(['/', '?', '#']) => rest.to_string(),
            _ => location.to_string(),
        }
    }

    /// Turn an application location into a browser URL
    pub fn href(&self, location: &Location) -> String {
        let base = normalize_path(&self.base);
        if base == "/" {
            location.to_string()
        } else {
            format!("{}{}", base, location)
        }
    }
}

/// Router configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Web-history settings
    #[serde(default)]
    pub history: HistoryConfig,
    /// Path denied navigations are sent to
    pub login_path: String,
    /// Redirects followed before giving up on a navigation
    pub max_redirects: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            history: HistoryConfig::default(),
            login_path: LOGIN_PATH.to_string(),
            max_redirects: 8,
        }
    }
}

impl RouterConfig {
    /// Set the history base
    pub fn with_history_base(mut self, base: impl Into<String>) -> Self {
        self.history = HistoryConfig::new(base);
        self
    }

    /// Set the login path
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Set the redirect limit
    pub fn with_max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }
}

// =============================================================================
// Router
// =============================================================================

/// Result of a committed navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationOutcome {
    /// Route that was committed
    pub route: ResolvedRoute,
    /// Set when the guard sent the navigation to the login path
    pub redirected: Option<RedirectReason>,
}

/// Route table plus navigation guard
#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
    guard: NavigationGuard,
    config: RouterConfig,
}

impl Router {
    /// Create a router. The guard redirects to `config.login_path`.
    pub fn new(table: RouteTable, guard: NavigationGuard, config: RouterConfig) -> Self {
        let guard = guard.with_login_path(config.login_path.clone());
        Self { table, guard, config }
    }

    /// The route table
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// The router configuration
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Find the view-rendering entry for a location, following static
    /// redirects. Query parameters are carried across redirects.
    pub fn resolve(&self, location: &Location) -> Result<(&RouteEntry, Location)> {
        let mut current = location.clone();
        for _ in 0..=self.config.max_redirects {
            let entry = self
                .table
                .lookup(&current.path)
                .ok_or_else(|| NavigationError::NotFound(current.path.clone()))?;

            match &entry.target {
                RouteTarget::View(_) => return Ok((entry, current)),
                RouteTarget::Redirect(to) => {
                    tracing::debug!(from = %current.path, to = %to, "following route redirect");
                    current = Location {
                        path: normalize_path(to),
                        query: current.query,
                    };
                }
            }
        }
        Err(NavigationError::RedirectLoop(location.path.clone()))
    }

    /// Navigate from a browser URL, stripping the history base first
    pub async fn navigate_url(
        &self,
        state: &mut NavigationState,
        url: &str,
    ) -> Result<NavigationOutcome> {
        let location = Location::parse(&self.config.history.strip_base(url));
        self.navigate(state, location).await
    }

    /// Navigate to a location
    ///
    /// Every attempt runs the guard. A guard redirect restarts navigation at
    /// the redirect target, which is guarded in turn.
    pub async fn navigate(
        &self,
        state: &mut NavigationState,
        location: Location,
    ) -> Result<NavigationOutcome> {
        let requested = location.path.clone();
        let mut target = location;
        let mut redirected: Option<RedirectReason> = None;

        for _ in 0..=self.config.max_redirects {
            state.begin(&target);

            let (entry, resolved_location) = match self.resolve(&target) {
                Ok(found) => found,
                Err(e) => {
                    state.cancel();
                    return Err(e);
                }
            };

            let decision = self.guard.evaluate(entry).await;
            state.settle(decision.state());

            match decision {
                GuardDecision::Proceed => {
                    let route = commit_route(entry, resolved_location, &requested);
                    tracing::debug!(path = %route.path, view = %route.view, "navigation committed");
                    state.commit(route.clone());
                    return Ok(NavigationOutcome { route, redirected });
                }
                GuardDecision::Redirect { to, reason } => {
                    redirected = Some(reason);
                    target = Location::parse(&to);
                }
            }
        }

        Err(NavigationError::RedirectLoop(requested))
    }
}

fn commit_route(entry: &RouteEntry, location: Location, requested: &str) -> ResolvedRoute {
    let view = entry
        .view_ref()
        .map(|v| v.load().name.clone())
        .unwrap_or_default();

    ResolvedRoute {
        path: entry.path.clone(),
        name: entry.name.clone(),
        view,
        requires_auth: entry.requires_auth,
        query: location.query,
        redirected_from: (entry.path != requested).then(|| requested.to_string()),
    }
}
