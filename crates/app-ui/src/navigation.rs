//! Route table and navigation state for Inventory Console
//!
//! This module provides:
//! - Route entries binding paths to lazily-loaded views
//! - The immutable route table, with the two supported root layouts
//! - Location parsing (path, query string, fragment)
//! - Navigation history state

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use thiserror::Error;

use crate::guard::GuardState;
use crate::views::{ConsoleView, ViewRef};

/// Path of the login route
pub const LOGIN_PATH: &str = "/login";

// =============================================================================
// Route Parameters
// =============================================================================

/// Query parameters of a location
pub type RouteParams = BTreeMap<String, String>;

/// Normalize a path: leading slash, no empty segments, no trailing slash
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// A navigation target: path plus query parameters
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Normalized, percent-decoded path
    pub path: String,
    /// Decoded query parameters
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query: RouteParams,
}

impl Location {
    /// Parse a location string such as `/inventory?sku=A%2F1#top`
    ///
    /// The fragment is dropped. Malformed percent-encodings are kept verbatim.
    pub fn parse(input: &str) -> Self {
        let without_fragment = input.split_once('#').map_or(input, |(before, _)| before);
        let (pathname, query) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (without_fragment, None),
        };

        let decoded: Vec<String> = pathname
            .split('/')
            .filter(|s| !s.is_empty())
            .map(decode)
            .collect();

        Self {
            path: format!("/{}", decoded.join("/")),
            query: parse_query(query),
        }
    }

    /// Location for a bare path
    pub fn path(path: &str) -> Self {
        Self::parse(path)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self
            .path
            .split('/')
            .map(|s| urlencoding::encode(s).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        f.write_str(&path)?;

        if !self.query.is_empty() {
            let pairs: Vec<String> = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect();
            write!(f, "?{}", pairs.join("&"))?;
        }
        Ok(())
    }
}

fn decode(s: &str) -> String {
    urlencoding::decode(s).map_or_else(|_| s.to_string(), |d| d.into_owned())
}

/// Parse query string into params
fn parse_query(query: Option<&str>) -> RouteParams {
    let mut params = RouteParams::new();
    if let Some(query) = query {
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            params.insert(decode(key), decode(&value.replace('+', " ")));
        }
    }
    params
}

// =============================================================================
// Route Entries
// =============================================================================

/// What a route resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    /// Render a view
    View(ViewRef),
    /// Redirect unconditionally to another path
    Redirect(String),
}

/// A path-to-view binding plus the metadata consulted by the guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    /// Route path
    pub path: String,
    /// Optional route name
    pub name: Option<String>,
    /// Whether the guard must authenticate before entering
    pub requires_auth: bool,
    /// View or redirect
    pub target: RouteTarget,
}

impl RouteEntry {
    /// Public route rendering a view
    pub fn view(path: impl Into<String>, view: ViewRef) -> Self {
        Self {
            path: path.into(),
            name: None,
            requires_auth: false,
            target: RouteTarget::View(view),
        }
    }

    /// Route redirecting to another path
    pub fn redirect(path: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
            requires_auth: false,
            target: RouteTarget::Redirect(to.into()),
        }
    }

    /// Name this route
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Mark this route as protected
    pub fn requires_auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    /// The view reference, if this route renders one
    pub fn view_ref(&self) -> Option<&ViewRef> {
        match &self.target {
            RouteTarget::View(view) => Some(view),
            RouteTarget::Redirect(_) => None,
        }
    }

    /// The redirect target, if this route redirects
    pub fn redirect_target(&self) -> Option<&str> {
        match &self.target {
            RouteTarget::Redirect(to) => Some(to),
            RouteTarget::View(_) => None,
        }
    }
}

// =============================================================================
// Route Table
// =============================================================================

/// Route table construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    /// Path is not absolute or carries a query/fragment
    #[error("Invalid route path: {0}")]
    InvalidPath(String),

    /// Two entries share a path
    #[error("Duplicate route path: {0}")]
    DuplicatePath(String),

    /// Two entries share a name
    #[error("Duplicate route name: {0}")]
    DuplicateName(String),

    /// A redirect points at a path that does not render a view
    #[error("Redirect from {from} to {to} does not reach a view")]
    DanglingRedirect {
        /// Redirecting path
        from: String,
        /// Redirect target
        to: String,
    },
}

/// Root layout of the standard table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteTableVariant {
    /// `/` renders the login view, duplicating `/login`
    #[default]
    RootIsLogin,
    /// `/` redirects to `/login`
    RootRedirectsToLogin,
}

/// Ordered, immutable route table
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    by_path: HashMap<String, usize>,
}

impl RouteTable {
    /// Build a table, checking that every path and name is unique and that
    /// every redirect reaches a view
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, RouteTableError> {
        let mut by_path = HashMap::with_capacity(entries.len());
        let mut names = HashMap::new();
        let mut normalized = Vec::with_capacity(entries.len());

        for (index, mut entry) in entries.into_iter().enumerate() {
            if !entry.path.starts_with('/') || entry.path.contains(['?', '#']) {
                return Err(RouteTableError::InvalidPath(entry.path));
            }
            entry.path = normalize_path(&entry.path);

            if by_path.insert(entry.path.clone(), index).is_some() {
                return Err(RouteTableError::DuplicatePath(entry.path));
            }
            if let Some(name) = &entry.name {
                if names.insert(name.clone(), index).is_some() {
                    return Err(RouteTableError::DuplicateName(name.clone()));
                }
            }
            normalized.push(entry);
        }

        for entry in &normalized {
            if let RouteTarget::Redirect(to) = &entry.target {
                let reaches_view = by_path
                    .get(&normalize_path(to))
                    .and_then(|&i| normalized.get(i))
                    .is_some_and(|target| target.view_ref().is_some());
                if !reaches_view {
                    return Err(RouteTableError::DanglingRedirect {
                        from: entry.path.clone(),
                        to: to.clone(),
                    });
                }
            }
        }

        Ok(Self { entries: normalized, by_path })
    }

    /// The standard console table, with the login view at [`LOGIN_PATH`]
    pub fn standard(variant: RouteTableVariant) -> Self {
        Self::from_validated(standard_entries(variant, LOGIN_PATH))
    }

    /// The standard console table with the login view mounted at
    /// `login_path`. Fails when the login path collides with another route.
    pub fn standard_with_login(
        variant: RouteTableVariant,
        login_path: &str,
    ) -> Result<Self, RouteTableError> {
        Self::new(standard_entries(variant, login_path))
    }

    /// Index a list already known to satisfy the table invariants
    fn from_validated(entries: Vec<RouteEntry>) -> Self {
        let by_path = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.path.clone(), i))
            .collect();
        Self { entries, by_path }
    }

    /// Find the entry for a path. Query strings, fragments and trailing
    /// slashes are ignored.
    pub fn lookup(&self, path: &str) -> Option<&RouteEntry> {
        let location = Location::parse(path);
        self.by_path
            .get(&location.path)
            .and_then(|&i| self.entries.get(i))
    }

    /// Find an entry by route name
    pub fn by_name(&self, name: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.name.as_deref() == Some(name))
    }

    /// All entries in declaration order
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn standard_entries(variant: RouteTableVariant, login_path: &str) -> Vec<RouteEntry> {
    let root = match variant {
        RouteTableVariant::RootIsLogin => RouteEntry::view("/", ConsoleView::Login.view_ref()),
        RouteTableVariant::RootRedirectsToLogin => RouteEntry::redirect("/", login_path),
    };

    let protected = [
        ("/dashboard", "dashboard", ConsoleView::Dashboard),
        ("/inventory", "inventory", ConsoleView::Inventory),
        ("/products", "products", ConsoleView::Products),
        ("/orders", "orders", ConsoleView::Orders),
        ("/reports", "reports", ConsoleView::Reports),
    ];

    let mut entries = vec![
        root,
        RouteEntry::view(login_path, ConsoleView::Login.view_ref()).named("login"),
    ];
    entries.extend(protected.into_iter().map(|(path, name, view)| {
        RouteEntry::view(path, view.view_ref()).named(name).requires_auth()
    }));
    entries
}

// =============================================================================
// Navigation State
// =============================================================================

/// A committed navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRoute {
    /// Path of the matched entry
    pub path: String,
    /// Name of the matched entry
    pub name: Option<String>,
    /// Component name of the rendered view
    pub view: String,
    /// Whether the entry is protected
    pub requires_auth: bool,
    /// Query parameters of the requested location
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query: RouteParams,
    /// Path originally requested, when a redirect was followed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirected_from: Option<String>,
}

/// A history entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEntry {
    /// The committed route
    pub route: ResolvedRoute,
    /// Unique key for this entry
    pub key: String,
}

impl StackEntry {
    /// Create a new stack entry
    pub fn new(route: ResolvedRoute) -> Self {
        Self {
            route,
            key: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Navigation currently waiting on the guard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingNavigation {
    /// Requested location
    pub location: String,
    /// Guard progress
    pub state: GuardState,
}

/// History of committed navigations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    entries: Vec<StackEntry>,
    #[serde(skip)]
    pending: Option<PendingNavigation>,
}

impl NavigationState {
    /// Create an empty navigation state
    pub fn new() -> Self {
        Self::default()
    }

    /// Current route, if anything has been committed
    pub fn current(&self) -> Option<&ResolvedRoute> {
        self.entries.last().map(|e| &e.route)
    }

    /// Navigation in flight, if any
    pub fn pending(&self) -> Option<&PendingNavigation> {
        self.pending.as_ref()
    }

    /// Record that a navigation is being evaluated
    pub fn begin(&mut self, location: &Location) {
        self.pending = Some(PendingNavigation {
            location: location.to_string(),
            state: GuardState::Evaluating,
        });
    }

    /// Record the guard's terminal state for the pending navigation
    pub fn settle(&mut self, state: GuardState) {
        if let Some(pending) = self.pending.as_mut() {
            pending.state = state;
        }
    }

    /// Commit a route and clear the pending navigation
    pub fn commit(&mut self, route: ResolvedRoute) {
        self.entries.push(StackEntry::new(route));
        self.pending = None;
    }

    /// Drop the pending navigation without committing anything
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Go back one entry (returns false at the first entry)
    pub fn go_back(&mut self) -> bool {
        if self.entries.len() > 1 {
            self.entries.pop();
            true
        } else {
            false
        }
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    /// Number of history entries
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// All history entries, oldest first
    pub fn entries(&self) -> &[StackEntry] {
        &self.entries
    }

    /// Forget all history
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(path: &str) -> ResolvedRoute {
        ResolvedRoute {
            path: path.to_string(),
            name: None,
            view: "TestView".to_string(),
            requires_auth: false,
            query: RouteParams::new(),
            redirected_from: None,
        }
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("/dashboard/"), "/dashboard");
        assert_eq!(normalize_path("//orders//today"), "/orders/today");
    }

    #[test]
    fn test_location_parse() {
        let location = Location::parse("/inventory/?sku=A%2F1&q=red+shoe#top");
        assert_eq!(location.path, "/inventory");
        assert_eq!(location.query.get("sku"), Some(&"A/1".to_string()));
        assert_eq!(location.query.get("q"), Some(&"red shoe".to_string()));
    }

    #[test]
    fn test_location_flag_parameter() {
        let location = Location::parse("/reports?print");
        assert_eq!(location.query.get("print"), Some(&String::new()));
    }

    #[test]
    fn test_location_display() {
        let location = Location::parse("/orders?status=open&page=2");
        assert_eq!(location.to_string(), "/orders?page=2&status=open");
        assert_eq!(Location::path("/").to_string(), "/");
    }

    #[test]
    fn test_standard_table_root_is_login() {
        let table = RouteTable::standard(RouteTableVariant::RootIsLogin);
        assert_eq!(table.len(), 7);

        let root = table.lookup("/").unwrap();
        let login = table.lookup("/login").unwrap();
        assert_eq!(root.view_ref(), login.view_ref());
        assert!(root.redirect_target().is_none());
        assert!(!root.requires_auth);
        assert_eq!(root.name, None);
        assert_eq!(login.name.as_deref(), Some("login"));
    }

    #[test]
    fn test_standard_table_root_redirects() {
        let table = RouteTable::standard(RouteTableVariant::RootRedirectsToLogin);
        let root = table.lookup("/").unwrap();
        assert_eq!(root.redirect_target(), Some(LOGIN_PATH));
        assert!(root.view_ref().is_none());
    }

    #[test]
    fn test_standard_table_protected_routes() {
        let table = RouteTable::standard(RouteTableVariant::RootIsLogin);
        for name in ["dashboard", "inventory", "products", "orders", "reports"] {
            let entry = table.by_name(name).unwrap();
            assert!(entry.requires_auth, "{name} must be protected");
            assert_eq!(entry.path, format!("/{name}"));
        }
        assert!(!table.by_name("login").unwrap().requires_auth);
    }

    #[test]
    fn test_standard_tables_pass_validation() {
        for variant in [RouteTableVariant::RootIsLogin, RouteTableVariant::RootRedirectsToLogin] {
            let entries = RouteTable::standard(variant).entries().to_vec();
            assert!(RouteTable::new(entries).is_ok());
        }
    }

    #[test]
    fn test_standard_table_with_custom_login_path() {
        let table =
            RouteTable::standard_with_login(RouteTableVariant::RootRedirectsToLogin, "/signin")
                .unwrap();

        let login = table.by_name("login").unwrap();
        assert_eq!(login.path, "/signin");
        assert!(!login.requires_auth);
        assert_eq!(table.lookup("/").unwrap().redirect_target(), Some("/signin"));
        assert!(table.lookup(LOGIN_PATH).is_none());
    }

    #[test]
    fn test_login_path_colliding_with_a_route_is_rejected() {
        let result = RouteTable::standard_with_login(RouteTableVariant::RootIsLogin, "/dashboard");
        assert_eq!(result.unwrap_err(), RouteTableError::DuplicatePath("/dashboard".to_string()));

        let result = RouteTable::standard_with_login(RouteTableVariant::RootRedirectsToLogin, "/");
        assert_eq!(result.unwrap_err(), RouteTableError::DuplicatePath("/".to_string()));
    }

    #[test]
    fn test_lookup_ignores_query_and_trailing_slash() {
        let table = RouteTable::standard(RouteTableVariant::RootIsLogin);
        assert_eq!(table.lookup("/dashboard/?tab=1").unwrap().path, "/dashboard");
        assert!(table.lookup("/nonexistent").is_none());
        assert!(table.lookup("/dashboard/extra").is_none());
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let result = RouteTable::new(vec![
            RouteEntry::view("/login", ConsoleView::Login.view_ref()),
            RouteEntry::view("/login/", ConsoleView::Login.view_ref()),
        ]);
        assert_eq!(result.unwrap_err(), RouteTableError::DuplicatePath("/login".to_string()));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = RouteTable::new(vec![
            RouteEntry::view("/a", ConsoleView::Orders.view_ref()).named("orders"),
            RouteEntry::view("/b", ConsoleView::Orders.view_ref()).named("orders"),
        ]);
        assert_eq!(result.unwrap_err(), RouteTableError::DuplicateName("orders".to_string()));
    }

    #[test]
    fn test_invalid_path_rejected() {
        let result = RouteTable::new(vec![RouteEntry::view("login", ConsoleView::Login.view_ref())]);
        assert!(matches!(result, Err(RouteTableError::InvalidPath(_))));

        let result =
            RouteTable::new(vec![RouteEntry::view("/login?x=1", ConsoleView::Login.view_ref())]);
        assert!(matches!(result, Err(RouteTableError::InvalidPath(_))));
    }

    #[test]
    fn test_dangling_redirect_rejected() {
        let result = RouteTable::new(vec![RouteEntry::redirect("/", "/login")]);
        assert!(matches!(result, Err(RouteTableError::DanglingRedirect { .. })));

        let result = RouteTable::new(vec![
            RouteEntry::redirect("/", "/home"),
            RouteEntry::redirect("/home", "/"),
        ]);
        assert!(matches!(result, Err(RouteTableError::DanglingRedirect { .. })));
    }

    #[test]
    fn test_navigation_state_history() {
        let mut state = NavigationState::new();
        assert!(state.current().is_none());
        assert!(!state.can_go_back());

        state.commit(resolved("/login"));
        state.commit(resolved("/dashboard"));
        assert_eq!(state.depth(), 2);
        assert_eq!(state.current().unwrap().path, "/dashboard");

        assert!(state.go_back());
        assert_eq!(state.current().unwrap().path, "/login");
        assert!(!state.go_back());
    }

    #[test]
    fn test_navigation_state_pending() {
        let mut state = NavigationState::new();
        state.begin(&Location::path("/orders"));
        assert_eq!(state.pending().unwrap().state, GuardState::Evaluating);

        state.settle(GuardState::Allowed);
        assert_eq!(state.pending().unwrap().state, GuardState::Allowed);

        state.commit(resolved("/orders"));
        assert!(state.pending().is_none());
    }

    #[test]
    fn test_stack_entry_keys_are_unique() {
        let a = StackEntry::new(resolved("/orders"));
        let b = StackEntry::new(resolved("/orders"));
        assert_ne!(a.key, b.key);
    }

    #[test]
    fn test_navigation_state_serialization() {
        let mut state = NavigationState::new();
        state.commit(resolved("/reports"));
        state.begin(&Location::path("/orders"));

        let json = serde_json::to_string(&state).unwrap();
        let parsed: NavigationState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.entries(), state.entries());
        assert!(parsed.pending().is_none());
    }
}
