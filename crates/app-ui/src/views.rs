//! Lazily-resolved view references
//!
//! Route entries name their view up front but only materialize it the first
//! time a navigation actually commits to it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// A materialized view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewComponent {
    /// Component name (e.g. "DashboardView")
    pub name: String,
    /// Display title
    pub title: String,
}

impl ViewComponent {
    /// Create a new view component
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self { name: name.into(), title: title.into() }
    }
}

type Loader = Arc<dyn Fn() -> ViewComponent + Send + Sync>;

/// Named reference to a view that is loaded on first use
///
/// Clones share the loaded component.
#[derive(Clone)]
pub struct ViewRef {
    name: String,
    loader: Loader,
    loaded: Arc<OnceLock<ViewComponent>>,
}

impl ViewRef {
    /// Create a lazy reference from a loader
    pub fn lazy<F>(name: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> ViewComponent + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            loader: Arc::new(loader),
            loaded: Arc::new(OnceLock::new()),
        }
    }

    /// Component name, available without loading
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Load the component, running the loader at most once
    pub fn load(&self) -> &ViewComponent {
        self.loaded.get_or_init(|| {
            tracing::debug!(view = %self.name, "loading view");
            (self.loader)()
        })
    }

    /// Whether the component has been loaded
    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }
}

impl fmt::Debug for ViewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewRef")
            .field("name", &self.name)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl PartialEq for ViewRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ViewRef {}

// =============================================================================
// Console Views
// =============================================================================

/// Views shipped with the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleView {
    /// Login screen
    Login,
    /// Overview dashboard
    Dashboard,
    /// Stock levels
    Inventory,
    /// Product catalogue
    Products,
    /// Customer orders
    Orders,
    /// Reports
    Reports,
}

impl ConsoleView {
    /// Component name of this view
    pub fn component_name(&self) -> &'static str {
        match self {
            ConsoleView::Login => "LoginView",
            ConsoleView::Dashboard => "DashboardView",
            ConsoleView::Inventory => "InventoryView",
            ConsoleView::Products => "ProductsView",
            ConsoleView::Orders => "OrdersView",
            ConsoleView::Reports => "ReportsView",
        }
    }

    /// Display title of this view
    pub fn title(&self) -> &'static str {
        match self {
            ConsoleView::Login => "Log In",
            ConsoleView::Dashboard => "Dashboard",
            ConsoleView::Inventory => "Inventory",
            ConsoleView::Products => "Products",
            ConsoleView::Orders => "Orders",
            ConsoleView::Reports => "Reports",
        }
    }

    /// Lazy reference to this view
    pub fn view_ref(self) -> ViewRef {
        ViewRef::lazy(self.component_name(), move || {
            ViewComponent::new(self.component_name(), self.title())
        })
    }

    /// All console views
    pub fn all() -> [ConsoleView; 6] {
        [
            ConsoleView::Login,
            ConsoleView::Dashboard,
            ConsoleView::Inventory,
            ConsoleView::Products,
            ConsoleView::Orders,
            ConsoleView::Reports,
        ]
    }
}
