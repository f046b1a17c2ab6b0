//! Navigation layer for Inventory Console
//!
//! This crate provides the client-side routing of the console: a static
//! route table binding paths to lazily-loaded views, and a navigation guard
//! that checks authentication before protected routes are entered.
//!
//! # Modules
//!
//! - [`views`] - Lazily-resolved view references
//! - [`navigation`] - Route table, locations and navigation history
//! - [`guard`] - Authentication guard run before every transition
//! - [`router`] - Resolution, guarding and committing of navigations
//!
//! # Example
//!
//! ```rust
//! use app_ui::{RouteTable, RouteTableVariant};
//!
//! let table = RouteTable::standard(RouteTableVariant::RootRedirectsToLogin);
//! let dashboard = table.lookup("/dashboard").unwrap();
//! assert!(dashboard.requires_auth);
//! assert_eq!(table.lookup("/").unwrap().redirect_target(), Some("/login"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod guard;
pub mod navigation;
pub mod router;
pub mod views;

// Re-export commonly used types
pub use guard::{GuardDecision, GuardState, NavigationGuard, RedirectReason};

pub use navigation::{
    normalize_path, Location, NavigationState, PendingNavigation, ResolvedRoute, RouteEntry,
    RouteParams, RouteTable, RouteTableError, RouteTableVariant, RouteTarget, StackEntry,
    LOGIN_PATH,
};

pub use router::{HistoryConfig, NavigationError, NavigationOutcome, Router, RouterConfig};

pub use views::{ConsoleView, ViewComponent, ViewRef};
