//! Inventory Console
//!
//! Client-side navigation for the inventory console: configuration loading,
//! tracing setup and wiring of the route table, the authentication provider
//! and the router.
//!
//! # Example
//!
//! ```rust
//! use inventory_console::{bootstrap, AppConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = AppConfig::from_json_str(r#"{
//!     "variant": "root_redirects_to_login",
//!     "auth": { "policy": "local_token" }
//! }"#)?;
//! let mut app = bootstrap(config)?;
//! let outcome = app.navigate("/dashboard").await?;
//! assert_eq!(outcome.route.path, "/login");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod config;
pub mod logging;

pub use app::{bootstrap, App};
pub use config::{AppConfig, AuthPolicy, ConfigError};
pub use logging::init_tracing;
