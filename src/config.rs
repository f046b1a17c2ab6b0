//! Application configuration
//!
//! Configuration is a JSON document. Only `auth` is required:
//!
//! ```json
//! {
//!   "variant": "root_is_login",
//!   "history_base": "/",
//!   "login_path": "/login",
//!   "auth": {
//!     "policy": "remote",
//!     "base_url": "http://localhost:8080",
//!     "status_path": "/api/auth/status"
//!   }
//! }
//! ```

use app_ui::{RouteTable, RouteTableError, RouteTableVariant, RouterConfig, LOGIN_PATH};
use networking::AUTH_STATUS_PATH;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use storage::DEFAULT_TOKEN_KEY;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid configuration JSON
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but a value is unusable
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// How the guard learns whether the user is authenticated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum AuthPolicy {
    /// Ask the backend's status endpoint, with cookies attached
    Remote {
        /// Backend base URL
        base_url: String,
        /// Status endpoint path
        #[serde(default = "default_status_path")]
        status_path: String,
        /// Request timeout in seconds (client default when absent)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout_secs: Option<u64>,
    },
    /// Look for a persisted credential token
    LocalToken {
        /// sled database path (in-memory store when absent)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        db_path: Option<String>,
        /// Key the token is stored under
        #[serde(default = "default_token_key")]
        key: String,
    },
}

fn default_status_path() -> String {
    AUTH_STATUS_PATH.to_string()
}

fn default_token_key() -> String {
    DEFAULT_TOKEN_KEY.to_string()
}

fn default_history_base() -> String {
    "/".to_string()
}

fn default_login_path() -> String {
    LOGIN_PATH.to_string()
}

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root layout of the route table
    #[serde(default)]
    pub variant: RouteTableVariant,
    /// Authentication policy
    pub auth: AuthPolicy,
    /// Base URL the console is served under
    #[serde(default = "default_history_base")]
    pub history_base: String,
    /// Where denied navigations are sent
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

impl AppConfig {
    /// Configuration with defaults for everything but the auth policy
    pub fn new(auth: AuthPolicy) -> Self {
        Self {
            variant: RouteTableVariant::default(),
            auth,
            history_base: default_history_base(),
            login_path: default_login_path(),
        }
    }

    /// Use a different route table layout
    pub fn with_variant(mut self, variant: RouteTableVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check values serde cannot check
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.login_path.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "login_path must be absolute, got {:?}",
                self.login_path
            )));
        }
        if !self.history_base.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "history_base must be absolute, got {:?}",
                self.history_base
            )));
        }
        self.route_table().map_err(|e| {
            ConfigError::Invalid(format!("login_path {:?} is unusable: {}", self.login_path, e))
        })?;
        match &self.auth {
            AuthPolicy::Remote { base_url, timeout_secs, .. } => {
                if base_url.is_empty() {
                    return Err(ConfigError::Invalid("auth.base_url is empty".to_string()));
                }
                if *timeout_secs == Some(0) {
                    return Err(ConfigError::Invalid("auth.timeout_secs must be positive".to_string()));
                }
            }
            AuthPolicy::LocalToken { key, .. } => {
                if key.is_empty() {
                    return Err(ConfigError::Invalid("auth.key is empty".to_string()));
                }
            }
        }
        Ok(())
    }

    /// Route table with the login view mounted at `login_path`
    pub fn route_table(&self) -> Result<RouteTable, RouteTableError> {
        RouteTable::standard_with_login(self.variant, &self.login_path)
    }

    /// Router settings derived from this configuration
    pub fn router_config(&self) -> RouterConfig {
        RouterConfig::default()
            .with_history_base(self.history_base.clone())
            .with_login_path(self.login_path.clone())
    }

    /// Remote request timeout, if configured
    pub fn timeout(&self) -> Option<Duration> {
        match &self.auth {
            AuthPolicy::Remote { timeout_secs, .. } => timeout_secs.map(Duration::from_secs),
            AuthPolicy::LocalToken { .. } => None,
        }
    }
}
