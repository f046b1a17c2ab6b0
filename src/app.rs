//! Application wiring

use anyhow::Context;
use app_state::{AuthProvider, LocalTokenProvider, RemoteAuthProvider};
use app_ui::{Location, NavigationGuard, NavigationOutcome, NavigationState, Router};
use networking::{AuthStatusClient, HttpClient, HttpClientConfig};
use std::sync::Arc;
use storage::{KvConfig, KvStore, TokenStore};

use crate::config::{AppConfig, AuthPolicy};

/// A wired-up console: router plus navigation history
#[derive(Debug)]
pub struct App {
    router: Router,
    state: NavigationState,
    tokens: Option<TokenStore>,
}

impl App {
    /// Navigate to a browser URL
    pub async fn navigate(&mut self, url: &str) -> Result<NavigationOutcome, app_ui::NavigationError> {
        self.router.navigate_url(&mut self.state, url).await
    }

    /// Navigate to an application location
    pub async fn navigate_to(
        &mut self,
        location: Location,
    ) -> Result<NavigationOutcome, app_ui::NavigationError> {
        self.router.navigate(&mut self.state, location).await
    }

    /// The router
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Navigation history
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Token store, when running under the local-token policy
    pub fn tokens(&self) -> Option<&TokenStore> {
        self.tokens.as_ref()
    }
}

/// Build the console from configuration
pub fn bootstrap(config: AppConfig) -> anyhow::Result<App> {
    config.validate().context("invalid configuration")?;

    let (provider, tokens): (Arc<dyn AuthProvider>, Option<TokenStore>) = match &config.auth {
        AuthPolicy::Remote { base_url, status_path, .. } => {
            let mut http_config = HttpClientConfig::new(base_url.clone());
            if let Some(timeout) = config.timeout() {
                http_config = http_config.with_timeout(timeout);
            }
            let http = HttpClient::new(http_config).context("failed to build HTTP client")?;
            let client = AuthStatusClient::new(http).with_path(status_path.clone());
            let provider: Arc<dyn AuthProvider> = Arc::new(RemoteAuthProvider::new(client));
            (provider, None)
        }
        AuthPolicy::LocalToken { db_path, key } => {
            let kv = match db_path {
                Some(path) => KvStore::new(KvConfig::new(path.clone()))
                    .with_context(|| format!("failed to open token store at {}", path))?,
                None => KvStore::in_memory().context("failed to open in-memory token store")?,
            };
            let tokens = TokenStore::new(Arc::new(kv)).with_key(key.clone());
            let provider: Arc<dyn AuthProvider> = Arc::new(LocalTokenProvider::new(tokens.clone()));
            (provider, Some(tokens))
        }
    };

    tracing::info!(
        provider = provider.name(),
        variant = ?config.variant,
        login_path = %config.login_path,
        "console router ready"
    );

    let table = config.route_table().context("invalid route table")?;
    let router = Router::new(
        table,
        NavigationGuard::new(provider),
        config.router_config(),
    );

    Ok(App {
        router,
        state: NavigationState::new(),
        tokens,
    })
}
