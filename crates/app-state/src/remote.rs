//! Remote authentication provider
//!
//! Asks the backend whether the session carried by the request cookies is
//! authenticated. One request per check, no retries.

use async_trait::async_trait;
use networking::AuthStatusClient;

use crate::auth::{AuthCheckError, AuthProvider, AuthSignal, DenialReason};

/// Provider backed by the backend's authentication status endpoint
#[derive(Debug, Clone)]
pub struct RemoteAuthProvider {
    client: AuthStatusClient,
}

impl RemoteAuthProvider {
    /// Create a provider from a status client
    pub fn new(client: AuthStatusClient) -> Self {
        Self { client }
    }

    /// The underlying status client
    pub fn client(&self) -> &AuthStatusClient {
        &self.client
    }
}

#[async_trait]
impl AuthProvider for RemoteAuthProvider {
    async fn check_authenticated(&self) -> AuthSignal {
        match self.client.fetch().await {
            Ok(status) if status.is_authenticated() => AuthSignal::Authenticated,
            Ok(status) => AuthSignal::Unauthenticated(DenialReason::NonSuccessStatus {
                code: status.code(),
                message: status.message,
            }),
            Err(e) => AuthSignal::Error(AuthCheckError::Network(e)),
        }
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
