//! Local token authentication provider
//!
//! Treats the presence of a non-empty persisted credential token as proof of
//! authentication. The token's content is never validated here.

use async_trait::async_trait;
use storage::TokenStore;

use crate::auth::{AuthCheckError, AuthProvider, AuthSignal, DenialReason};

/// Provider backed by the persisted credential token
#[derive(Debug, Clone)]
pub struct LocalTokenProvider {
    tokens: TokenStore,
}

impl LocalTokenProvider {
    /// Create a provider reading from a token store
    pub fn new(tokens: TokenStore) -> Self {
        Self { tokens }
    }

    /// Synchronous form of the check; the store read never suspends
    pub fn check(&self) -> AuthSignal {
        match self.tokens.token() {
            Ok(Some(_)) => AuthSignal::Authenticated,
            Ok(None) => AuthSignal::Unauthenticated(DenialReason::MissingToken),
            Err(e) => AuthSignal::Error(AuthCheckError::Storage(e)),
        }
    }
}

#[async_trait]
impl AuthProvider for LocalTokenProvider {
    async fn check_authenticated(&self) -> AuthSignal {
        self.check()
    }

    fn name(&self) -> &'static str {
        "local_token"
    }
}
