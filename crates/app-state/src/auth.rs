//! Authentication signal and the provider abstraction
//!
//! The navigation guard never reads cookies or storage itself. It asks an
//! injected [`AuthProvider`] and receives an [`AuthSignal`].

use async_trait::async_trait;
use networking::HttpError;
use serde::Serialize;
use std::sync::Arc;
use storage::KvError;
use thiserror::Error;

/// Why a provider considers the current user unauthenticated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DenialReason {
    /// The status endpoint answered with a code other than `200`
    NonSuccessStatus {
        /// Code reported in the response body, if it was an integer
        code: Option<i64>,
        /// Optional message reported alongside the code
        message: Option<String>,
    },
    /// No credential token is persisted
    MissingToken,
}

/// Failure to determine the authentication state
#[derive(Debug, Error)]
pub enum AuthCheckError {
    /// The status request failed (transport, HTTP status or body decoding)
    #[error("auth status request failed: {0}")]
    Network(#[from] HttpError),

    /// The token store could not be read
    #[error("token store read failed: {0}")]
    Storage(#[from] KvError),
}

/// Result of a single authentication check
#[derive(Debug)]
pub enum AuthSignal {
    /// The current user is authenticated
    Authenticated,
    /// The current user is not authenticated
    Unauthenticated(DenialReason),
    /// The state could not be determined
    Error(AuthCheckError),
}

impl AuthSignal {
    /// Check if access should be granted. Errors never grant access.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthSignal::Authenticated)
    }
}

/// Source of the authentication signal
///
/// Implementations must not mutate authentication state; they only read it.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Determine whether the current user is authenticated
    async fn check_authenticated(&self) -> AuthSignal;

    /// Short name used in diagnostics
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<P> AuthProvider for Arc<P>
where
    P: AuthProvider + ?Sized,
{
    async fn check_authenticated(&self) -> AuthSignal {
        (**self).check_authenticated().await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
