//! Navigation guard
//!
//! Runs before every transition commits. Public routes always pass. For
//! protected routes the injected [`AuthProvider`] is consulted exactly once
//! and anything short of a positive answer redirects to the login path.
//!
//! Diagnostics: a non-success status and a failed check each emit one log
//! event; a missing token is an ordinary condition and emits none.

use app_state::{AuthCheckError, AuthProvider, AuthSignal, DenialReason};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::navigation::{RouteEntry, LOGIN_PATH};

/// Progress of the guard for a single navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GuardState {
    /// Waiting on the auth check
    Evaluating,
    /// Access granted
    Allowed,
    /// Access denied, navigation sent elsewhere
    Redirected {
        /// Redirect target
        to: String,
    },
}

impl GuardState {
    /// Allowed and Redirected end the navigation's guard phase
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GuardState::Evaluating)
    }
}

/// Why the guard redirected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RedirectReason {
    /// The status request failed
    NetworkFailure,
    /// The credential token could not be read
    StorageFailure,
    /// The status endpoint reported a non-success code
    NonSuccessStatus {
        /// Reported code, if it was an integer
        code: Option<i64>,
    },
    /// No credential token is stored
    MissingToken,
}

/// Outcome of the guard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Continue to the requested route
    Proceed,
    /// Navigate elsewhere instead
    Redirect {
        /// Redirect target
        to: String,
        /// Why access was denied
        reason: RedirectReason,
    },
}

impl GuardDecision {
    /// Terminal guard state for this decision
    pub fn state(&self) -> GuardState {
        match self {
            GuardDecision::Proceed => GuardState::Allowed,
            GuardDecision::Redirect { to, .. } => GuardState::Redirected { to: to.clone() },
        }
    }

    /// Check if the decision lets the navigation through
    pub fn is_proceed(&self) -> bool {
        matches!(self, GuardDecision::Proceed)
    }
}

/// Authentication guard for route transitions
///
/// Holds no mutable state; concurrent evaluations are independent.
#[derive(Clone)]
pub struct NavigationGuard {
    provider: Arc<dyn AuthProvider>,
    login_path: String,
}

impl std::fmt::Debug for NavigationGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationGuard")
            .field("provider", &self.provider.name())
            .field("login_path", &self.login_path)
            .finish()
    }
}

impl NavigationGuard {
    /// Create a guard around an auth provider
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self {
            provider,
            login_path: LOGIN_PATH.to_string(),
        }
    }

    /// Redirect denied navigations somewhere other than `/login`
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Redirect target for denied navigations
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Decide whether a navigation to `target` may commit
    pub async fn evaluate(&self, target: &RouteEntry) -> GuardDecision {
        if !target.requires_auth {
            return GuardDecision::Proceed;
        }

        let reason = match self.provider.check_authenticated().await {
            AuthSignal::Authenticated => {
                tracing::debug!(path = %target.path, provider = self.provider.name(), "access granted");
                return GuardDecision::Proceed;
            }
            AuthSignal::Unauthenticated(DenialReason::NonSuccessStatus { code, message }) => {
                tracing::warn!(
                    path = %target.path,
                    code = ?code,
                    message = message.as_deref().unwrap_or(""),
                    "auth status denied access"
                );
                RedirectReason::NonSuccessStatus { code }
            }
            AuthSignal::Unauthenticated(DenialReason::MissingToken) => RedirectReason::MissingToken,
            AuthSignal::Error(AuthCheckError::Network(e)) => {
                tracing::error!(
                    path = %target.path,
                    provider = self.provider.name(),
                    error = %e,
                    "error checking auth status"
                );
                RedirectReason::NetworkFailure
            }
            AuthSignal::Error(AuthCheckError::Storage(e)) => {
                tracing::error!(
                    path = %target.path,
                    provider = self.provider.name(),
                    error = %e,
                    "error reading credential token"
                );
                RedirectReason::StorageFailure
            }
        };

        GuardDecision::Redirect {
            to: self.login_path.clone(),
            reason,
        }
    }
}
