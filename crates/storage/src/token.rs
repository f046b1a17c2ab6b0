//! Credential token store
//!
//! Holds the single credential token the client persists after login. The
//! token's content is opaque; readers only care whether a non-empty value is
//! present.

use serde_json::Value;
use std::sync::Arc;

use crate::kv::{KvStore, Result};

/// Key under which the credential token is persisted
pub const DEFAULT_TOKEN_KEY: &str = "token";

/// Scoped view of a [`KvStore`] exposing the credential token
#[derive(Debug, Clone)]
pub struct TokenStore {
    kv: Arc<KvStore>,
    key: String,
}

impl TokenStore {
    /// Create a token store using [`DEFAULT_TOKEN_KEY`]
    pub fn new(kv: Arc<KvStore>) -> Self {
        Self { kv, key: DEFAULT_TOKEN_KEY.to_string() }
    }

    /// Use a different key for the token
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Key the token is stored under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the token. Empty values read as `None`.
    ///
    /// The stored value is never validated. A JSON string yields its
    /// contents, `""` and `null` read as absent, and anything else (another
    /// JSON value or bytes that are not JSON at all) yields its raw text.
    pub fn token(&self) -> Result<Option<String>> {
        let Some(bytes) = self.kv.get_raw(&self.key)? else {
            return Ok(None);
        };

        let token = match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::String(token)) => token,
            Ok(Value::Null) => String::new(),
            Ok(other) => other.to_string(),
            Err(_) => String::from_utf8_lossy(&bytes).into_owned(),
        };
        Ok(Some(token).filter(|t| !t.is_empty()))
    }

    /// Check whether a non-empty token is stored
    pub fn has_token(&self) -> Result<bool> {
        Ok(self.token()?.is_some())
    }

    /// Persist a token
    pub fn set_token(&self, token: &str) -> Result<()> {
        self.kv.set(&self.key, &token)
    }

    /// Remove the token. Returns whether one was stored.
    pub fn clear_token(&self) -> Result<bool> {
        self.kv.remove(&self.key)
    }
}
