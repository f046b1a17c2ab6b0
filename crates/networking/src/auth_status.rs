//! Authentication status request
//!
//! The backend exposes a single status endpoint. Its JSON body carries a
//! numeric `code`; `200` means the session attached to the request cookies is
//! authenticated. Any other value, a missing code or a non-numeric one means
//! it is not.

use serde::{Deserialize, Serialize};

use crate::client::{HttpClient, HttpError};

/// Default path of the authentication status endpoint
pub const AUTH_STATUS_PATH: &str = "/api/auth/status";

/// Body code reported for an authenticated session
pub const AUTHENTICATED_CODE: i64 = 200;

/// Body of the authentication status endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthStatusResponse {
    /// Application status code (`200` = authenticated), kept as sent
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    /// Optional human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Optional payload (e.g. the current user)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl AuthStatusResponse {
    /// Integral value of `code`. `200.0` reads as `200`; strings, fractions
    /// and a missing code read as `None`.
    pub fn code(&self) -> Option<i64> {
        let serde_json::Value::Number(number) = self.code.as_ref()? else {
            return None;
        };
        number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        })
    }

    /// Whether the body reports an authenticated session
    pub fn is_authenticated(&self) -> bool {
        self.code() == Some(AUTHENTICATED_CODE)
    }
}

/// Issues authentication status requests against the backend
#[derive(Debug, Clone)]
pub struct AuthStatusClient {
    client: HttpClient,
    path: String,
}

impl AuthStatusClient {
    /// Create a status client using [`AUTH_STATUS_PATH`]
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            path: AUTH_STATUS_PATH.to_string(),
        }
    }

    /// Override the status endpoint path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Endpoint path used by this client
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Fetch the current authentication status
    ///
    /// A single attempt is made. Transport failures, non-2xx responses and
    /// undecodable bodies are all returned as errors.
    pub async fn fetch(&self) -> Result<AuthStatusResponse, HttpError> {
        let response = self.client.get_json::<AuthStatusResponse>(&self.path).await?;
        tracing::debug!(path = %self.path, code = ?response.data.code(), "auth status fetched");
        Ok(response.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HttpClientConfig;

    #[test]
    fn test_response_is_authenticated() {
        let ok: AuthStatusResponse = serde_json::from_str(r#"{"code":200}"#).unwrap();
        assert!(ok.is_authenticated());
        assert_eq!(ok.message, None);

        let denied: AuthStatusResponse =
            serde_json::from_str(r#"{"code":401,"message":"not logged in"}"#).unwrap();
        assert!(!denied.is_authenticated());
        assert_eq!(denied.message.as_deref(), Some("not logged in"));
    }

    #[test]
    fn test_missing_code_is_not_authenticated() {
        let status: AuthStatusResponse = serde_json::from_str(r#"{"message":"ok"}"#).unwrap();
        assert_eq!(status.code(), None);
        assert!(!status.is_authenticated());

        let status: AuthStatusResponse = serde_json::from_str(r#"{"code":null}"#).unwrap();
        assert!(!status.is_authenticated());
    }

    #[test]
    fn test_code_compared_numerically() {
        let status: AuthStatusResponse = serde_json::from_str(r#"{"code":200.0}"#).unwrap();
        assert_eq!(status.code(), Some(200));
        assert!(status.is_authenticated());

        let status: AuthStatusResponse = serde_json::from_str(r#"{"code":200.5}"#).unwrap();
        assert_eq!(status.code(), None);
        assert!(!status.is_authenticated());

        let status: AuthStatusResponse = serde_json::from_str(r#"{"code":"200"}"#).unwrap();
        assert_eq!(status.code(), None);
        assert!(!status.is_authenticated());
    }

    #[test]
    fn test_status_client_path() {
        let http = HttpClient::new(HttpClientConfig::default()).unwrap();
        let client = AuthStatusClient::new(http.clone());
        assert_eq!(client.path(), AUTH_STATUS_PATH);

        let custom = AuthStatusClient::new(http).with_path("/api/session");
        assert_eq!(custom.path(), "/api/session");
    }
}
