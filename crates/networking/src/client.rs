//! HTTP client for the console backend
//!
//! Thin wrapper around reqwest that applies the console's defaults (base URL,
//! timeout, user agent, default headers) and attaches session cookies when
//! credentials are enabled.

use reqwest::{Client as ReqwestClient, Response as ReqwestResponse};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// HTTP client error types
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request never produced a response (connection refused, timeout, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The response body was not the expected JSON document
    #[error("Decode error: {0}")]
    Decode(String),

    /// The underlying client could not be constructed
    #[error("Client build error: {0}")]
    Build(String),
}

impl HttpError {
    /// Check if this error happened below the HTTP layer
    pub fn is_network_error(&self) -> bool {
        matches!(self, HttpError::Network(_))
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Decoded HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse<T> {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HashMap<String, String>,
    /// Response data
    pub data: T,
}

impl<T> HttpResponse<T> {
    /// Create a new response
    pub fn new(status: u16, headers: HashMap<String, String>, data: T) -> Self {
        Self { status, headers, data }
    }

    /// Get a header value
    pub fn header(&self, key: &str) -> Option<&String> {
        self.headers.get(key)
    }

    /// Check if the response is successful (2xx status)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Configuration for [`HttpClient`]
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL of the backend (e.g., "http://localhost:8080")
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Custom headers to include in all requests
    pub default_headers: HashMap<String, String>,
    /// Keep a cookie store and send its cookies with every request
    pub with_credentials: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("Inventory-Console/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
            with_credentials: true,
        }
    }
}

impl HttpClientConfig {
    /// Create a new config with a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a default header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Enable or disable the cookie store
    pub fn with_credentials(mut self, enabled: bool) -> Self {
        self.with_credentials = enabled;
        self
    }
}

// =============================================================================
// Client Implementation
// =============================================================================

/// HTTP client for the console backend
///
/// # Examples
/// ```
/// use networking::{HttpClient, HttpClientConfig};
///
/// async fn example() -> Result<(), Box<dyn std::error::Error>> {
///     let client = HttpClient::new(HttpClientConfig::new("http://localhost:8080"))?;
///     let response = client.get_json::<serde_json::Value>("/api/auth/status").await?;
///     println!("status {}", response.status);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(config: HttpClientConfig) -> Result<Self, HttpError> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .cookie_store(config.with_credentials)
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Issue a GET request and decode the JSON body
    pub async fn get_json<T>(&self, path: &str) -> Result<HttpResponse<T>, HttpError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let mut req = self.client.get(&url);

        for (key, value) in &self.config.default_headers {
            req = req.header(key, value);
        }

        let response = req
            .send()
            .await
            .map_err(|e| HttpError::Network(format!("Request to {} failed: {}", url, e)))?;

        self.parse_response(response).await
    }

    async fn parse_response<T>(&self, response: ReqwestResponse) -> Result<HttpResponse<T>, HttpError>
    where
        T: DeserializeOwned,
    {
        let status = response.status().as_u16();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(value_str) = value.to_str() {
                headers.insert(key.to_string(), value_str.to_string());
            }
        }

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HttpError::Status { status, body });
        }

        let body = response
            .text()
            .await
            .map_err(|e| HttpError::Network(format!("Failed to read response: {}", e)))?;

        let data: T = serde_json::from_str(&body)
            .map_err(|e| HttpError::Decode(format!("Failed to parse JSON: {}", e)))?;

        Ok(HttpResponse::new(status, headers, data))
    }

    /// Join the base URL and a request path
    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

// =============================================================================
// Tests
// =============================================================================
