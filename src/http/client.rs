//! HTTP client for the NYTimes Books API
//!
//! One authenticated GET per call. The client does not interpret status
//! codes: a 403 or a 500 comes back as an [`ApiResponse`] so that each
//! command can apply its own classification. Only transport failures
//! (DNS, connect, TLS, body read) surface as errors.

use crate::error::Result;
use crate::types::JsonValue;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

/// Base URL of the public Books API
pub const DEFAULT_BASE_URL: &str = "https://api.nytimes.com/svc/books/v3/";

/// Query parameter carrying the API key
pub const API_KEY_PARAM: &str = "api-key";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Status and body of an upstream response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Raw response body
    pub body: String,
}

impl ApiResponse {
    /// Numeric status code
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Whether the upstream answered 200 OK
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Parse the body as JSON
    pub fn json(&self) -> Result<JsonValue> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// HTTP client bound to one base URL
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    base_url: Url,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        let base_url = parse_base_url(&config.base_url)?;

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// Build the request URL for `path`, carrying `api_key` as a query parameter
    pub fn build_url(&self, path: &str, api_key: &str) -> Result<Url> {
        let mut url = self.base_url.join(path.trim_start_matches('/'))?;
        url.query_pairs_mut().append_pair(API_KEY_PARAM, api_key);
        Ok(url)
    }

    /// Issue a GET against `path` and return the raw response
    pub async fn call_endpoint(&self, path: &str, api_key: &str) -> Result<ApiResponse> {
        let url = self.build_url(path, api_key)?;

        debug!(path, "Calling books API");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(path, status = status.as_u16(), bytes = body.len(), "Books API responded");

        Ok(ApiResponse { status, body })
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Parse a base URL so that relative paths join beneath it
fn parse_base_url(base: &str) -> Result<Url> {
    let mut url = Url::parse(base)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
