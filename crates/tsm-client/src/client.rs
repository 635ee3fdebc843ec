//! Main build server client implementation.

use crate::api::{BranchesApi, BuildsApi};
use crate::config::{CatalogConfig, BRANCH_PLACEHOLDER};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use tsm_core::{Result, TsmError};

/// Default timeout for metadata requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for establishing a connection
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the build server
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    config: CatalogConfig,
    timeout: Duration,
}

impl CatalogClient {
    /// Create a client for the default build server
    pub fn new() -> Result<Self> {
        CatalogClientBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::new()
    }

    /// Endpoint configuration in use
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.inner.config
    }

    /// Access the branch list
    #[must_use]
    pub fn branches(&self) -> BranchesApi<'_> {
        BranchesApi::new(self)
    }

    /// Access per-branch build indices
    #[must_use]
    pub fn builds(&self) -> BuildsApi<'_> {
        BuildsApi::new(self)
    }

    /// GET a URL and decode its JSON body
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .http
            .get(url)
            .timeout(self.inner.timeout)
            .send()
            .await
            .map_err(|e| http_error(url, &e))?;

        let response = check_status(url, response)?;
        let body = response.text().await.map_err(|e| http_error(url, &e))?;

        serde_json::from_str(&body).map_err(|source| TsmError::Json {
            url: url.to_string(),
            source,
        })
    }

    /// GET a URL for streaming; the body is left unread
    pub(crate) async fn get_stream(&self, url: &str) -> Result<reqwest::Response> {
        debug!(url = %url, "GET stream");

        let response = self
            .inner
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| http_error(url, &e))?;

        check_status(url, response)
    }
}

pub(crate) fn http_error(url: &str, err: &reqwest::Error) -> TsmError {
    TsmError::Http {
        url: url.to_string(),
        message: err.to_string(),
    }
}

fn check_status(url: &str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(TsmError::Status {
            url: url.to_string(),
            code: status.as_u16(),
        })
    }
}

/// Builder for configuring a [`CatalogClient`]
pub struct CatalogClientBuilder {
    config: CatalogConfig,
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: String,
}

impl Default for CatalogClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogClientBuilder {
    /// Create a builder pointing at the default build server
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: CatalogConfig::default(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: format!("tsm-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Use the standard layout under a different root (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl AsRef<str>) -> Self {
        self.config = CatalogConfig::with_base_url(url.as_ref());
        self
    }

    /// Replace the whole endpoint configuration
    #[must_use]
    pub fn config(mut self, config: CatalogConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the timeout for branch list and index requests
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connection timeout, which also applies to archive downloads
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the client, validating the configured endpoints
    pub fn build(self) -> Result<CatalogClient> {
        for endpoint in [
            &self.config.branches_url,
            &self.config.zip_base_url,
            &self.config.index_url(""),
        ] {
            url::Url::parse(endpoint)
                .map_err(|e| TsmError::Config(format!("invalid URL `{endpoint}`: {e}")))?;
        }
        if !self.config.index_url_template.contains(BRANCH_PLACEHOLDER) {
            return Err(TsmError::Config(format!(
                "index URL template `{}` has no {BRANCH_PLACEHOLDER} placeholder",
                self.config.index_url_template
            )));
        }

        let http = HttpClient::builder()
            .connect_timeout(self.connect_timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| TsmError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(CatalogClient {
            inner: Arc::new(ClientInner {
                http,
                config: self.config,
                timeout: self.timeout,
            }),
        })
    }
}
