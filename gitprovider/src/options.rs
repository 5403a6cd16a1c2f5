//! Options shared by every provider client constructor.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;
use tracing::debug;

use crate::errors::{GitProviderError, GitProviderResult};

/// Hook customizing the HTTP transport before the client is built
/// (proxies, extra root certificates, default headers, ...).
pub type TransportHook = Arc<dyn Fn(ClientBuilder) -> ClientBuilder + Send + Sync>;

const DEFAULT_USER_AGENT: &str = concat!("gitprovider/", env!("CARGO_PKG_VERSION"));

/// Construction options for a provider client.
#[derive(Clone, Default)]
pub struct ClientOptions {
    /// Overrides the provider's default domain. May carry a scheme
    /// (`http://localhost:3000`) for self-hosted servers.
    pub domain: Option<String>,
    /// Allows deleting resources. Off unless set to `Some(true)`.
    pub enable_destructive_api_calls: Option<bool>,
    /// Whole-request timeout for the HTTP client.
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
    /// Ready-made HTTP client; when set, `timeout`, `user_agent` and the
    /// transport hook are ignored.
    pub http_client: Option<reqwest::Client>,
    pub transport_hook: Option<TransportHook>,
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_destructive_api_calls(mut self, enabled: bool) -> Self {
        self.enable_destructive_api_calls = Some(enabled);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn with_transport_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(ClientBuilder) -> ClientBuilder + Send + Sync + 'static,
    {
        self.transport_hook = Some(Arc::new(hook));
        self
    }

    /// Checks option values that cannot be expressed in the types.
    pub fn validate(&self) -> GitProviderResult<()> {
        if let Some(domain) = &self.domain {
            if domain.trim().is_empty() {
                return Err(GitProviderError::InvalidOptions(
                    "domain must not be empty".into(),
                ));
            }
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(GitProviderError::InvalidOptions(
                "timeout must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Destructive calls stay disabled unless explicitly enabled.
    pub fn destructive_api_calls_enabled(&self) -> bool {
        self.enable_destructive_api_calls.unwrap_or(false)
    }

    /// Builds the HTTP client every request of the provider goes through.
    pub fn build_http_client(&self) -> GitProviderResult<reqwest::Client> {
        if let Some(client) = &self.http_client {
            debug!("Using caller supplied HTTP client");
            return Ok(client.clone());
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT));
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(hook) = &self.transport_hook {
            debug!("Applying transport hook to HTTP client builder");
            builder = hook(builder);
        }

        builder
            .build()
            .map_err(|e| GitProviderError::InvalidOptions(format!("cannot build http client: {e}")))
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("domain", &self.domain)
            .field("enable_destructive_api_calls", &self.enable_destructive_api_calls)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("http_client", &self.http_client.is_some())
            .field("transport_hook", &self.transport_hook.is_some())
            .finish()
    }
}
