//! AutoDNS connection settings

use std::time::Duration;

use zonesync_core::{Error, ProviderConfig, Result};

/// Production Domainrobot JSON API
pub const DEFAULT_ENDPOINT: &str = "https://api.autodns.com/v1";

/// Live system context
pub const DEFAULT_CONTEXT: &str = "4";

/// Default HTTP timeout for API requests (30 seconds)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Credentials and endpoint for one AutoDNS account
#[derive(Clone)]
pub struct AutoDnsConfig {
    pub username: String,
    /// ⚠️ NEVER log this value
    pub password: String,
    /// Sent as `X-Domainrobot-Context`
    pub context: String,
    /// Base URL without trailing slash
    pub endpoint: String,
    pub timeout: Duration,
}

impl AutoDnsConfig {
    /// Settings with the default endpoint, context and timeout
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            context: DEFAULT_CONTEXT.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build settings from the shared provider configuration.
    ///
    /// Unset or blank optional fields fall back to the defaults.
    pub fn from_provider_config(config: &ProviderConfig) -> Result<Self> {
        let ProviderConfig::Autodns {
            username,
            password,
            context,
            endpoint,
            timeout_secs,
        } = config
        else {
            return Err(Error::config("Invalid config for AutoDNS provider"));
        };

        if username.is_empty() || password.is_empty() {
            return Err(Error::config("AutoDNS username and password are required"));
        }

        let mut settings = Self::new(username.clone(), password.clone());
        if let Some(context) = non_blank(context) {
            settings = settings.with_context(context);
        }
        if let Some(endpoint) = non_blank(endpoint) {
            settings = settings.with_endpoint(endpoint);
        }
        if let Some(secs) = timeout_secs {
            if *secs == 0 {
                return Err(Error::config("timeout_secs must be greater than 0"));
            }
            settings = settings.with_timeout(Duration::from_secs(*secs));
        }

        Ok(settings)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// Custom Debug implementation that hides the password
impl std::fmt::Debug for AutoDnsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoDnsConfig")
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .field("context", &self.context)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}
