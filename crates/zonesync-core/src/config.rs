//! Configuration types for zonesync
//!
//! This module defines the provider configuration consumed by the
//! [`ProviderRegistry`](crate::ProviderRegistry). Provider crates turn it
//! into their own typed settings and fill in defaults there.

use serde::{Deserialize, Serialize};

/// DNS provider configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// AutoDNS (InterNetX Domainrobot) provider
    Autodns {
        /// API user name
        username: String,
        /// API password
        password: String,
        /// Domainrobot context (`4` = live, `1` = demo); provider default if unset
        #[serde(default)]
        context: Option<String>,
        /// API endpoint override
        #[serde(default)]
        endpoint: Option<String>,
        /// HTTP request timeout in seconds
        #[serde(default)]
        timeout_secs: Option<u64>,
    },

    /// Custom provider
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl ProviderConfig {
    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Autodns {
                username,
                password,
                timeout_secs,
                ..
            } => {
                if username.is_empty() {
                    return Err(crate::Error::config("AutoDNS username is required"));
                }
                if password.is_empty() {
                    return Err(crate::Error::config("AutoDNS password is required"));
                }
                if *timeout_secs == Some(0) {
                    return Err(crate::Error::config("AutoDNS timeout must be > 0"));
                }
                Ok(())
            }
            ProviderConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "Custom provider factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config(
                        "Custom provider config cannot be null",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Autodns { .. } => "autodns",
            ProviderConfig::Custom { factory, .. } => factory,
        }
    }
}

// Custom Debug implementation that hides credentials
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Autodns {
                username,
                context,
                endpoint,
                timeout_secs,
                ..
            } => f
                .debug_struct("Autodns")
                .field("username", username)
                .field("password", &"<REDACTED>")
                .field("context", context)
                .field("endpoint", endpoint)
                .field("timeout_secs", timeout_secs)
                .finish(),
            ProviderConfig::Custom { factory, .. } => f
                .debug_struct("Custom")
                .field("factory", factory)
                .field("config", &"<opaque>")
                .finish(),
        }
    }
}
