// # Zone Transport
//
// Whole-document access to AutoDNS zones.
//
// The provider never edits individual records remotely: it fetches the
// complete zone, rewrites the record list locally and writes the complete
// zone back. `ZoneTransport` is that seam, so reconciliation can run
// against an in-memory zone in tests.
//
// ## API Reference
//
// - Domainrobot JSON API: https://help.internetx.com/display/APIJSONEN
// - Get zone: GET `/zone/:origin`
// - Update zone: PUT `/zone/:origin`
//
// ## Error Classification
//
// - 401 / 403 → `Error::Unauthorized`
// - 404 → `Error::NotFound`
// - any other status >= 400 → `Error::Api` (envelope code and text)
// - 2xx with `status.type == "ERROR"` → `Error::Api`
// - connection, timeout and body failures → `Error::Transport`

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde_json::Value;
use zonesync_core::name::trim_dot;
use zonesync_core::{Error, Result};

use crate::config::AutoDnsConfig;
use crate::models::{JsonResponse, Zone};

/// Sent with every request
pub const USER_AGENT: &str = "zonesync-autodns/0.1";

/// Fetch and replace complete zone documents
#[async_trait]
pub trait ZoneTransport: Send + Sync {
    /// Fetch the current document of `zone`
    async fn fetch_zone(&self, zone: &str) -> Result<Zone>;

    /// Replace the remote document of `zone` with `document`
    ///
    /// The document is sent whole; read-only timestamps are never sent.
    async fn write_zone(&self, zone: &str, document: &Zone) -> Result<()>;
}

/// `ZoneTransport` over the Domainrobot JSON API
pub struct HttpTransport {
    config: AutoDnsConfig,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the configured request timeout
    pub fn new(config: AutoDnsConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn zone_url(&self, zone: &str) -> String {
        format!("{}/zone/{}", self.config.endpoint, trim_dot(zone))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header("X-Domainrobot-Context", &self.config.context)
            .header("Content-Type", "application/json")
    }

    /// Send a request and unwrap the response envelope.
    ///
    /// Returns the envelope's `data`, or the whole body when the server
    /// answered with bare data instead of an envelope. A successful response
    /// whose body is not JSON is only an error when `expects_data` is set.
    async fn send(
        &self,
        zone: &str,
        request: RequestBuilder,
        expects_data: bool,
    ) -> Result<Option<Value>> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("Failed to read response body: {}", e)))?;

        let parsed: Option<Value> = if body.trim().is_empty() {
            None
        } else {
            serde_json::from_str(&body).ok()
        };
        let envelope = parsed
            .as_ref()
            .filter(|value| value.get("status").is_some())
            .and_then(|value| serde_json::from_value::<JsonResponse>(value.clone()).ok());

        if !status.is_success() {
            let (code, text) = match &envelope {
                Some(env) if !env.status.code.is_empty() => {
                    (env.status.code.clone(), env.status.text.clone())
                }
                _ => (status.as_u16().to_string(), body.trim().to_string()),
            };
            tracing::warn!(
                "AutoDNS rejected request for zone {}: HTTP {} {} {}",
                zone,
                status.as_u16(),
                code,
                text
            );

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::unauthorized(format!(
                    "Authentication failed: invalid credentials or context. Status: {}",
                    status
                )),
                StatusCode::NOT_FOUND => Error::not_found(format!("Zone not found: {}", zone)),
                _ => Error::api(code, text),
            });
        }

        match envelope {
            Some(env) if env.status.is_error() => {
                tracing::warn!(
                    "AutoDNS reported an error for zone {}: {} {} (stid {})",
                    zone,
                    env.status.code,
                    env.status.text,
                    env.stid
                );
                Err(Error::api(env.status.code, env.status.text))
            }
            Some(env) => Ok(env.data.filter(|data| !data.is_null())),
            None if body.trim().is_empty() => Ok(None),
            None => match parsed {
                Some(value) => Ok(Some(value)),
                None if !expects_data => {
                    tracing::debug!(
                        "Ignoring non-JSON response body for zone {} (HTTP {})",
                        zone,
                        status.as_u16()
                    );
                    Ok(None)
                }
                None => Err(Error::transport(format!(
                    "Invalid response body (HTTP {}): not JSON",
                    status.as_u16()
                ))),
            },
        }
    }
}

#[async_trait]
impl ZoneTransport for HttpTransport {
    async fn fetch_zone(&self, zone: &str) -> Result<Zone> {
        let url = self.zone_url(zone);
        tracing::debug!("Fetching zone document: GET {}", url);

        let data = self
            .send(zone, self.request(Method::GET, &url), true)
            .await?
            .ok_or_else(|| Error::not_found(format!("No zone data returned for {}", zone)))?;

        // The API answers with a list of zones; a bare object is accepted too
        let document = match data {
            Value::Array(items) => {
                let zones: Vec<Zone> = serde_json::from_value(Value::Array(items))?;
                zones
                    .into_iter()
                    .next()
                    .ok_or_else(|| Error::not_found(format!("No zones found for {}", zone)))?
            }
            other => serde_json::from_value(other)?,
        };

        tracing::debug!(
            "Fetched zone {} with {} resource records",
            zone,
            document.resource_records.len()
        );
        Ok(document)
    }

    async fn write_zone(&self, zone: &str, document: &Zone) -> Result<()> {
        let url = self.zone_url(zone);
        tracing::debug!(
            "Writing zone document: PUT {} ({} resource records)",
            url,
            document.resource_records.len()
        );

        self.send(zone, self.request(Method::PUT, &url).json(document), false)
            .await?;
        Ok(())
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
