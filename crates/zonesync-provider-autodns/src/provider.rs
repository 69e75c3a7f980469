//! AutoDNS implementation of [`DnsProvider`]
//!
//! Every mutating operation is one read-modify-write cycle on the whole
//! zone document:
//!
//! 1. fetch the zone (from the cache when present)
//! 2. encode the caller's records and reconcile the row list
//! 3. write the full document back
//! 4. invalidate the cached zone, only after the write succeeded
//!
//! A fetch failure aborts before any write. A write failure leaves the
//! cache as it was. Nothing is retried.

use async_trait::async_trait;
use zonesync_core::name::trim_dot;
use zonesync_core::traits::{validate_records, validate_zone};
use zonesync_core::{DnsProvider, Record, Result, Stage};

use crate::cache::ZoneCache;
use crate::config::AutoDnsConfig;
use crate::models::{ResourceRecord, Zone};
use crate::reconcile;
use crate::transport::{HttpTransport, ZoneTransport};

/// AutoDNS DNS provider
///
/// Owns its zone cache; two providers never share cached documents.
pub struct AutoDnsProvider<T = HttpTransport> {
    transport: T,
    cache: ZoneCache,
}

impl AutoDnsProvider<HttpTransport> {
    /// Create a provider talking to the Domainrobot JSON API
    pub fn new(config: AutoDnsConfig) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }
}

impl<T: ZoneTransport> AutoDnsProvider<T> {
    /// Create a provider over any zone transport
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            cache: ZoneCache::new(),
        }
    }

    pub fn cache(&self) -> &ZoneCache {
        &self.cache
    }

    async fn load(&self, zone: &str) -> Result<Zone> {
        self.cache
            .fetch(zone, &self.transport)
            .await
            .map_err(|e| e.in_zone(zone, Stage::FetchZone))
    }

    fn encode(&self, zone: &str, records: &[Record]) -> Result<Vec<ResourceRecord>> {
        reconcile::encode_all(records, zone).map_err(|e| e.in_zone(zone, Stage::Encode))
    }

    async fn store(&self, zone: &str, mut document: Zone, rows: Vec<ResourceRecord>) -> Result<()> {
        document.resource_records = rows;
        self.transport
            .write_zone(zone, &document)
            .await
            .map_err(|e| e.in_zone(zone, Stage::WriteZone))?;

        self.cache.invalidate(zone).await;
        Ok(())
    }
}

/// Zones are cached and addressed by their lowercase name without a trailing dot
fn zone_key(zone: &str) -> String {
    trim_dot(zone).to_ascii_lowercase()
}

#[async_trait]
impl<T: ZoneTransport> DnsProvider for AutoDnsProvider<T> {
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>> {
        validate_zone(zone)?;
        let zone = &zone_key(zone);

        let document = self.load(zone).await?;
        let records = reconcile::decode_all(&document.resource_records, zone)
            .map_err(|e| e.in_zone(zone, Stage::Decode))?;

        tracing::debug!("Read {} records from zone {}", records.len(), zone);
        Ok(records)
    }

    async fn append_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        validate_zone(zone)?;
        validate_records(records)?;
        let zone = &zone_key(zone);

        tracing::info!("Appending {} records to zone {}", records.len(), zone);

        let document = self.load(zone).await?;
        let additions = self.encode(zone, records)?;
        let rows = reconcile::append(document.resource_records.clone(), &additions);

        tracing::debug!(
            "Zone {}: {} existing rows, {} appended",
            zone,
            document.resource_records.len(),
            additions.len()
        );

        self.store(zone, document, rows).await?;
        Ok(records.to_vec())
    }

    async fn set_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        validate_zone(zone)?;
        validate_records(records)?;
        let zone = &zone_key(zone);

        tracing::info!("Setting {} records in zone {}", records.len(), zone);

        let document = self.load(zone).await?;
        let replacements = self.encode(zone, records)?;
        let before = document.resource_records.len();
        let rows = reconcile::set(document.resource_records.clone(), &replacements, zone);

        tracing::debug!(
            "Zone {}: {} rows replaced, {} written",
            zone,
            before + replacements.len() - rows.len(),
            replacements.len()
        );

        self.store(zone, document, rows).await?;
        Ok(records.to_vec())
    }

    async fn delete_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        validate_zone(zone)?;
        validate_records(records)?;
        let zone = &zone_key(zone);

        tracing::info!("Deleting {} records from zone {}", records.len(), zone);

        let document = self.load(zone).await?;
        let targets = self.encode(zone, records)?;
        let before = document.resource_records.len();
        let deletion = reconcile::delete(document.resource_records.clone(), &targets, zone);

        tracing::debug!(
            "Zone {}: {} rows removed, {} of {} records matched",
            zone,
            before - deletion.rows.len(),
            deletion.matched.len(),
            records.len()
        );

        self.store(zone, document, deletion.rows).await?;
        Ok(deletion
            .matched
            .into_iter()
            .map(|index| records[index].clone())
            .collect())
    }

    fn provider_name(&self) -> &'static str {
        "autodns"
    }
}

impl<T> std::fmt::Debug for AutoDnsProvider<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoDnsProvider")
            .field("transport", &self.transport)
            .field("cache", &self.cache)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_name() {
        let provider = AutoDnsProvider::new(AutoDnsConfig::new("user", "pass")).unwrap();
        assert_eq!(provider.provider_name(), "autodns");
    }

    #[test]
    fn test_password_not_exposed_in_debug() {
        let provider = AutoDnsProvider::new(AutoDnsConfig::new("user", "secret_password_12345")).unwrap();

        let debug_str = format!("{:?}", provider);
        assert!(!debug_str.contains("secret_password_12345"));
        assert!(debug_str.contains("AutoDnsProvider"));
    }

    #[tokio::test]
    async fn test_validation_precedes_network_access() {
        // Unroutable endpoint: reaching the network would fail as Transport
        let provider = AutoDnsProvider::new(
            AutoDnsConfig::new("user", "pass").with_endpoint("http://127.0.0.1:9"),
        )
        .unwrap();

        assert!(provider.get_records("").await.unwrap_err().is_validation());
        assert!(provider.set_records("example.com", &[]).await.unwrap_err().is_validation());
        assert!(provider.delete_records(".", &[]).await.unwrap_err().is_validation());
    }
}
