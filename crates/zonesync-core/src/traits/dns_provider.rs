// # DNS Provider Trait
//
// Defines the record CRUD contract every provider implements.
//
// ## Implementations
//
// - AutoDNS: `zonesync-provider-autodns` crate
//
// ## Usage
//
// ```rust,ignore
// use zonesync_core::{DnsProvider, Record, Txt};
// use std::time::Duration;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//
//     let challenge = Record::from(Txt {
//         name: "_acme-challenge".to_string(),
//         ttl: Duration::from_secs(60),
//         text: "token".to_string(),
//     });
//     provider.append_records("example.com", &[challenge]).await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::record::Record;

/// Trait for DNS provider implementations
///
/// Zones are named without requiring a trailing dot; implementations accept
/// both spellings. Record names are always relative to the zone.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// # Failure Model
///
/// Providers surface every failure to the caller. They do not retry, back
/// off, or spawn background work. Dropping a returned future cancels any
/// request still in flight.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List all records in the zone
    ///
    /// Fails as a whole if any stored record cannot be converted.
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>>;

    /// Add records to the zone without touching existing ones
    ///
    /// # Returns
    ///
    /// The records that were added.
    async fn append_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>>;

    /// Replace every record sharing type and name with one of `records`
    ///
    /// Existing records of the same type and name are removed regardless of
    /// their value; records with other names or types are kept.
    ///
    /// # Returns
    ///
    /// The records that were written.
    async fn set_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>>;

    /// Remove records matching type, name and value exactly
    ///
    /// # Returns
    ///
    /// The subset of `records` that matched at least one stored record.
    async fn delete_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

/// Helper trait for constructing DNS providers from configuration
pub trait DnsProviderFactory: Send + Sync {
    /// Create a DnsProvider instance from configuration
    fn create(&self, config: &crate::config::ProviderConfig) -> Result<Box<dyn DnsProvider>>;
}

/// Reject an empty zone name before any work is done
pub fn validate_zone(zone: &str) -> Result<()> {
    if zone.trim_end_matches('.').trim().is_empty() {
        return Err(Error::validation("zone name is required"));
    }
    Ok(())
}

/// Reject an empty record list for mutating calls
pub fn validate_records(records: &[Record]) -> Result<()> {
    if records.is_empty() {
        return Err(Error::validation("at least one record is required"));
    }
    Ok(())
}
