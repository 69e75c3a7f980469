// # AutoDNS DNS Provider
//
// This crate provides the AutoDNS (InterNetX Domainrobot) provider for
// zonesync.
//
// ## How It Works
//
// AutoDNS exposes zones as whole documents, not as individually
// addressable records. Every operation therefore works on the complete
// zone:
//
// - `get_records`: fetch the zone, decode every resource record
// - `append_records`: add rows after the existing ones
// - `set_records`: replace all rows sharing type and name
// - `delete_records`: remove rows matching type, name and value exactly
//
// Mutations write the full document back with a single PUT.
//
// ## Modules
//
// - `codec`: generic record ⇄ AutoDNS row
// - `reconcile`: pure row-list transformations
// - `cache`: per-provider zone document cache
// - `transport`: `ZoneTransport` seam and the reqwest implementation
// - `provider`: `AutoDnsProvider`, the `DnsProvider` implementation
//
// ## Limitations
//
// - No compare-and-swap: concurrent writers to the same zone can race
// - No retries or backoff: failures are surfaced to the caller
// - Cached zones never expire; they are dropped after each successful write
//
// ## Security Requirements
//
// - The API password NEVER appears in logs or `Debug` output
// - Credentials are required; the factory fails fast when they are empty

pub mod cache;
pub mod codec;
pub mod config;
pub mod models;
pub mod provider;
pub mod reconcile;
pub mod transport;

use zonesync_core::traits::{DnsProvider, DnsProviderFactory};
use zonesync_core::{ProviderConfig, ProviderRegistry, Result};

pub use config::AutoDnsConfig;
pub use models::{ResourceRecord, Zone};
pub use provider::AutoDnsProvider;
pub use transport::{HttpTransport, ZoneTransport};

/// Name under which [`register`] adds the factory
pub const PROVIDER_NAME: &str = "autodns";

/// Factory for creating AutoDNS providers
pub struct AutoDnsFactory;

impl DnsProviderFactory for AutoDnsFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn DnsProvider>> {
        let settings = AutoDnsConfig::from_provider_config(config)?;

        tracing::debug!(
            "Creating AutoDNS provider for {} (context {})",
            settings.endpoint,
            settings.context
        );

        Ok(Box::new(AutoDnsProvider::new(settings)?))
    }
}

/// Register the AutoDNS provider with a registry
///
/// # Example
///
/// ```rust
/// use zonesync_core::ProviderRegistry;
///
/// let registry = ProviderRegistry::new();
/// zonesync_provider_autodns::register(&registry);
/// assert!(registry.has_provider("autodns"));
/// ```
pub fn register(registry: &ProviderRegistry) {
    registry.register_provider(PROVIDER_NAME, Box::new(AutoDnsFactory));
}
