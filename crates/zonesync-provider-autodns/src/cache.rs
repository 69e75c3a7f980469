//! Per-provider zone document cache
//!
//! One mutex guards the whole map and is held for the complete
//! fetch-or-read, so concurrent first reads of the same zone produce a
//! single fetch. Entries live until [`ZoneCache::invalidate`] is called
//! after a successful write; there is no expiry.

use std::collections::HashMap;

use tokio::sync::Mutex;
use zonesync_core::Result;

use crate::models::Zone;
use crate::transport::ZoneTransport;

#[derive(Debug, Default)]
pub struct ZoneCache {
    zones: Mutex<HashMap<String, Zone>>,
}

impl ZoneCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached document of `zone`, fetching it through `transport` on a miss.
    ///
    /// Failed fetches leave the cache unchanged.
    pub async fn fetch<T>(&self, zone: &str, transport: &T) -> Result<Zone>
    where
        T: ZoneTransport + ?Sized,
    {
        let mut zones = self.zones.lock().await;
        if let Some(document) = zones.get(zone) {
            tracing::debug!("Zone cache hit: {}", zone);
            return Ok(document.clone());
        }

        tracing::debug!("Zone cache miss: {}", zone);
        let document = transport.fetch_zone(zone).await?;
        zones.insert(zone.to_string(), document.clone());
        Ok(document)
    }

    /// Drop the cached document of `zone`
    pub async fn invalidate(&self, zone: &str) {
        if self.zones.lock().await.remove(zone).is_some() {
            tracing::debug!("Zone cache invalidated: {}", zone);
        }
    }

    pub async fn contains(&self, zone: &str) -> bool {
        self.zones.lock().await.contains_key(zone)
    }

    pub async fn len(&self) -> usize {
        self.zones.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.zones.lock().await.is_empty()
    }
}
