//! Test doubles and common utilities for provider contract tests
//!
//! `InMemoryTransport` stands in for the Domainrobot API: it serves zone
//! documents from memory, records every write, and can be told to fail.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use zonesync_core::{Error, Record, Result};
use zonesync_provider_autodns::{AutoDnsProvider, ResourceRecord, Zone, ZoneTransport};

pub const ZONE: &str = "example.com";

/// An in-memory zone store that tracks calls
#[derive(Clone, Default)]
pub struct InMemoryTransport {
    zones: Arc<Mutex<HashMap<String, Zone>>>,
    writes: Arc<Mutex<Vec<(String, Zone)>>>,
    fetch_call_count: Arc<AtomicUsize>,
    write_call_count: Arc<AtomicUsize>,
    fail_fetch: Arc<AtomicBool>,
    fail_write: Arc<AtomicBool>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport serving `rows` as the record set of [`ZONE`]
    pub fn with_rows(rows: Vec<ResourceRecord>) -> Self {
        let transport = Self::new();
        transport.put_zone(ZONE, rows);
        transport
    }

    /// Replace the remote record set of `zone` behind the provider's back
    pub fn put_zone(&self, zone: &str, rows: Vec<ResourceRecord>) {
        self.put_document(
            zone,
            Zone {
                origin: zone.to_string(),
                resource_records: rows,
                ..Default::default()
            },
        );
    }

    /// Replace the whole remote document of `zone`
    pub fn put_document(&self, zone: &str, document: Zone) {
        self.zones.lock().unwrap().insert(zone.to_string(), document);
    }

    /// The remote record set of `zone`
    pub fn rows(&self, zone: &str) -> Vec<ResourceRecord> {
        self.zones
            .lock()
            .unwrap()
            .get(zone)
            .map(|document| document.resource_records.clone())
            .unwrap_or_default()
    }

    /// Every document written, in order
    pub fn writes(&self) -> Vec<(String, Zone)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn fetch_call_count(&self) -> usize {
        self.fetch_call_count.load(Ordering::SeqCst)
    }

    pub fn write_call_count(&self) -> usize {
        self.write_call_count.load(Ordering::SeqCst)
    }

    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_write.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ZoneTransport for InMemoryTransport {
    async fn fetch_zone(&self, zone: &str) -> Result<Zone> {
        self.fetch_call_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(Error::transport("simulated fetch failure"));
        }
        self.zones
            .lock()
            .unwrap()
            .get(zone)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Zone not found: {}", zone)))
    }

    async fn write_zone(&self, zone: &str, document: &Zone) -> Result<()> {
        self.write_call_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_write.load(Ordering::SeqCst) {
            return Err(Error::api("E0500", "simulated write failure"));
        }
        self.writes
            .lock()
            .unwrap()
            .push((zone.to_string(), document.clone()));
        self.zones
            .lock()
            .unwrap()
            .insert(zone.to_string(), document.clone());
        Ok(())
    }
}

/// A provider over `transport`; the transport handle stays usable by the test
pub fn provider_with(transport: &InMemoryTransport) -> AutoDnsProvider<InMemoryTransport> {
    AutoDnsProvider::with_transport(transport.clone())
}

/// A zone row the way the API returns it
pub fn row(name: &str, rtype: &str, value: &str) -> ResourceRecord {
    ResourceRecord {
        name: name.to_string(),
        ttl: 300,
        rtype: rtype.to_string(),
        value: value.to_string(),
        ..Default::default()
    }
}

pub fn ttl() -> Duration {
    Duration::from_secs(300)
}

pub fn a(name: &str, ip: &str) -> Record {
    zonesync_core::Address {
        name: name.to_string(),
        ttl: ttl(),
        ip: ip.parse().unwrap(),
    }
    .into()
}

pub fn txt(name: &str, text: &str) -> Record {
    zonesync_core::Txt {
        name: name.to_string(),
        ttl: ttl(),
        text: text.to_string(),
    }
    .into()
}

pub fn mx(name: &str, preference: u16, target: &str) -> Record {
    zonesync_core::Mx {
        name: name.to_string(),
        ttl: ttl(),
        preference,
        target: target.to_string(),
    }
    .into()
}
