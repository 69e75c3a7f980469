//! Core traits for zonesync
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`DnsProvider`]: Record CRUD against a provider zone
//! - [`DnsProviderFactory`]: Build providers from configuration

pub mod dns_provider;

pub use dns_provider::{DnsProvider, DnsProviderFactory, validate_records, validate_zone};
