// # zonesync-core
//
// Core library for zonesync: a uniform record CRUD contract over DNS
// providers.
//
// ## Architecture Overview
//
// This library provides the provider-agnostic pieces:
// - **Record**: Closed set of generic DNS record variants with relative names
// - **name**: Conversion between zone-relative and absolute names
// - **DnsProvider**: Trait for get / append / set / delete against a zone
// - **ProviderRegistry**: Plugin-based registry for DNS providers
// - **Error**: Shared error taxonomy, with zone/stage context
//
// ## Design Principles
//
// 1. **Closed record model**: Codecs match exhaustively on `Record`
// 2. **Relative names**: Records never carry zone-qualified names
// 3. **Plugin-Based**: Providers are registered dynamically, no hard-coded if-else
// 4. **Surface, don't retry**: Failures propagate to the caller with context

pub mod config;
pub mod error;
pub mod name;
pub mod record;
pub mod registry;
pub mod traits;

// Re-export core types for convenience
pub use config::ProviderConfig;
pub use error::{Error, Result, Stage};
pub use record::{
    Address, Caa, Cname, Mx, Ns, Record, Rr, ServiceBinding, Srv, SvcParams, Txt,
};
pub use registry::ProviderRegistry;
pub use traits::{DnsProvider, DnsProviderFactory};
