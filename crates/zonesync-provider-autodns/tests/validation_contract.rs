//! Contract Test: Input Validation and Conversion Failures
//!
//! Constraints verified:
//! - Empty zone names and empty record lists fail before any network access
//! - Records that cannot be encoded fail the operation without a write
//! - Rows that cannot be decoded fail the whole read, naming the row
//!
//! If this test fails, bad input can reach the provider or be silently
//! dropped.

mod common;

use std::time::Duration;

use common::*;
use tokio_test::assert_err;
use zonesync_core::{Caa, DnsProvider, Record, Rr, Stage};

#[tokio::test]
async fn empty_zone_is_rejected_without_network_access() {
    let transport = InMemoryTransport::with_rows(vec![]);
    let provider = provider_with(&transport);
    let records = [txt("t", "x")];

    assert!(assert_err!(provider.get_records("").await).is_validation());
    assert!(assert_err!(provider.append_records("", &records).await).is_validation());
    assert!(assert_err!(provider.set_records(".", &records).await).is_validation());
    assert!(assert_err!(provider.delete_records("", &records).await).is_validation());

    assert_eq!(transport.fetch_call_count(), 0);
    assert_eq!(transport.write_call_count(), 0);
}

#[tokio::test]
async fn empty_record_list_is_rejected_without_network_access() {
    let transport = InMemoryTransport::with_rows(vec![]);
    let provider = provider_with(&transport);

    assert!(assert_err!(provider.append_records(ZONE, &[]).await).is_validation());
    assert!(assert_err!(provider.set_records(ZONE, &[]).await).is_validation());
    assert!(assert_err!(provider.delete_records(ZONE, &[]).await).is_validation());

    assert_eq!(transport.fetch_call_count(), 0);
    assert_eq!(transport.write_call_count(), 0);
}

#[tokio::test]
async fn unencodable_record_fails_without_write() {
    let transport = InMemoryTransport::with_rows(vec![row("www", "A", "192.0.2.1")]);
    let provider = provider_with(&transport);
    let untyped: Record = Rr {
        name: "x".to_string(),
        ttl: Duration::from_secs(60),
        rtype: String::new(),
        data: "y".to_string(),
    }
    .into();

    let err = assert_err!(provider.append_records(ZONE, &[txt("ok", "1"), untyped]).await);

    assert_eq!(err.stage(), Some(Stage::Encode));
    assert!(err.is_conversion());
    assert_eq!(transport.write_call_count(), 0);
    assert_eq!(transport.rows(ZONE).len(), 1);
}

#[tokio::test]
async fn malformed_caa_value_fails_without_write() {
    let transport = InMemoryTransport::with_rows(vec![]);
    let provider = provider_with(&transport);
    let caa: Record = Caa {
        name: "@".to_string(),
        ttl: ttl(),
        flags: 0,
        tag: "iodef".to_string(),
        value: "mailto: ops@example.com".to_string(),
    }
    .into();

    let err = assert_err!(provider.set_records(ZONE, &[caa]).await);

    assert!(err.is_malformed());
    assert_eq!(transport.write_call_count(), 0);
}

#[tokio::test]
async fn undecodable_row_fails_the_whole_read() {
    let transport = InMemoryTransport::with_rows(vec![
        row("www", "A", "192.0.2.1"),
        row("", "CAA", "0 issue"),
    ]);
    let provider = provider_with(&transport);

    let err = assert_err!(provider.get_records(ZONE).await);

    assert_eq!(err.stage(), Some(Stage::Decode));
    assert!(err.is_conversion());
    assert!(err.to_string().contains("CAA"));
}

#[tokio::test]
async fn unknown_types_pass_through_generically() {
    let transport = InMemoryTransport::with_rows(vec![row("host", "PTR", "target.example.com")]);
    let provider = provider_with(&transport);

    let records = provider.get_records(ZONE).await.unwrap();

    assert_eq!(
        records,
        vec![Record::from(Rr {
            name: "host".to_string(),
            ttl: ttl(),
            rtype: "PTR".to_string(),
            data: "target.example.com".to_string(),
        })]
    );
}
