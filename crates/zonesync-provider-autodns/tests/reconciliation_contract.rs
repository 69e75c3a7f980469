//! Contract Test: Record-Set Reconciliation
//!
//! Verifies the observable semantics of the four record operations against
//! a whole-zone store.
//!
//! Constraints verified:
//! - Append adds rows after the existing ones, in caller order
//! - Set replaces every row of the same type and name, whatever its value
//! - Delete removes only exact type, name and value matches
//! - Unrelated rows and zone metadata survive every write
//!
//! If this test fails, callers can lose or duplicate records.

mod common;

use common::*;
use pretty_assertions::assert_eq;
use zonesync_core::{DnsProvider, Record};
use zonesync_provider_autodns::models::Soa;

#[tokio::test]
async fn get_returns_relative_records() {
    let transport = InMemoryTransport::with_rows(vec![
        row("www.example.com", "A", "192.0.2.1"),
        row("", "MX", "mail.example.com"),
        row("_sip._tcp.example.com", "SRV", "5 5060 sip.example.com"),
    ]);
    let provider = provider_with(&transport);

    let records = provider.get_records("example.com.").await.unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0], a("www", "192.0.2.1"));
    assert_eq!(records[1].name(), "@");
    assert_eq!(records[2].name(), "_sip._tcp");
    assert_eq!(transport.write_call_count(), 0);
}

#[tokio::test]
async fn append_writes_existing_rows_then_new_ones() {
    let transport = InMemoryTransport::with_rows(vec![row("www", "A", "192.0.2.1")]);
    let provider = provider_with(&transport);

    let added = provider
        .append_records(ZONE, &[a("www", "192.0.2.2"), a("api", "192.0.2.3")])
        .await
        .unwrap();

    assert_eq!(added, vec![a("www", "192.0.2.2"), a("api", "192.0.2.3")]);
    assert_eq!(
        transport.rows(ZONE),
        vec![
            row("www", "A", "192.0.2.1"),
            row("www.example.com", "A", "192.0.2.2"),
            row("api.example.com", "A", "192.0.2.3"),
        ]
    );
}

#[tokio::test]
async fn append_does_not_deduplicate() {
    let transport = InMemoryTransport::with_rows(vec![]);
    let provider = provider_with(&transport);

    provider.append_records(ZONE, &[txt("t", "same")]).await.unwrap();
    provider.append_records(ZONE, &[txt("t", "same")]).await.unwrap();

    assert_eq!(transport.rows(ZONE).len(), 2);
}

#[tokio::test]
async fn sequential_appends_equal_one_combined_append() {
    let stepwise = InMemoryTransport::with_rows(vec![row("www", "A", "192.0.2.1")]);
    let provider = provider_with(&stepwise);
    provider.append_records(ZONE, &[txt("a", "1")]).await.unwrap();
    provider.append_records(ZONE, &[txt("b", "2")]).await.unwrap();

    let combined = InMemoryTransport::with_rows(vec![row("www", "A", "192.0.2.1")]);
    let provider = provider_with(&combined);
    provider
        .append_records(ZONE, &[txt("a", "1"), txt("b", "2")])
        .await
        .unwrap();

    assert_eq!(stepwise.rows(ZONE), combined.rows(ZONE));
}

#[tokio::test]
async fn set_replaces_txt_records_with_the_same_name() {
    let transport = InMemoryTransport::with_rows(vec![
        row("_acme-challenge", "TXT", "old-token-1"),
        row("_acme-challenge.example.com", "TXT", "old-token-2"),
        row("www", "TXT", "unrelated"),
        row("_acme-challenge", "A", "192.0.2.9"),
    ]);
    let provider = provider_with(&transport);

    let written = provider
        .set_records(ZONE, &[txt("_acme-challenge", "new-token")])
        .await
        .unwrap();

    assert_eq!(written, vec![txt("_acme-challenge", "new-token")]);
    assert_eq!(
        transport.rows(ZONE),
        vec![
            row("www", "TXT", "unrelated"),
            row("_acme-challenge", "A", "192.0.2.9"),
            row("_acme-challenge.example.com", "TXT", "new-token"),
        ]
    );
}

#[tokio::test]
async fn set_twice_yields_the_same_zone() {
    let transport = InMemoryTransport::with_rows(vec![
        row("", "MX", "old.example.com"),
        row("www", "A", "192.0.2.1"),
    ]);
    let provider = provider_with(&transport);
    let records = [mx("@", 10, "mx1.example.com"), mx("@", 20, "mx2.example.com")];

    provider.set_records(ZONE, &records).await.unwrap();
    let once = transport.rows(ZONE);
    provider.set_records(ZONE, &records).await.unwrap();

    assert_eq!(transport.rows(ZONE), once);
    assert_eq!(once.len(), 3);
    assert_eq!(once[1].pref, 10);
    assert_eq!(once[2].pref, 20);
}

#[tokio::test]
async fn delete_removes_exact_matches_only() {
    let transport = InMemoryTransport::with_rows(vec![
        row("www", "A", "192.0.2.1"),
        row("www", "A", "192.0.2.2"),
        row("www.example.com", "A", "192.0.2.1"),
    ]);
    let provider = provider_with(&transport);

    let deleted = provider
        .delete_records(ZONE, &[a("www", "192.0.2.1"), a("www", "203.0.113.1")])
        .await
        .unwrap();

    assert_eq!(deleted, vec![a("www", "192.0.2.1")]);
    assert_eq!(transport.rows(ZONE), vec![row("www", "A", "192.0.2.2")]);
}

#[tokio::test]
async fn delete_without_match_leaves_zone_unchanged() {
    let rows = vec![row("www", "A", "192.0.2.1"), row("mail", "MX", "mx.example.com")];
    let transport = InMemoryTransport::with_rows(rows.clone());
    let provider = provider_with(&transport);

    let deleted = provider
        .delete_records(ZONE, &[txt("www", "absent")])
        .await
        .unwrap();

    let expected: Vec<Record> = Vec::new();
    assert_eq!(deleted, expected);
    assert_eq!(transport.rows(ZONE), rows);
    // the document is still written back whole
    assert_eq!(transport.write_call_count(), 1);
}

#[tokio::test]
async fn writes_preserve_zone_metadata() {
    let transport = InMemoryTransport::new();
    let document = zonesync_provider_autodns::Zone {
        origin: ZONE.to_string(),
        soa: Some(Soa {
            refresh: 43200,
            retry: 7200,
            expire: 1209600,
            ttl: 86400,
            email: "hostmaster@example.com".to_string(),
        }),
        virtual_name_server: Some("a.ns14.net".to_string()),
        roid: Some(7),
        resource_records: vec![row("www", "A", "192.0.2.1")],
        ..Default::default()
    };
    transport.put_document(ZONE, document.clone());
    let provider = provider_with(&transport);

    provider.append_records(ZONE, &[txt("t", "x")]).await.unwrap();

    assert_eq!(transport.writes().len(), 1);
    let (zone, written) = transport.writes().pop().unwrap();
    assert_eq!(zone, ZONE);
    assert_eq!(written.soa, document.soa);
    assert_eq!(written.virtual_name_server, document.virtual_name_server);
    assert_eq!(written.roid, Some(7));
    assert_eq!(written.resource_records.len(), 2);
}

#[tokio::test]
async fn written_records_read_back_unchanged() {
    let transport = InMemoryTransport::with_rows(vec![]);
    let provider = provider_with(&transport);
    let records = vec![
        a("@", "192.0.2.1"),
        a("www", "2001:db8::1"),
        txt("www", "hello world"),
        mx("@", 10, "mail.example.com"),
    ];

    provider.append_records(ZONE, &records).await.unwrap();

    assert_eq!(provider.get_records(ZONE).await.unwrap(), records);
}
