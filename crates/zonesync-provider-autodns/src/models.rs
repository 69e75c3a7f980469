//! AutoDNS zone document types
//!
//! These mirror the JSON shapes of the Domainrobot zone API. Only the
//! fields the provider reads or must write back are modelled; a zone
//! written back therefore carries exactly these fields.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Timestamp layouts the API has been seen to emit
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.3f%z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.3f%:z",
    "%Y-%m-%dT%H:%M:%S%:z",
];

/// A zone document
///
/// `created` and `updated` are read-only bookkeeping: they are accepted when
/// reading and never serialized, so a zone can be written back as fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Zone {
    #[serde(skip_serializing, deserialize_with = "deserialize_timestamp")]
    pub created: Option<DateTime<FixedOffset>>,

    #[serde(skip_serializing, deserialize_with = "deserialize_timestamp")]
    pub updated: Option<DateTime<FixedOffset>>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub origin: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub soa: Option<Soa>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub name_servers: Vec<NameServer>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub www_include: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_name_server: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    /// The entire record set of the zone; always written, even when empty
    pub resource_records: Vec<ResourceRecord>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub roid: Option<i32>,
}

/// Zone SOA settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Soa {
    #[serde(skip_serializing_if = "is_zero")]
    pub refresh: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub retry: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub expire: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub ttl: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
}

/// A name server entry of the zone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NameServer {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub ttl: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ip_addresses: Vec<String>,
}

/// One flat resource-record row of a zone
///
/// The encoding of `value` is fully determined by `rtype`. `pref` carries
/// the MX preference or SRV priority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceRecord {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub ttl: i64,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub rtype: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(skip_serializing_if = "is_zero_pref")]
    pub pref: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

/// Standard Domainrobot response envelope
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JsonResponse {
    pub status: ResponseStatus,
    pub stid: String,
    pub data: Option<serde_json::Value>,
}

/// Status block of a response envelope
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResponseStatus {
    pub code: String,
    pub text: String,
    #[serde(rename = "type")]
    pub status_type: String,
}

impl ResponseStatus {
    /// Whether the API flagged the request as failed
    pub fn is_error(&self) -> bool {
        self.status_type.eq_ignore_ascii_case("ERROR")
    }
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

fn is_zero_pref(value: &i32) -> bool {
    *value == 0
}

/// Parse a Domainrobot timestamp
///
/// Accepts `2023-12-18T15:25:18.000+0100`, the same without fraction, and
/// RFC 3339 forms.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts);
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            // zone-less timestamps are taken as UTC
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc().fixed_offset())
        })
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("null") => Ok(None),
        Some(value) => parse_timestamp(value).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("could not parse timestamp {:?}", value))
        }),
    }
}
