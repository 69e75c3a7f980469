//! Record codec
//!
//! Bidirectional mapping between generic [`Record`]s and AutoDNS
//! [`ResourceRecord`] rows.
//!
//! - [`decode`] produces records with zone-relative names
//! - [`encode`] produces rows with absolute (zone-qualified) names
//!
//! | Type    | Row value                  | `pref`     |
//! |---------|----------------------------|------------|
//! | A/AAAA  | address                    |            |
//! | CAA     | `flags tag "value"`        |            |
//! | CNAME   | target                     |            |
//! | MX      | target                     | preference |
//! | NS      | target                     |            |
//! | SRV     | `weight port target`       | priority   |
//! | TXT     | text                       |            |
//! | HTTPS   | `priority target params`   |            |
//! | SVCB    | `priority target params`   |            |
//!
//! SRV rows carry the service and transport in the name:
//! `_service._proto.name`. Any other type is passed through the generic
//! [`Rr::parse`] path.

use std::net::IpAddr;
use std::time::Duration;

use zonesync_core::name::{absolute_name, relative_name};
use zonesync_core::record::{parse_number, split_srv_name};
use zonesync_core::{
    Address, Caa, Cname, Error, Mx, Ns, Record, Result, Rr, ServiceBinding, Srv, Txt,
};

use crate::models::ResourceRecord;

/// Convert a provider row into a generic record.
///
/// The returned record's name is relative to `zone`.
pub fn decode(row: &ResourceRecord, zone: &str) -> Result<Record> {
    let name = relative_name(&row.name, zone);
    let ttl = Duration::from_secs(u64::try_from(row.ttl).unwrap_or(0));

    let record = match row.rtype.as_str() {
        "A" | "AAAA" => {
            let ip: IpAddr = row.value.parse().map_err(|e| {
                Error::malformed_value(&row.rtype, &row.value, format!("invalid IP address: {}", e))
            })?;
            Address { name, ttl, ip }.into()
        }
        "CAA" => {
            let fields = split_fields(row, 3, "flags tag \"value\"")?;
            Caa {
                name,
                ttl,
                flags: parse_number(fields[0], "CAA", &row.value)?,
                tag: fields[1].to_string(),
                value: fields[2].trim_matches('"').to_string(),
            }
            .into()
        }
        "CNAME" => Cname {
            name,
            ttl,
            target: row.value.clone(),
        }
        .into(),
        "MX" => Mx {
            name,
            ttl,
            preference: pref_u16(row)?,
            target: row.value.clone(),
        }
        .into(),
        "NS" => Ns {
            name,
            ttl,
            target: row.value.clone(),
        }
        .into(),
        "SRV" => {
            let fields = split_fields(row, 3, "weight port target")?;
            let (service, transport, owner) = split_srv_name(&row.name)?;
            Srv {
                service,
                transport,
                name: relative_name(&owner, zone),
                ttl,
                priority: pref_u16(row)?,
                weight: parse_number(fields[0], "SRV", &row.value)?,
                port: parse_number(fields[1], "SRV", &row.value)?,
                target: fields[2].to_string(),
            }
            .into()
        }
        "TXT" => Txt {
            name,
            ttl,
            text: row.value.clone(),
        }
        .into(),
        _ => Rr {
            name,
            ttl,
            rtype: row.rtype.clone(),
            data: row.value.clone(),
        }
        .parse()?,
    };

    Ok(record)
}

/// Convert a generic record into a provider row.
///
/// The returned row's name is absolute within `zone`. Records that cannot
/// be represented fail instead of producing a placeholder row.
pub fn encode(record: &Record, zone: &str) -> Result<ResourceRecord> {
    let ttl = i64::try_from(record.ttl().as_secs()).unwrap_or(i64::MAX);

    let row = match record {
        Record::Address(r) => ResourceRecord {
            name: absolute_name(&r.name, zone),
            rtype: record.rr_type().to_string(),
            value: r.ip.to_string(),
            ..Default::default()
        },
        Record::Caa(r) => {
            if r.tag.is_empty() || r.tag.contains(char::is_whitespace) {
                return Err(Error::malformed_value("CAA", &r.tag, "tag must be a single word"));
            }
            if r.value.contains(char::is_whitespace) {
                return Err(Error::malformed_value(
                    "CAA",
                    &r.value,
                    "value cannot contain whitespace",
                ));
            }
            ResourceRecord {
                name: absolute_name(&r.name, zone),
                rtype: "CAA".to_string(),
                value: format!("{} {} \"{}\"", r.flags, r.tag, r.value),
                ..Default::default()
            }
        }
        Record::Cname(r) => ResourceRecord {
            name: absolute_name(&r.name, zone),
            rtype: "CNAME".to_string(),
            value: r.target.clone(),
            ..Default::default()
        },
        Record::Mx(r) => ResourceRecord {
            name: absolute_name(&r.name, zone),
            rtype: "MX".to_string(),
            value: r.target.clone(),
            pref: i32::from(r.preference),
            ..Default::default()
        },
        Record::Ns(r) => ResourceRecord {
            name: absolute_name(&r.name, zone),
            rtype: "NS".to_string(),
            value: r.target.clone(),
            ..Default::default()
        },
        Record::Srv(r) => {
            if r.service.is_empty() || r.transport.is_empty() {
                return Err(Error::malformed_name(
                    r.owner_name(),
                    "SRV records need both a service and a transport",
                ));
            }
            ResourceRecord {
                name: format!(
                    "_{}._{}.{}",
                    r.service,
                    r.transport,
                    absolute_name(&r.name, zone)
                ),
                rtype: "SRV".to_string(),
                value: format!("{} {} {}", r.weight, r.port, r.target),
                pref: i32::from(r.priority),
                ..Default::default()
            }
        }
        Record::Txt(r) => ResourceRecord {
            name: absolute_name(&r.name, zone),
            rtype: "TXT".to_string(),
            value: r.text.clone(),
            ..Default::default()
        },
        Record::ServiceBinding(r) => encode_service_binding(r, zone)?,
        Record::Rr(r) => {
            if r.rtype.trim().is_empty() {
                return Err(Error::conversion(format!(
                    "generic record {:?} has no type",
                    r.name
                )));
            }
            ResourceRecord {
                name: absolute_name(&r.name, zone),
                rtype: r.rtype.clone(),
                value: r.data.clone(),
                ..Default::default()
            }
        }
    };

    Ok(ResourceRecord { ttl, ..row })
}

/// Parameters are written as bare `key=value` terms, so keys and values
/// must not contain anything the reader splits or trims on.
fn encode_service_binding(r: &ServiceBinding, zone: &str) -> Result<ResourceRecord> {
    let rtype = r.rr_type();
    for (key, values) in &r.params {
        if key.is_empty() || key.contains(|c: char| c.is_whitespace() || c == '=' || c == ',') {
            return Err(Error::malformed_value(rtype, key, "invalid parameter key"));
        }
        for value in values {
            if value.is_empty() || value.contains(|c: char| c.is_whitespace() || c == ',' || c == '"') {
                return Err(Error::malformed_value(
                    rtype,
                    value,
                    "parameter values cannot be empty or contain whitespace, commas or quotes",
                ));
            }
        }
    }

    Ok(ResourceRecord {
        name: absolute_name(&r.name, zone),
        rtype: rtype.to_string(),
        value: r.data(),
        ..Default::default()
    })
}

/// Split a row value into exactly `count` whitespace-separated fields
fn split_fields<'a>(row: &'a ResourceRecord, count: usize, form: &str) -> Result<Vec<&'a str>> {
    let fields: Vec<&str> = row.value.split_whitespace().collect();
    if fields.len() != count {
        return Err(Error::malformed_value(
            &row.rtype,
            &row.value,
            format!("expected {} fields in the form '{}'", count, form),
        ));
    }
    Ok(fields)
}

fn pref_u16(row: &ResourceRecord) -> Result<u16> {
    u16::try_from(row.pref).map_err(|_| {
        Error::malformed_value(
            &row.rtype,
            &row.value,
            format!("preference {} out of range", row.pref),
        )
    })
}
