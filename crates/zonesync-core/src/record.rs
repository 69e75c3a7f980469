//! Generic DNS record model
//!
//! [`Record`] is the provider-agnostic representation callers hand to a
//! [`DnsProvider`](crate::DnsProvider). It is a closed set of variants; every
//! provider matches on it exhaustively, so adding a record type is checked
//! at compile time in every codec.
//!
//! Names are always relative to the zone (`@` is the apex). TTLs are
//! [`Duration`]s with whole-second precision.
//!
//! [`Rr`] is the generic fallback: a type string plus zone-file style data.
//! [`Rr::parse`] turns it into a richer variant where the type is known.

use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::name::APEX;

/// SVCB/HTTPS parameters: key to values, iterated in key order
pub type SvcParams = BTreeMap<String, Vec<String>>;

/// An A or AAAA record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub name: String,
    pub ttl: Duration,
    pub ip: IpAddr,
}

/// A CNAME record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cname {
    pub name: String,
    pub ttl: Duration,
    pub target: String,
}

/// An MX record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mx {
    pub name: String,
    pub ttl: Duration,
    pub preference: u16,
    pub target: String,
}

/// An NS record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ns {
    pub name: String,
    pub ttl: Duration,
    pub target: String,
}

/// An SRV record
///
/// `name` is the owner name below the `_service._transport` labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Srv {
    pub service: String,
    pub transport: String,
    pub name: String,
    pub ttl: Duration,
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: String,
}

/// A TXT record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Txt {
    pub name: String,
    pub ttl: Duration,
    pub text: String,
}

/// A CAA record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caa {
    pub name: String,
    pub ttl: Duration,
    pub flags: u8,
    pub tag: String,
    pub value: String,
}

/// An SVCB or HTTPS record
///
/// A `scheme` of `https` denotes an HTTPS record; anything else is SVCB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceBinding {
    pub name: String,
    pub ttl: Duration,
    pub scheme: String,
    pub priority: u16,
    pub target: String,
    pub params: SvcParams,
}

/// A generic resource record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rr {
    pub name: String,
    pub ttl: Duration,
    pub rtype: String,
    pub data: String,
}

/// A DNS record of any supported type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Address(Address),
    Cname(Cname),
    Mx(Mx),
    Ns(Ns),
    Srv(Srv),
    Txt(Txt),
    Caa(Caa),
    ServiceBinding(ServiceBinding),
    Rr(Rr),
}

impl Record {
    /// The relative owner name (for SRV, including the service labels)
    pub fn name(&self) -> String {
        match self {
            Record::Srv(srv) => srv.owner_name(),
            _ => self.base_name().to_string(),
        }
    }

    fn base_name(&self) -> &str {
        match self {
            Record::Address(r) => &r.name,
            Record::Cname(r) => &r.name,
            Record::Mx(r) => &r.name,
            Record::Ns(r) => &r.name,
            Record::Srv(r) => &r.name,
            Record::Txt(r) => &r.name,
            Record::Caa(r) => &r.name,
            Record::ServiceBinding(r) => &r.name,
            Record::Rr(r) => &r.name,
        }
    }

    /// Time-to-live
    pub fn ttl(&self) -> Duration {
        match self {
            Record::Address(r) => r.ttl,
            Record::Cname(r) => r.ttl,
            Record::Mx(r) => r.ttl,
            Record::Ns(r) => r.ttl,
            Record::Srv(r) => r.ttl,
            Record::Txt(r) => r.ttl,
            Record::Caa(r) => r.ttl,
            Record::ServiceBinding(r) => r.ttl,
            Record::Rr(r) => r.ttl,
        }
    }

    /// The DNS type mnemonic
    pub fn rr_type(&self) -> &str {
        match self {
            Record::Address(r) if r.ip.is_ipv4() => "A",
            Record::Address(_) => "AAAA",
            Record::Cname(_) => "CNAME",
            Record::Mx(_) => "MX",
            Record::Ns(_) => "NS",
            Record::Srv(_) => "SRV",
            Record::Txt(_) => "TXT",
            Record::Caa(_) => "CAA",
            Record::ServiceBinding(r) => r.rr_type(),
            Record::Rr(r) => &r.rtype,
        }
    }

    /// Zone-file style record data
    pub fn data(&self) -> String {
        match self {
            Record::Address(r) => r.ip.to_string(),
            Record::Cname(r) => r.target.clone(),
            Record::Mx(r) => format!("{} {}", r.preference, r.target),
            Record::Ns(r) => r.target.clone(),
            Record::Srv(r) => format!("{} {} {} {}", r.priority, r.weight, r.port, r.target),
            Record::Txt(r) => r.text.clone(),
            Record::Caa(r) => format!("{} {} \"{}\"", r.flags, r.tag, r.value),
            Record::ServiceBinding(r) => r.data(),
            Record::Rr(r) => r.data.clone(),
        }
    }

    /// The generic form of this record
    pub fn to_rr(&self) -> Rr {
        Rr {
            name: self.name(),
            ttl: self.ttl(),
            rtype: self.rr_type().to_string(),
            data: self.data(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.name(),
            self.ttl().as_secs(),
            self.rr_type(),
            self.data()
        )
    }
}

impl Srv {
    /// `_service._transport` followed by the owner name, apex omitted
    pub fn owner_name(&self) -> String {
        if self.name.is_empty() || self.name == APEX {
            format!("_{}._{}", self.service, self.transport)
        } else {
            format!("_{}._{}.{}", self.service, self.transport, self.name)
        }
    }
}

impl ServiceBinding {
    /// `HTTPS` for the https scheme, `SVCB` otherwise
    pub fn rr_type(&self) -> &'static str {
        if self.scheme == "https" { "HTTPS" } else { "SVCB" }
    }

    /// `priority target` followed by one `key=value` term per parameter value
    pub fn data(&self) -> String {
        let mut terms = vec![self.priority.to_string(), self.target.clone()];
        for (key, values) in &self.params {
            if values.is_empty() {
                terms.push(key.clone());
            }
            for value in values {
                terms.push(format!("{}={}", key, value));
            }
        }
        terms.join(" ")
    }
}

macro_rules! impl_from_record {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Record {
                fn from(record: $variant) -> Self {
                    Record::$variant(record)
                }
            }
        )*
    };
}

impl_from_record!(Address, Cname, Mx, Ns, Srv, Txt, Caa, ServiceBinding, Rr);

impl Rr {
    /// Parse the generic record into the richest variant its type allows.
    ///
    /// Types without a dedicated variant are returned unchanged as
    /// [`Record::Rr`]. Known types with unparsable data fail with
    /// [`Error::MalformedValue`] or [`Error::MalformedName`].
    pub fn parse(&self) -> Result<Record> {
        let name = self.name.clone();
        let ttl = self.ttl;

        let record: Record = match self.rtype.to_ascii_uppercase().as_str() {
            rtype @ ("A" | "AAAA") => {
                let ip: IpAddr = self.data.trim().parse().map_err(|e| {
                    Error::malformed_value(rtype, &self.data, format!("invalid IP address: {}", e))
                })?;
                if ip.is_ipv4() != (rtype == "A") {
                    return Err(Error::malformed_value(
                        rtype,
                        &self.data,
                        "address family does not match record type",
                    ));
                }
                Address { name, ttl, ip }.into()
            }
            "CNAME" => Cname { name, ttl, target: self.data.clone() }.into(),
            "NS" => Ns { name, ttl, target: self.data.clone() }.into(),
            "TXT" => Txt { name, ttl, text: self.data.clone() }.into(),
            "MX" => {
                let fields = expect_fields(&self.data, "MX", 2, "preference target")?;
                Mx {
                    name,
                    ttl,
                    preference: parse_number(fields[0], "MX", &self.data)?,
                    target: fields[1].to_string(),
                }
                .into()
            }
            "SRV" => {
                let fields =
                    expect_fields(&self.data, "SRV", 4, "priority weight port target")?;
                let (service, transport, name) = split_srv_name(&self.name)?;
                Srv {
                    service,
                    transport,
                    name,
                    ttl,
                    priority: parse_number(fields[0], "SRV", &self.data)?,
                    weight: parse_number(fields[1], "SRV", &self.data)?,
                    port: parse_number(fields[2], "SRV", &self.data)?,
                    target: fields[3].to_string(),
                }
                .into()
            }
            "CAA" => {
                let mut parts = self.data.trim().splitn(3, char::is_whitespace);
                let (Some(flags), Some(tag), Some(value)) = (parts.next(), parts.next(), parts.next())
                else {
                    return Err(Error::malformed_value(
                        "CAA",
                        &self.data,
                        "expected 3 fields in the form 'flags tag \"value\"'",
                    ));
                };
                Caa {
                    name,
                    ttl,
                    flags: parse_number(flags, "CAA", &self.data)?,
                    tag: tag.to_string(),
                    value: value.trim().trim_matches('"').to_string(),
                }
                .into()
            }
            rtype @ ("HTTPS" | "SVCB") => {
                let (priority, target, params) = parse_svc_data(rtype, &self.data)?;
                ServiceBinding {
                    name,
                    ttl,
                    scheme: if rtype == "HTTPS" { "https".to_string() } else { String::new() },
                    priority,
                    target,
                    params,
                }
                .into()
            }
            _ => Record::Rr(self.clone()),
        };

        Ok(record)
    }
}

/// Split whitespace-separated data into exactly `count` fields
fn expect_fields<'a>(
    data: &'a str,
    rtype: &str,
    count: usize,
    form: &str,
) -> Result<Vec<&'a str>> {
    let fields: Vec<&str> = data.split_whitespace().collect();
    if fields.len() != count {
        return Err(Error::malformed_value(
            rtype,
            data,
            format!("expected {} fields in the form '{}'", count, form),
        ));
    }
    Ok(fields)
}

/// Parse one numeric field of a record value
pub fn parse_number<T>(field: &str, rtype: &str, data: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    field
        .parse()
        .map_err(|e| Error::malformed_value(rtype, data, format!("invalid number {:?}: {}", field, e)))
}

/// Split an SRV owner name `_service._proto[.name]` into its parts.
///
/// The trailing name is returned as given; a missing one becomes `@`.
pub fn split_srv_name(owner: &str) -> Result<(String, String, String)> {
    let mut parts = owner.splitn(3, '.');
    let (Some(service), Some(transport)) = (parts.next(), parts.next()) else {
        return Err(Error::malformed_name(
            owner,
            "expected '_service._proto.name' or '_service._proto'",
        ));
    };
    let name = parts
        .next()
        .filter(|rest| !rest.is_empty())
        .unwrap_or(APEX)
        .to_string();

    Ok((
        service.trim_start_matches('_').to_string(),
        transport.trim_start_matches('_').to_string(),
        name,
    ))
}

/// Parse SVCB/HTTPS data: `priority target [key[=value[,value]]]...`
///
/// Repeated keys and comma-separated lists accumulate into one entry.
pub fn parse_svc_data(rtype: &str, data: &str) -> Result<(u16, String, SvcParams)> {
    let mut fields = data.split_whitespace();
    let (Some(priority), Some(target)) = (fields.next(), fields.next()) else {
        return Err(Error::malformed_value(
            rtype,
            data,
            "expected at least 'priority target'",
        ));
    };

    let mut params = SvcParams::new();
    for term in fields {
        let (key, value) = term.split_once('=').unwrap_or((term, ""));
        if key.is_empty() {
            return Err(Error::malformed_value(rtype, data, "empty parameter key"));
        }
        let values = params.entry(key.to_string()).or_default();
        let value = value.trim_matches('"');
        values.extend(
            value
                .split(',')
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        );
    }

    Ok((parse_number(priority, rtype, data)?, target.to_string(), params))
}
