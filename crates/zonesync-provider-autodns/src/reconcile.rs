//! Record-set reconciliation
//!
//! Pure functions that turn a zone's current row list plus the caller's
//! records into the row list to write back. The provider wires them to the
//! cache and transport.
//!
//! Rows are compared by match key. A key's name is registered in both its
//! absolute and zone-relative spelling (the apex also as `@` and the empty
//! name), because zones returned by the API may use either.

use std::collections::{HashMap, HashSet};

use zonesync_core::name::{absolute_name, is_apex, relative_name, trim_dot};
use zonesync_core::{Error, Record, Result};

use crate::codec;
use crate::models::ResourceRecord;

/// Decode every row of a zone.
///
/// A row that cannot be decoded fails the whole read.
pub fn decode_all(rows: &[ResourceRecord], zone: &str) -> Result<Vec<Record>> {
    rows.iter()
        .map(|row| {
            codec::decode(row, zone).map_err(|e| {
                Error::conversion(format!(
                    "cannot decode {} record {:?} with value {:?}: {}",
                    row.rtype, row.name, row.value, e
                ))
            })
        })
        .collect()
}

/// Encode the caller's records in order
pub fn encode_all(records: &[Record], zone: &str) -> Result<Vec<ResourceRecord>> {
    records.iter().map(|record| codec::encode(record, zone)).collect()
}

/// Existing rows followed by the additions, nothing de-duplicated
pub fn append(mut existing: Vec<ResourceRecord>, additions: &[ResourceRecord]) -> Vec<ResourceRecord> {
    existing.extend_from_slice(additions);
    existing
}

/// Replace every row sharing type and name with a replacement row.
///
/// Matching ignores values. Surviving rows keep their order and the
/// replacements follow them.
pub fn set(
    existing: Vec<ResourceRecord>,
    replacements: &[ResourceRecord],
    zone: &str,
) -> Vec<ResourceRecord> {
    let mut replaced = HashSet::new();
    for row in replacements {
        for name in spellings(&row.name, zone) {
            replaced.insert(MatchKey::new(&row.rtype, &name, None));
        }
    }

    let mut rows: Vec<ResourceRecord> = existing
        .into_iter()
        .filter(|row| !replaced.contains(&MatchKey::new(&row.rtype, &row.name, None)))
        .collect();
    rows.extend_from_slice(replacements);
    rows
}

/// Result of [`delete`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deletion {
    /// Rows to write back
    pub rows: Vec<ResourceRecord>,
    /// Indices of the targets that matched at least one row, ascending
    pub matched: Vec<usize>,
}

/// Remove every row equal in type, name and value to one of the targets.
///
/// Values are compared exactly. Surviving rows keep their order.
pub fn delete(existing: Vec<ResourceRecord>, targets: &[ResourceRecord], zone: &str) -> Deletion {
    let mut wanted: HashMap<MatchKey, Vec<usize>> = HashMap::new();
    for (index, row) in targets.iter().enumerate() {
        for name in spellings(&row.name, zone) {
            wanted
                .entry(MatchKey::new(&row.rtype, &name, Some(&row.value)))
                .or_default()
                .push(index);
        }
    }

    let mut matched = vec![false; targets.len()];
    let rows = existing
        .into_iter()
        .filter(|row| {
            match wanted.get(&MatchKey::new(&row.rtype, &row.name, Some(&row.value))) {
                Some(indices) => {
                    for &index in indices {
                        matched[index] = true;
                    }
                    false
                }
                None => true,
            }
        })
        .collect();

    Deletion {
        rows,
        matched: matched
            .iter()
            .enumerate()
            .filter_map(|(index, hit)| hit.then_some(index))
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MatchKey {
    rtype: String,
    name: String,
    value: Option<String>,
}

impl MatchKey {
    fn new(rtype: &str, name: &str, value: Option<&str>) -> Self {
        Self {
            rtype: rtype.to_ascii_uppercase(),
            name: normalize(name),
            value: value.map(str::to_string),
        }
    }
}

fn normalize(name: &str) -> String {
    trim_dot(name).to_ascii_lowercase()
}

/// Every spelling under which a row for `name` may appear in `zone`
fn spellings(name: &str, zone: &str) -> Vec<String> {
    let relative = relative_name(name, zone);
    let mut names = vec![absolute_name(&relative, zone), relative.clone()];
    if is_apex(&relative, zone) {
        names.push(String::new());
    }
    names
}
